//! # Integration Tests for the dashboard page
//!
//! Drives the router with `oneshot` for both service states. The ready state
//! is assembled from computed views without rendering images.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use nutrition_dashboard::config::DashboardConfig;
use nutrition_dashboard::nutrition::{Dataset, ErrorKind, FoodRecord, NutrientValues};
use nutrition_dashboard::pipeline::{artifact_path, Artifact, ChartArtifact, DashboardViews};
use nutrition_dashboard::web::{self, Dashboard, ServiceState};

fn food(name: &str, calories: f64, fat: f64) -> FoodRecord {
    FoodRecord::new(
        name,
        NutrientValues {
            calories,
            fat,
            carbohydrate: 3.0,
            proteins: 4.0,
        },
    )
}

/// Two Abon rows (200, 220), two Ayam rows (150, 170), two others
fn fixture() -> Dataset {
    Dataset::from_records(&[
        food("Abon Sapi", 200.0, 10.0),
        food("Ayam Goreng", 150.0, 8.0),
        food("Abon Ikan", 220.0, 12.0),
        food("Tahu", 80.0, 5.0),
        food("Ayam Bakar", 170.0, 6.0),
        food("Tahu", 76.0, 7.0),
    ])
    .unwrap()
}

fn ready_state(static_dir: &std::path::Path) -> ServiceState {
    let config = DashboardConfig::default();
    let views = DashboardViews::compute(&fixture(), &config).unwrap();
    let artifacts = Artifact::ALL
        .iter()
        .map(|&artifact| {
            let (width, height) = artifact.default_size();
            ChartArtifact {
                artifact,
                path: artifact_path(static_dir, artifact),
                width,
                height,
            }
        })
        .collect();
    ServiceState::Ready(Dashboard { views, artifacts })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_ready_page_lists_all_charts() {
    let dir = tempfile::tempdir().unwrap();
    let app = web::app(ready_state(dir.path()), dir.path());

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    for src in [
        "static/perbandingan_abon_ayam.png",
        "static/top5_kalori.png",
        "static/perbandingan_5_makanan_pie.png",
        "static/top5_lemak.png",
    ] {
        assert!(body.contains(src), "page is missing {}", src);
    }
    assert!(!body.contains("Data unavailable"));
}

#[tokio::test]
async fn test_ready_page_shows_comparison_means() {
    let dir = tempfile::tempdir().unwrap();
    let app = web::app(ready_state(dir.path()), dir.path());

    let (_, body) = get(app, "/").await;
    assert!(body.contains("<td>Abon</td><td>2</td><td>210.00</td>"));
    assert!(body.contains("<td>Ayam</td><td>2</td><td>160.00</td>"));
}

#[tokio::test]
async fn test_missing_input_still_serves_page() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig {
        input_path: dir.path().join("nutrition.csv"),
        output_dir: dir.path().join("static"),
        ..Default::default()
    };

    let state = ServiceState::initialize(&config);
    assert!(matches!(
        state,
        ServiceState::Unavailable {
            kind: ErrorKind::MissingInputFile,
            ..
        }
    ));

    let app = web::app(state, &config.output_dir);
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Data unavailable"));
    assert!(!body.contains("<img"));
}

#[tokio::test]
async fn test_static_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("top5_lemak.png"), b"not really a png").unwrap();
    let app = web::app(ready_state(dir.path()), dir.path());

    let (status, body) = get(app.clone(), "/static/top5_lemak.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "not really a png");

    let (status, _) = get(app, "/static/top5_kalori.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
