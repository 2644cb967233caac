//! Page server
//!
//! | Route          | Handler                  |
//! |----------------|--------------------------|
//! | `GET /`        | dashboard page (HTML)    |
//! | `GET /static/*`| rendered chart images    |
//!
//! The handler only reads the startup state; nothing is computed per request.

pub mod page;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use state::{ArtifactRef, Dashboard, ServiceState};

/// Assemble the router around an already-initialized state
pub fn app(state: ServiceState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(home))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// GET /, always 200; the body says so when the data is unavailable
async fn home(State(state): State<Arc<ServiceState>>) -> Html<String> {
    Html(page::render_page(&state))
}
