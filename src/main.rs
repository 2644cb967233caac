//! Nutrition Dashboard - Main entry point
//!
//! Startup is a blocking phase: the dataset is loaded, aggregated and
//! rendered to PNG files before the listener binds. The server then answers
//! `GET /` from that fixed state.

use std::path::Path;

use anyhow::Context;
use nutrition_dashboard::config::{DashboardConfig, CONFIG_FILE};
use nutrition_dashboard::web::{self, ServiceState};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Nutrition Dashboard v{}", env!("CARGO_PKG_VERSION"));

    let config = DashboardConfig::load(Path::new(CONFIG_FILE))
        .context("failed to load dashboard configuration")?;

    let state = ServiceState::initialize(&config);
    if state.is_ready() {
        println!("✓ All charts generated in {}", config.output_dir.display());
    } else {
        println!("✗ Startup failed, serving the unavailable page");
    }

    let app = web::app(state, &config.output_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "dashboard listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
