//! Nutrition Dashboard - Render-only entry point
//!
//! Runs the startup pipeline once and exits, without serving the page.
//! Unlike the server, any failure is fatal and yields a non-zero exit code.
//!
//! Usage:
//! ```bash
//! cargo run --bin render
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use nutrition_dashboard::config::{DashboardConfig, CONFIG_FILE};
use nutrition_dashboard::pipeline;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let start = Instant::now();
    println!("=== Nutrition Dashboard - Render Only ===\n");

    let config = DashboardConfig::load(Path::new(CONFIG_FILE))
        .context("failed to load dashboard configuration")?;

    println!("Configuration:");
    println!("  Input: {}", config.input_path.display());
    println!("  Output: {}", config.output_dir.display());
    println!("  Top N: {}", config.top_n);
    println!();

    let output = pipeline::run(&config).with_context(|| {
        format!(
            "failed to generate charts from {}",
            config.input_path.display()
        )
    })?;

    for artifact in &output.artifacts {
        println!(
            "✓ Saved {} ({}×{})",
            artifact.path.display(),
            artifact.width,
            artifact.height
        );
    }

    println!(
        "\n=== Render Complete ({:.3}s) ===",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
