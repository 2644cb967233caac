//! Dashboard configuration
//!
//! Loaded from an optional `dashboard_config.json` in the working directory.
//! Every field has a default, so a missing file (or a partial one) is valid.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::nutrition::{CategoryPattern, NutritionError, Result};

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "dashboard_config.json";

/// Chart dimension - either explicit pixels or "auto" (per-chart default)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlotDimension {
    #[default]
    Auto,
    Pixels(u32),
}

impl PlotDimension {
    /// Parse from string property value
    ///
    /// Valid formats:
    /// - "auto" or "" (empty) → Auto
    /// - "1500" → Pixels(1500) if in valid range [100, 10000]
    pub fn parse(value: &str, default: PlotDimension) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return PlotDimension::Auto;
        }

        match trimmed.parse::<u32>() {
            Ok(px) if (100..=10000).contains(&px) => PlotDimension::Pixels(px),
            Ok(px) => {
                tracing::warn!(
                    "Plot dimension {} out of valid range [100-10000], using default: {:?}",
                    px,
                    default
                );
                default
            }
            Err(_) => {
                tracing::warn!(
                    "Invalid plot dimension '{}', using default: {:?}",
                    trimmed,
                    default
                );
                default
            }
        }
    }

    /// Resolve to actual pixels, `auto_px` being the chart's own default
    pub fn resolve(&self, auto_px: u32) -> u32 {
        match self {
            PlotDimension::Pixels(px) => *px,
            PlotDimension::Auto => auto_px,
        }
    }
}

impl<'de> Deserialize<'de> for PlotDimension {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(PlotDimension::parse(&raw, PlotDimension::Auto))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV dataset read at startup
    pub input_path: PathBuf,

    /// Directory the four chart images are written to (served under /static)
    pub output_dir: PathBuf,

    /// Listen address of the page server
    pub bind_addr: String,

    /// Row count of the two ranking charts
    pub top_n: usize,

    /// Categories compared in the grouped bar chart
    pub categories: Vec<CategoryPattern>,

    /// Exact food names summed for the donut chart
    pub popular_foods: Vec<String>,

    /// Width override applied to every chart
    pub plot_width: PlotDimension,

    /// Height override applied to every chart
    pub plot_height: PlotDimension,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("nutrition.csv"),
            output_dir: PathBuf::from("static"),
            bind_addr: "127.0.0.1:5000".to_string(),
            top_n: 5,
            categories: vec![
                CategoryPattern::new("Abon", "Abon"),
                CategoryPattern::new("Ayam", "Ayam"),
            ],
            popular_foods: ["Abon", "Ayam", "Telur", "Ikan", "Tahu"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            plot_width: PlotDimension::Auto,
            plot_height: PlotDimension::Auto,
        }
    }
}

impl DashboardConfig {
    /// Load configuration, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no configuration file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(NutritionError::Config(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| NutritionError::Config(format!("failed to parse configuration: {}", e)))
    }

    /// Resolve a chart's (width, height) from its default size
    pub fn resolve_dimensions(&self, default_size: (u32, u32)) -> (u32, u32) {
        (
            self.plot_width.resolve(default_size.0),
            self.plot_height.resolve(default_size.1),
        )
    }
}
