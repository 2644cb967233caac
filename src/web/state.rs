//! Service state threaded through the request handler
//!
//! Computed once at startup. `Unavailable` is permanent for the process
//! lifetime; there is no retry.

use crate::config::DashboardConfig;
use crate::nutrition::ErrorKind;
use crate::pipeline::{self, Artifact, ChartArtifact, DashboardViews, PipelineOutput};

/// Reference to a published chart, relative to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub key: &'static str,
    pub title: &'static str,
    pub filename: &'static str,
}

impl ArtifactRef {
    /// Path of the image as referenced from the page
    pub fn src(&self) -> String {
        format!("static/{}", self.filename)
    }
}

impl From<Artifact> for ArtifactRef {
    fn from(artifact: Artifact) -> Self {
        Self {
            key: artifact.key(),
            title: artifact.title(),
            filename: artifact.filename(),
        }
    }
}

/// Data loaded and every chart rendered
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub views: DashboardViews,
    pub artifacts: Vec<ChartArtifact>,
}

impl Dashboard {
    pub fn artifact_refs(&self) -> Vec<ArtifactRef> {
        self.artifacts.iter().map(|a| a.artifact.into()).collect()
    }
}

impl From<PipelineOutput> for Dashboard {
    fn from(output: PipelineOutput) -> Self {
        Self {
            views: output.views,
            artifacts: output.artifacts,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ServiceState {
    Ready(Dashboard),
    Unavailable { kind: ErrorKind, reason: String },
}

impl ServiceState {
    /// Run the startup pipeline and settle the state for the process lifetime
    pub fn initialize(config: &DashboardConfig) -> Self {
        match pipeline::run(config) {
            Ok(output) => {
                tracing::info!("dashboard ready");
                ServiceState::Ready(output.into())
            }
            Err(e) => {
                let kind = e.kind();
                match kind {
                    ErrorKind::MissingInputFile => {
                        tracing::error!(error = %e, "dataset not found, serving unavailable page")
                    }
                    ErrorKind::ProcessingError => {
                        tracing::error!(error = %e, "failed to process data or render charts, serving unavailable page")
                    }
                }
                ServiceState::Unavailable {
                    kind,
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ServiceState::Ready(_))
    }

    /// Artifacts the page may reference; empty unless ready
    pub fn artifact_refs(&self) -> Vec<ArtifactRef> {
        match self {
            ServiceState::Ready(dashboard) => dashboard.artifact_refs(),
            ServiceState::Unavailable { .. } => Vec::new(),
        }
    }
}
