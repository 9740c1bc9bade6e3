//! One-call composition for the presentation layer: analyze, summarise, build scene.

use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::deviation::{analyze, summarize, DeviationSummary};
use crate::scene::{build_scene, SceneDescription};
use crate::types::{DeviationResult, DirectionalReadout, Position3D, TrajectoryResult};

/// Everything the dashboard needs for one trajectory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationReport {
    pub deviations: Vec<DeviationResult>,
    pub summary: DeviationSummary,
    pub scene: SceneDescription,
}

/// Run the analyzer and scene builder over one snapshot.
///
/// Positions must already be in the elevation convention.
pub fn render_report(
    planned: &[Position3D],
    actual: &[Position3D],
    config: &DashboardConfig,
    readout: Option<&DirectionalReadout>,
) -> TrajectoryResult<DeviationReport> {
    let deviations = analyze(planned, actual, &config.thresholds)?;
    let summary = summarize(&deviations, &config.thresholds, readout)?;
    let scene = build_scene(planned, actual, &deviations, &config.colors, &config.scene)?;
    Ok(DeviationReport {
        deviations,
        summary,
        scene,
    })
}
