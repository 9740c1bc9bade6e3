//! Scalar metrics for the dashboard cards
//!
//! Reduces a deviation sequence to the numbers the status widgets show:
//! current and worst lateral deviation, current angular deviation and
//! their on/off-target status, plus the instrument readout carried through.

use serde::{Deserialize, Serialize};

use super::exceeds_lateral_threshold;
use crate::config::ThresholdConfig;
use crate::types::{
    DeviationResult, DeviationZone, DirectionalReadout, TargetStatus, TrajectoryError,
    TrajectoryResult,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationSummary {
    pub sample_count: usize,
    /// Lateral deviation at the deepest sample (cm)
    pub latest_lateral_cm: f64,
    pub max_lateral_cm: f64,
    pub max_lateral_index: usize,
    pub mean_lateral_cm: f64,
    pub samples_beyond_threshold: usize,
    /// Most recent defined angular deviation (degrees)
    pub latest_angular_deg: Option<f64>,
    pub latest_angular_zone: Option<DeviationZone>,
    pub max_angular_deg: Option<f64>,
    pub lateral_status: TargetStatus,
    pub angular_status: TargetStatus,
    pub lateral_target_cm: f64,
    pub angular_target_deg: f64,
    /// Instrument scalars (dogleg severity etc.), passed through untouched
    pub readout: Option<DirectionalReadout>,
}

/// Summarise a deviation sequence against the configured targets.
pub fn summarize(
    deviations: &[DeviationResult],
    config: &ThresholdConfig,
    readout: Option<&DirectionalReadout>,
) -> TrajectoryResult<DeviationSummary> {
    config.validate()?;
    let Some(latest) = deviations.last() else {
        return Err(TrajectoryError::EmptyInput { series: "deviations" });
    };
    if let Some(r) = readout {
        r.validate()?;
    }

    // First maximum wins on ties so the index is stable
    let (max_lateral_index, max_lateral_cm) = deviations
        .iter()
        .map(|d| (d.index, d.lateral_deviation_cm))
        .fold((latest.index, f64::NEG_INFINITY), |best, cur| {
            if cur.1 > best.1 { cur } else { best }
        });

    #[allow(clippy::cast_precision_loss)]
    let mean_lateral_cm = deviations
        .iter()
        .map(|d| d.lateral_deviation_cm)
        .sum::<f64>()
        / deviations.len() as f64;

    let latest_angular = deviations
        .iter()
        .rev()
        .find_map(|d| d.angular_deviation_deg.map(|deg| (deg, d.angular_zone)));

    let max_angular_deg = deviations
        .iter()
        .filter_map(|d| d.angular_deviation_deg)
        .reduce(f64::max);

    let lateral_status = if exceeds_lateral_threshold(latest.lateral_deviation_cm, config) {
        TargetStatus::OffTarget
    } else {
        TargetStatus::OnTarget
    };

    let angular_status = match latest_angular {
        Some((deg, _)) if deg > config.angular_threshold_deg => TargetStatus::OffTarget,
        Some(_) => TargetStatus::OnTarget,
        None => TargetStatus::Unknown,
    };

    Ok(DeviationSummary {
        sample_count: deviations.len(),
        latest_lateral_cm: latest.lateral_deviation_cm,
        max_lateral_cm,
        max_lateral_index,
        mean_lateral_cm,
        samples_beyond_threshold: deviations.iter().filter(|d| d.exceeds_threshold).count(),
        latest_angular_deg: latest_angular.map(|(deg, _)| deg),
        latest_angular_zone: latest_angular.and_then(|(_, zone)| zone),
        max_angular_deg,
        lateral_status,
        angular_status,
        lateral_target_cm: config.lateral_threshold_cm,
        angular_target_deg: config.angular_threshold_deg,
        readout: readout.copied(),
    })
}
