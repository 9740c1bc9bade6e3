//! Per-sample deviation results and their classifications

use serde::{Deserialize, Serialize};

/// Bullseye zone for angular deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationZone {
    Green = 0,
    Amber = 1,
    Red = 2,
}

impl std::fmt::Display for DeviationZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviationZone::Green => write!(f, "GREEN"),
            DeviationZone::Amber => write!(f, "AMBER"),
            DeviationZone::Red => write!(f, "RED"),
        }
    }
}

/// Whether a summary metric is inside its configured target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    OnTarget,
    OffTarget,
    /// The metric could not be derived (e.g. angular deviation of a single sample)
    #[default]
    Unknown,
}

/// Deviation of the actual path from the planned path at one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationResult {
    pub index: usize,
    /// Horizontal (x, y) offset from the plan, centimetres, always >= 0
    pub lateral_deviation_cm: f64,
    /// Angle between planned and actual tangents, degrees.
    /// `None` for the first sample and wherever a tangent has zero length.
    pub angular_deviation_deg: Option<f64>,
    pub angular_zone: Option<DeviationZone>,
    /// `lateral_deviation_cm > lateral_threshold_cm` (strict)
    pub exceeds_threshold: bool,
}
