//! DrillSense: Directional Drilling Trajectory Deviation
//!
//! Compares a planned borehole trajectory with the measured one and builds
//! the 3D view the monitoring dashboard renders.
//!
//! ## Architecture
//!
//! - **Deviation Analyzer**: per-sample lateral/angular deviation and threshold classification
//! - **Scene Builder**: declarative 3D scene with threshold-driven colouring
//! - **Config**: per-well thresholds, colours and fixed scene framing (TOML)
//!
//! Both core components are pure: every snapshot produces fresh values.

pub mod config;
pub mod types;
pub mod deviation;
pub mod scene;
pub mod report;

// Re-export configuration
pub use config::{ColorPolicy, DashboardConfig, SceneFraming, ThresholdConfig};

// Re-export commonly used types
pub use types::{
    DepthConvention, DeviationResult, DeviationZone, DirectionalReadout, PathSample,
    Position3D, TargetStatus, Trajectory, TrajectoryError, TrajectoryResult,
};

// Re-export core operations
pub use deviation::{analyze, summarize, DeviationSummary};
pub use scene::{build_scene, SceneDescription};
pub use report::{render_report, DeviationReport};
