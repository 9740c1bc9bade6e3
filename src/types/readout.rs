//! Instrument-supplied directional scalars
//!
//! Inclination, azimuth, toolface and dogleg severity come from survey
//! instrumentation upstream. They are carried alongside the geometric
//! results for display and are never derived or altered here.

use serde::{Deserialize, Serialize};

use super::{TrajectoryError, TrajectoryResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalReadout {
    pub inclination_deg: f64,
    pub azimuth_deg: f64,
    pub toolface_deg: f64,
    /// Degrees per 30 m of hole
    pub dogleg_severity_deg_per_30m: f64,
    pub true_vertical_depth_m: f64,
}

impl DirectionalReadout {
    /// Reject non-finite scalars.
    pub fn validate(&self) -> TrajectoryResult<()> {
        let fields = [
            ("inclination_deg", self.inclination_deg),
            ("azimuth_deg", self.azimuth_deg),
            ("toolface_deg", self.toolface_deg),
            ("dogleg_severity_deg_per_30m", self.dogleg_severity_deg_per_30m),
            ("true_vertical_depth_m", self.true_vertical_depth_m),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some(&(field, _)) => Err(TrajectoryError::InvalidValue {
                series: "readout",
                index: 0,
                field,
            }),
            None => Ok(()),
        }
    }
}
