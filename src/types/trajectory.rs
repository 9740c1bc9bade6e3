//! Borehole positions and index-aligned planned/actual trajectories

use serde::{Deserialize, Serialize};

use super::{Axis, TrajectoryError, TrajectoryResult};

/// A borehole position in metres.
///
/// `x`/`y` are the lateral axes. `z` is elevation relative to the surface
/// datum: deeper positions have more negative `z`. Inputs that count depth
/// as a positive number must go through [`normalize_positions`] first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Distance between the (x, y) projections, in metres. Depth is ignored.
    pub fn lateral_distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// First non-finite axis, if any.
    pub fn non_finite_axis(self) -> Option<Axis> {
        if !self.x.is_finite() {
            Some(Axis::X)
        } else if !self.y.is_finite() {
            Some(Axis::Y)
        } else if !self.z.is_finite() {
            Some(Axis::Z)
        } else {
            None
        }
    }
}

impl std::ops::Sub for Position3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// How an incoming position sequence encodes its z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthConvention {
    /// z is elevation, more negative = deeper (the project-wide convention)
    #[default]
    Elevation,
    /// z counts depth below the datum as a positive number
    PositiveDepth,
}

/// Convert a sequence to the elevation convention.
///
/// Returns a new vector; the input is left untouched.
pub fn normalize_positions(
    positions: &[Position3D],
    convention: DepthConvention,
) -> Vec<Position3D> {
    match convention {
        DepthConvention::Elevation => positions.to_vec(),
        DepthConvention::PositiveDepth => positions
            .iter()
            .map(|p| Position3D::new(p.x, p.y, -p.z))
            .collect(),
    }
}

/// Check that both sequences are non-empty, equally long and fully finite.
///
/// Emptiness is reported before a length mismatch so that `([], [p])` names
/// the empty series rather than the mismatch.
pub fn validate_aligned(planned: &[Position3D], actual: &[Position3D]) -> TrajectoryResult<()> {
    if planned.is_empty() {
        return Err(TrajectoryError::EmptyInput { series: "planned" });
    }
    if actual.is_empty() {
        return Err(TrajectoryError::EmptyInput { series: "actual" });
    }
    if planned.len() != actual.len() {
        return Err(TrajectoryError::ShapeMismatch {
            left: "planned",
            left_len: planned.len(),
            right: "actual",
            right_len: actual.len(),
        });
    }
    check_finite("planned", planned)?;
    check_finite("actual", actual)
}

fn check_finite(series: &'static str, positions: &[Position3D]) -> TrajectoryResult<()> {
    positions
        .iter()
        .enumerate()
        .find_map(|(index, p)| p.non_finite_axis().map(|axis| (index, axis)))
        .map_or(Ok(()), |(index, axis)| {
            Err(TrajectoryError::InvalidValue {
                series,
                index,
                field: axis.as_str(),
            })
        })
}

/// One index of a trajectory: the planned and actual position sharing that index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    pub index: usize,
    pub planned: Position3D,
    pub actual: Position3D,
}

/// Ordered samples in drilling progression order. Never reordered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<PathSample>,
}

impl Trajectory {
    /// Pair two index-aligned sequences, normalising both to the elevation
    /// convention. Pairing is strictly by index, never by proximity.
    pub fn from_sequences(
        planned: &[Position3D],
        actual: &[Position3D],
        convention: DepthConvention,
    ) -> TrajectoryResult<Self> {
        validate_aligned(planned, actual)?;
        let planned = normalize_positions(planned, convention);
        let actual = normalize_positions(actual, convention);
        let samples = planned
            .into_iter()
            .zip(actual)
            .enumerate()
            .map(|(index, (planned, actual))| PathSample { index, planned, actual })
            .collect();
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn planned(&self) -> Vec<Position3D> {
        self.samples.iter().map(|s| s.planned).collect()
    }

    pub fn actual(&self) -> Vec<Position3D> {
        self.samples.iter().map(|s| s.actual).collect()
    }
}
