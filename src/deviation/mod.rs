//! Deviation Analyzer - planned vs. actual trajectory comparison
//!
//! Pure functions over two index-aligned position sequences:
//!
//! - **Lateral deviation**: distance between the (x, y) projections of the
//!   actual and planned positions, in centimetres. Depth never contributes.
//! - **Threshold classification**: `lateral > lateral_threshold_cm`, strict,
//!   so a sample exactly on the threshold is within it.
//! - **Angular deviation**: angle between the planned and actual tangents
//!   of the segment ending at each sample. Undefined for the first sample
//!   and wherever either tangent has zero length.
//!
//! Input and thresholds are rejected up front (empty, misaligned,
//! non-finite); a NaN deviation or threshold would silently turn into a
//! "within threshold" colour.

mod summary;

pub use summary::*;

use tracing::{debug, trace};

use crate::config::ThresholdConfig;
use crate::types::{
    validate_aligned, DeviationResult, DeviationZone, Position3D, TrajectoryError,
    TrajectoryResult,
};

/// Metres to centimetres.
const CM_PER_M: f64 = 100.0;

/// Compare two aligned trajectories sample by sample.
///
/// Returns exactly one result per input index, in input order. Fails with
/// `EmptyInput`, `ShapeMismatch` or `InvalidValue` before producing anything.
/// Unusable thresholds are rejected first, then the input sequences, then
/// any sample whose deviation overflows to infinity.
pub fn analyze(
    planned: &[Position3D],
    actual: &[Position3D],
    config: &ThresholdConfig,
) -> TrajectoryResult<Vec<DeviationResult>> {
    config.validate()?;
    validate_aligned(planned, actual)?;

    let results = planned
        .iter()
        .zip(actual)
        .enumerate()
        .map(|(index, (p, a))| {
            let lateral = lateral_deviation_cm(*p, *a);
            if !lateral.is_finite() {
                return Err(TrajectoryError::InvalidValue {
                    series: "actual",
                    index,
                    field: "lateral_deviation_cm",
                });
            }
            let angular = if index == 0 {
                None
            } else {
                check_tangent("planned", planned, index)?;
                check_tangent("actual", actual, index)?;
                angular_deviation_deg((planned[index - 1], *p), (actual[index - 1], *a))
            };
            Ok(DeviationResult {
                index,
                lateral_deviation_cm: lateral,
                angular_deviation_deg: angular,
                angular_zone: angular.map(|deg| classify_angular_zone(deg, config)),
                exceeds_threshold: exceeds_lateral_threshold(lateral, config),
            })
        })
        .collect::<TrajectoryResult<Vec<_>>>()?;

    let beyond = results.iter().filter(|r| r.exceeds_threshold).count();
    debug!(
        samples = results.len(),
        beyond_threshold = beyond,
        threshold_cm = config.lateral_threshold_cm,
        "Trajectory deviation analysed"
    );
    trace!(?results, "Per-sample deviations");

    Ok(results)
}

/// Segment ending at `index`. Finite endpoints can still be too far apart
/// for the difference to fit in an f64.
fn check_tangent(
    series: &'static str,
    positions: &[Position3D],
    index: usize,
) -> TrajectoryResult<()> {
    let t = positions[index] - positions[index - 1];
    match t.non_finite_axis() {
        None => Ok(()),
        Some(_) => Err(TrajectoryError::InvalidValue { series, index, field: "tangent" }),
    }
}

/// Horizontal offset of `actual` from `planned`, centimetres.
///
/// Not finite when the offset overflows; `analyze` reports that as an error.
pub fn lateral_deviation_cm(planned: Position3D, actual: Position3D) -> f64 {
    actual.lateral_distance(planned) * CM_PER_M
}

/// Strict threshold test shared by the analyzer and the summary.
pub fn exceeds_lateral_threshold(lateral_cm: f64, config: &ThresholdConfig) -> bool {
    lateral_cm > config.lateral_threshold_cm
}

/// Angle in degrees between the planned segment `(from, to)` and the actual
/// segment `(from, to)`. `None` when either segment has zero length or its
/// direction is not finite.
pub fn angular_deviation_deg(
    planned_segment: (Position3D, Position3D),
    actual_segment: (Position3D, Position3D),
) -> Option<f64> {
    let planned_tangent = unit_direction(planned_segment.1 - planned_segment.0)?;
    let actual_tangent = unit_direction(actual_segment.1 - actual_segment.0)?;

    // Rounding can push |cos| just past 1.0, which would make acos NaN
    let cos = planned_tangent.dot(actual_tangent).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Unit vector along `v`. Scaled by its largest component first so the
/// squared norm cannot overflow for large finite coordinates.
fn unit_direction(v: Position3D) -> Option<Position3D> {
    let scale = v.x.abs().max(v.y.abs()).max(v.z.abs());
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    let scaled = Position3D::new(v.x / scale, v.y / scale, v.z / scale);
    let norm = scaled.norm();
    Some(Position3D::new(scaled.x / norm, scaled.y / norm, scaled.z / norm))
}

/// Bullseye zone: below amber is green, above red is red, amber otherwise.
pub fn classify_angular_zone(angle_deg: f64, config: &ThresholdConfig) -> DeviationZone {
    if angle_deg < config.angular_zone_amber_deg {
        DeviationZone::Green
    } else if angle_deg > config.angular_zone_red_deg {
        DeviationZone::Red
    } else {
        DeviationZone::Amber
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Position3D {
        Position3D::new(x, y, z)
    }

    #[test]
    fn test_lateral_deviation_scenario_a() {
        let d = lateral_deviation_cm(p(0.0, 0.0, 0.0), p(0.1, 0.05, -1.0));
        assert!((d - 11.180_339_887).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn test_threshold_is_strict() {
        let config = ThresholdConfig::default();
        assert!(!exceeds_lateral_threshold(15.0, &config));
        assert!(exceeds_lateral_threshold(15.000_001, &config));
    }

    #[test]
    fn test_custom_threshold_used() {
        let config = ThresholdConfig {
            lateral_threshold_cm: 5.0,
            ..ThresholdConfig::default()
        };
        let results = analyze(&[p(0.0, 0.0, 0.0)], &[p(0.06, 0.0, 0.0)], &config).unwrap();
        assert!(results[0].exceeds_threshold);
    }

    #[test]
    fn test_parallel_segments_have_zero_angle() {
        let angle = angular_deviation_deg(
            (p(0.0, 0.0, 0.0), p(0.0, 0.0, -1.0)),
            (p(0.3, 0.1, 0.0), p(0.3, 0.1, -2.0)),
        )
        .unwrap();
        assert!(angle.abs() < 1e-9, "got {angle}");
    }

    #[test]
    fn test_perpendicular_segments_are_ninety_degrees() {
        let angle = angular_deviation_deg(
            (p(0.0, 0.0, 0.0), p(0.0, 0.0, -1.0)),
            (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)),
        )
        .unwrap();
        assert!((angle - 90.0).abs() < 1e-9, "got {angle}");
    }

    #[test]
    fn test_zero_length_segment_is_undefined() {
        let angle = angular_deviation_deg(
            (p(0.0, 0.0, -1.0), p(0.0, 0.0, -1.0)),
            (p(0.0, 0.0, 0.0), p(0.0, 0.0, -1.0)),
        );
        assert!(angle.is_none());
    }

    #[test]
    fn test_first_sample_angle_undefined() {
        let planned = vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, -1.0)];
        let actual = vec![p(0.0, 0.0, 0.0), p(-0.1, 0.05, -1.05)];
        let results = analyze(&planned, &actual, &ThresholdConfig::default()).unwrap();
        assert!(results[0].angular_deviation_deg.is_none());
        assert!(results[0].angular_zone.is_none());
        let second = results[1].angular_deviation_deg.unwrap();
        // atan(|(−0.1, 0.05)| / 1.05) ≈ 6.08°
        assert!((second - 6.08).abs() < 0.01, "got {second}");
        assert_eq!(results[1].angular_zone, Some(DeviationZone::Red));
    }

    #[test]
    fn test_zone_boundaries() {
        let config = ThresholdConfig::default();
        assert_eq!(classify_angular_zone(2.99, &config), DeviationZone::Green);
        assert_eq!(classify_angular_zone(3.0, &config), DeviationZone::Amber);
        assert_eq!(classify_angular_zone(5.0, &config), DeviationZone::Amber);
        assert_eq!(classify_angular_zone(5.01, &config), DeviationZone::Red);
    }

    #[test]
    fn test_infinite_input_rejected() {
        let err = analyze(
            &[p(0.0, 0.0, f64::INFINITY)],
            &[p(0.0, 0.0, 0.0)],
            &ThresholdConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::InvalidValue { series: "planned", index: 0, field: "z" }
        );
    }

    #[test]
    fn test_overflowing_lateral_deviation_rejected() {
        let err = analyze(
            &[p(-1e307, 0.0, 0.0)],
            &[p(1e307, 0.0, 0.0)],
            &ThresholdConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::InvalidValue {
                series: "actual",
                index: 0,
                field: "lateral_deviation_cm"
            }
        );
    }

    #[test]
    fn test_overflowing_tangent_rejected() {
        let planned = vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, -1.0)];
        let actual = vec![p(0.0, 0.0, f64::MAX), p(0.0, 0.0, -f64::MAX)];
        let err = analyze(&planned, &actual, &ThresholdConfig::default()).unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::InvalidValue { series: "actual", index: 1, field: "tangent" }
        );
    }

    #[test]
    fn test_large_finite_tangents_keep_an_angle() {
        let angle = angular_deviation_deg(
            (p(0.0, 0.0, 0.0), p(0.0, 0.0, -1e200)),
            (p(0.0, 0.0, 0.0), p(1e200, 0.0, 0.0)),
        )
        .unwrap();
        assert!((angle - 90.0).abs() < 1e-9, "got {angle}");
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = ThresholdConfig {
            lateral_threshold_cm: f64::NAN,
            ..ThresholdConfig::default()
        };
        let err = analyze(&[p(0.0, 0.0, 0.0)], &[p(5.0, 0.0, 0.0)], &config).unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::InvalidValue {
                series: "thresholds",
                index: 0,
                field: "lateral_threshold_cm"
            }
        );
    }

    #[test]
    fn test_inverted_zone_bounds_rejected() {
        let config = ThresholdConfig {
            angular_zone_amber_deg: 6.0,
            angular_zone_red_deg: 4.0,
            ..ThresholdConfig::default()
        };
        let err = analyze(&[p(0.0, 0.0, 0.0)], &[p(0.0, 0.0, 0.0)], &config).unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::InvalidValue {
                series: "thresholds",
                index: 0,
                field: "angular_zone_red_deg"
            }
        );
    }

    #[test]
    fn test_results_keep_input_order() {
        let planned: Vec<Position3D> = (0..5).map(|i| p(0.0, 0.0, -f64::from(i))).collect();
        let actual: Vec<Position3D> = (0..5)
            .map(|i| p(0.05 * f64::from(i), 0.0, -f64::from(i)))
            .collect();
        let results = analyze(&planned, &actual, &ThresholdConfig::default()).unwrap();
        let lateral: Vec<f64> = results.iter().map(|r| r.lateral_deviation_cm).collect();
        assert!(lateral.windows(2).all(|w| w[0] < w[1]));
        assert!(results.iter().enumerate().all(|(i, r)| r.index == i));
    }
}
