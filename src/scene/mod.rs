//! Scene Builder - declarative 3D scene for the trajectory view
//!
//! Turns the planned/actual positions plus the analyzer's classifications
//! into a renderer-agnostic `SceneDescription`:
//!
//! 1. Planned path, uniform colour
//! 2. Actual path, one colour per vertex taken from `exceeds_threshold`
//! 3. Two zero-vertex legend entries (within / beyond) so a renderer that
//!    builds its legend from series still lists both categories
//!
//! Axis ranges and camera come from `SceneFraming` and never depend on the
//! data. Mounting the scene on a rendering surface is the caller's job.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ColorPolicy, SceneFraming};
use crate::types::{DeviationResult, Position3D, TrajectoryError, TrajectoryResult};

const PATH_LINE_WIDTH: f64 = 6.0;
const PLANNED_MARKER_SIZE: f64 = 5.0;
const ACTUAL_MARKER_SIZE: f64 = 6.0;

// ============================================================================
// Scene Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceRole {
    Planned,
    Actual,
    LegendWithin,
    LegendBeyond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    LinesMarkers,
    Lines,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceColor {
    Uniform(String),
    PerVertex(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: TraceColor,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: TraceColor,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub role: TraceRole,
    pub mode: TraceMode,
    pub vertices: Vec<Position3D>,
    pub line: LineStyle,
    pub marker: Option<MarkerStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub title: String,
    /// `[min, max]` in metres
    pub range: [f64; 2],
}

impl AxisSpec {
    pub fn new(title: &str, min: f64, max: f64) -> Self {
        Self {
            title: title.to_string(),
            range: [min, max],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Position3D,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub z_axis: AxisSpec,
    pub camera: CameraPose,
    pub background: String,
}

impl From<&SceneFraming> for SceneLayout {
    fn from(framing: &SceneFraming) -> Self {
        Self {
            x_axis: framing.x_axis.clone(),
            y_axis: framing.y_axis.clone(),
            z_axis: framing.z_axis.clone(),
            camera: framing.camera,
            background: framing.background.clone(),
        }
    }
}

/// Complete scene handed to the renderer. Rebuilt per update, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub traces: Vec<Trace>,
    pub layout: SceneLayout,
}

impl SceneDescription {
    pub fn trace(&self, role: TraceRole) -> Option<&Trace> {
        self.traces.iter().find(|t| t.role == role)
    }

    /// Per-vertex colours of the actual path.
    pub fn actual_colors(&self) -> &[String] {
        match self.trace(TraceRole::Actual).map(|t| &t.line.color) {
            Some(TraceColor::PerVertex(colors)) => colors,
            _ => &[],
        }
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Build the trajectory scene.
///
/// Colours of the actual path come only from `deviations`; geometry is never
/// re-examined here. Fails with `ShapeMismatch` when `deviations` or
/// `planned` do not line up with `actual`.
pub fn build_scene(
    planned: &[Position3D],
    actual: &[Position3D],
    deviations: &[DeviationResult],
    palette: &ColorPolicy,
    framing: &SceneFraming,
) -> TrajectoryResult<SceneDescription> {
    if deviations.len() != actual.len() {
        return Err(TrajectoryError::ShapeMismatch {
            left: "deviations",
            left_len: deviations.len(),
            right: "actual",
            right_len: actual.len(),
        });
    }
    if planned.len() != actual.len() {
        return Err(TrajectoryError::ShapeMismatch {
            left: "planned",
            left_len: planned.len(),
            right: "actual",
            right_len: actual.len(),
        });
    }

    let colors = vertex_colors(deviations, palette);

    let traces = vec![
        Trace {
            name: "Planned Path".to_string(),
            role: TraceRole::Planned,
            mode: TraceMode::LinesMarkers,
            vertices: planned.to_vec(),
            line: LineStyle {
                color: TraceColor::Uniform(palette.planned.clone()),
                width: PATH_LINE_WIDTH,
            },
            marker: Some(MarkerStyle {
                color: TraceColor::Uniform(palette.planned.clone()),
                size: PLANNED_MARKER_SIZE,
            }),
        },
        Trace {
            name: "Actual Path".to_string(),
            role: TraceRole::Actual,
            mode: TraceMode::LinesMarkers,
            vertices: actual.to_vec(),
            line: LineStyle {
                color: TraceColor::PerVertex(colors.clone()),
                width: PATH_LINE_WIDTH,
            },
            marker: Some(MarkerStyle {
                color: TraceColor::PerVertex(colors),
                size: ACTUAL_MARKER_SIZE,
            }),
        },
        legend_entry("Within Threshold", TraceRole::LegendWithin, &palette.within),
        legend_entry("Beyond Threshold", TraceRole::LegendBeyond, &palette.beyond),
    ];

    debug!(vertices = actual.len(), traces = traces.len(), "Trajectory scene built");

    Ok(SceneDescription {
        traces,
        layout: SceneLayout::from(framing),
    })
}

/// One colour per deviation, in order.
pub fn vertex_colors(deviations: &[DeviationResult], palette: &ColorPolicy) -> Vec<String> {
    deviations
        .iter()
        .map(|d| palette.for_classification(d.exceeds_threshold).to_string())
        .collect()
}

fn legend_entry(name: &str, role: TraceRole, color: &str) -> Trace {
    Trace {
        name: name.to_string(),
        role,
        mode: TraceMode::Lines,
        vertices: Vec::new(),
        line: LineStyle {
            color: TraceColor::Uniform(color.to_string()),
            width: PATH_LINE_WIDTH,
        },
        marker: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deviation(index: usize, exceeds: bool) -> DeviationResult {
        DeviationResult {
            index,
            lateral_deviation_cm: if exceeds { 20.0 } else { 5.0 },
            angular_deviation_deg: None,
            angular_zone: None,
            exceeds_threshold: exceeds,
        }
    }

    fn line(n: usize) -> Vec<Position3D> {
        (0..n).map(|i| Position3D::new(0.0, 0.0, -(i as f64))).collect()
    }

    #[test]
    fn test_trace_order_and_names() {
        let path = line(3);
        let deviations: Vec<_> = (0..3).map(|i| deviation(i, false)).collect();
        let scene = build_scene(
            &path,
            &path,
            &deviations,
            &ColorPolicy::default(),
            &SceneFraming::default(),
        )
        .unwrap();
        let names: Vec<&str> = scene.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Planned Path", "Actual Path", "Within Threshold", "Beyond Threshold"]
        );
    }

    #[test]
    fn test_colors_follow_classification_not_geometry() {
        // Geometry is identical, so only the classification can drive colour
        let path = line(4);
        let deviations = vec![
            deviation(0, false),
            deviation(1, true),
            deviation(2, false),
            deviation(3, true),
        ];
        let palette = ColorPolicy::default();
        let scene =
            build_scene(&path, &path, &deviations, &palette, &SceneFraming::default()).unwrap();
        assert_eq!(
            scene.actual_colors(),
            &[
                palette.within.clone(),
                palette.beyond.clone(),
                palette.within.clone(),
                palette.beyond.clone()
            ]
        );
    }

    #[test]
    fn test_legend_entries_present_when_all_within() {
        let path = line(2);
        let deviations = vec![deviation(0, false), deviation(1, false)];
        let scene = build_scene(
            &path,
            &path,
            &deviations,
            &ColorPolicy::default(),
            &SceneFraming::default(),
        )
        .unwrap();
        let beyond = scene.trace(TraceRole::LegendBeyond).unwrap();
        assert!(beyond.vertices.is_empty());
        assert_eq!(beyond.line.color, TraceColor::Uniform("#EF4444".to_string()));
        assert_eq!(scene.trace(TraceRole::Actual).unwrap().vertices.len(), 2);
        assert_eq!(scene.trace(TraceRole::Planned).unwrap().vertices.len(), 2);
    }

    #[test]
    fn test_deviation_count_mismatch_rejected() {
        let path = line(3);
        let deviations = vec![deviation(0, false)];
        let err = build_scene(
            &path,
            &path,
            &deviations,
            &ColorPolicy::default(),
            &SceneFraming::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::ShapeMismatch {
                left: "deviations",
                left_len: 1,
                right: "actual",
                right_len: 3,
            }
        );
    }

    #[test]
    fn test_layout_ignores_data_extent() {
        let small = line(2);
        let large: Vec<Position3D> = (0..2)
            .map(|i| Position3D::new(500.0, -300.0, -1000.0 * i as f64))
            .collect();
        let deviations = vec![deviation(0, false), deviation(1, false)];
        let palette = ColorPolicy::default();
        let framing = SceneFraming::default();
        let a = build_scene(&small, &small, &deviations, &palette, &framing).unwrap();
        let b = build_scene(&large, &large, &deviations, &palette, &framing).unwrap();
        assert_eq!(a.layout, b.layout);
        assert_eq!(a.layout.z_axis.range, [-8.0, 0.5]);
        assert_eq!(a.layout.camera.eye, Position3D::new(1.2, 1.2, 0.8));
    }

    #[test]
    fn test_scene_serializes_to_json() {
        let path = line(1);
        let scene = build_scene(
            &path,
            &path,
            &[deviation(0, true)],
            &ColorPolicy::default(),
            &SceneFraming::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["traces"][1]["line"]["color"]["per_vertex"][0], "#EF4444");
        assert_eq!(json["traces"][0]["role"], "planned");
        assert_eq!(json["layout"]["x_axis"]["range"][0], -8.0);
    }
}
