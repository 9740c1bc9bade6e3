//! Dashboard Configuration - deviation thresholds, colours and scene framing
//!
//! Every threshold, colour and camera parameter the analyzer and scene
//! builder need lives here and is passed in explicitly. Each struct
//! implements `Default` with the values the rig dashboard ships with.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::scene::{AxisSpec, CameraPose};
use crate::types::{Position3D, TrajectoryError, TrajectoryResult};

/// Environment variable naming a config file to load.
pub const CONFIG_ENV_VAR: &str = "DRILLSENSE_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const LOCAL_CONFIG_FILE: &str = "drillsense.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one well's deviation dashboard.
///
/// Load with `DashboardConfig::load()` which searches:
/// 1. `$DRILLSENSE_CONFIG` env var
/// 2. `./drillsense.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Well / rig identification
    #[serde(default)]
    pub well: WellInfo,

    /// Deviation classification thresholds
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Path and threshold colours
    #[serde(default)]
    pub colors: ColorPolicy,

    /// Fixed axis ranges and camera
    #[serde(default)]
    pub scene: SceneFraming,
}

impl DashboardConfig {
    /// Load configuration using the standard search order:
    /// 1. `$DRILLSENSE_CONFIG` environment variable
    /// 2. `./drillsense.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            well = %config.well.name,
                            "Loaded dashboard config from {CONFIG_ENV_VAR}"
                        );
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {CONFIG_ENV_VAR}, falling back"
                        );
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(
                        well = %config.well.name,
                        "Loaded dashboard config from ./{LOCAL_CONFIG_FILE}"
                    );
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged, not rejected.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Thresholds must be finite; lateral/angular targets strictly positive
    /// - Angular zones must escalate: 0 <= amber <= red
    /// - Axis ranges must be finite with min < max
    /// - Camera eye must be finite and off the origin
    /// - Colours must be non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let mut errors: Vec<String> = Vec::new();

        Self::check_positive(
            t.lateral_threshold_cm,
            "thresholds.lateral_threshold_cm",
            &mut errors,
        );
        Self::check_positive(
            t.angular_threshold_deg,
            "thresholds.angular_threshold_deg",
            &mut errors,
        );

        if !t.angular_zone_amber_deg.is_finite() || !t.angular_zone_red_deg.is_finite() {
            errors.push(format!(
                "thresholds.angular_zone: values must be finite (got amber={}, red={})",
                t.angular_zone_amber_deg, t.angular_zone_red_deg
            ));
        } else {
            if t.angular_zone_amber_deg < 0.0 {
                errors.push(format!(
                    "thresholds.angular_zone_amber_deg = {:.2} cannot be negative",
                    t.angular_zone_amber_deg
                ));
            }
            if t.angular_zone_red_deg < t.angular_zone_amber_deg {
                errors.push(format!(
                    "thresholds.angular_zone_red_deg ({:.2}) must be >= \
                     angular_zone_amber_deg ({:.2})",
                    t.angular_zone_red_deg, t.angular_zone_amber_deg
                ));
            }
        }

        let s = &self.scene;
        let axes = [
            ("scene.x_axis", &s.x_axis),
            ("scene.y_axis", &s.y_axis),
            ("scene.z_axis", &s.z_axis),
        ];
        for (name, axis) in axes {
            let [min, max] = axis.range;
            if !min.is_finite() || !max.is_finite() {
                errors.push(format!("{name}.range must be finite (got [{min}, {max}])"));
            } else if min >= max {
                errors.push(format!("{name}.range min ({min}) must be < max ({max})"));
            }
        }

        let eye = s.camera.eye;
        if eye.non_finite_axis().is_some() {
            errors.push("scene.camera.eye must be finite".to_string());
        } else if eye.norm() == 0.0 {
            errors.push("scene.camera.eye cannot sit at the origin".to_string());
        }

        let c = &self.colors;
        let colors = [
            ("colors.planned", &c.planned),
            ("colors.within", &c.within),
            ("colors.beyond", &c.beyond),
        ];
        for (name, color) in colors {
            if color.trim().is_empty() {
                errors.push(format!("{name} cannot be empty"));
            }
        }
        if s.background.trim().is_empty() {
            errors.push("scene.background cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, catch them explicitly
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
        } else if value <= 0.0 {
            errors.push(format!("{name} = {value:.3} must be > 0"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Well Info
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellInfo {
    #[serde(default = "default_well_name")]
    pub name: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub rig: String,
}

fn default_well_name() -> String {
    "Unnamed Well".to_string()
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            field: String::new(),
            rig: String::new(),
        }
    }
}

// ============================================================================
// Thresholds
// ============================================================================

/// Deviation thresholds. Vary per well or regulatory regime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Lateral deviation above this is "beyond threshold" (cm, strict)
    #[serde(default = "default_lateral_threshold")]
    pub lateral_threshold_cm: f64,
    /// Angular deviation above this is off target (degrees, strict)
    #[serde(default = "default_angular_threshold")]
    pub angular_threshold_deg: f64,
    /// Angular deviation at or above this leaves the green zone (degrees)
    #[serde(default = "default_zone_amber")]
    pub angular_zone_amber_deg: f64,
    /// Angular deviation above this is in the red zone (degrees)
    #[serde(default = "default_zone_red")]
    pub angular_zone_red_deg: f64,
}

fn default_lateral_threshold() -> f64 {
    15.0
}

fn default_angular_threshold() -> f64 {
    2.0
}

fn default_zone_amber() -> f64 {
    3.0
}

fn default_zone_red() -> f64 {
    5.0
}

impl ThresholdConfig {
    /// Reject thresholds that would make every comparison come out false.
    ///
    /// `DashboardConfig::validate` reports the same rules as readable
    /// messages; this is the check the analyzer runs on whatever it is handed.
    pub fn validate(&self) -> TrajectoryResult<()> {
        let invalid = |field: &'static str| -> TrajectoryResult<()> {
            Err(TrajectoryError::InvalidValue { series: "thresholds", index: 0, field })
        };
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.lateral_threshold_cm) {
            return invalid("lateral_threshold_cm");
        }
        if !positive(self.angular_threshold_deg) {
            return invalid("angular_threshold_deg");
        }
        if !self.angular_zone_amber_deg.is_finite() || self.angular_zone_amber_deg < 0.0 {
            return invalid("angular_zone_amber_deg");
        }
        if !self.angular_zone_red_deg.is_finite()
            || self.angular_zone_red_deg < self.angular_zone_amber_deg
        {
            return invalid("angular_zone_red_deg");
        }
        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            lateral_threshold_cm: default_lateral_threshold(),
            angular_threshold_deg: default_angular_threshold(),
            angular_zone_amber_deg: default_zone_amber(),
            angular_zone_red_deg: default_zone_red(),
        }
    }
}

// ============================================================================
// Colours
// ============================================================================

/// Colours handed to the renderer, as CSS colour strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPolicy {
    #[serde(default = "default_planned_color")]
    pub planned: String,
    #[serde(default = "default_within_color")]
    pub within: String,
    #[serde(default = "default_beyond_color")]
    pub beyond: String,
}

fn default_planned_color() -> String {
    "#10B981".to_string()
}

fn default_within_color() -> String {
    "#EAB308".to_string()
}

fn default_beyond_color() -> String {
    "#EF4444".to_string()
}

impl ColorPolicy {
    /// Colour for a sample given its threshold classification.
    pub fn for_classification(&self, exceeds_threshold: bool) -> &str {
        if exceeds_threshold {
            &self.beyond
        } else {
            &self.within
        }
    }
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self {
            planned: default_planned_color(),
            within: default_within_color(),
            beyond: default_beyond_color(),
        }
    }
}

// ============================================================================
// Scene Framing
// ============================================================================

/// Static framing of the 3D scene. Never fitted to the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFraming {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_x_axis")]
    pub x_axis: AxisSpec,
    #[serde(default = "default_y_axis")]
    pub y_axis: AxisSpec,
    #[serde(default = "default_z_axis")]
    pub z_axis: AxisSpec,
    #[serde(default)]
    pub camera: CameraPose,
}

fn default_x_axis() -> AxisSpec {
    AxisSpec::new("X (meters)", -8.0, 1.0)
}

fn default_y_axis() -> AxisSpec {
    AxisSpec::new("Y (meters)", -0.5, 1.0)
}

fn default_z_axis() -> AxisSpec {
    AxisSpec::new("Depth (meters)", -8.0, 0.5)
}

fn default_background() -> String {
    "rgba(17, 24, 39, 1)".to_string()
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: Position3D::new(1.2, 1.2, 0.8),
        }
    }
}

impl Default for SceneFraming {
    fn default() -> Self {
        Self {
            background: default_background(),
            x_axis: default_x_axis(),
            y_axis: default_y_axis(),
            z_axis: default_z_axis(),
            camera: CameraPose::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_thresholds_match_dashboard_targets() {
        let t = ThresholdConfig::default();
        assert_eq!(t.lateral_threshold_cm, 15.0);
        assert_eq!(t.angular_threshold_deg, 2.0);
        assert_eq!(t.angular_zone_amber_deg, 3.0);
        assert_eq!(t.angular_zone_red_deg, 5.0);
    }

    #[test]
    fn test_zero_lateral_threshold_rejected() {
        let mut config = DashboardConfig::default();
        config.thresholds.lateral_threshold_cm = 0.0;
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("lateral_threshold_cm")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let mut config = DashboardConfig::default();
        config.thresholds.angular_threshold_deg = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_zones_rejected() {
        let mut config = DashboardConfig::default();
        config.thresholds.angular_zone_amber_deg = 6.0;
        config.thresholds.angular_zone_red_deg = 4.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_values_checked_without_dashboard() {
        assert!(ThresholdConfig::default().validate().is_ok());

        let negative = ThresholdConfig {
            angular_threshold_deg: -1.0,
            ..ThresholdConfig::default()
        };
        assert_eq!(
            negative.validate(),
            Err(TrajectoryError::InvalidValue {
                series: "thresholds",
                index: 0,
                field: "angular_threshold_deg"
            })
        );

        let infinite_amber = ThresholdConfig {
            angular_zone_amber_deg: f64::INFINITY,
            ..ThresholdConfig::default()
        };
        assert!(infinite_amber.validate().is_err());
    }

    #[test]
    fn test_inverted_axis_range_rejected() {
        let mut config = DashboardConfig::default();
        config.scene.z_axis.range = [0.5, -8.0];
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("scene.z_axis")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_camera_at_origin_rejected() {
        let mut config = DashboardConfig::default();
        config.scene.camera.eye = Position3D::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_preserves_overrides() {
        let mut config = DashboardConfig::default();
        config.well.name = "DS-7".to_string();
        config.thresholds.lateral_threshold_cm = 10.0;
        let toml_str = config.to_toml().unwrap();
        let parsed = DashboardConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed = DashboardConfig::from_toml_str(
            r#"
[thresholds]
lateral_threshold_cm = 20.0
"#,
        )
        .unwrap();
        assert_eq!(parsed.thresholds.lateral_threshold_cm, 20.0);
        assert_eq!(parsed.thresholds.angular_threshold_deg, 2.0);
        assert_eq!(parsed.colors, ColorPolicy::default());
        assert_eq!(parsed.scene, SceneFraming::default());
    }

    #[test]
    fn test_color_for_classification() {
        let palette = ColorPolicy::default();
        assert_eq!(palette.for_classification(false), "#EAB308");
        assert_eq!(palette.for_classification(true), "#EF4444");
    }
}
