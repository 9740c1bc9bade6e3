//! Config validation: unknown-key detection with Levenshtein suggestions.
//!
//! The raw TOML is parsed into `toml::Value` first, its key tree walked and
//! compared against the known field names. Unknown keys produce warnings
//! with "did you mean?" suggestions and never break an existing config.
//! Range checks live in `DashboardConfig::validate`.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `DashboardConfig`.
///
/// Kept in step with the struct hierarchy in dashboard_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.field",
        "well.rig",
        // [thresholds]
        "thresholds",
        "thresholds.lateral_threshold_cm",
        "thresholds.angular_threshold_deg",
        "thresholds.angular_zone_amber_deg",
        "thresholds.angular_zone_red_deg",
        // [colors]
        "colors",
        "colors.planned",
        "colors.within",
        "colors.beyond",
        // [scene]
        "scene",
        "scene.background",
        "scene.x_axis",
        "scene.x_axis.title",
        "scene.x_axis.range",
        "scene.y_axis",
        "scene.y_axis.title",
        "scene.y_axis.range",
        "scene.z_axis",
        "scene.z_axis.title",
        "scene.z_axis.range",
        "scene.camera",
        "scene.camera.eye",
        "scene.camera.eye.x",
        "scene.camera.eye.y",
        "scene.camera.eye.z",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Dotted paths of every key in a `toml::Value` tree, parents before children.
///
/// `{ scene = { camera = { eye = { x = 1.2 } } } }` yields
/// `["scene", "scene.camera", "scene.camera.eye", "scene.camera.eye.x"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };
    table
        .iter()
        .flat_map(|(key, child)| {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            let nested = walk_toml_keys(child, &path);
            std::iter::once(path).chain(nested)
        })
        .collect()
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance between two keys, counted in characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Maximum edit distance for a known key to be offered as a correction.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Closest known key to `unknown`, if any is within a few edits.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= MAX_SUGGESTION_DISTANCE)
        // Tie-break on the key so the suggestion does not depend on hash order
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for every key in `raw_toml` that the dashboard config does not read.
///
/// Never fails: a document that does not parse yields no warnings and the
/// parse error surfaces from serde instead.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
