//! Dashboard Configuration Module
//!
//! Per-well thresholds, colours and scene framing loaded from TOML files.
//! Nothing here is global: callers load a `DashboardConfig` once and pass
//! its sections into the analyzer and scene builder explicitly.
//!
//! ## Loading Order
//!
//! 1. `DRILLSENSE_CONFIG` environment variable (path to TOML file)
//! 2. `drillsense.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let config = DashboardConfig::load();
//! let deviations = deviation::analyze(&planned, &actual, &config.thresholds)?;
//! ```

mod dashboard_config;
pub mod validation;

pub use dashboard_config::*;
