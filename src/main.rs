//! DrillSense command-line entry point
//!
//! Reads one trajectory snapshot (planned + actual positions) from a JSON
//! file, runs the deviation analyzer and scene builder, and writes the
//! resulting report as JSON to stdout. Logs go to stderr.
//!
//! Usage:
//!   drillsense --input snapshot.json --pretty
//!   drillsense --input snapshot.json --config well.toml
//!   drillsense --dump-config > drillsense.toml

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, warn};

use drillsense::{
    render_report, DashboardConfig, DepthConvention, DirectionalReadout, Position3D,
    TargetStatus, Trajectory,
};

#[derive(Parser, Debug)]
#[command(name = "drillsense")]
#[command(about = "Directional drilling trajectory deviation analysis")]
#[command(version)]
struct CliArgs {
    /// Trajectory snapshot (JSON with `planned`, `actual`, optional `convention` and `readout`)
    #[arg(short, long, required_unless_present = "dump_config")]
    input: Option<PathBuf>,

    /// Dashboard config TOML. Defaults to $DRILLSENSE_CONFIG, then ./drillsense.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// On-disk shape of one trajectory snapshot.
#[derive(Debug, Deserialize)]
struct SnapshotInput {
    planned: Vec<Position3D>,
    actual: Vec<Position3D>,
    #[serde(default)]
    convention: DepthConvention,
    #[serde(default)]
    readout: Option<DirectionalReadout>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::load(),
    };

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(input_path) = args.input else {
        anyhow::bail!("--input is required");
    };

    let raw = std::fs::read_to_string(&input_path)
        .with_context(|| format!("reading {}", input_path.display()))?;
    let snapshot: SnapshotInput = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", input_path.display()))?;

    let trajectory =
        Trajectory::from_sequences(&snapshot.planned, &snapshot.actual, snapshot.convention)
            .context("invalid trajectory snapshot")?;

    let report = render_report(
        &trajectory.planned(),
        &trajectory.actual(),
        &config,
        snapshot.readout.as_ref(),
    )
    .context("trajectory deviation analysis failed")?;

    let s = &report.summary;
    info!(
        well = %config.well.name,
        samples = s.sample_count,
        latest_lateral_cm = s.latest_lateral_cm,
        max_lateral_cm = s.max_lateral_cm,
        beyond = s.samples_beyond_threshold,
        "Deviation report ready"
    );
    if s.lateral_status == TargetStatus::OffTarget {
        warn!(
            latest_lateral_cm = s.latest_lateral_cm,
            target_cm = s.lateral_target_cm,
            "Lateral deviation beyond threshold"
        );
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;

    Ok(())
}
