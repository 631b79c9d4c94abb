#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for generating synthetic visitor datasets and
//! inspecting proximity clusters.

mod export;
mod settings;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use safety_sim_core::TrackedEntity;
use safety_sim_system_clustering::detect_clusters;
use safety_sim_system_scenarios::{scenario, scenarios, DEFAULT_SCENARIO};
use safety_sim_system_telemetry::{TelemetryConfig, TelemetrySimulator};
use safety_sim_system_visitors::{generate, summarize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    export::{default_export_path, export_to_file, ExportFormat},
    settings::{parse_seed, resolve, Overrides, SettingsFile},
};

/// Interval between simulated telemetry reports.
const TELEMETRY_STEP_SECONDS: i64 = 60;

#[derive(Debug, Parser)]
#[command(name = "safety-sim", version, about = "Synthetic tourist-safety datasets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generates a visitor dataset and writes it to disk.
    Generate(GenerateArgs),
    /// Lists the registered scenario presets.
    Scenarios,
    /// Detects proximity clusters in a tracked-entity snapshot.
    Cluster(ClusterArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Scenario preset providing the base configuration.
    #[arg(long)]
    scenario: Option<String>,
    /// TOML file whose fields override the scenario preset.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed of the deterministic engine; negative values wrap to 32 bits.
    #[arg(long, value_parser = parse_seed, allow_negative_numbers = true)]
    seed: Option<u32>,
    /// Number of visitor events to produce.
    #[arg(long)]
    count: Option<usize>,
    /// Number of hotspots placed around the center.
    #[arg(long)]
    hotspots: Option<usize>,
    /// Earliest timestamp, RFC 3339.
    #[arg(long, value_name = "RFC3339")]
    start: Option<DateTime<Utc>>,
    /// Latest timestamp, RFC 3339.
    #[arg(long, value_name = "RFC3339")]
    end: Option<DateTime<Utc>>,
    /// Export path; a directory receives the dated default filename.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Layout of the exported dataset.
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,
}

#[derive(Debug, Args)]
struct ClusterArgs {
    /// JSON array of tracked entities; a simulated snapshot is used when absent.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Scenario whose center the simulated feed is scattered around.
    #[arg(long)]
    scenario: Option<String>,
    /// Number of simulated entities.
    #[arg(long)]
    entities: Option<usize>,
    /// Number of one-minute steps to advance the simulated feed.
    #[arg(long, default_value_t = 0)]
    steps: u32,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Scenarios => run_scenarios(),
        Command::Cluster(args) => run_cluster(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let file = args
        .config
        .as_deref()
        .map(SettingsFile::load)
        .transpose()?;
    let overrides = Overrides {
        scenario: args.scenario,
        seed: args.seed,
        count: args.count,
        start_date: args.start,
        end_date: args.end,
        hotspot_count: args.hotspots,
    };
    let config = resolve(file.as_ref(), &overrides);

    let events = generate(&config).context("invalid generator configuration")?;

    let default_name = default_export_path(Utc::now().date_naive(), args.format);
    let path = match args.output {
        Some(path) if path.is_dir() => path.join(default_name),
        Some(path) => path,
        None => default_name,
    };
    export_to_file(&path, &events, args.format)?;

    let summary = summarize(&events);
    info!(
        path = %path.display(),
        seed = config.seed,
        events = summary.total,
        attractions = summary.by_attraction.len(),
        mean_group_size = summary.mean_group_size,
        mean_dwell_minutes = summary.mean_dwell_minutes,
        "visitor dataset exported"
    );
    for (attraction, visits) in &summary.by_attraction {
        info!(%attraction, visits, "attraction total");
    }
    Ok(())
}

fn run_scenarios() -> Result<()> {
    for (key, preset) in scenarios() {
        println!(
            "{key:<8} {:<10} seed={:<6} count={:<5} hotspots={} center=({:.4}, {:.4})",
            preset.city_name,
            preset.seed,
            preset.count,
            preset.hotspot_count,
            preset.admin_location.lat,
            preset.admin_location.lng,
        );
    }
    Ok(())
}

fn run_cluster(args: ClusterArgs) -> Result<()> {
    let entities = match args.input.as_deref() {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read entities from {}", path.display()))?;
            serde_json::from_str::<Vec<TrackedEntity>>(&contents)
                .with_context(|| format!("failed to parse entities in {}", path.display()))?
        }
        None => simulated_snapshot(&args)?,
    };

    let clusters = detect_clusters(&entities);
    info!(
        entities = entities.len(),
        clusters = clusters.len(),
        "clusters detected"
    );
    let json = serde_json::to_string_pretty(&clusters).context("failed to serialize clusters")?;
    println!("{json}");
    Ok(())
}

fn simulated_snapshot(args: &ClusterArgs) -> Result<Vec<TrackedEntity>> {
    let preset = scenario(args.scenario.as_deref().unwrap_or(DEFAULT_SCENARIO));
    let mut config = TelemetryConfig {
        seed: u64::from(preset.seed),
        center: preset.admin_location,
        ..TelemetryConfig::default()
    };
    if let Some(entities) = args.entities {
        config.entity_count = entities;
    }

    let step = Duration::seconds(TELEMETRY_STEP_SECONDS);
    let mut now = Utc::now();
    let mut simulator =
        TelemetrySimulator::new(&config, now).context("invalid telemetry configuration")?;
    for _ in 0..args.steps {
        now += step;
        simulator.step(step, now);
    }
    Ok(simulator.snapshot().to_vec())
}
