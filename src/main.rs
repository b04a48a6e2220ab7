use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use room_thermal_estimator::{config, freshness, pipeline, telemetry};
use config::Config;
use freshness::{needs_refresh, FileFreshnessGate};
use pipeline::{EstimationInputs, EstimationRequest};
use serde::Serialize;
use telemetry::init_tracing;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "room-thermal-estimator")]
#[command(about = "Estimate indoor room temperature from weather history and forecast")]
struct Args {
    /// JSON estimation request; read from stdin when omitted
    input: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    trajectory: &'a room_thermal_estimator::Trajectory,
    summary: pipeline::EstimateSummary,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let cfg = Config::load_from(&args.config)?;

    if args.print_config {
        print!("{}", cfg.to_toml()?);
        return Ok(());
    }

    let gate = FileFreshnessGate::new(&cfg.freshness.cache_dir);
    if needs_refresh(&gate, &cfg.freshness.resources, cfg.freshness.max_age()?) {
        warn!(
            cache_dir = %cfg.freshness.cache_dir.display(),
            max_age_hours = cfg.freshness.max_age_hours,
            "cached upstream data is stale; refresh it before trusting this estimate"
        );
    }

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let request: EstimationRequest =
        serde_json::from_str(&raw).context("failed to parse estimation request")?;
    let inputs = EstimationInputs::try_from(request).context("invalid input series")?;

    let estimator = cfg.estimator();
    let estimate = match estimator.estimate(&inputs) {
        Ok(estimate) => estimate,
        Err(e) => {
            error!(error = %e, "estimation failed");
            return Err(e.into());
        }
    };

    let summary = estimate.summary(cfg.report.freezing_threshold_c);
    info!(
        samples = summary.samples,
        forecast_samples = summary.forecast_samples,
        irradiance_observed = summary.irradiance_observed,
        extrapolation = estimator.integrator().extrapolator_name(),
        min_c = ?summary.min_c,
        hours_below_freezing = summary.hours_below_freezing,
        "estimate complete"
    );

    let out = Output {
        trajectory: &estimate.trajectory,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
