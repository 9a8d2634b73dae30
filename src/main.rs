use anyhow::Result;
use btsclean::{pipeline, CleanConfig, FileOutcome, FlowStatus};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Filter and merge BTS airline extracts (T100 segment + DB1B survey) for one carrier"
)]
struct Args {
    /// Directory holding the raw extracts; outputs land next to them
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Carrier code to keep, matched exactly
    #[arg(short, long, default_value = "UA")]
    carrier: String,

    /// Name of the single T100 segment file under the base directory
    #[arg(long, default_value = "T_T100D_SEGMENT_US_CARRIER_ONLY-2.csv")]
    segment_file: String,

    /// Glob pattern for the quarterly DB1B survey files
    #[arg(
        long,
        default_value = "Origin_and_Destination_Survey_DB1BMarket_2024_*.csv"
    )]
    survey_pattern: String,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) build config from args ───────────────────────────────────
    let args = Args::parse();
    let config = CleanConfig {
        base_dir: args.base_dir,
        carrier: args.carrier,
        segment_filename: args.segment_file,
        survey_pattern: args.survey_pattern,
        ..CleanConfig::default()
    };
    info!(base_dir = %config.base_dir.display(), carrier = %config.carrier, "startup");

    // ─── 3) run both flows ───────────────────────────────────────────
    let report = pipeline::run(&config);

    // ─── 4) render the summary ───────────────────────────────────────
    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Succeeded { .. } => info!("{}", outcome),
            FileOutcome::Skipped { .. } => warn!("{}", outcome),
            FileOutcome::Failed { .. } => error!("{}", outcome),
        }
    }
    if let Some(status) = &report.segment {
        log_flow("segment", status);
    }
    if let Some(status) = &report.survey {
        log_flow("survey", status);
    }
    info!(
        files = report.files_found(),
        succeeded = report.succeeded(),
        skipped = report.skipped(),
        failed = report.failed(),
        total_rows = report.total_rows_written(),
        "run complete"
    );

    Ok(())
}

fn log_flow(flow: &str, status: &FlowStatus) {
    match status {
        FlowStatus::Written { .. } => info!(flow, "{}", status),
        FlowStatus::OutputWriteFailure { .. } => error!(flow, "{}", status),
        _ => warn!(flow, "{}", status),
    }
}
