//! Clock probe entry point.
//!
//! Samples the port clock on the machine it runs on and reports step shape,
//! drift against the host wall clock, and any backward movement. Intended
//! for qualifying a new target before handing the port to the stack, and
//! for CI runs where a non-zero exit flags a broken clock.

mod report;
mod sampler;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use netport_clock::backend;
use tracing::{info, warn};

use crate::report::ProbeReport;
use crate::sampler::SampleOptions;

/// Clock probe command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "netport-probe",
    about = "Port clock probe - samples sys_now against the host clock",
    version,
    long_about = None
)]
struct Args {
    /// How long to sample (e.g. "2s", "500ms").
    #[arg(long, short = 'd', default_value = "2s", value_parser = humantime::parse_duration)]
    duration: Duration,

    /// Pause between reads (tight loop when omitted).
    #[arg(long, short = 'i', value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Print the report as JSON instead of log lines.
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to a file.
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting clock probe");

    let b = backend();
    info!(
        backend = b.name,
        hardware_monotonic = b.hardware_monotonic,
        target_os = std::env::consts::OS,
        "Compiled clock backend"
    );

    let opts = SampleOptions {
        duration: args.duration,
        interval: args.interval,
    };
    let stats = sampler::run(&opts);
    let report = ProbeReport::from_stats(&stats);

    if args.json {
        println!(
            "{}",
            report.to_json().context("Failed to render JSON report")?
        );
    } else {
        log_report(&report);
    }

    if let Some(path) = &args.output {
        report
            .write_to(path)
            .with_context(|| format!("Failed to write report to {:?}", path))?;
        info!(?path, "Report written");
    }

    // A hardware-monotonic backend must never step backwards; treat any
    // excursion as a failed probe. The time-of-day backend can step under
    // NTP or manual adjustment, so only warn there.
    if report.backward_steps > 0 {
        if report.hardware_monotonic {
            bail!(
                "clock moved backwards {} time(s), largest excursion {}ms",
                report.backward_steps,
                report.max_backward_ms
            );
        }
        warn!(
            count = report.backward_steps,
            max_ms = report.max_backward_ms,
            "Counter stepped backwards; expected only under wall-clock adjustment"
        );
    }

    Ok(())
}

/// Initialize logging with the specified log level.
fn init_logging(level: &str) {
    let filter = format!("netport_probe={level},netport_clock={level}");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with_target(true)
        .init();
}

/// Emit the report as structured log lines.
fn log_report(report: &ProbeReport) {
    info!(
        calls = report.calls,
        counter_elapsed_ms = report.counter_elapsed_ms,
        wall_elapsed_ms = report.wall_elapsed_ms,
        drift_ms = report.drift_ms,
        "Sampling complete"
    );
    info!(
        zero_ms = report.steps.zero_ms,
        one_ms = report.steps.one_ms,
        two_to_ten_ms = report.steps.two_to_ten_ms,
        over_ten_ms = report.steps.over_ten_ms,
        max_step_ms = report.steps.max_step_ms,
        "Step histogram"
    );
    if let Some(res) = report.monotonic_resolution_ns {
        info!(
            resolution_ns = res,
            "Kernel CLOCK_MONOTONIC resolution"
        );
    }
    if report.backward_steps > 0 {
        warn!(
            backward_steps = report.backward_steps,
            max_backward_ms = report.max_backward_ms,
            "Backward movement observed"
        );
    }
}
