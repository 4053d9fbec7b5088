//! Probe report assembly and export.
//!
//! Folds a sampling run into a flat, serializable record together with the
//! build-time backend identity and the kernel's own view of clock
//! resolution, for consumption by humans or by CI jobs comparing runs
//! across machines.

use std::path::{Path, PathBuf};

use netport_clock::backend;
use nix::time::{clock_getres, ClockId};
use serde::Serialize;
use tracing::warn;

use crate::sampler::SampleStats;

/// Report-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// File I/O error.
    #[error("failed to write report to {path}: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Step-size distribution over consecutive counter reads.
#[derive(Debug, Clone, Serialize)]
pub struct StepHistogram {
    /// Reads that returned the same value as the previous one.
    pub zero_ms: u64,
    /// Forward steps of exactly 1ms.
    pub one_ms: u64,
    /// Forward steps of 2..=10ms.
    pub two_to_ten_ms: u64,
    /// Forward steps above 10ms.
    pub over_ten_ms: u64,
    /// Largest forward step, in ms.
    pub max_step_ms: u32,
}

/// One probe run, ready for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    /// Target OS the probe was built for.
    pub target_os: &'static str,
    /// Platform primitive backing the counter.
    pub backend: &'static str,
    /// Whether the backend is immune to wall-clock adjustments.
    pub hardware_monotonic: bool,
    /// Kernel-reported resolution of CLOCK_MONOTONIC, if available.
    pub monotonic_resolution_ns: Option<u64>,
    /// Total counter reads.
    pub calls: u64,
    /// Counter milliseconds covered by the run (wrap-safe).
    pub counter_elapsed_ms: u32,
    /// Wall-clock milliseconds covered by the run.
    pub wall_elapsed_ms: u64,
    /// Counter drift against the wall clock (positive = counter fast).
    pub drift_ms: i64,
    /// Step-size distribution.
    pub steps: StepHistogram,
    /// Wrap-aware backward movements observed.
    pub backward_steps: u64,
    /// Largest backward excursion, in ms.
    pub max_backward_ms: u32,
}

impl ProbeReport {
    /// Assemble a report from a finished sampling run.
    #[must_use]
    pub fn from_stats(stats: &SampleStats) -> Self {
        let b = backend();
        Self {
            target_os: std::env::consts::OS,
            backend: b.name,
            hardware_monotonic: b.hardware_monotonic,
            monotonic_resolution_ns: monotonic_resolution_ns(),
            calls: stats.calls,
            counter_elapsed_ms: stats.counter_elapsed_ms(),
            wall_elapsed_ms: stats.wall_elapsed.as_millis() as u64,
            drift_ms: stats.drift_ms(),
            steps: StepHistogram {
                zero_ms: stats.zero_steps,
                one_ms: stats.one_ms_steps,
                two_to_ten_ms: stats.coarse_steps,
                over_ten_ms: stats.jump_steps,
                max_step_ms: stats.max_step_ms,
            },
            backward_steps: stats.backward_steps,
            max_backward_ms: stats.max_backward_ms,
        }
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ReportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Resolution of the kernel's monotonic clock, in nanoseconds.
///
/// Reported for context next to the step histogram; a coarse kernel tick
/// explains steps larger than 1ms without blaming the port.
fn monotonic_resolution_ns() -> Option<u64> {
    match clock_getres(ClockId::CLOCK_MONOTONIC) {
        Ok(res) => Some(res.tv_sec() as u64 * 1_000_000_000 + res.tv_nsec() as u64),
        Err(e) => {
            warn!(error = %e, "clock_getres(CLOCK_MONOTONIC) failed");
            None
        }
    }
}
