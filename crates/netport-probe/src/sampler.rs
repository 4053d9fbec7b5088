//! Tight-loop sampling of the port clock.
//!
//! Reads the counter repeatedly for a configured window and classifies the
//! step between consecutive reads. The host's `Instant` serves as the
//! independent reference for wall time, so counter drift shows up as the
//! difference between the two.

use std::time::{Duration, Instant};

use netport_clock::{sys_now, ticks};
use tracing::{debug, warn};

/// Sampling parameters.
#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// How long to keep reading.
    pub duration: Duration,
    /// Pause between reads; `None` reads in a tight loop.
    pub interval: Option<Duration>,
}

/// Aggregated observations from one sampling run.
#[derive(Debug, Clone)]
pub struct SampleStats {
    /// Total counter reads performed.
    pub calls: u64,
    /// First counter reading.
    pub first: u32,
    /// Last counter reading.
    pub last: u32,
    /// Consecutive reads that returned the same value.
    pub zero_steps: u64,
    /// Forward steps of exactly 1ms.
    pub one_ms_steps: u64,
    /// Forward steps of 2..=10ms.
    pub coarse_steps: u64,
    /// Forward steps above 10ms.
    pub jump_steps: u64,
    /// Largest forward step observed, in ms.
    pub max_step_ms: u32,
    /// Reads where the counter moved backwards (wrap-aware).
    pub backward_steps: u64,
    /// Largest backward excursion observed, in ms.
    pub max_backward_ms: u32,
    /// Wall time the run actually took.
    pub wall_elapsed: Duration,
}

impl SampleStats {
    fn new(first: u32) -> Self {
        Self {
            calls: 1,
            first,
            last: first,
            zero_steps: 0,
            one_ms_steps: 0,
            coarse_steps: 0,
            jump_steps: 0,
            max_step_ms: 0,
            backward_steps: 0,
            max_backward_ms: 0,
            wall_elapsed: Duration::ZERO,
        }
    }

    /// Counter milliseconds covered by the run, wrap-safe.
    #[must_use]
    pub fn counter_elapsed_ms(&self) -> u32 {
        ticks::elapsed(self.first, self.last)
    }

    /// Counter drift against the host wall clock, in ms.
    ///
    /// Positive means the counter ran fast relative to `Instant`.
    #[must_use]
    pub fn drift_ms(&self) -> i64 {
        i64::from(self.counter_elapsed_ms()) - self.wall_elapsed.as_millis() as i64
    }

    fn record(&mut self, cur: u32) {
        let prev = self.last;
        self.calls += 1;
        self.last = cur;

        if ticks::is_before(cur, prev) {
            let magnitude = ticks::elapsed(cur, prev);
            self.backward_steps += 1;
            self.max_backward_ms = self.max_backward_ms.max(magnitude);
            warn!(prev, cur, magnitude, "counter moved backwards");
            return;
        }

        let step = ticks::elapsed(prev, cur);
        match step {
            0 => self.zero_steps += 1,
            1 => self.one_ms_steps += 1,
            2..=10 => self.coarse_steps += 1,
            _ => self.jump_steps += 1,
        }
        self.max_step_ms = self.max_step_ms.max(step);
    }
}

/// Run one sampling pass.
pub fn run(opts: &SampleOptions) -> SampleStats {
    debug!(
        duration_ms = opts.duration.as_millis() as u64,
        interval_ms = opts.interval.map(|i| i.as_millis() as u64),
        "starting sampling pass"
    );

    let wall_start = Instant::now();
    let mut stats = SampleStats::new(sys_now());

    while wall_start.elapsed() < opts.duration {
        stats.record(sys_now());

        if let Some(pause) = opts.interval {
            std::thread::sleep(pause);
        }
    }

    stats.wall_elapsed = wall_start.elapsed();

    debug!(
        calls = stats.calls,
        counter_elapsed_ms = stats.counter_elapsed_ms(),
        wall_elapsed_ms = stats.wall_elapsed.as_millis() as u64,
        "sampling pass complete"
    );
    stats
}
