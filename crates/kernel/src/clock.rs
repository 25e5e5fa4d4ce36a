use spheremap_common::tuning::TICK_PERIOD;
use std::time::{Duration, Instant};

/// Ticks and frames counted over one reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateReport {
    pub frames: u64,
    pub ticks: u64,
    /// Longest single pass seen in the window.
    pub longest_pass: Duration,
}

/// Simulation time bookkeeping, owned by the scheduler loop.
///
/// Tick debt is kept in whole nanoseconds so repeated subtraction of the tick
/// period never drifts.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick_period: Duration,
    last_pass: Instant,
    debt: Duration,
    ticks: u64,
    frames: u64,
    window_start: Instant,
    longest_pass: Duration,
}

impl SimClock {
    /// A zero `tick_period` would make every pass tick forever, so it is
    /// replaced by `TICK_PERIOD` with a warning.
    pub fn new(tick_period: Duration, now: Instant) -> Self {
        let tick_period = if tick_period.is_zero() {
            tracing::warn!("tick period is zero, using {TICK_PERIOD:?}");
            TICK_PERIOD
        } else {
            tick_period
        };
        Self {
            tick_period,
            last_pass: now,
            debt: Duration::ZERO,
            ticks: 0,
            frames: 0,
            window_start: now,
            longest_pass: Duration::ZERO,
        }
    }

    /// Forget accumulated time and start measuring from `now`.
    pub fn restart(&mut self, now: Instant) {
        *self = Self::new(self.tick_period, now);
    }

    /// Bill the wall time since the previous pass as tick debt.
    pub fn accrue(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_pass);
        self.last_pass = now;
        self.debt += elapsed;
        elapsed
    }

    pub fn tick_due(&self) -> bool {
        self.debt >= self.tick_period
    }

    /// Pay one tick period off the debt.
    pub fn consume_tick(&mut self) {
        self.debt -= self.tick_period;
        self.ticks += 1;
    }

    /// Drop every whole tick still owed, keeping the sub-tick remainder.
    /// Returns how many ticks were dropped.
    pub fn forgive_ticks(&mut self) -> u64 {
        let period = self.tick_period.as_nanos();
        let owed = self.debt.as_nanos();
        let remainder = owed % period;
        self.debt = Duration::from_nanos(remainder as u64);
        ((owed - remainder) / period) as u64
    }

    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    pub fn record_pass_time(&mut self, took: Duration) {
        self.longest_pass = self.longest_pass.max(took);
    }

    /// Once at least a second has passed since the window opened, return the
    /// window's counts and open a new window.
    pub fn take_report(&mut self, now: Instant) -> Option<RateReport> {
        if now.saturating_duration_since(self.window_start) < Duration::from_secs(1) {
            return None;
        }
        let report = RateReport {
            frames: self.frames,
            ticks: self.ticks,
            longest_pass: self.longest_pass,
        };
        self.window_start = now;
        self.frames = 0;
        self.ticks = 0;
        self.longest_pass = Duration::ZERO;
        Some(report)
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn debt(&self) -> Duration {
        self.debt
    }

    pub fn last_pass(&self) -> Instant {
        self.last_pass
    }

    /// Ticks fired in the current reporting window.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Frames rendered in the current reporting window.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
