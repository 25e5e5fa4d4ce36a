use crate::clock::{RateReport, SimClock};
use glam::{Vec2, Vec3};
use spheremap_camera::{Orientation, OrientationState};
use spheremap_common::tuning::{
    FAST_MULTIPLIER, MOUSE_SENSITIVITY, MOVE_SPEED, TICK_PERIOD, TICKS_PER_SECOND,
};
use spheremap_input::{CursorTracker, HeldKeys, InputBuffer, KeyBindings, look_delta};
use spheremap_render::RenderBackend;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("simulation thread panicked")]
    Panicked,
}

/// Scheduler tuning.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub tick_period: Duration,
    /// Cap on ticks fired in one pass. `None` lets a stall replay every tick
    /// it owes before the next render.
    pub max_ticks_per_pass: Option<NonZeroU32>,
    pub move_speed: f32,
    pub fast_multiplier: f32,
    pub mouse_sensitivity: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_period: TICK_PERIOD,
            max_ticks_per_pass: None,
            move_speed: MOVE_SPEED,
            fast_multiplier: FAST_MULTIPLIER,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        }
    }
}

/// What one pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassReport {
    pub ticks: u32,
    /// Owed ticks discarded by `max_ticks_per_pass`.
    pub dropped_ticks: u64,
    pub rendered: bool,
}

/// Fixed-timestep tick/render loop.
///
/// Each pass bills elapsed wall time as tick debt and fires whole ticks
/// until the debt is below one period. The first tick of a pass drains the
/// input buffer; catch-up ticks in the same pass reuse that input. A pass
/// that fired any tick ends with exactly one render.
pub struct FixedStepScheduler<B: RenderBackend> {
    config: SchedulerConfig,
    input: Arc<InputBuffer>,
    backend: B,
    orientation: OrientationState,
    clock: SimClock,
    held: HeldKeys,
    bindings: KeyBindings,
    cursor: CursorTracker,
}

impl<B: RenderBackend> FixedStepScheduler<B> {
    pub fn new(
        config: SchedulerConfig,
        input: Arc<InputBuffer>,
        backend: B,
        orientation: OrientationState,
    ) -> Self {
        let clock = SimClock::new(config.tick_period, Instant::now());
        Self {
            config,
            input,
            backend,
            orientation,
            clock,
            held: HeldKeys::new(),
            bindings: KeyBindings::default(),
            cursor: CursorTracker::new(),
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Run one scheduling iteration as if the wall clock read `now`.
    pub fn pass(&mut self, now: Instant) -> PassReport {
        let pass_start = Instant::now();
        self.clock.accrue(now);

        let mut report = PassReport::default();
        let mut look = Vec2::ZERO;
        while self.clock.tick_due() {
            if self
                .config
                .max_ticks_per_pass
                .is_some_and(|limit| report.ticks >= limit.get())
            {
                report.dropped_ticks = self.clock.forgive_ticks();
                tracing::debug!(dropped = report.dropped_ticks, "catch-up ticks dropped");
                break;
            }

            if report.ticks == 0 {
                look = self.absorb_input();
            }
            self.tick(look);
            look = Vec2::ZERO;
            self.clock.consume_tick();
            report.ticks += 1;
        }

        if report.ticks > 0 {
            let view = self.orientation.view_matrix();
            self.backend.render(&view);
            self.clock.record_frame();
            report.rendered = true;
        }

        self.clock.record_pass_time(pass_start.elapsed());
        if let Some(rates) = self.clock.take_report(now) {
            log_rates(&rates);
        }
        report
    }

    /// Drain the buffer, forward a resize, fold key transitions, and turn
    /// cursor motion into this pass's yaw/pitch.
    fn absorb_input(&mut self) -> Vec2 {
        let snapshot = self.input.drain();
        if let Some(extent) = snapshot.resize {
            tracing::debug!(width = extent.width, height = extent.height, "resizing backend");
            self.backend.resize(extent);
        }
        self.held.apply(&snapshot.keys);
        look_delta(self.cursor.advance(snapshot.cursor), self.config.mouse_sensitivity)
    }

    fn tick(&mut self, look: Vec2) {
        if look != Vec2::ZERO {
            self.orientation.rotate(look);
        }
        let movement =
            self.bindings
                .movement(&self.held, self.config.move_speed, self.config.fast_multiplier);
        if movement != Vec3::ZERO {
            self.orientation.move_by(movement);
        }
    }

    pub fn orientation(&self) -> &OrientationState {
        &self.orientation
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.held
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: RenderBackend + 'static> FixedStepScheduler<B> {
    /// Move the scheduler onto a new `simulation` thread and start looping.
    pub fn start(self) -> Result<SchedulerHandle<B>, SchedulerError> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name("simulation".into())
            .spawn(move || self.run(&flag))?;
        Ok(SchedulerHandle {
            stop,
            thread: Some(thread),
        })
    }

    fn run(mut self, stop: &AtomicBool) -> Self {
        tracing::info!("simulation loop started");
        self.clock.restart(Instant::now());
        while !stop.load(Ordering::Acquire) {
            let report = self.pass(Instant::now());
            if report.ticks == 0 {
                thread::yield_now();
            }
        }
        tracing::info!("simulation loop finished");
        self
    }
}

fn log_rates(rates: &RateReport) {
    let target = u64::from(TICKS_PER_SECOND);
    if rates.frames != target || rates.ticks != target {
        tracing::info!(
            fps = rates.frames,
            tps = rates.ticks,
            longest_pass_us = rates.longest_pass.as_micros() as u64,
            "loop rate off target"
        );
    } else {
        tracing::trace!(fps = rates.frames, tps = rates.ticks, "loop rate");
    }
}

/// Owner-side handle to a running scheduler thread.
///
/// Dropping the handle stops and joins the thread.
pub struct SchedulerHandle<B: RenderBackend + 'static> {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<FixedStepScheduler<B>>>,
}

impl<B: RenderBackend + 'static> SchedulerHandle<B> {
    /// Ask the loop to finish after its current pass.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the loop, wait for it, and take the scheduler back so its
    /// backend is torn down on the caller's thread.
    pub fn stop(mut self) -> Result<FixedStepScheduler<B>, SchedulerError> {
        self.request_stop();
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| SchedulerError::Panicked),
            None => Err(SchedulerError::Panicked),
        }
    }
}

impl<B: RenderBackend + 'static> Drop for SchedulerHandle<B> {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.request_stop();
            if thread.join().is_err() {
                tracing::error!("simulation thread panicked");
            }
        }
    }
}
