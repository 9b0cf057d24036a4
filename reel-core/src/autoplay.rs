//! Autoplay scheduling and dwell progress.
//!
//! Continuous carousels want a frame every frame; discrete carousels want
//! an advance every `interval` and a progress poll every `progress_tick`.
//! Both timers are cancelled whenever autoplay stops owning the carousel.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::{
    constants::autoplay as defaults,
    schedule::{IntervalTimer, Wakeup},
};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoplayConfig {
    pub enabled: bool,
    /// Dwell per index in discrete mode.
    pub interval: Duration,
    /// Progress poll cadence in discrete mode.
    pub progress_tick: Duration,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: Duration::from_millis(defaults::INTERVAL_MS),
            progress_tick: Duration::from_millis(defaults::PROGRESS_TICK_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Drive motion every animation frame.
    Frame,
    /// Advance one index per interval.
    Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayTick {
    Idle,
    /// Time to advance to the next index.
    Advance,
}

#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    cfg: AutoplayConfig,
    cadence: Cadence,
    /// Paused by hover or an explicit `pause()`.
    paused: bool,
    /// Suspended while a drag owns the carousel.
    suspended: bool,
    advance: IntervalTimer,
    poll: IntervalTimer,
    dwell_started: Option<Instant>,
    progress: f32,
}

impl AutoplayScheduler {
    pub fn new(cfg: AutoplayConfig, cadence: Cadence) -> Self {
        Self {
            advance: IntervalTimer::new(cfg.interval),
            poll: IntervalTimer::new(cfg.progress_tick),
            cfg,
            cadence,
            paused: false,
            suspended: false,
            dwell_started: None,
            progress: 0.0,
        }
    }

    pub fn config(&self) -> &AutoplayConfig {
        &self.cfg
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Enabled, not paused and not suspended by a drag.
    pub fn is_running(&self) -> bool {
        self.cfg.enabled && !self.paused && !self.suspended
    }

    /// Dwell progress in `[0, 1]`. Always 0 for frame cadence.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Begin a fresh dwell and arm the timers if autoplay may run.
    pub fn start(&mut self, now: Instant) {
        self.arm(now);
    }

    /// Hover or explicit pause. Timers stop; progress keeps its value.
    pub fn pause(&mut self) {
        self.paused = true;
        self.disarm();
    }

    /// Leave a pause: the dwell restarts from zero.
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.arm(now);
    }

    /// Drag start: cancel pending timers synchronously.
    pub fn suspend(&mut self) {
        self.suspended = true;
        self.disarm();
    }

    /// Drag end: take the carousel back with a fresh dwell.
    pub fn release(&mut self, now: Instant) {
        self.suspended = false;
        self.arm(now);
    }

    /// Manual navigation: cancel and reschedule, progress back to 0.
    pub fn reschedule(&mut self, now: Instant) {
        self.disarm();
        self.arm(now);
    }

    /// The index changed: the dwell starts over at exactly 0.
    pub fn restart_dwell(&mut self, now: Instant) {
        self.dwell_started = Some(now);
        self.progress = 0.0;
    }

    fn arm(&mut self, now: Instant) {
        self.restart_dwell(now);
        if !self.is_running() || self.cadence != Cadence::Interval {
            return;
        }
        self.advance.arm(now);
        self.poll.arm(now);
    }

    fn disarm(&mut self) {
        self.advance.cancel();
        self.poll.cancel();
    }

    /// Run due timers. Returns `Advance` when the dwell has elapsed.
    pub fn poll(&mut self, now: Instant) -> AutoplayTick {
        if !self.is_running() || self.cadence != Cadence::Interval {
            return AutoplayTick::Idle;
        }

        if self.advance.fire(now) {
            trace!("autoplay advance due");
            self.restart_dwell(now);
            // Polls that were due alongside the advance are folded into it.
            self.poll.arm(now);
            return AutoplayTick::Advance;
        }

        if self.poll.fire(now)
            && let Some(started) = self.dwell_started
        {
            let elapsed = now.saturating_duration_since(started);
            let interval = self.cfg.interval.as_secs_f32().max(f32::EPSILON);
            let fraction = elapsed.as_secs_f32() / interval;
            self.progress = fraction.clamp(self.progress, 1.0);
        }
        AutoplayTick::Idle
    }

    /// Next timer deadline, if any timer is armed.
    pub fn wakeup(&self) -> Wakeup {
        let due = [self.advance.next_due(), self.poll.next_due()]
            .into_iter()
            .flatten()
            .min();
        due.map(Wakeup::At).unwrap_or(Wakeup::Idle)
    }
}
