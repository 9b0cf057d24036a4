//! Per-carousel scheduling resources: repeating timers and a frame clock.
//!
//! These are plain values owned by the carousel. Hosts drive them by
//! calling `tick(now)` and use [`Wakeup`] to decide when to call next.
//! Cancelling is dropping the deadline, so a stale wake-up is a no-op.

use std::time::{Duration, Instant};

/// When the carousel next needs a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// On the next animation frame.
    Frame,
    /// At a deadline (timer-driven work only).
    At(Instant),
    /// Nothing scheduled.
    Idle,
}

impl Wakeup {
    /// The more urgent of two wake-ups.
    pub fn earliest(self, other: Wakeup) -> Wakeup {
        match (self, other) {
            (Wakeup::Frame, _) | (_, Wakeup::Frame) => Wakeup::Frame,
            (Wakeup::At(a), Wakeup::At(b)) => Wakeup::At(a.min(b)),
            (Wakeup::At(a), Wakeup::Idle) | (Wakeup::Idle, Wakeup::At(a)) => {
                Wakeup::At(a)
            }
            (Wakeup::Idle, Wakeup::Idle) => Wakeup::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Wakeup::Idle)
    }
}

/// A repeating deadline.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// (Re)start the timer one period from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Fire at most once per call. Missed periods are skipped rather than
    /// replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                let next = due + self.period;
                self.next_due =
                    Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }
}

/// Per-frame callback bookkeeping: whether a frame is wanted, and the
/// timestamp the next delta is measured from.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: Duration,
}

impl FrameClock {
    pub fn new(max_delta: Duration) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Request frames from `now` on. Already-running clocks keep their
    /// reference so the next delta is not truncated.
    pub fn request(&mut self, now: Instant) {
        if self.last.is_none() {
            self.last = Some(now);
        }
    }

    pub fn cancel(&mut self) {
        self.last = None;
    }

    pub fn is_requested(&self) -> bool {
        self.last.is_some()
    }

    /// Seconds since the previous frame, clamped to `max_delta`.
    /// `None` when no frame was requested.
    pub fn delta(&mut self, now: Instant) -> Option<f32> {
        let last = self.last?;
        self.last = Some(now);
        let dt = now.saturating_duration_since(last).min(self.max_delta);
        Some(dt.as_secs_f32())
    }
}
