//! Drag/swipe tracking and release classification.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::constants::gesture as defaults;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Release distance (px) that commits a step.
    pub distance_threshold: f32,
    /// Release speed (px/s) that commits a step.
    pub velocity_threshold: f32,
    /// Fraction of travel applied past the free range.
    pub elastic: f32,
    /// Trailing window for release velocity.
    pub velocity_window: Duration,
    /// Release speeds are clamped to this magnitude.
    pub max_fling: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            distance_threshold: defaults::DISTANCE_THRESHOLD_PX,
            velocity_threshold: defaults::VELOCITY_THRESHOLD_PX_S,
            elastic: defaults::ELASTIC,
            velocity_window: Duration::from_millis(
                defaults::VELOCITY_WINDOW_MS,
            ),
            max_fling: defaults::MAX_FLING_PX_S,
        }
    }
}

/// What a release asks the carousel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Move forward one step (content dragged left).
    Advance,
    /// Move back one step (content dragged right).
    Retreat,
    /// Return to the nearest index / resume in place.
    SnapBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Raw pointer travel since drag start (px, negative = left).
    pub delta: f32,
    /// Pointer velocity at release (px/s).
    pub velocity: f32,
    pub verdict: Verdict,
    /// Anchor index at drag start, adjusted for wraps during the drag.
    pub origin_anchor: i64,
}

/// Classify a release against the thresholds. Distance decides the
/// direction when it crosses its threshold; otherwise velocity does.
pub fn classify(delta: f32, velocity: f32, cfg: &GestureConfig) -> Verdict {
    let direction = if delta.abs() > cfg.distance_threshold {
        delta
    } else if velocity.abs() > cfg.velocity_threshold {
        velocity
    } else {
        return Verdict::SnapBack;
    };
    if direction < 0.0 {
        Verdict::Advance
    } else {
        Verdict::Retreat
    }
}

#[derive(Debug, Clone)]
struct DragSession {
    start_pointer: f32,
    origin_offset: f32,
    origin_anchor: i64,
    samples: VecDeque<(Instant, f32)>,
}

#[derive(Debug, Clone)]
pub struct GestureController {
    cfg: GestureConfig,
    session: Option<DragSession>,
}

impl GestureController {
    pub fn new(cfg: GestureConfig) -> Self {
        Self { cfg, session: None }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.cfg
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn begin(
        &mut self,
        pointer_x: f32,
        origin_offset: f32,
        origin_anchor: i64,
        now: Instant,
    ) {
        let mut samples = VecDeque::with_capacity(16);
        samples.push_back((now, pointer_x));
        self.session = Some(DragSession {
            start_pointer: pointer_x,
            origin_offset,
            origin_anchor,
            samples,
        });
    }

    /// Record a pointer position and return the offset it maps to.
    /// `free_range` is how far (px) the drag tracks 1:1 before the elastic
    /// factor applies.
    pub fn track(
        &mut self,
        pointer_x: f32,
        now: Instant,
        free_range: f32,
    ) -> Option<f32> {
        let elastic = self.cfg.elastic;
        let window = self.cfg.velocity_window;
        let session = self.session.as_mut()?;
        push_sample(&mut session.samples, now, pointer_x, window);
        let delta = pointer_x - session.start_pointer;
        Some(session.origin_offset + damp(delta, free_range, elastic))
    }

    /// Keep the session consistent after a wrap correction moved the
    /// offset by `shift_px` and the anchor down by `shift_index`.
    pub fn rebase(&mut self, shift_px: f32, shift_index: i64) {
        if let Some(session) = self.session.as_mut() {
            session.origin_offset += shift_px;
            session.origin_anchor -= shift_index;
        }
    }

    /// Finish the drag and classify it.
    pub fn end(&mut self, pointer_x: f32, now: Instant) -> Option<Release> {
        let mut session = self.session.take()?;
        push_sample(
            &mut session.samples,
            now,
            pointer_x,
            self.cfg.velocity_window,
        );
        let delta = pointer_x - session.start_pointer;
        let velocity = release_velocity(&session.samples, now, &self.cfg);
        Some(Release {
            delta,
            velocity,
            verdict: classify(delta, velocity, &self.cfg),
            origin_anchor: session.origin_anchor,
        })
    }

    /// Drop the session without a verdict.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}

fn push_sample(
    samples: &mut VecDeque<(Instant, f32)>,
    now: Instant,
    x: f32,
    window: Duration,
) {
    samples.push_back((now, x));
    // Keep one sample older than the window as a velocity reference.
    while samples.len() > 2
        && samples
            .get(1)
            .is_some_and(|(t, _)| now.saturating_duration_since(*t) > window)
    {
        samples.pop_front();
    }
}

fn release_velocity(
    samples: &VecDeque<(Instant, f32)>,
    now: Instant,
    cfg: &GestureConfig,
) -> f32 {
    let Some(&(t_last, x_last)) = samples.back() else {
        return 0.0;
    };
    let reference = samples
        .iter()
        .find(|(t, _)| now.saturating_duration_since(*t) <= cfg.velocity_window)
        .copied();
    let Some((t_ref, x_ref)) = reference else {
        return 0.0;
    };
    let dt = t_last.saturating_duration_since(t_ref).as_secs_f32();
    if dt <= 0.0 {
        return 0.0;
    }
    clamp_speed((x_last - x_ref) / dt, cfg.max_fling)
}

/// Limit `velocity` to `cap` in magnitude. Unlike `f32::clamp` this never
/// panics on a negative or NaN cap.
pub(crate) fn clamp_speed(velocity: f32, cap: f32) -> f32 {
    let cap = cap.abs();
    velocity.max(-cap).min(cap)
}

/// 1:1 inside `free_range`, scaled by `elastic` past it.
fn damp(delta: f32, free_range: f32, elastic: f32) -> f32 {
    let free = free_range.max(0.0);
    if delta.abs() <= free {
        return delta;
    }
    delta.signum() * (free + (delta.abs() - free) * elastic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn classification_thresholds() {
        let cfg = GestureConfig::default();
        assert_eq!(classify(-80.0, 0.0, &cfg), Verdict::Advance);
        assert_eq!(classify(80.0, 0.0, &cfg), Verdict::Retreat);
        assert_eq!(classify(-20.0, -100.0, &cfg), Verdict::SnapBack);
        assert_eq!(classify(-10.0, -900.0, &cfg), Verdict::Advance);
        assert_eq!(classify(10.0, 900.0, &cfg), Verdict::Retreat);
        // Distance wins the direction when both cross.
        assert_eq!(classify(-60.0, 700.0, &cfg), Verdict::Advance);
        assert_eq!(classify(50.0, 0.0, &cfg), Verdict::SnapBack);
    }

    #[test]
    fn tracking_is_one_to_one_inside_free_range() {
        let t0 = Instant::now();
        let mut g = GestureController::new(GestureConfig::default());
        g.begin(500.0, -2544.0, 6, t0);
        let offset = g.track(420.0, t0 + ms(16), 1_272.0).unwrap();
        assert_eq!(offset, -2544.0 - 80.0);
    }

    #[test]
    fn tracking_is_damped_past_free_range() {
        let t0 = Instant::now();
        let mut g = GestureController::new(GestureConfig::default());
        g.begin(0.0, 0.0, 6, t0);
        let offset = g.track(-300.0, t0 + ms(16), 100.0).unwrap();
        assert_eq!(offset, -(100.0 + 200.0 * 0.2));
    }

    #[test]
    fn slow_drag_has_low_release_velocity() {
        let t0 = Instant::now();
        let mut g = GestureController::new(GestureConfig::default());
        g.begin(500.0, 0.0, 6, t0);
        for i in 1..=20u64 {
            g.track(500.0 - i as f32, t0 + ms(i * 20), 1_000.0);
        }
        let release = g.end(480.0, t0 + ms(420)).unwrap();
        assert_eq!(release.delta, -20.0);
        assert!(release.velocity.abs() < 500.0);
        assert_eq!(release.verdict, Verdict::SnapBack);
        assert!(!g.is_active());
    }

    #[test]
    fn fast_flick_commits_on_velocity() {
        let t0 = Instant::now();
        let mut g = GestureController::new(GestureConfig::default());
        g.begin(500.0, 0.0, 6, t0);
        g.track(490.0, t0 + ms(10), 1_000.0);
        g.track(470.0, t0 + ms(20), 1_000.0);
        let release = g.end(460.0, t0 + ms(30)).unwrap();
        assert!(release.velocity < -500.0, "{}", release.velocity);
        assert_eq!(release.verdict, Verdict::Advance);
    }

    #[test]
    fn rebase_follows_wrap_corrections() {
        let t0 = Instant::now();
        let mut g = GestureController::new(GestureConfig::default());
        g.begin(0.0, -100.0, 11, t0);
        g.rebase(600.0, 6);
        assert_eq!(g.track(-10.0, t0, 1_000.0), Some(490.0));
        let release = g.end(-10.0, t0).unwrap();
        assert_eq!(release.origin_anchor, 5);
    }
}
