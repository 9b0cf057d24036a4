//! The position engine: one scalar offset, the anchor index derived from
//! it, and the motion currently moving it.
//!
//! Every mutation ends with a wrap pass so the published index stays in the
//! middle copy of the virtual sequence.

use tracing::{debug, trace};

use crate::{
    glide::{Glide, GlideConfig},
    spring::{Spring, SpringConfig},
    wrap::{Correction, WrapNormalizer},
};

/// How the engine moves when nobody is navigating.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Marquee: offset decreases at `speed` px/s.
    Continuous { speed: f32 },
    /// Paged: the offset rests on an index and springs between targets.
    Discrete,
}

impl Mode {
    pub fn is_continuous(&self) -> bool {
        matches!(self, Mode::Continuous { .. })
    }
}

/// Motion currently driving the offset.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Idle,
    Spring(Spring),
    Glide(Glide),
}

/// Result of one engine mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineUpdate {
    pub moved: bool,
    /// Wrap correction folded into this update, if any.
    pub correction: Option<Correction>,
    /// A spring or glide came to rest during this update.
    pub settled: bool,
}

/// Offset and anchor of one carousel. Every mutation is wrap-normalized
/// before it returns.
#[derive(Debug, Clone)]
pub struct PositionEngine {
    mode: Mode,
    normalizer: WrapNormalizer,
    spring: SpringConfig,
    glide: GlideConfig,
    offset: f32,
    /// Rest index, or the target of an in-flight spring.
    anchor: i64,
    motion: Motion,
}

impl PositionEngine {
    /// A parked engine anchored at `start` within the middle copy. The
    /// offset is placed by [`PositionEngine::seat`] once geometry is known.
    pub fn new(
        mode: Mode,
        logical_len: usize,
        start: usize,
        spring: SpringConfig,
        glide: GlideConfig,
    ) -> Self {
        let normalizer = WrapNormalizer::new(logical_len);
        let n = normalizer.logical_len();
        Self {
            mode,
            normalizer,
            spring,
            glide,
            offset: 0.0,
            anchor: (n + start % n) as i64,
            motion: Motion::Idle,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Virtual index in `[N, 2N)`.
    pub fn anchor(&self) -> i64 {
        self.anchor
    }

    /// Position of `anchor` inside the logical list.
    pub fn logical_index(&self) -> usize {
        self.anchor.rem_euclid(self.normalizer.logical_len() as i64) as usize
    }

    pub fn logical_len(&self) -> usize {
        self.normalizer.logical_len()
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn is_moving(&self) -> bool {
        !matches!(self.motion, Motion::Idle)
    }

    /// Signed velocity (px/s) of the current motion.
    pub fn velocity(&self) -> f32 {
        match &self.motion {
            Motion::Idle => 0.0,
            Motion::Spring(s) => s.velocity(),
            Motion::Glide(g) => g.velocity(),
        }
    }

    /// Fractional index the offset currently shows.
    pub fn position(&self, step: f32) -> f32 {
        if step <= 0.0 {
            return self.anchor as f32;
        }
        -self.offset / step
    }

    pub fn nearest_index(&self, step: f32) -> i64 {
        WrapNormalizer::index_for(self.offset, step)
    }

    /// Place the offset exactly on the anchor and drop any motion.
    pub fn seat(&mut self, step: f32) {
        self.motion = Motion::Idle;
        self.offset = -(self.anchor as f32) * step.max(0.0);
    }

    /// Re-express the offset for a new step size. Discrete engines keep
    /// their anchor; continuous engines keep their fractional position.
    pub fn rescale(&mut self, old_step: f32, new_step: f32) -> EngineUpdate {
        if new_step <= 0.0 {
            self.motion = Motion::Idle;
            return EngineUpdate::default();
        }
        match self.mode {
            Mode::Continuous { .. } if old_step > 0.0 => {
                let position = -self.offset / old_step;
                self.motion = Motion::Idle;
                self.offset = -position * new_step;
            }
            _ => self.seat(new_step),
        }
        let correction = self.normalize(new_step);
        EngineUpdate {
            moved: true,
            correction,
            settled: false,
        }
    }

    /// Marquee advance: `offset -= speed * dt`.
    pub fn advance_continuous(&mut self, dt: f32, step: f32) -> EngineUpdate {
        let Mode::Continuous { speed } = self.mode else {
            return EngineUpdate::default();
        };
        if step <= 0.0 || dt <= 0.0 || self.is_moving() {
            return EngineUpdate::default();
        }
        self.offset -= speed * dt;
        let correction = self.normalize(step);
        trace!(offset = self.offset, anchor = self.anchor, "marquee advance");
        EngineUpdate {
            moved: true,
            correction,
            settled: false,
        }
    }

    /// Spring toward virtual index `target`. The target is folded into the
    /// middle copy first; the current offset and any in-flight spring are
    /// shifted by the same amount, so nothing visibly jumps. An in-flight
    /// spring is retargeted from its current kinematic state unless a
    /// launch velocity is given.
    pub fn navigate_to(
        &mut self,
        target: i64,
        velocity: Option<f32>,
        step: f32,
    ) -> EngineUpdate {
        if step <= 0.0 {
            return EngineUpdate::default();
        }
        let n = self.normalizer.logical_len();
        let folded = self.normalizer.apply(self.offset, target, step);
        let shift = folded.shift_px(n, step);
        self.offset = folded.offset;
        self.anchor = folded.index;
        let target_px = -(folded.index as f32) * step;

        let carried = self.velocity();
        match (&mut self.motion, velocity) {
            (Motion::Spring(spring), None) => {
                spring.shift(shift);
                spring.retarget(target_px);
            }
            (motion, launch) => {
                *motion = Motion::Spring(Spring::new(
                    self.spring,
                    self.offset,
                    launch.unwrap_or(carried),
                    target_px,
                ));
            }
        }
        debug!(
            target,
            anchor = self.anchor,
            wrapped = !folded.is_noop(),
            "navigating"
        );
        EngineUpdate {
            moved: true,
            correction: (!folded.is_noop()).then_some(folded),
            settled: false,
        }
    }

    /// Start an inertial glide. Speeds below the glide floor go straight
    /// to rest.
    pub fn launch_glide(&mut self, velocity: f32) -> bool {
        let glide = Glide::launch(self.glide, velocity);
        let active = glide.is_active();
        self.motion = if active {
            Motion::Glide(glide)
        } else {
            Motion::Idle
        };
        active
    }

    /// Advance the current spring or glide by `dt` seconds.
    pub fn step_motion(&mut self, dt: f32, step: f32) -> EngineUpdate {
        if step <= 0.0 {
            return EngineUpdate::default();
        }
        let (moved, settled) = match &mut self.motion {
            Motion::Idle => return EngineUpdate::default(),
            Motion::Spring(spring) => {
                let running = spring.step(dt);
                self.offset = spring.position();
                (true, !running)
            }
            Motion::Glide(glide) => match glide.step(dt) {
                Some(dx) => {
                    self.offset += dx;
                    (true, !glide.is_active())
                }
                None => (false, true),
            },
        };
        if settled {
            self.motion = Motion::Idle;
        }
        let correction = self.normalize(step);
        EngineUpdate {
            moved,
            correction,
            settled,
        }
    }

    /// Direct placement by the gesture driver. Cancels motion.
    pub fn drag_to(&mut self, offset: f32, step: f32) -> EngineUpdate {
        self.motion = Motion::Idle;
        self.offset = offset;
        if step <= 0.0 {
            return EngineUpdate::default();
        }
        let correction = self.normalize(step);
        EngineUpdate {
            moved: true,
            correction,
            settled: false,
        }
    }

    /// Freeze where the offset is now; the anchor becomes the nearest index.
    pub fn stop_motion(&mut self, step: f32) -> EngineUpdate {
        let was_moving = self.is_moving();
        self.motion = Motion::Idle;
        if step <= 0.0 {
            return EngineUpdate::default();
        }
        let correction = self.normalize(step);
        EngineUpdate {
            moved: false,
            correction,
            settled: was_moving,
        }
    }

    /// Fold the offset back into the middle copy. While a spring is in
    /// flight the anchor (its target) decides; otherwise the nearest index.
    fn normalize(&mut self, step: f32) -> Option<Correction> {
        let index = match self.motion {
            Motion::Spring(_) => self.anchor,
            _ => WrapNormalizer::index_for(self.offset, step),
        };
        let correction = self.normalizer.apply(self.offset, index, step);
        self.anchor = correction.index;
        if correction.is_noop() {
            return None;
        }
        let shift = correction.shift_px(self.normalizer.logical_len(), step);
        self.offset = correction.offset;
        if let Motion::Spring(spring) = &mut self.motion {
            spring.shift(shift);
        }
        Some(correction)
    }
}
