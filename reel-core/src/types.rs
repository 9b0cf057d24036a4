//! Shared types for carousel instances.

use std::time::Duration;

use crate::{
    autoplay::AutoplayConfig,
    constants::{autoplay as autoplay_defaults, frame, layout},
    engine::Mode,
    error::{EngineError, Result},
    geometry::{BreakpointTable, Geometry},
    gesture::GestureConfig,
    glide::GlideConfig,
    ownership::Owner,
    spring::SpringConfig,
};

/// Unique key for a carousel on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CarouselKey {
    Testimonials,
    Partners,
    Custom(&'static str),
}

/// Static configuration for one carousel instance. Use the presets or
/// build ad hoc at the callsite.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub mode: Mode,
    pub breakpoints: BreakpointTable,
    pub gap: f32,
    pub spring: SpringConfig,
    pub gesture: GestureConfig,
    pub glide: GlideConfig,
    pub autoplay: AutoplayConfig,
    /// Logical index shown first; folded modulo the list length.
    pub initial_index: usize,
    /// Frame deltas are clamped to this.
    pub max_frame_delta: Duration,
}

impl CarouselConfig {
    /// Paged testimonial rotator: 3/2/1 per view, springs between cards,
    /// advances every five seconds.
    pub fn testimonial_defaults() -> Self {
        Self {
            mode: Mode::Discrete,
            breakpoints: BreakpointTable::testimonial(),
            gap: layout::GAP_PX,
            spring: SpringConfig::default(),
            gesture: GestureConfig::default(),
            glide: GlideConfig::default(),
            autoplay: AutoplayConfig::default(),
            initial_index: 0,
            max_frame_delta: Duration::from_millis(frame::MAX_DELTA_MS),
        }
    }

    /// Partner logo marquee: 5/4/2 per view, free-running at 50 px/s.
    pub fn partner_defaults() -> Self {
        Self {
            mode: Mode::Continuous {
                speed: autoplay_defaults::MARQUEE_SPEED_PX_S,
            },
            breakpoints: BreakpointTable::partner(),
            ..Self::testimonial_defaults()
        }
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    pub fn with_autoplay(mut self, enabled: bool) -> Self {
        self.autoplay.enabled = enabled;
        self
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if let Mode::Continuous { speed } = self.mode
            && !(speed.is_finite() && speed > 0.0)
        {
            return Err(EngineError::invalid(format!(
                "continuous speed must be positive, got {speed}"
            )));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(EngineError::invalid(format!(
                "gap must be non-negative, got {}",
                self.gap
            )));
        }
        self.spring.validate()?;
        if !(self.gesture.max_fling.is_finite() && self.gesture.max_fling > 0.0)
        {
            return Err(EngineError::invalid(format!(
                "gesture max fling must be positive, got {}",
                self.gesture.max_fling
            )));
        }
        if !(self.glide.max_speed.is_finite() && self.glide.max_speed > 0.0) {
            return Err(EngineError::invalid(format!(
                "glide max speed must be positive, got {}",
                self.glide.max_speed
            )));
        }
        if self.autoplay.interval.is_zero()
            || self.autoplay.progress_tick.is_zero()
        {
            return Err(EngineError::invalid(
                "autoplay interval and progress tick must be non-zero",
            ));
        }
        if self.max_frame_delta.is_zero() {
            return Err(EngineError::invalid("max frame delta must be non-zero"));
        }
        Ok(())
    }
}

/// Published snapshot of a carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CarouselState {
    pub offset: f32,
    /// Virtual index in `[N, 2N)`.
    pub index: i64,
    /// `index mod N`.
    pub item: usize,
    pub is_dragging: bool,
    pub is_paused: bool,
    pub progress: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub owner: Owner,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub geometry: Geometry,
}
