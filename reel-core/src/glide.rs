//! Inertial glide for continuous-mode releases.
//!
//! After a committed fling the marquee keeps the release velocity and
//! decays it exponentially toward zero, then hands motion back to autoplay.

use std::time::Duration;

use crate::{
    constants::{gesture, glide as defaults},
    gesture::clamp_speed,
};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlideConfig {
    /// Decay time constant.
    pub decay_tau: Duration,
    /// Speed (px/s) under which the glide stops.
    pub min_speed: f32,
    /// Launch speeds are clamped to this magnitude.
    pub max_speed: f32,
}

impl Default for GlideConfig {
    fn default() -> Self {
        Self {
            decay_tau: Duration::from_millis(defaults::DECAY_TAU_MS),
            min_speed: defaults::MIN_SPEED_PX_S,
            max_speed: gesture::MAX_FLING_PX_S,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Glide {
    cfg: GlideConfig,
    /// Current velocity in px/s (signed)
    velocity: f32,
    active: bool,
}

impl Glide {
    pub fn launch(cfg: GlideConfig, velocity: f32) -> Self {
        let velocity = clamp_speed(velocity, cfg.max_speed);
        Self {
            cfg,
            velocity,
            active: velocity.abs() > cfg.min_speed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Advance by `dt` seconds and return the displacement (px) covered.
    /// Returns `None` once the glide has died out.
    pub fn step(&mut self, dt: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        if dt <= 0.0 {
            return Some(0.0);
        }
        let tau = self.cfg.decay_tau.as_secs_f32().max(1e-3);
        let decay = (-dt / tau).exp();
        // Integral of v0 * e^(-t/tau) over [0, dt].
        let displacement = self.velocity * tau * (1.0 - decay);
        self.velocity *= decay;

        if self.velocity.abs() <= self.cfg.min_speed {
            self.active = false;
            self.velocity = 0.0;
        }
        Some(displacement)
    }

}
