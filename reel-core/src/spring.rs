//! Critically damped spring used for snap-to-index transitions.
//!
//! Uses the closed-form solution of the critically damped oscillator:
//!   x(t) = target + (c1 + c2*t) * e^(-ω*t)
//! with ω = sqrt(stiffness / mass), c1 = x0 - target, c2 = v0 + ω*c1.
//! The closed form is exact for any frame delta.

use crate::{
    constants::spring as defaults,
    error::{EngineError, Result},
};

/// Longest settle time [`SpringConfig::settle_time`] will simulate.
pub const SETTLE_LIMIT_S: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    pub stiffness: f32,
    pub mass: f32,
    /// Distance (px) under which the spring may rest.
    pub rest_delta: f32,
    /// Speed (px/s) under which the spring may rest.
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: defaults::STIFFNESS,
            mass: defaults::MASS,
            rest_delta: defaults::REST_DELTA_PX,
            rest_speed: defaults::REST_SPEED_PX_S,
        }
    }
}

impl SpringConfig {
    /// Angular frequency ω.
    pub fn omega(&self) -> f32 {
        (self.stiffness.max(f32::EPSILON) / self.mass.max(f32::EPSILON))
            .sqrt()
    }

    /// Damping coefficient that makes this spring critically damped.
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness.max(0.0) * self.mass.max(0.0)).sqrt()
    }

    /// Seconds a transition of `distance` px takes to come to rest,
    /// starting from zero velocity, sampled at 1 ms. `None` when it is
    /// still moving after [`SETTLE_LIMIT_S`].
    pub fn settle_time(&self, distance: f32) -> Option<f32> {
        let mut spring = Spring::new(*self, 0.0, 0.0, distance.abs());
        let dt = 0.001;
        let mut t = 0.0;
        while spring.step(dt) {
            t += dt;
            if t >= SETTLE_LIMIT_S {
                return None;
            }
        }
        Some(t)
    }

    /// Reject configs the integrator cannot bring to rest.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(self.stiffness) && positive(self.mass)) {
            return Err(EngineError::invalid(
                "spring stiffness and mass must be positive",
            ));
        }
        if !(positive(self.rest_delta) && positive(self.rest_speed)) {
            return Err(EngineError::invalid(format!(
                "spring rest thresholds must be positive, got {} px and {} px/s",
                self.rest_delta, self.rest_speed
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    cfg: SpringConfig,
    position: f32,
    velocity: f32,
    target: f32,
    settled: bool,
}

impl Spring {
    pub fn new(
        cfg: SpringConfig,
        position: f32,
        velocity: f32,
        target: f32,
    ) -> Self {
        Self {
            cfg,
            position,
            velocity,
            target,
            settled: false,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Point the spring at a new target, keeping position and velocity.
    pub fn retarget(&mut self, target: f32) {
        self.target = target;
        self.settled = false;
    }

    /// Translate the whole motion (position and target) by `dx`.
    pub fn shift(&mut self, dx: f32) {
        self.position += dx;
        self.target += dx;
    }

    /// Advance by `dt` seconds. Returns true while still moving.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.settled {
            return false;
        }
        let dt = dt.max(0.0);
        let w = self.cfg.omega();
        let c1 = self.position - self.target;
        let c2 = self.velocity + w * c1;
        let decay = (-w * dt).exp();

        self.position = self.target + (c1 + c2 * dt) * decay;
        self.velocity = (c2 - w * (c1 + c2 * dt)) * decay;

        if (self.position - self.target).abs() < self.cfg.rest_delta
            && self.velocity.abs() < self.cfg.rest_speed
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.settled = true;
            return false;
        }
        true
    }
}
