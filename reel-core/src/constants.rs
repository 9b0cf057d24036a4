//! Carousel tuning defaults
//!
//! Shared constants for geometry, spring navigation, drag classification,
//! and autoplay cadence. Tuning should happen here (or through
//! `reel-config`) so both carousel kinds update consistently.

/// Site-wide layout breakpoints in CSS pixels.
pub mod breakpoints {
    /// Narrowest layout the site supports.
    pub const MOBILE: f32 = 320.0;
    pub const TABLET: f32 = 768.0;
    pub const DESKTOP: f32 = 1024.0;
    pub const LARGE_DESKTOP: f32 = 1440.0;
}

/// Layout constants shared by both carousel kinds.
pub mod layout {
    /// Gap between cards (1.5rem).
    pub const GAP_PX: f32 = 24.0;
}

/// Spring used for discrete snap-to-index transitions.
pub mod spring {
    /// Stiffness (N/m in unit mass). Angular frequency is `sqrt(k / m)`.
    pub const STIFFNESS: f32 = 300.0;
    pub const MASS: f32 = 1.0;
    /// Distance (px) under which the spring may come to rest.
    pub const REST_DELTA_PX: f32 = 0.5;
    /// Speed (px/s) under which the spring may come to rest.
    pub const REST_SPEED_PX_S: f32 = 10.0;
}

/// Drag/swipe release classification.
pub mod gesture {
    /// Release distance beyond which a drag commits to a step.
    pub const DISTANCE_THRESHOLD_PX: f32 = 50.0;
    /// Release speed beyond which a drag commits to a step.
    pub const VELOCITY_THRESHOLD_PX_S: f32 = 500.0;
    /// Fraction of pointer travel applied beyond the free drag range.
    pub const ELASTIC: f32 = 0.2;
    /// Trailing window used to estimate release velocity.
    pub const VELOCITY_WINDOW_MS: u64 = 100;
    /// Release speeds are clamped to this magnitude.
    pub const MAX_FLING_PX_S: f32 = 8_000.0;
}

/// Inertial glide after a committed drag in continuous mode.
pub mod glide {
    /// Exponential decay time constant (ms).
    pub const DECAY_TAU_MS: u64 = 240;
    /// Speed (px/s) under which the glide stops.
    pub const MIN_SPEED_PX_S: f32 = 20.0;
}

/// Autoplay cadence.
pub mod autoplay {
    /// Discrete advance interval (ms).
    pub const INTERVAL_MS: u64 = 5_000;
    /// Dwell progress poll (ms).
    pub const PROGRESS_TICK_MS: u64 = 100;
    /// Continuous marquee speed (px/s).
    pub const MARQUEE_SPEED_PX_S: f32 = 50.0;
}

/// Frame clock defaults.
pub mod frame {
    /// Upper bound applied to every frame delta.
    pub const MAX_DELTA_MS: u64 = 100;
}
