//! Settings for reel carousels.
//!
//! Loads carousel tuning from a TOML or JSON file (or inline JSON in the
//! environment), checks it against guard rails, and turns it into
//! [`reel_core::CarouselConfig`] values for the testimonial and partner
//! presets.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    BreakpointSetting, CarouselKind, CarouselSection, CarouselSettings,
    ModeSetting, SettingsSource,
};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};
