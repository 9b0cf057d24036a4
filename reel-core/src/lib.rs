//! # Reel Core
//!
//! Headless engine behind the testimonial and partner-logo rotators: a
//! window of items over a bounded list that loops forever in both
//! directions, driven by autoplay or by drag gestures.
//!
//! ## Overview
//!
//! - **Geometry**: items per view and item width from a breakpoint table
//! - **Virtual sequence**: the list tripled, `[A][A][A]`, so both edges of
//!   the middle copy have real neighbours
//! - **Position engine**: one offset, a free-running marquee mode and a
//!   spring-to-index paged mode
//! - **Wrap normalizer**: keeps the index inside the middle copy without a
//!   visible jump
//! - **Autoplay**: frame-driven marquee or interval-driven paging with a
//!   dwell progress fraction
//! - **Gestures**: 1:1 drag tracking with release classification
//!
//! Exactly one driver writes the offset at a time; see [`Owner`].
//!
//! ## Example
//!
//! ```
//! use std::time::Instant;
//! use reel_core::{Carousel, CarouselConfig};
//!
//! let now = Instant::now();
//! let mut carousel =
//!     Carousel::mount(6, CarouselConfig::testimonial_defaults(), now)?;
//! carousel.resize(1280.0, 1248.0, now);
//! carousel.next(now);
//! assert_eq!(carousel.state().index, 7);
//! assert_eq!(carousel.pagination().total_pages, 2);
//! # Ok::<(), reel_core::EngineError>(())
//! ```
#![allow(missing_docs)]

pub mod autoplay;
pub mod carousel;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod glide;
pub mod indicators;
pub mod messages;
pub mod ownership;
pub mod registry;
pub mod schedule;
pub mod sequence;
pub mod spring;
pub mod types;
pub mod window;
pub mod wrap;

pub use autoplay::{AutoplayConfig, AutoplayScheduler, AutoplayTick, Cadence};
pub use carousel::Carousel;
pub use engine::{EngineUpdate, Mode, Motion, PositionEngine};
pub use error::{EngineError, Result};
pub use geometry::{Breakpoint, BreakpointTable, DeviceClass, Geometry};
pub use gesture::{GestureConfig, GestureController, Release, Verdict};
pub use glide::{Glide, GlideConfig};
pub use indicators::{Pagination, page_target};
pub use messages::{CarouselEvent, CarouselMessage};
pub use ownership::{Handoff, OffsetArbiter, Owner};
pub use registry::CarouselRegistry;
pub use schedule::{FrameClock, IntervalTimer, Wakeup};
pub use sequence::{VirtualSequence, build_virtual, build_virtual_refs};
pub use spring::{Spring, SpringConfig};
pub use types::{CarouselConfig, CarouselKey, CarouselState};
pub use window::{VisibleWindow, WindowSlot};
pub use wrap::{Correction, WrapNormalizer};

pub use reel_model::{LogicalList, Partner, Testimonial};
