//! Page-facing snapshot of the types surface.
//! Prefer importing from this module when wiring carousels into a page.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::list::LogicalList;
pub use super::partner::Partner;
pub use super::testimonial::Testimonial;
