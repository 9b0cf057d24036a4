//! Item payloads and list types shared across the reel crates.
#![allow(missing_docs)]

pub mod error;
pub mod list;
pub mod partner;
pub mod prelude;
pub mod testimonial;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use list::LogicalList;
pub use partner::Partner;
pub use testimonial::Testimonial;
