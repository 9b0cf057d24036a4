//! Commands into a carousel and change events out of it.

use crate::ownership::Owner;

/// Everything a host can ask of a carousel, routed through
/// [`Carousel::update`](crate::Carousel::update).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselMessage {
    // Navigation
    Next,
    Prev,
    GoToPage(usize),

    // Autoplay
    Pause,
    Resume,
    HoverEnter,
    HoverLeave,

    // Pointer / touch
    DragStart { x: f32 },
    DragMove { x: f32 },
    DragEnd { x: f32 },
    DragCancel,

    // Layout
    Resize {
        viewport_width: f32,
        container_width: f32,
    },
}

/// Observable changes, drained by the host with
/// [`Carousel::drain_events`](crate::Carousel::drain_events).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// The anchored logical item changed.
    IndexChanged { from: usize, to: usize },
    /// A wrap correction moved the offset by whole lists.
    Wrapped { lists: i64 },
    DragChanged(bool),
    OwnerChanged { from: Owner, to: Owner, seq: u64 },
    /// Dwell progress went back to exactly 0.
    ProgressReset,
    /// A spring or glide came to rest.
    Settled,
}
