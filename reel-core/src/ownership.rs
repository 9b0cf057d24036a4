//! Single-writer arbitration for the carousel offset.
//!
//! Exactly one driver owns `offset` at any instant. Drag start transfers
//! ownership to the gesture driver; drag end hands it back to autoplay,
//! which also carries programmatic navigation (arrows, dots).

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Owner {
    /// Timers, page commands and settling motion.
    #[default]
    Autoplay,
    /// An active pointer/touch drag.
    Gesture,
}

/// An observed ownership transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handoff {
    pub from: Owner,
    pub to: Owner,
    /// Monotonic transfer counter for this carousel.
    pub seq: u64,
}

#[derive(Debug, Default, Clone)]
pub struct OffsetArbiter {
    owner: Owner,
    handoffs: u64,
}

impl OffsetArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn is_owned_by(&self, writer: Owner) -> bool {
        self.owner == writer
    }

    /// Transfer ownership to `to`. Returns the handoff when it changed hands.
    pub fn transfer(&mut self, to: Owner) -> Option<Handoff> {
        if self.owner == to {
            return None;
        }
        let from = self.owner;
        self.owner = to;
        self.handoffs += 1;
        debug!(?from, ?to, seq = self.handoffs, "offset ownership transferred");
        Some(Handoff {
            from,
            to,
            seq: self.handoffs,
        })
    }

    pub fn handoffs(&self) -> u64 {
        self.handoffs
    }
}
