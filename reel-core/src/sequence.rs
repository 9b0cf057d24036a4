//! Virtual sequence: the logical list laid out three times, `[A][A][A]`.
//!
//! The middle copy is where the anchor index lives; the outer copies give
//! every window near either edge of the middle real neighbours to paint.

use std::ops::Range;

/// Index mapping over the tripled list. Holds no items, only `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualSequence {
    logical_len: usize,
}

impl VirtualSequence {
    pub const COPIES: usize = 3;

    /// `None` for an empty list; an empty carousel never mounts.
    pub fn new(logical_len: usize) -> Option<Self> {
        (logical_len > 0).then_some(Self { logical_len })
    }

    /// `N`.
    pub fn logical_len(&self) -> usize {
        self.logical_len
    }

    /// `3N`.
    pub fn len(&self) -> usize {
        self.logical_len * Self::COPIES
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Virtual indices of the middle copy, `N..2N`.
    pub fn middle(&self) -> Range<usize> {
        self.logical_len..self.logical_len * 2
    }

    /// Logical index for any (possibly negative) virtual index.
    pub fn logical_index(&self, virtual_index: i64) -> usize {
        virtual_index.rem_euclid(self.logical_len as i64) as usize
    }

    /// Fold any virtual index into `0..3N`.
    pub fn fold(&self, virtual_index: i64) -> usize {
        virtual_index.rem_euclid(self.len() as i64) as usize
    }
}

/// Triple a list into its virtual sequence.
pub fn build_virtual<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() * VirtualSequence::COPIES);
    for _ in 0..VirtualSequence::COPIES {
        out.extend_from_slice(items);
    }
    out
}

/// Borrowing variant of [`build_virtual`] for render passes.
pub fn build_virtual_refs<T>(items: &[T]) -> Vec<&T> {
    items
        .iter()
        .cycle()
        .take(items.len() * VirtualSequence::COPIES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tripled_list_repeats_in_order() {
        let v = build_virtual(&["a", "b"]);
        assert_eq!(v, vec!["a", "b", "a", "b", "a", "b"]);

        let refs = build_virtual_refs(&[1, 2, 3]);
        assert_eq!(refs.len(), 9);
        assert_eq!(*refs[7], 2);
    }

    #[test]
    fn empty_list_has_no_sequence() {
        assert!(VirtualSequence::new(0).is_none());
        assert!(build_virtual::<u8>(&[]).is_empty());
    }

    #[test]
    fn virtual_index_maps_modulo_n() {
        let seq = VirtualSequence::new(6).unwrap();
        assert_eq!(seq.len(), 18);
        assert_eq!(seq.middle(), 6..12);
        assert_eq!(seq.logical_index(13), 1);
        assert_eq!(seq.logical_index(-1), 5);
        assert_eq!(seq.fold(19), 1);
    }
}
