//! Wrap normalization: keep the anchor index inside the middle copy.
//!
//! Shifting the offset by whole list widths never changes which logical
//! items are painted, because the virtual sequence repeats every `N` items.

use tracing::trace;

/// Result of normalizing an `(offset, index)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub offset: f32,
    pub index: i64,
    /// Whole lists the index moved down by. Positive when the index was
    /// past the middle copy, negative when it was before it.
    pub lists: i64,
}

impl Correction {
    pub fn is_noop(&self) -> bool {
        self.lists == 0
    }

    /// Pixels added to the offset by this correction.
    pub fn shift_px(&self, logical_len: usize, step: f32) -> f32 {
        (self.lists * logical_len as i64) as f32 * step
    }

    /// Index units subtracted from the anchor by this correction.
    pub fn shift_index(&self, logical_len: usize) -> i64 {
        self.lists * logical_len as i64
    }
}

/// Folds offsets back into the middle copy of an `N`-item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapNormalizer {
    logical_len: usize,
}

impl WrapNormalizer {
    pub fn new(logical_len: usize) -> Self {
        Self {
            logical_len: logical_len.max(1),
        }
    }

    pub fn logical_len(&self) -> usize {
        self.logical_len
    }

    /// `round(-offset / step)`.
    #[inline]
    pub fn index_for(offset: f32, step: f32) -> i64 {
        if step <= 0.0 {
            return 0;
        }
        (-offset / step).round() as i64
    }

    /// Whole lists `index` lies beyond the middle copy; 0 inside `[N, 2N)`.
    #[inline]
    pub fn lists_out(&self, index: i64) -> i64 {
        index.div_euclid(self.logical_len as i64) - 1
    }

    pub fn contains(&self, index: i64) -> bool {
        self.lists_out(index) == 0
    }

    /// Fold an index into `[N, 2N)`. Returns `(index, lists)`.
    pub fn normalize_index(&self, index: i64) -> (i64, i64) {
        let lists = self.lists_out(index);
        (index - lists * self.logical_len as i64, lists)
    }

    /// Normalize an anchor together with the offset that renders it.
    pub fn apply(&self, offset: f32, anchor: i64, step: f32) -> Correction {
        let (index, lists) = self.normalize_index(anchor);
        if lists == 0 {
            return Correction {
                offset,
                index,
                lists,
            };
        }
        let corrected = Correction {
            offset: offset + (lists * self.logical_len as i64) as f32 * step,
            index,
            lists,
        };
        trace!(
            from = anchor,
            to = index,
            lists,
            "wrap correction applied"
        );
        corrected
    }

    /// Normalize using the index derived from the offset itself.
    pub fn normalize_offset(&self, offset: f32, step: f32) -> Correction {
        self.apply(offset, Self::index_for(offset, step), step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 424.0;

    #[test]
    fn middle_copy_is_left_alone() {
        let w = WrapNormalizer::new(6);
        for i in 6..12 {
            let c = w.normalize_offset(-(i as f32) * STEP, STEP);
            assert!(c.is_noop());
            assert_eq!(c.index, i);
        }
    }

    #[test]
    fn index_past_the_end_moves_back_one_list() {
        let w = WrapNormalizer::new(6);
        let c = w.normalize_offset(-12.0 * STEP, STEP);
        assert_eq!(c.index, 6);
        assert_eq!(c.lists, 1);
        assert_eq!(c.offset, -6.0 * STEP);
        assert_eq!(c.shift_px(6, STEP), 6.0 * STEP);
    }

    #[test]
    fn index_before_the_start_moves_forward() {
        let w = WrapNormalizer::new(6);
        let c = w.normalize_offset(-5.0 * STEP - 30.0, STEP);
        assert_eq!(c.index, 11);
        assert_eq!(c.lists, -1);
        assert_eq!(c.offset, -11.0 * STEP - 30.0);
    }

    #[test]
    fn far_out_offsets_fold_in_one_pass() {
        let w = WrapNormalizer::new(4);
        let c = w.normalize_offset(-41.0 * STEP, STEP);
        assert!(w.contains(c.index));
        assert_eq!(c.index, 5);

        let c = w.normalize_offset(9.0 * STEP, STEP);
        assert!(w.contains(c.index));
        assert_eq!(c.index, 7);
    }

    #[test]
    fn normalizing_twice_is_a_noop() {
        let w = WrapNormalizer::new(6);
        let first = w.normalize_offset(-13.4 * STEP, STEP);
        let second = w.normalize_offset(first.offset, STEP);
        assert!(second.is_noop());
        assert_eq!(second.offset, first.offset);
        assert_eq!(second.index, first.index);
    }

    #[test]
    fn zero_step_never_divides() {
        let w = WrapNormalizer::new(3);
        assert_eq!(WrapNormalizer::index_for(-100.0, 0.0), 0);
        let c = w.normalize_offset(-100.0, 0.0);
        assert_eq!(c.index, 3);
        assert_eq!(c.offset, -100.0);
    }
}
