//! Page dots and arrow visibility, derived from the anchor.

/// Derived pagination for the dot indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// `current = floor((index mod N) / ipv)`, `total = ceil(N / ipv)`.
    pub fn compute(
        anchor: i64,
        logical_len: usize,
        items_per_view: usize,
    ) -> Self {
        let n = logical_len.max(1);
        let per_view = items_per_view.max(1);
        let logical = anchor.rem_euclid(n as i64) as usize;
        let total_pages = n.div_ceil(per_view);
        Self {
            current_page: (logical / per_view).min(total_pages - 1),
            total_pages,
        }
    }

    /// Arrows and dots are only shown when there is more than one page.
    pub fn show_navigation(&self) -> bool {
        self.total_pages > 1
    }

    /// Dot list: `(page, is_current)`.
    pub fn dots(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.total_pages).map(|page| (page, page == self.current_page))
    }
}

/// Virtual index a page dot jumps to: `page * ipv + N`. Not clamped; the
/// wrap pass folds anything past the middle copy. Pages at or past `N`
/// are reduced modulo `N` first, which lands on the same logical item.
pub fn page_target(page: usize, items_per_view: usize, logical_len: usize) -> i64 {
    let n = logical_len.max(1) as i128;
    let target = (page as i128 % n) * items_per_view.max(1) as i128 + n;
    // Only reachable with absurd items-per-view values: fold into the
    // middle copy outright.
    i64::try_from(target).unwrap_or_else(|_| (n + (target - n) % n) as i64)
}
