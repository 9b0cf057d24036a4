//! Viewport geometry: items per view and per-item width.

use crate::constants::{breakpoints, layout};

/// A breakpoint tier: at `min_width` and above, show `items_per_view`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    pub min_width: f32,
    pub items_per_view: usize,
}

impl Breakpoint {
    pub const fn new(min_width: f32, items_per_view: usize) -> Self {
        Self {
            min_width,
            items_per_view,
        }
    }
}

/// Ordered breakpoint tiers plus the count used below the smallest tier.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    /// Sorted by `min_width`, widest first.
    tiers: Vec<Breakpoint>,
    fallback: usize,
}

impl BreakpointTable {
    /// Build a table. Tiers are sorted widest first and every count is
    /// raised to at least one item.
    pub fn new(mut tiers: Vec<Breakpoint>, fallback: usize) -> Self {
        for tier in &mut tiers {
            tier.items_per_view = tier.items_per_view.max(1);
        }
        tiers.sort_by(|a, b| b.min_width.total_cmp(&a.min_width));
        Self {
            tiers,
            fallback: fallback.max(1),
        }
    }

    /// Testimonial rotator: 3 on desktop, 2 on tablet, 1 on mobile.
    pub fn testimonial() -> Self {
        Self::new(
            vec![
                Breakpoint::new(breakpoints::DESKTOP, 3),
                Breakpoint::new(breakpoints::TABLET, 2),
            ],
            1,
        )
    }

    /// Partner marquee: 5 on desktop, 4 on tablet, 2 on mobile.
    pub fn partner() -> Self {
        Self::new(
            vec![
                Breakpoint::new(breakpoints::DESKTOP, 5),
                Breakpoint::new(breakpoints::TABLET, 4),
            ],
            2,
        )
    }

    pub fn tiers(&self) -> &[Breakpoint] {
        &self.tiers
    }

    pub fn fallback(&self) -> usize {
        self.fallback
    }

    /// Items per view for a viewport width.
    pub fn items_for(&self, viewport_width: f32) -> usize {
        self.tiers
            .iter()
            .find(|tier| viewport_width >= tier.min_width)
            .map(|tier| tier.items_per_view)
            .unwrap_or(self.fallback)
    }
}

/// Coarse device class derived from the site breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
    LargeDesktop,
}

impl DeviceClass {
    pub fn classify(viewport_width: f32) -> Self {
        if viewport_width >= breakpoints::LARGE_DESKTOP {
            DeviceClass::LargeDesktop
        } else if is_desktop(viewport_width) {
            DeviceClass::Desktop
        } else if is_tablet(viewport_width) {
            DeviceClass::Tablet
        } else {
            DeviceClass::Mobile
        }
    }
}

pub fn is_mobile(viewport_width: f32) -> bool {
    viewport_width < breakpoints::TABLET
}

pub fn is_tablet(viewport_width: f32) -> bool {
    (breakpoints::TABLET..breakpoints::DESKTOP).contains(&viewport_width)
}

pub fn is_desktop(viewport_width: f32) -> bool {
    viewport_width >= breakpoints::DESKTOP
}

/// Resolved layout for one carousel at one viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub items_per_view: usize,
    pub item_width: f32,
    pub gap: f32,
    pub container_width: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::INACTIVE
    }
}

impl Geometry {
    /// Geometry before the container has been measured.
    pub const INACTIVE: Self = Self {
        items_per_view: 1,
        item_width: 0.0,
        gap: layout::GAP_PX,
        container_width: 0.0,
    };

    /// Resolve geometry. Breakpoints are matched against the viewport,
    /// widths are split from the container.
    pub fn resolve(
        viewport_width: f32,
        container_width: f32,
        table: &BreakpointTable,
        gap: f32,
    ) -> Self {
        let items_per_view = table.items_for(viewport_width);
        let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
        let container_width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        let gaps = gap * items_per_view.saturating_sub(1) as f32;
        let item_width =
            ((container_width - gaps) / items_per_view as f32).max(0.0);
        Self {
            items_per_view,
            item_width,
            gap,
            container_width,
        }
    }

    /// Distance between the starts of two neighbouring items.
    #[inline]
    pub fn step(&self) -> f32 {
        self.item_width + self.gap
    }

    /// Drivers treat zero-width items as "not laid out yet".
    #[inline]
    pub fn is_active(&self) -> bool {
        self.item_width > 0.0 && self.item_width.is_finite()
    }

    /// Width of one full page of items including inner gaps.
    pub fn page_width(&self) -> f32 {
        self.items_per_view as f32 * self.step()
    }
}
