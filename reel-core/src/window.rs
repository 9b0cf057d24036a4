//! The visible window: which items to paint and where.

use reel_model::LogicalList;

use crate::{geometry::Geometry, sequence::VirtualSequence};

/// One painted item, positioned relative to the container's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSlot {
    pub virtual_index: i64,
    pub logical_index: usize,
    pub x: f32,
    pub width: f32,
    /// The anchored item.
    pub active: bool,
    /// Dwell progress, carried by the active item only.
    pub progress: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub slots: Vec<WindowSlot>,
}

impl VisibleWindow {
    /// Every item that intersects `[0, container_width)` at `offset`.
    /// Empty while geometry is inactive.
    pub fn compute(
        offset: f32,
        anchor: i64,
        geometry: &Geometry,
        sequence: &VirtualSequence,
        progress: f32,
    ) -> Self {
        if !geometry.is_active() {
            return Self::default();
        }
        let step = geometry.step();
        let first = (-offset / step).floor() as i64;
        let mut slots = Vec::with_capacity(geometry.items_per_view + 1);
        for virtual_index in first..=first + geometry.items_per_view as i64 {
            let x = virtual_index as f32 * step + offset;
            if x >= geometry.container_width || x + geometry.item_width <= 0.0
            {
                continue;
            }
            let active = virtual_index == anchor;
            slots.push(WindowSlot {
                virtual_index,
                logical_index: sequence.logical_index(virtual_index),
                x,
                width: geometry.item_width,
                active,
                progress: if active { progress } else { 0.0 },
            });
        }
        Self { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Logical indices in paint order.
    pub fn logical_indices(&self) -> Vec<usize> {
        self.slots.iter().map(|s| s.logical_index).collect()
    }

    /// What a viewer sees: logical item and rounded x for each slot.
    /// Equal signatures mean an identical frame.
    pub fn signature(&self) -> Vec<(usize, i32)> {
        self.slots
            .iter()
            .map(|s| (s.logical_index, s.x.round() as i32))
            .collect()
    }

    pub fn active(&self) -> Option<&WindowSlot> {
        self.slots.iter().find(|s| s.active)
    }

    /// Pair each slot with the item it paints.
    pub fn items<'a, T>(
        &'a self,
        list: &'a LogicalList<T>,
    ) -> impl Iterator<Item = (&'a WindowSlot, &'a T)> + 'a {
        self.slots
            .iter()
            .map(move |slot| (slot, list.wrapped(slot.logical_index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BreakpointTable;

    fn desktop() -> Geometry {
        Geometry::resolve(1280.0, 1248.0, &BreakpointTable::testimonial(), 24.0)
    }

    #[test]
    fn resting_window_shows_items_per_view() {
        let g = desktop();
        let seq = VirtualSequence::new(6).unwrap();
        let w = VisibleWindow::compute(-6.0 * g.step(), 6, &g, &seq, 0.4);
        assert_eq!(w.logical_indices(), vec![0, 1, 2]);
        assert_eq!(w.slots[0].x, 0.0);
        let active = w.active().unwrap();
        assert_eq!(active.logical_index, 0);
        assert_eq!(active.progress, 0.4);
        assert!(w.slots[1..].iter().all(|s| s.progress == 0.0));
    }

    #[test]
    fn partial_offset_shows_an_extra_item() {
        let g = desktop();
        let seq = VirtualSequence::new(6).unwrap();
        let w = VisibleWindow::compute(-6.5 * g.step(), 6, &g, &seq, 0.0);
        assert_eq!(w.logical_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn window_wraps_logical_indices() {
        let g = desktop();
        let seq = VirtualSequence::new(6).unwrap();
        let w = VisibleWindow::compute(-10.0 * g.step(), 10, &g, &seq, 0.0);
        assert_eq!(w.logical_indices(), vec![4, 5, 0]);
    }

    #[test]
    fn shifted_by_a_list_paints_the_same_frame() {
        let g = desktop();
        let seq = VirtualSequence::new(6).unwrap();
        let a = VisibleWindow::compute(-11.3 * g.step(), 11, &g, &seq, 0.0);
        let b = VisibleWindow::compute(-5.3 * g.step(), 5, &g, &seq, 0.0);
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn slots_resolve_to_list_items() {
        let g = desktop();
        let seq = VirtualSequence::new(4).unwrap();
        let list = LogicalList::new(vec!["a", "b", "c", "d"]).unwrap();
        let w = VisibleWindow::compute(-7.0 * g.step(), 7, &g, &seq, 0.0);
        let painted: Vec<_> = w.items(&list).map(|(_, item)| *item).collect();
        assert_eq!(painted, vec!["d", "a", "b"]);
    }

    #[test]
    fn inactive_geometry_paints_nothing() {
        let seq = VirtualSequence::new(6).unwrap();
        let w =
            VisibleWindow::compute(0.0, 6, &Geometry::INACTIVE, &seq, 0.0);
        assert!(w.is_empty());
    }
}
