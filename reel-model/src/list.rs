//! Non-empty ordered item list owned by the calling page.

use std::ops::Index;
use std::sync::Arc;

use crate::error::{ModelError, Result};

/// Ordered list of `N >= 1` items, fixed for a carousel's lifetime.
///
/// Cloning is cheap: the items live behind an `Arc` so the page and any
/// number of carousels can share one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalList<T> {
    items: Arc<[T]>,
}

impl<T> LogicalList<T> {
    /// Build a list, refusing an empty one.
    pub fn new(items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(ModelError::EmptyList);
        }
        Ok(Self {
            items: items.into(),
        })
    }

    /// Number of logical items (`N`). Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Item for any virtual index, wrapping modulo `N`.
    pub fn wrapped(&self, index: usize) -> &T {
        &self.items[index % self.items.len()]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Index<usize> for LogicalList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<T> TryFrom<Vec<T>> for LogicalList<T> {
    type Error = ModelError;

    fn try_from(items: Vec<T>) -> Result<Self> {
        Self::new(items)
    }
}

impl<'a, T> IntoIterator for &'a LogicalList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
