//! Registry for managing several carousels on one page, keyed by
//! [`CarouselKey`].

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::{
    carousel::Carousel,
    error::Result,
    messages::{CarouselEvent, CarouselMessage},
    schedule::Wakeup,
    types::{CarouselConfig, CarouselKey},
};

#[derive(Debug, Default)]
pub struct CarouselRegistry {
    carousels: HashMap<CarouselKey, Carousel>,
}

impl CarouselRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a carousel under `key`, replacing (and unmounting) any
    /// previous one.
    pub fn mount(
        &mut self,
        key: CarouselKey,
        logical_len: usize,
        config: CarouselConfig,
        now: Instant,
    ) -> Result<&mut Carousel> {
        let carousel = Carousel::mount(logical_len, config, now)?;
        if let Some(mut previous) = self.carousels.remove(&key) {
            previous.unmount();
        }
        debug!(?key, "carousel registered");
        Ok(self.carousels.entry(key).or_insert(carousel))
    }

    pub fn get(&self, key: &CarouselKey) -> Option<&Carousel> {
        self.carousels.get(key)
    }

    pub fn get_mut(&mut self, key: &CarouselKey) -> Option<&mut Carousel> {
        self.carousels.get_mut(key)
    }

    /// Unmount and drop the carousel for `key`.
    pub fn remove(&mut self, key: &CarouselKey) -> Option<Carousel> {
        let mut carousel = self.carousels.remove(key)?;
        carousel.unmount();
        Some(carousel)
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &CarouselKey> {
        self.carousels.keys()
    }

    /// Route a message to one carousel. Unknown keys are ignored.
    pub fn dispatch(
        &mut self,
        key: &CarouselKey,
        message: CarouselMessage,
        now: Instant,
    ) -> bool {
        match self.carousels.get_mut(key) {
            Some(carousel) => {
                carousel.update(message, now);
                true
            }
            None => false,
        }
    }

    /// Resize every carousel; they share the page viewport.
    pub fn resize_all(
        &mut self,
        viewport_width: f32,
        container_width: f32,
        now: Instant,
    ) {
        for carousel in self.carousels.values_mut() {
            carousel.resize(viewport_width, container_width, now);
        }
    }

    /// Tick every carousel. Returns the keys whose output changed.
    pub fn tick_all(&mut self, now: Instant) -> Vec<CarouselKey> {
        self.carousels
            .iter_mut()
            .filter_map(|(key, carousel)| {
                carousel.tick(now).then(|| key.clone())
            })
            .collect()
    }

    /// The most urgent wake-up across all carousels.
    pub fn next_wakeup(&self) -> Wakeup {
        self.carousels
            .values()
            .map(Carousel::next_wakeup)
            .fold(Wakeup::Idle, Wakeup::earliest)
    }

    pub fn drain_events(&mut self) -> Vec<(CarouselKey, CarouselEvent)> {
        let mut out = Vec::new();
        for (key, carousel) in &mut self.carousels {
            out.extend(
                carousel
                    .drain_events()
                    .into_iter()
                    .map(|event| (key.clone(), event)),
            );
        }
        out
    }
}
