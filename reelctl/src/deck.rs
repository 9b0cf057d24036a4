//! Placeholder content so simulated sessions have something to show.

use std::time::Instant;

use anyhow::Result;
use reel_config::CarouselKind;
use reel_core::{Carousel, CarouselConfig};
use reel_model::{LogicalList, Partner, Testimonial};

const ROLES: [&str; 4] = ["Head of Growth", "CTO", "Founder", "Ops Lead"];
const CATEGORIES: [&str; 3] = ["Cloud", "Payments", "Analytics"];

#[derive(Debug, Clone)]
pub enum Deck {
    Testimonials(LogicalList<Testimonial>),
    Partners(LogicalList<Partner>),
}

impl Deck {
    pub fn sample(kind: CarouselKind, count: usize) -> Result<Self> {
        let deck = match kind {
            CarouselKind::Testimonials => {
                let items = (0..count)
                    .map(|i| {
                        Testimonial::new(
                            format!("Quote number {}", i + 1),
                            format!("Customer {}", i + 1),
                            ROLES[i % ROLES.len()],
                            (i % 2 == 0).then(|| format!("Company {}", i + 1)),
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Deck::Testimonials(LogicalList::new(items)?)
            }
            CarouselKind::Partners => {
                let items = (0..count)
                    .map(|i| {
                        Partner::new(
                            format!("Partner {}", i + 1),
                            format!("/logos/partner-{}.svg", i + 1),
                        )
                        .map(|p| {
                            p.with_category(CATEGORIES[i % CATEGORIES.len()])
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Deck::Partners(LogicalList::new(items)?)
            }
        };
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        match self {
            Deck::Testimonials(list) => list.len(),
            Deck::Partners(list) => list.len(),
        }
    }

    pub fn mount(
        &self,
        config: CarouselConfig,
        now: Instant,
    ) -> reel_core::Result<Carousel> {
        match self {
            Deck::Testimonials(list) => Carousel::mount_list(list, config, now),
            Deck::Partners(list) => Carousel::mount_list(list, config, now),
        }
    }

    /// Short label for the item at logical index `item`.
    pub fn label(&self, item: usize) -> String {
        match self {
            Deck::Testimonials(list) => {
                let t = list.wrapped(item);
                format!("{} ({})", t.author, t.byline())
            }
            Deck::Partners(list) => list.wrapped(item).logo_alt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_wrap_around() {
        let deck = Deck::sample(CarouselKind::Testimonials, 3).unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.label(0), deck.label(3));
        assert!(deck.label(1).starts_with("Customer 2"));
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(Deck::sample(CarouselKind::Partners, 0).is_err());
    }
}
