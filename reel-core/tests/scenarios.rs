//! End-to-end behaviour of a testimonial carousel: six items, three per
//! view on a 1280 px viewport, five second dwell.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng, rngs::StdRng};
use reel_core::{
    BreakpointTable, Carousel, CarouselConfig, CarouselEvent, Geometry, Owner,
    VirtualSequence, VisibleWindow, Wakeup, WrapNormalizer,
};

const FRAME: Duration = Duration::from_millis(16);
const STEP: f32 = 424.0;

struct Session {
    carousel: Carousel,
    now: Instant,
    events: Vec<CarouselEvent>,
}

impl Session {
    fn new(config: CarouselConfig) -> Self {
        Self::with_items(6, config)
    }

    fn with_items(n: usize, config: CarouselConfig) -> Self {
        let now = Instant::now();
        let mut carousel = Carousel::mount(n, config, now).unwrap();
        carousel.resize(1280.0, 1248.0, now);
        carousel.drain_events();
        Self {
            carousel,
            now,
            events: Vec::new(),
        }
    }

    fn run(&mut self, duration: Duration) {
        let end = self.now + duration;
        while self.now + FRAME <= end {
            self.now += FRAME;
            self.carousel.tick(self.now);
            self.events.extend(self.carousel.drain_events());
        }
    }

    fn settle(&mut self) {
        for _ in 0..300 {
            if self.carousel.next_wakeup() != Wakeup::Frame {
                return;
            }
            self.now += FRAME;
            self.carousel.tick(self.now);
            self.events.extend(self.carousel.drain_events());
        }
        panic!("carousel kept requesting frames");
    }

    fn drag(&mut self, from: f32, to: f32, duration: Duration) {
        let c = &mut self.carousel;
        c.drag_start(from, self.now);
        let moves = 10u32;
        for i in 1..=moves {
            let t = self.now + duration * i / moves;
            c.drag_move(from + (to - from) * i as f32 / moves as f32, t);
        }
        self.now += duration;
        c.drag_end(to, self.now);
        self.events.extend(c.drain_events());
    }

    fn index(&self) -> i64 {
        self.carousel.state().index
    }

    fn wraps(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CarouselEvent::Wrapped { .. }))
            .count()
    }
}

#[test]
fn three_autoplay_advances_reach_page_one() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    assert_eq!(s.index(), 6);
    s.run(Duration::from_millis(16_000));
    assert_eq!(s.index(), 9);
    assert_eq!(s.carousel.pagination().current_page, 1);
    assert_eq!(s.carousel.state().offset, -9.0 * STEP);
}

#[test]
fn advancing_from_the_last_middle_index_wraps_to_six() {
    let config = CarouselConfig::testimonial_defaults().with_initial_index(5);
    let mut s = Session::new(config);
    assert_eq!(s.index(), 11);
    s.run(Duration::from_millis(5_020));
    assert_eq!(s.index(), 6);
    assert_eq!(s.wraps(), 1);
    s.settle();
    assert_eq!(s.carousel.state().offset, -6.0 * STEP);
    assert_eq!(s.carousel.state().item, 0);
}

#[test]
fn drag_past_threshold_commits_an_advance() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    s.drag(600.0, 520.0, Duration::from_millis(400));
    assert_eq!(s.index(), 7);
    s.settle();
    assert_eq!(s.index(), 7);
    assert_eq!(s.carousel.state().offset, -7.0 * STEP);
    assert_eq!(s.carousel.owner(), Owner::Autoplay);
}

#[test]
fn short_slow_drag_snaps_back() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    s.drag(600.0, 580.0, Duration::from_millis(400));
    s.settle();
    assert_eq!(s.index(), 6);
    assert_eq!(s.carousel.state().offset, -6.0 * STEP);
}

#[test]
fn short_fast_flick_commits_on_velocity() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    s.drag(600.0, 570.0, Duration::from_millis(30));
    s.settle();
    assert_eq!(s.index(), 7);
}

#[test]
fn rightward_drag_retreats_across_the_wrap() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    s.drag(500.0, 600.0, Duration::from_millis(300));
    assert_eq!(s.index(), 11);
    s.settle();
    assert_eq!(s.carousel.state().item, 5);
    assert_eq!(s.carousel.state().offset, -11.0 * STEP);
}

#[test]
fn page_two_folds_back_to_six() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    s.carousel.next(s.now);
    s.run(Duration::from_millis(100));
    s.carousel.go_to_page(2, s.now);
    assert_eq!(s.index(), 6);
    s.events.extend(s.carousel.drain_events());
    assert_eq!(s.wraps(), 1);
    s.settle();
    assert_eq!(s.carousel.state().offset, -6.0 * STEP);
    assert_eq!(s.carousel.pagination().current_page, 0);
}

#[test]
fn resize_to_mobile_keeps_the_anchored_item() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    s.carousel.next(s.now);
    s.run(Duration::from_millis(1_000));
    let item = s.carousel.state().item;
    let active = s.carousel.window().active().map(|slot| slot.logical_index);

    s.carousel.resize(375.0, 343.0, s.now);
    let state = s.carousel.state();
    assert_eq!(state.geometry.items_per_view, 1);
    assert_eq!(state.geometry.item_width, 343.0);
    assert_eq!(state.item, item);
    assert_eq!(
        s.carousel.window().active().map(|slot| slot.logical_index),
        active
    );
    assert_eq!(s.carousel.window().len(), 1);
}

#[test]
fn resize_mid_flight_lands_on_the_target() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    s.carousel.next(s.now);
    s.run(Duration::from_millis(48));
    s.carousel.resize(800.0, 768.0, s.now);
    assert_eq!(s.index(), 7);
    let step = s.carousel.geometry().step();
    assert_eq!(s.carousel.state().offset, -7.0 * step);
    assert_ne!(s.carousel.next_wakeup(), Wakeup::Frame);
}

#[test]
fn progress_is_monotonic_within_a_dwell() {
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    let end = s.now + Duration::from_millis(4_992);
    let mut last = 0.0;
    while s.now < end {
        s.now += FRAME;
        s.carousel.tick(s.now);
        let progress = s.carousel.state().progress;
        assert!(progress >= last, "{progress} < {last}");
        assert!(progress <= 1.0);
        last = progress;
    }
    assert_eq!(s.index(), 6);
    assert!(last > 0.9);

    s.run(Duration::from_millis(200));
    assert_eq!(s.index(), 7);
    assert!(s.carousel.state().progress < 0.1);
    assert!(s.events.contains(&CarouselEvent::ProgressReset));
}

#[test]
fn geometry_resolution_is_idempotent() {
    let table = BreakpointTable::testimonial();
    for width in [0.0, 320.0, 767.0, 768.0, 1024.0, 1280.0, 1920.0] {
        let a = Geometry::resolve(width, width - 32.0, &table, 24.0);
        let b = Geometry::resolve(width, width - 32.0, &table, 24.0);
        assert_eq!(a, b);
    }

    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    let before = s.carousel.state();
    s.carousel.resize(1280.0, 1248.0, s.now);
    assert_eq!(s.carousel.state(), before);
    assert!(s.carousel.drain_events().is_empty());
}

#[test]
fn random_walks_keep_the_index_in_the_middle_copy() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for n in 1..=9usize {
        let mut s =
            Session::with_items(n, CarouselConfig::testimonial_defaults());
        let range = n as i64..2 * n as i64;
        for _ in 0..200 {
            match rng.random_range(0..6) {
                0 => s.carousel.next(s.now),
                1 => s.carousel.prev(s.now),
                2 => s.carousel.go_to_page(rng.random_range(0..4), s.now),
                3 => {
                    let dx = rng.random_range(-1_500.0..1_500.0);
                    let ms = rng.random_range(20..600);
                    s.drag(600.0, 600.0 + dx, Duration::from_millis(ms));
                }
                4 => s.run(Duration::from_millis(rng.random_range(0..300))),
                _ => s.run(Duration::from_millis(5_000)),
            }
            assert!(range.contains(&s.index()), "n={n} index={}", s.index());
        }
        s.settle();
        let state = s.carousel.state();
        assert!(range.contains(&state.index));
        assert_eq!(state.offset, -(state.index as f32) * STEP);
    }
}

#[test]
fn marquee_random_walks_stay_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut s = Session::with_items(8, CarouselConfig::partner_defaults());
    let step = s.carousel.geometry().step();
    for _ in 0..300 {
        if rng.random_bool(0.2) {
            let dx = rng.random_range(-2_000.0..2_000.0);
            s.drag(640.0, 640.0 + dx, Duration::from_millis(80));
        } else {
            s.run(Duration::from_millis(rng.random_range(16..2_000)));
        }
        let state = s.carousel.state();
        assert!((8..16).contains(&state.index));
        let position = -state.offset / step;
        assert!(position > 7.0 && position < 16.5, "{position}");
    }
    assert!(s.wraps() > 0);
}

#[test]
fn wrap_corrections_paint_the_same_frame() {
    let mut rng = StdRng::seed_from_u64(42);
    let table = BreakpointTable::testimonial();
    for _ in 0..500 {
        let n = rng.random_range(1..12usize);
        let viewport = rng.random_range(320.0..1920.0f32);
        let geometry = Geometry::resolve(viewport, viewport - 32.0, &table, 24.0);
        let step = geometry.step();
        let sequence = VirtualSequence::new(n).unwrap();
        let normalizer = WrapNormalizer::new(n);

        let raw_index = rng.random_range(0.0..(3 * n) as f32);
        let raw = -raw_index * step;
        let before_anchor = WrapNormalizer::index_for(raw, step);
        let correction = normalizer.normalize_offset(raw, step);

        let before =
            VisibleWindow::compute(raw, before_anchor, &geometry, &sequence, 0.0);
        let after = VisibleWindow::compute(
            correction.offset,
            correction.index,
            &geometry,
            &sequence,
            0.0,
        );

        // Slots touching an edge may flip on float noise.
        let edge = geometry.container_width;
        let touches_edge = before.slots.iter().any(|slot| {
            slot.x.abs() < 0.01
                || (slot.x - edge).abs() < 0.01
                || (slot.x + slot.width).abs() < 0.01
        });
        if touches_edge {
            continue;
        }
        assert_eq!(before.logical_indices(), after.logical_indices());
        for (a, b) in before.slots.iter().zip(&after.slots) {
            assert!((a.x - b.x).abs() < 0.01, "{} vs {}", a.x, b.x);
        }
    }
}

#[test]
fn gesture_and_autoplay_never_share_a_step() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut s = Session::new(CarouselConfig::testimonial_defaults());
    for _ in 0..100 {
        let c = &mut s.carousel;
        c.drag_start(600.0, s.now);
        assert_eq!(c.owner(), Owner::Gesture);
        for _ in 0..rng.random_range(1..8) {
            s.now += FRAME;
            let before = c.state().offset;
            // Only autoplay-owned work runs in a tick.
            c.tick(s.now);
            assert_eq!(c.state().offset, before);
            c.drag_move(600.0 - rng.random_range(0.0..300.0), s.now);
            assert_eq!(c.last_writer(), Some(Owner::Gesture));
        }
        s.now += FRAME;
        c.drag_end(600.0 - rng.random_range(0.0..300.0), s.now);
        assert_eq!(c.owner(), Owner::Autoplay);

        let released_at = c.state().offset;
        s.run(Duration::from_millis(rng.random_range(100..6_000)));
        if s.carousel.state().offset != released_at {
            assert_eq!(s.carousel.last_writer(), Some(Owner::Autoplay));
        }
    }
    assert_eq!(s.carousel.handoffs(), 200);
}
