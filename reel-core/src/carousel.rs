//! One carousel instance: geometry, engine, autoplay and gesture wired
//! together behind a single write path.
//!
//! Hosts call [`Carousel::tick`] when [`Carousel::next_wakeup`] asks for
//! it and feed commands and pointer events in between. All state is read
//! fresh on every call; nothing is captured across ticks.

use std::time::Instant;

use reel_model::LogicalList;
use tracing::{debug, trace};

use crate::{
    autoplay::{AutoplayScheduler, AutoplayTick, Cadence},
    engine::{EngineUpdate, Mode, PositionEngine},
    error::{EngineError, Result},
    geometry::Geometry,
    gesture::{GestureController, Verdict},
    indicators::{Pagination, page_target},
    messages::{CarouselEvent, CarouselMessage},
    ownership::{OffsetArbiter, Owner},
    schedule::{FrameClock, Wakeup},
    sequence::VirtualSequence,
    types::{CarouselConfig, CarouselState},
    window::VisibleWindow,
};

#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    sequence: VirtualSequence,
    geometry: Geometry,
    engine: PositionEngine,
    autoplay: AutoplayScheduler,
    gesture: GestureController,
    arbiter: OffsetArbiter,
    frames: FrameClock,
    /// Explicit `pause()`.
    paused: bool,
    hovered: bool,
    alive: bool,
    last_item: usize,
    last_writer: Option<Owner>,
    events: Vec<CarouselEvent>,
}

impl Carousel {
    /// Mount a carousel over `logical_len` items. Geometry starts inactive;
    /// nothing moves until the first [`Carousel::resize`].
    pub fn mount(
        logical_len: usize,
        config: CarouselConfig,
        now: Instant,
    ) -> Result<Self> {
        let sequence =
            VirtualSequence::new(logical_len).ok_or(EngineError::EmptyList)?;
        config.validate()?;

        let cadence = if config.mode.is_continuous() {
            Cadence::Frame
        } else {
            Cadence::Interval
        };
        let engine = PositionEngine::new(
            config.mode,
            logical_len,
            config.initial_index,
            config.spring,
            config.glide,
        );
        let mut autoplay = AutoplayScheduler::new(config.autoplay, cadence);
        autoplay.start(now);

        debug!(
            items = logical_len,
            mode = ?config.mode,
            anchor = engine.anchor(),
            "carousel mounted"
        );

        Ok(Self {
            last_item: engine.logical_index(),
            gesture: GestureController::new(config.gesture),
            frames: FrameClock::new(config.max_frame_delta),
            config,
            sequence,
            geometry: Geometry::INACTIVE,
            engine,
            autoplay,
            arbiter: OffsetArbiter::new(),
            paused: false,
            hovered: false,
            alive: true,
            last_writer: None,
            events: Vec::new(),
        })
    }

    pub fn mount_list<T>(
        items: &LogicalList<T>,
        config: CarouselConfig,
        now: Instant,
    ) -> Result<Self> {
        Self::mount(items.len(), config, now)
    }

    /// Cancel every timer, frame request and drag. Any later call is a
    /// no-op.
    pub fn unmount(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.autoplay.suspend();
        self.frames.cancel();
        self.gesture.cancel();
        self.events.clear();
        debug!(anchor = self.engine.anchor(), "carousel unmounted");
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn sequence(&self) -> &VirtualSequence {
        &self.sequence
    }

    pub fn owner(&self) -> Owner {
        self.arbiter.owner()
    }

    /// Number of ownership transfers so far.
    pub fn handoffs(&self) -> u64 {
        self.arbiter.handoffs()
    }

    /// The driver that last moved the offset.
    pub fn last_writer(&self) -> Option<Owner> {
        self.last_writer
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            offset: self.engine.offset(),
            index: self.engine.anchor(),
            item: self.engine.logical_index(),
            is_dragging: self.gesture.is_active(),
            is_paused: self.paused || self.hovered,
            progress: self.autoplay.progress(),
            owner: self.arbiter.owner(),
            geometry: self.geometry,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::compute(
            self.engine.anchor(),
            self.sequence.logical_len(),
            self.geometry.items_per_view,
        )
    }

    pub fn window(&self) -> VisibleWindow {
        VisibleWindow::compute(
            self.engine.offset(),
            self.engine.anchor(),
            &self.geometry,
            &self.sequence,
            self.autoplay.progress(),
        )
    }

    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.events)
    }

    /// When the host should call [`Carousel::tick`] next.
    pub fn next_wakeup(&self) -> Wakeup {
        if !self.alive {
            return Wakeup::Idle;
        }
        let frame = if self.frames.is_requested() {
            Wakeup::Frame
        } else {
            Wakeup::Idle
        };
        frame.earliest(self.autoplay.wakeup())
    }

    /// Recompute geometry. Identical inputs are a no-op. A drag in
    /// progress is cancelled and control returns to autoplay.
    pub fn resize(
        &mut self,
        viewport_width: f32,
        container_width: f32,
        now: Instant,
    ) {
        if !self.alive {
            return;
        }
        let geometry = Geometry::resolve(
            viewport_width,
            container_width,
            &self.config.breakpoints,
            self.config.gap,
        );
        if geometry == self.geometry {
            return;
        }
        let old_step = if self.geometry.is_active() {
            self.geometry.step()
        } else {
            0.0
        };
        self.geometry = geometry;
        debug!(
            viewport_width,
            items_per_view = geometry.items_per_view,
            item_width = geometry.item_width,
            "geometry resolved"
        );

        if self.gesture.is_active() {
            self.gesture.cancel();
            self.release_to_autoplay(now);
        }
        let new_step = if geometry.is_active() {
            geometry.step()
        } else {
            0.0
        };
        let update = self.engine.rescale(old_step, new_step);
        self.absorb(update, now);
        self.sync_frames(now);
    }

    /// Run whatever is due at `now`. Returns true when the offset or the
    /// progress changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.alive {
            return false;
        }
        let before = (self.engine.offset(), self.autoplay.progress());
        let advance = self.autoplay.poll(now) == AutoplayTick::Advance;
        if !self.geometry.is_active() {
            self.frames.cancel();
            return before.1 != self.autoplay.progress();
        }

        if let Some(dt) = self.frames.delta(now) {
            if self.engine.is_moving() {
                self.drive(Owner::Autoplay, now, |engine, step| {
                    engine.step_motion(dt, step)
                });
            } else if self.autoplay.is_running() {
                self.drive(Owner::Autoplay, now, |engine, step| {
                    engine.advance_continuous(dt, step)
                });
            }
        }

        if advance {
            let target = self.engine.anchor() + 1;
            trace!(target, "autoplay advance");
            self.drive(Owner::Autoplay, now, |engine, step| {
                engine.navigate_to(target, None, step)
            });
        }

        self.sync_frames(now);
        before != (self.engine.offset(), self.autoplay.progress())
    }

    pub fn next(&mut self, now: Instant) {
        let target = self.engine.anchor() + 1;
        self.navigate(target, now);
    }

    pub fn prev(&mut self, now: Instant) {
        let target = self.engine.anchor() - 1;
        self.navigate(target, now);
    }

    /// Jump to page `page` (`page * ipv + N`). Pages past the end wrap.
    pub fn go_to_page(&mut self, page: usize, now: Instant) {
        let target = page_target(
            page,
            self.geometry.items_per_view,
            self.sequence.logical_len(),
        );
        self.navigate(target, now);
    }

    pub fn pause(&mut self) {
        if !self.alive {
            return;
        }
        self.paused = true;
        self.autoplay.pause();
        self.frames_off_if_idle();
    }

    /// Leave an explicit pause. Still paused while hovered.
    pub fn resume(&mut self, now: Instant) {
        if !self.alive {
            return;
        }
        self.paused = false;
        self.resume_autoplay(now);
    }

    pub fn hover_enter(&mut self) {
        if !self.alive {
            return;
        }
        self.hovered = true;
        self.autoplay.pause();
        self.frames_off_if_idle();
    }

    pub fn hover_leave(&mut self, now: Instant) {
        if !self.alive {
            return;
        }
        self.hovered = false;
        self.resume_autoplay(now);
    }

    /// Take the offset for the gesture driver. Pending autoplay timers are
    /// cancelled before ownership moves.
    pub fn drag_start(&mut self, x: f32, now: Instant) {
        if !self.alive || !self.geometry.is_active() || self.gesture.is_active()
        {
            return;
        }
        self.autoplay.suspend();
        self.transfer(Owner::Gesture);
        self.drive(Owner::Gesture, now, |engine, step| {
            engine.stop_motion(step)
        });
        self.gesture.begin(
            x,
            self.engine.offset(),
            self.engine.anchor(),
            now,
        );
        self.events.push(CarouselEvent::DragChanged(true));
        self.sync_frames(now);
        debug!(x, anchor = self.engine.anchor(), "drag started");
    }

    pub fn drag_move(&mut self, x: f32, now: Instant) {
        if !self.alive {
            return;
        }
        let free_range = self.geometry.page_width();
        let Some(offset) = self.gesture.track(x, now, free_range) else {
            return;
        };
        self.drive(Owner::Gesture, now, |engine, step| {
            engine.drag_to(offset, step)
        });
    }

    /// Classify the release, commit it, and hand the offset back to
    /// autoplay.
    pub fn drag_end(&mut self, x: f32, now: Instant) {
        if !self.alive {
            return;
        }
        if let Some(offset) =
            self.gesture.track(x, now, self.geometry.page_width())
        {
            self.drive(Owner::Gesture, now, |engine, step| {
                engine.drag_to(offset, step)
            });
        }
        let Some(release) = self.gesture.end(x, now) else {
            return;
        };
        debug!(
            delta = release.delta,
            velocity = release.velocity,
            verdict = ?release.verdict,
            "drag released"
        );

        match self.config.mode {
            Mode::Discrete => {
                let nearest = self.engine.nearest_index(self.geometry.step());
                let target = match release.verdict {
                    Verdict::Advance => nearest.max(release.origin_anchor + 1),
                    Verdict::Retreat => nearest.min(release.origin_anchor - 1),
                    Verdict::SnapBack => nearest,
                };
                self.drive(Owner::Gesture, now, |engine, step| {
                    engine.navigate_to(target, Some(release.velocity), step)
                });
            }
            Mode::Continuous { .. } => {
                if release.verdict != Verdict::SnapBack {
                    self.drive(Owner::Gesture, now, |engine, _| {
                        engine.launch_glide(release.velocity);
                        EngineUpdate::default()
                    });
                }
            }
        }
        self.release_to_autoplay(now);
        self.sync_frames(now);
    }

    /// Abandon a drag (pointer lost). Discrete carousels settle on the
    /// nearest index.
    pub fn drag_cancel(&mut self, now: Instant) {
        if !self.alive || !self.gesture.is_active() {
            return;
        }
        self.gesture.cancel();
        if self.config.mode == Mode::Discrete {
            let nearest = self.engine.nearest_index(self.geometry.step());
            self.drive(Owner::Gesture, now, |engine, step| {
                engine.navigate_to(nearest, Some(0.0), step)
            });
        }
        self.release_to_autoplay(now);
        self.sync_frames(now);
    }

    /// Message-style entry point for hosts that route UI events.
    pub fn update(&mut self, message: CarouselMessage, now: Instant) {
        match message {
            CarouselMessage::Next => self.next(now),
            CarouselMessage::Prev => self.prev(now),
            CarouselMessage::GoToPage(page) => self.go_to_page(page, now),
            CarouselMessage::Pause => self.pause(),
            CarouselMessage::Resume => self.resume(now),
            CarouselMessage::HoverEnter => self.hover_enter(),
            CarouselMessage::HoverLeave => self.hover_leave(now),
            CarouselMessage::DragStart { x } => self.drag_start(x, now),
            CarouselMessage::DragMove { x } => self.drag_move(x, now),
            CarouselMessage::DragEnd { x } => self.drag_end(x, now),
            CarouselMessage::DragCancel => self.drag_cancel(now),
            CarouselMessage::Resize {
                viewport_width,
                container_width,
            } => self.resize(viewport_width, container_width, now),
        }
    }

    fn navigate(&mut self, target: i64, now: Instant) {
        if !self.alive {
            return;
        }
        let moved = self.drive(Owner::Autoplay, now, |engine, step| {
            engine.navigate_to(target, None, step)
        });
        if moved {
            self.autoplay.reschedule(now);
        }
        self.sync_frames(now);
    }

    /// The only path that mutates the offset. Writes from a driver that
    /// does not hold the offset, or before geometry is known, are dropped.
    fn drive<F>(&mut self, writer: Owner, now: Instant, write: F) -> bool
    where
        F: FnOnce(&mut PositionEngine, f32) -> EngineUpdate,
    {
        if !self.geometry.is_active() {
            return false;
        }
        if !self.arbiter.is_owned_by(writer) {
            trace!(?writer, owner = ?self.arbiter.owner(), "write dropped");
            return false;
        }
        let update = write(&mut self.engine, self.geometry.step());
        if update.moved {
            self.last_writer = Some(writer);
        }
        self.absorb(update, now);
        update.moved || update.correction.is_some()
    }

    /// Turn an engine update into events, gesture rebases and dwell
    /// restarts.
    fn absorb(&mut self, update: EngineUpdate, now: Instant) {
        if let Some(correction) = update.correction {
            let n = self.sequence.logical_len();
            self.gesture.rebase(
                correction.shift_px(n, self.geometry.step()),
                correction.shift_index(n),
            );
            self.events.push(CarouselEvent::Wrapped {
                lists: correction.lists,
            });
        }
        if update.settled {
            self.events.push(CarouselEvent::Settled);
        }
        let item = self.engine.logical_index();
        if item != self.last_item {
            self.events.push(CarouselEvent::IndexChanged {
                from: self.last_item,
                to: item,
            });
            self.last_item = item;
            self.autoplay.restart_dwell(now);
            if self.config.mode == Mode::Discrete {
                self.events.push(CarouselEvent::ProgressReset);
            }
        }
    }

    fn transfer(&mut self, to: Owner) {
        if let Some(handoff) = self.arbiter.transfer(to) {
            self.events.push(CarouselEvent::OwnerChanged {
                from: handoff.from,
                to: handoff.to,
                seq: handoff.seq,
            });
        }
    }

    fn release_to_autoplay(&mut self, now: Instant) {
        self.transfer(Owner::Autoplay);
        self.autoplay.release(now);
        self.events.push(CarouselEvent::DragChanged(false));
        self.events.push(CarouselEvent::ProgressReset);
    }

    fn resume_autoplay(&mut self, now: Instant) {
        if self.paused || self.hovered || self.gesture.is_active() {
            return;
        }
        self.autoplay.resume(now);
        self.events.push(CarouselEvent::ProgressReset);
        self.sync_frames(now);
    }

    fn frames_off_if_idle(&mut self) {
        if !self.engine.is_moving() {
            self.frames.cancel();
        }
    }

    /// Request frames only while something moves per frame: a settling
    /// spring or glide, or a running marquee.
    fn sync_frames(&mut self, now: Instant) {
        let wants_frames = self.alive
            && self.geometry.is_active()
            && self.arbiter.is_owned_by(Owner::Autoplay)
            && (self.engine.is_moving()
                || (self.config.mode.is_continuous()
                    && self.autoplay.is_running()));
        if wants_frames {
            self.frames.request(now);
        } else {
            self.frames.cancel();
        }
    }
}
