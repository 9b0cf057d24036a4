//! Headless carousel session: a fixed frame cadence, scripted input and a
//! report of every index change.

use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use reel_config::CarouselKind;
use reel_core::{
    Carousel, CarouselConfig, CarouselEvent, DeviceClass, Geometry,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    deck::Deck,
    script::{Script, ScriptCommand},
};

/// Horizontal page padding between the viewport and the carousel container.
pub const PAGE_PADDING_PX: f32 = 32.0;

pub fn container_for(viewport_width: f32) -> f32 {
    (viewport_width - PAGE_PADDING_PX).max(0.0)
}

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub kind: CarouselKind,
    pub config: CarouselConfig,
    pub deck: Deck,
    pub width: f32,
    pub duration: Duration,
    pub frame: Duration,
    pub script: Script,
}

/// Where frame timestamps come from.
pub(crate) trait FrameSource {
    async fn next_frame(&mut self) -> Instant;
}

/// Advances by exactly one frame per call without sleeping.
#[derive(Debug)]
pub struct VirtualFrames {
    now: Instant,
    frame: Duration,
}

impl VirtualFrames {
    pub fn new(start: Instant, frame: Duration) -> Self {
        Self { now: start, frame }
    }
}

impl FrameSource for VirtualFrames {
    async fn next_frame(&mut self) -> Instant {
        self.now += self.frame;
        self.now
    }
}

/// Wall-clock frames from a tokio interval.
#[derive(Debug)]
pub struct RealtimeFrames {
    interval: tokio::time::Interval,
}

impl RealtimeFrames {
    pub fn new(frame: Duration) -> Self {
        let mut interval = tokio::time::interval(frame);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        Self { interval }
    }
}

impl FrameSource for RealtimeFrames {
    async fn next_frame(&mut self) -> Instant {
        self.interval.tick().await.into_std()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexChange {
    pub t_ms: u64,
    pub from: usize,
    pub to: usize,
    pub page: usize,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeometryReport {
    pub device: &'static str,
    pub viewport_width: f32,
    pub container_width: f32,
    pub items_per_view: usize,
    pub item_width: f32,
    pub gap: f32,
    pub step: f32,
}

impl GeometryReport {
    pub fn new(geometry: &Geometry, viewport_width: f32) -> Self {
        Self {
            device: device_name(DeviceClass::classify(viewport_width)),
            viewport_width,
            container_width: geometry.container_width,
            items_per_view: geometry.items_per_view,
            item_width: geometry.item_width,
            gap: geometry.gap,
            step: geometry.step(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub kind: &'static str,
    pub items: usize,
    pub elapsed_ms: u64,
    pub frames: u64,
    pub index_changes: usize,
    pub wraps: u64,
    pub settles: u64,
    pub handoffs: u64,
    pub final_item: usize,
    pub final_label: String,
    pub final_page: usize,
    pub total_pages: usize,
    pub offset: f32,
    pub geometry: GeometryReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub changes: Vec<IndexChange>,
    pub summary: Summary,
}

pub fn device_name(class: DeviceClass) -> &'static str {
    match class {
        DeviceClass::Mobile => "mobile",
        DeviceClass::Tablet => "tablet",
        DeviceClass::Desktop => "desktop",
        DeviceClass::LargeDesktop => "large desktop",
    }
}

/// A pointer sweeping linearly from `start_x` by `dx`.
#[derive(Debug, Clone, Copy)]
struct ScriptedDrag {
    start_x: f32,
    dx: f32,
    started: Instant,
    duration: Duration,
}

impl ScriptedDrag {
    /// Pointer position at `now`, and whether the sweep is complete.
    fn pointer_at(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        (self.start_x + self.dx * t, elapsed >= self.duration)
    }
}

struct Session {
    carousel: Carousel,
    deck: Deck,
    width: f32,
    start: Instant,
    drag: Option<ScriptedDrag>,
    changes: Vec<IndexChange>,
    wraps: u64,
    settles: u64,
    frames: u64,
    echo: bool,
}

impl Session {
    fn elapsed_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.start).as_millis() as u64
    }

    fn apply(&mut self, command: ScriptCommand, now: Instant) {
        debug!(?command, t_ms = self.elapsed_ms(now), "script step");
        match command {
            ScriptCommand::Next => self.carousel.next(now),
            ScriptCommand::Prev => self.carousel.prev(now),
            ScriptCommand::Page(page) => self.carousel.go_to_page(page, now),
            ScriptCommand::Pause => self.carousel.pause(),
            ScriptCommand::Resume => self.carousel.resume(now),
            ScriptCommand::Hover => self.carousel.hover_enter(),
            ScriptCommand::Leave => self.carousel.hover_leave(now),
            ScriptCommand::Resize(width) => {
                self.width = width;
                self.drag = None;
                self.carousel.resize(width, container_for(width), now);
            }
            ScriptCommand::Drag { dx, duration } => {
                if self.drag.is_some() {
                    warn!("drag already in progress; step ignored");
                    return;
                }
                let start_x = self.carousel.geometry().container_width / 2.0;
                self.carousel.drag_start(start_x, now);
                self.drag = Some(ScriptedDrag {
                    start_x,
                    dx,
                    started: now,
                    duration,
                });
            }
        }
    }

    fn sweep_pointer(&mut self, now: Instant) {
        let Some(drag) = self.drag else {
            return;
        };
        let (x, done) = drag.pointer_at(now);
        if done {
            self.carousel.drag_end(x, now);
            self.drag = None;
        } else {
            self.carousel.drag_move(x, now);
        }
    }

    fn collect(&mut self, now: Instant) {
        for event in self.carousel.drain_events() {
            match event {
                CarouselEvent::IndexChanged { from, to } => {
                    let change = IndexChange {
                        t_ms: self.elapsed_ms(now),
                        from,
                        to,
                        page: self.carousel.pagination().current_page,
                        label: self.deck.label(to),
                    };
                    if self.echo {
                        println!(
                            "{:>7} ms  item {} -> {}  page {}  {}",
                            change.t_ms,
                            change.from,
                            change.to,
                            change.page,
                            change.label
                        );
                    }
                    self.changes.push(change);
                }
                CarouselEvent::Wrapped { .. } => self.wraps += 1,
                CarouselEvent::Settled => self.settles += 1,
                _ => {}
            }
        }
    }

    fn finish(self, now: Instant, kind: CarouselKind) -> Report {
        let state = self.carousel.state();
        let pagination = self.carousel.pagination();
        let summary = Summary {
            kind: kind.as_str(),
            items: self.deck.len(),
            elapsed_ms: self.elapsed_ms(now),
            frames: self.frames,
            index_changes: self.changes.len(),
            wraps: self.wraps,
            settles: self.settles,
            handoffs: self.carousel.handoffs(),
            final_item: state.item,
            final_label: self.deck.label(state.item),
            final_page: pagination.current_page,
            total_pages: pagination.total_pages,
            offset: state.offset,
            geometry: GeometryReport::new(self.carousel.geometry(), self.width),
        };
        Report {
            changes: self.changes,
            summary,
        }
    }
}

/// Drive one carousel until `duration` has elapsed on `frames`.
pub(crate) async fn run<F: FrameSource>(
    options: SimulateOptions,
    start: Instant,
    mut frames: F,
    echo: bool,
) -> Result<Report> {
    if options.frame.is_zero() {
        bail!("frame interval must be positive");
    }
    let SimulateOptions {
        kind,
        config,
        deck,
        width,
        duration,
        frame: _,
        mut script,
    } = options;

    let carousel = deck.mount(config, start)?;
    let mut session = Session {
        carousel,
        deck,
        width,
        start,
        drag: None,
        changes: Vec::new(),
        wraps: 0,
        settles: 0,
        frames: 0,
        echo,
    };
    session
        .carousel
        .resize(width, container_for(width), start);
    session.collect(start);

    let end = start + duration;
    let mut now = start;
    while now < end {
        now = frames.next_frame().await;
        let elapsed = now.saturating_duration_since(start);
        while let Some(step) = script.pop_due(elapsed) {
            session.apply(step.command, now);
        }
        session.sweep_pointer(now);
        if session.carousel.tick(now) {
            session.frames += 1;
        }
        session.collect(now);
    }

    Ok(session.finish(now, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(script: &str, duration_ms: u64) -> SimulateOptions {
        SimulateOptions {
            kind: CarouselKind::Testimonials,
            config: CarouselKind::Testimonials.preset(),
            deck: Deck::sample(CarouselKind::Testimonials, 6).unwrap(),
            width: 1280.0,
            duration: Duration::from_millis(duration_ms),
            frame: Duration::from_millis(16),
            script: script.parse().unwrap(),
        }
    }

    async fn simulate(script: &str, duration_ms: u64) -> Report {
        let start = Instant::now();
        let frames = VirtualFrames::new(start, Duration::from_millis(16));
        run(options(script, duration_ms), start, frames, false)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn autoplay_advances_every_interval() {
        let report = simulate("", 16_000).await;
        let steps: Vec<_> =
            report.changes.iter().map(|c| (c.from, c.to)).collect();
        assert_eq!(steps, vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(report.summary.final_item, 3);
        assert_eq!(report.summary.final_page, 1);
        assert_eq!(report.summary.geometry.items_per_view, 3);
    }

    #[tokio::test]
    async fn paused_session_holds_still() {
        let report = simulate("0:pause", 12_000).await;
        assert!(report.changes.is_empty());
        assert_eq!(report.summary.final_item, 0);
    }

    #[tokio::test]
    async fn scripted_drag_commits_one_item() {
        let report = simulate("0:pause,1000:drag=-80/160", 3_000).await;
        assert_eq!(report.summary.final_item, 1);
        assert_eq!(report.summary.handoffs, 2);
    }

    #[tokio::test]
    async fn page_command_reports_the_label() {
        let report = simulate("0:pause,500:page=1", 2_000).await;
        let last = report.changes.last().unwrap();
        assert_eq!(last.to, 3);
        assert!(last.label.starts_with("Customer 4"));
    }

    #[tokio::test]
    async fn zero_frame_interval_is_rejected() {
        let mut opts = options("", 1_000);
        opts.frame = Duration::ZERO;
        let start = Instant::now();
        let frames = VirtualFrames::new(start, Duration::from_millis(16));
        assert!(run(opts, start, frames, false).await.is_err());
    }
}
