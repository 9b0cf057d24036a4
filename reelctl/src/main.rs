mod deck;
mod script;
mod simulate;

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use reel_config::{
    CarouselKind, CarouselSettings, ConfigLoader, ConfigLoaderOptions,
};
use reel_core::{DeviceClass, Geometry, Pagination, constants::breakpoints};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    deck::Deck,
    script::Script,
    simulate::{
        GeometryReport, RealtimeFrames, Report, SimulateOptions,
        VirtualFrames, container_for, device_name,
    },
};

#[derive(Parser)]
#[command(
    name = "reelctl",
    about = "Simulate and inspect reel carousels without a renderer"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drive a carousel through a session and report every index change
    Simulate {
        #[arg(long, value_enum, default_value_t = Kind::Testimonials)]
        kind: Kind,
        /// Number of logical items
        #[arg(long, default_value_t = 6)]
        items: usize,
        /// Viewport width in px
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 16_000)]
        duration_ms: u64,
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,
        /// Settings file (TOML or JSON); environment discovery otherwise
        #[arg(long)]
        config: Option<PathBuf>,
        /// Scripted input, e.g. "1000:next,2500:drag=-80,6000:page=2"
        #[arg(long)]
        script: Option<String>,
        /// Run on the wall clock instead of virtual time
        #[arg(long)]
        realtime: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved layout for a viewport width
    Geometry {
        #[arg(long)]
        width: f32,
        #[arg(long, value_enum, default_value_t = Kind::Testimonials)]
        kind: Kind,
        /// Logical items, used for the page count
        #[arg(long, default_value_t = 6)]
        items: usize,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Load settings, apply guard rails and print any warnings
    Check {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Testimonials,
    Partners,
}

impl From<Kind> for CarouselKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Testimonials => CarouselKind::Testimonials,
            Kind::Partners => CarouselKind::Partners,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Simulate {
            kind,
            items,
            width,
            duration_ms,
            frame_ms,
            config,
            script,
            realtime,
            json,
        } => {
            let kind = CarouselKind::from(kind);
            warn_if_narrow(width);
            let settings = load_settings(config)?;
            let script = match script {
                Some(raw) => raw.parse::<Script>()?,
                None => Script::default(),
            };
            let frame = Duration::from_millis(frame_ms);
            let options = SimulateOptions {
                kind,
                config: settings.carousel_config(kind),
                deck: Deck::sample(kind, items)
                    .context("cannot build a carousel deck")?,
                width,
                duration: Duration::from_millis(duration_ms),
                frame,
                script,
            };

            let echo = !json;
            let start = Instant::now();
            let report = if realtime {
                // tokio intervals reject a zero period
                let period = frame.max(Duration::from_millis(1));
                let frames = RealtimeFrames::new(period);
                simulate::run(options, start, frames, echo).await?
            } else {
                let frames = VirtualFrames::new(start, frame);
                simulate::run(options, start, frames, echo).await?
            };
            print_report(&report, json)?;
        }
        Command::Geometry {
            width,
            kind,
            items,
            config,
        } => {
            let kind = CarouselKind::from(kind);
            warn_if_narrow(width);
            let config = load_settings(config)?.carousel_config(kind);
            let geometry = Geometry::resolve(
                width,
                container_for(width),
                &config.breakpoints,
                config.gap,
            );
            let report = GeometryReport::new(&geometry, width);
            let pages = Pagination::compute(
                items.max(1) as i64,
                items.max(1),
                geometry.items_per_view,
            );
            println!("kind:            {}", kind.as_str());
            println!("device:          {}", report.device);
            println!("viewport:        {:.0} px", report.viewport_width);
            println!("container:       {:.0} px", report.container_width);
            println!("items per view:  {}", report.items_per_view);
            println!("item width:      {:.1} px", report.item_width);
            println!("gap:             {:.0} px", report.gap);
            println!("step:            {:.1} px", report.step);
            println!("pages:           {}", pages.total_pages);
        }
        Command::Check { config } => {
            let load = ConfigLoader::with_options(ConfigLoaderOptions {
                config_path: config,
            })
            .load()?;
            println!("source: {:?}", load.source);
            for kind in [CarouselKind::Testimonials, CarouselKind::Partners] {
                let config = load.settings.carousel_config(kind);
                println!(
                    "{}: mode {:?}, {} breakpoints, autoplay {}",
                    kind.as_str(),
                    config.mode,
                    config.breakpoints.tiers().len(),
                    if config.autoplay.enabled { "on" } else { "off" },
                );
            }
            if load.warnings.is_empty() {
                println!("no warnings");
            } else {
                println!("{} warning(s):", load.warnings.len());
                for warning in &load.warnings.items {
                    match &warning.hint {
                        Some(hint) => {
                            println!("  - {} ({hint})", warning.message)
                        }
                        None => println!("  - {}", warning.message),
                    }
                }
            }
        }
    }

    Ok(())
}

fn warn_if_narrow(width: f32) {
    if width < breakpoints::MOBILE {
        warn!(
            width,
            min = breakpoints::MOBILE,
            "viewport is narrower than the smallest supported layout"
        );
    }
}

fn load_settings(config: Option<PathBuf>) -> Result<CarouselSettings> {
    let load = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: config,
    })
    .load()
    .context("failed to load carousel settings")?;
    Ok(load.settings)
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    let summary = &report.summary;
    println!(
        "{} {}: {} index change(s), {} wrap(s), {} handoff(s) over {} ms",
        summary.items,
        summary.kind,
        summary.index_changes,
        summary.wraps,
        summary.handoffs,
        summary.elapsed_ms,
    );
    println!(
        "final item {} ({}), page {}/{}, {} at {:.0} px",
        summary.final_item,
        summary.final_label,
        summary.final_page + 1,
        summary.total_pages,
        device_name(DeviceClass::classify(summary.geometry.viewport_width)),
        summary.geometry.viewport_width,
    );
    Ok(())
}
