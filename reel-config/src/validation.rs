use reel_core::{
    CarouselConfig, EngineError, Geometry, Mode, constants::breakpoints,
    spring::SETTLE_LIMIT_S,
};
use thiserror::Error;

use super::models::{CarouselKind, CarouselSection, CarouselSettings};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("{section}.{field} must be positive, got {value}")]
    NonPositive {
        section: &'static str,
        field: &'static str,
        value: f64,
    },
    #[error("{section}.breakpoints must contain at least one tier")]
    EmptyBreakpoints { section: &'static str },
    #[error("{section}.breakpoints lists min_width {min_width} more than once")]
    DuplicateBreakpoint {
        section: &'static str,
        min_width: f32,
    },
    #[error("{section} would show zero items per view")]
    ZeroItemsPerView { section: &'static str },
    #[error("{section} rejected by the engine: {source}")]
    Engine {
        section: &'static str,
        #[source]
        source: EngineError,
    },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    settings: &CarouselSettings,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if let Some(ms) = settings.max_frame_delta_ms {
        positive("settings", "max_frame_delta_ms", ms as f64)?;
    }

    for kind in [CarouselKind::Testimonials, CarouselKind::Partners] {
        let section = kind.as_str();
        check_section(section, settings.section(kind))?;

        let config = settings.carousel_config(kind);
        config
            .validate()
            .map_err(|source| ConfigGuardRailError::Engine { section, source })?;
        warnings.extend(section_warnings(section, &config));
    }

    Ok(warnings)
}

fn positive(
    section: &'static str,
    field: &'static str,
    value: f64,
) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ConfigGuardRailError::NonPositive {
        section,
        field,
        value,
    })
}

fn check_section(
    section: &'static str,
    raw: &CarouselSection,
) -> Result<(), ConfigGuardRailError> {
    if let Some(speed) = raw.speed_px_s {
        positive(section, "speed_px_s", speed as f64)?;
    }
    if let Some(ms) = raw.interval_ms {
        positive(section, "interval_ms", ms as f64)?;
    }
    if let Some(ms) = raw.progress_tick_ms {
        positive(section, "progress_tick_ms", ms as f64)?;
    }
    if let Some(v) = raw.spring.stiffness {
        positive(section, "spring.stiffness", v as f64)?;
    }
    if let Some(v) = raw.spring.mass {
        positive(section, "spring.mass", v as f64)?;
    }
    if let Some(v) = raw.spring.rest_delta_px {
        positive(section, "spring.rest_delta_px", v as f64)?;
    }
    if let Some(v) = raw.spring.rest_speed_px_s {
        positive(section, "spring.rest_speed_px_s", v as f64)?;
    }
    if let Some(v) = raw.gesture.distance_threshold_px {
        positive(section, "gesture.distance_threshold_px", v as f64)?;
    }
    if let Some(v) = raw.gesture.velocity_threshold_px_s {
        positive(section, "gesture.velocity_threshold_px_s", v as f64)?;
    }
    if let Some(ms) = raw.gesture.velocity_window_ms {
        positive(section, "gesture.velocity_window_ms", ms as f64)?;
    }
    if let Some(v) = raw.gesture.max_fling_px_s {
        positive(section, "gesture.max_fling_px_s", v as f64)?;
    }
    if let Some(ms) = raw.glide.decay_tau_ms {
        positive(section, "glide.decay_tau_ms", ms as f64)?;
    }
    if raw.fallback_items == Some(0) {
        return Err(ConfigGuardRailError::ZeroItemsPerView { section });
    }

    if let Some(tiers) = &raw.breakpoints {
        if tiers.is_empty() {
            return Err(ConfigGuardRailError::EmptyBreakpoints { section });
        }
        if tiers.iter().any(|t| t.items_per_view == 0) {
            return Err(ConfigGuardRailError::ZeroItemsPerView { section });
        }
        for (i, tier) in tiers.iter().enumerate() {
            if tiers[..i].iter().any(|t| t.min_width == tier.min_width) {
                return Err(ConfigGuardRailError::DuplicateBreakpoint {
                    section,
                    min_width: tier.min_width,
                });
            }
        }
    }
    Ok(())
}

fn section_warnings(
    section: &'static str,
    config: &CarouselConfig,
) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();
    let autoplay = &config.autoplay;

    match config.mode {
        Mode::Discrete => {
            if autoplay.progress_tick > autoplay.interval {
                warnings.push_with_hint(
                    format!(
                        "{section}: progress_tick_ms exceeds interval_ms; the dwell bar will skip"
                    ),
                    "Keep progress_tick_ms well under interval_ms (100 ms is typical)",
                );
            }

            let widest = Geometry::resolve(
                breakpoints::LARGE_DESKTOP,
                breakpoints::LARGE_DESKTOP,
                &config.breakpoints,
                config.gap,
            );
            match config.spring.settle_time(widest.step()) {
                Some(settle)
                    if autoplay.enabled
                        && settle > autoplay.interval.as_secs_f32() =>
                {
                    warnings.push_with_hint(
                        format!(
                            "{section}: spring needs {settle:.2}s to settle one card but autoplay advances every {:.2}s",
                            autoplay.interval.as_secs_f32()
                        ),
                        "Raise spring.stiffness or interval_ms",
                    );
                }
                Some(_) => {}
                None => warnings.push_with_hint(
                    format!(
                        "{section}: spring does not come to rest within {:.0}s of a one-card move",
                        SETTLE_LIMIT_S
                    ),
                    "Raise spring.stiffness or the rest thresholds",
                ),
            }
        }
        Mode::Continuous { .. } => {
            if !autoplay.enabled {
                warnings.push(format!(
                    "{section}: marquee autoplay disabled; the strip will only move when dragged"
                ));
            }
        }
    }

    if !(0.0..=1.0).contains(&config.gesture.elastic) {
        warnings.push_with_hint(
            format!(
                "{section}: gesture.elastic {} is outside 0..=1",
                config.gesture.elastic
            ),
            "Values above 1 amplify overscroll; negative values invert it",
        );
    }

    for warning in &warnings.items {
        tracing::warn!(target: "reel::config", "{}", warning.message);
    }
    warnings
}
