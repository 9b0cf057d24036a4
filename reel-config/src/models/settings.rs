use anyhow::{Context, anyhow};
use reel_core::{
    Breakpoint, BreakpointTable, CarouselConfig, Mode,
    constants::autoplay as autoplay_defaults,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Environment variable naming a settings file (TOML or JSON).
pub const ENV_CONFIG_PATH: &str = "REEL_CONFIG_PATH";
/// Environment variable carrying inline JSON settings.
pub const ENV_CONFIG_JSON: &str = "REEL_CONFIG_JSON";

/// Source that produced the carousel settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SettingsSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Which preset a section starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselKind {
    Testimonials,
    Partners,
}

impl CarouselKind {
    pub fn preset(self) -> CarouselConfig {
        match self {
            CarouselKind::Testimonials => {
                CarouselConfig::testimonial_defaults()
            }
            CarouselKind::Partners => CarouselConfig::partner_defaults(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CarouselKind::Testimonials => "testimonials",
            CarouselKind::Partners => "partners",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSetting {
    Discrete,
    Continuous,
}

/// Carousel tuning as written in a settings file. Every field is optional;
/// anything left out keeps the preset value for that carousel.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Paged testimonial rotator.
    pub testimonials: CarouselSection,
    /// Partner logo marquee.
    pub partners: CarouselSection,
    /// Upper bound (ms) for a single frame delta. Long stalls (tab in the
    /// background, debugger) are clamped to this so motion never leaps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frame_delta_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselSection {
    /// `discrete` pages between cards, `continuous` runs as a marquee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ModeSetting>,
    /// Marquee speed in px/s. Ignored for discrete carousels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_px_s: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    /// Dwell per card before autoplay advances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
    /// How often the dwell progress bar is refreshed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_tick_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_px: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_index: Option<usize>,
    /// Replaces the preset table entirely when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Vec<BreakpointSetting>>,
    /// Items per view below the narrowest breakpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_items: Option<usize>,
    pub spring: SpringSection,
    pub gesture: GestureSection,
    pub glide: GlideSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BreakpointSetting {
    pub min_width: f32,
    pub items_per_view: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpringSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stiffness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<f32>,
    /// Distance (px) from the target that counts as arrived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_delta_px: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_speed_px_s: Option<f32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GestureSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_threshold_px: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_threshold_px_s: Option<f32>,
    /// Fraction of travel applied past one page of drag (0..=1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elastic: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_window_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fling_px_s: Option<f32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlideSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decay_tau_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_speed_px_s: Option<f32>,
}

impl CarouselSettings {
    pub fn section(&self, kind: CarouselKind) -> &CarouselSection {
        match kind {
            CarouselKind::Testimonials => &self.testimonials,
            CarouselKind::Partners => &self.partners,
        }
    }

    /// Engine configuration for `kind`: its preset with this file's
    /// overrides applied.
    pub fn carousel_config(&self, kind: CarouselKind) -> CarouselConfig {
        let mut config = self.section(kind).apply(kind.preset());
        if let Some(ms) = self.max_frame_delta_ms {
            config.max_frame_delta = Duration::from_millis(ms);
        }
        config
    }

    /// Load carousel settings using environment variables.
    /// Evaluation order:
    /// 1) `$REEL_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$REEL_CONFIG_JSON` (inline JSON),
    /// 3) `reel.toml` / `reel.json` in the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, SettingsSource)> {
        Self::load_with(|key| std::env::var(key).ok(), Path::new("."))
    }

    /// [`CarouselSettings::load_from_env`] with an injectable variable
    /// lookup and search root.
    pub fn load_with<F>(
        lookup: F,
        root: &Path,
    ) -> anyhow::Result<(Self, SettingsSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(ENV_CONFIG_PATH)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let settings = Self::load_from_file(&path)?;
            return Ok((settings, SettingsSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(ENV_CONFIG_JSON)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {ENV_CONFIG_JSON}"))?;
            return Ok((parsed, SettingsSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(root) {
            let settings = Self::load_from_file(&path)?;
            return Ok((settings, SettingsSource::File(path)));
        }

        Ok((Self::default(), SettingsSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read carousel settings from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid carousel settings {}", path.display())
            }),
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!(
                        "invalid carousel settings {}: {}",
                        path.display(),
                        err
                    )
                })
            }
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // Try TOML first, then JSON.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse carousel settings {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid carousel settings json: {err}"))
    }

    fn find_default_file(root: &Path) -> Option<PathBuf> {
        const CANDIDATES: &[&str] =
            &["reel.toml", "reel.json", "config/reel.toml", "config/reel.json"];

        CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists())
    }
}

impl CarouselSection {
    /// Overlay this section on `config`.
    pub fn apply(&self, mut config: CarouselConfig) -> CarouselConfig {
        let speed = self
            .speed_px_s
            .or(match config.mode {
                Mode::Continuous { speed } => Some(speed),
                Mode::Discrete => None,
            })
            .unwrap_or(autoplay_defaults::MARQUEE_SPEED_PX_S);
        config.mode = match (self.mode, config.mode) {
            (Some(ModeSetting::Discrete), _) => Mode::Discrete,
            (Some(ModeSetting::Continuous), _)
            | (None, Mode::Continuous { .. }) => Mode::Continuous { speed },
            (None, Mode::Discrete) => Mode::Discrete,
        };

        if let Some(enabled) = self.autoplay {
            config.autoplay.enabled = enabled;
        }
        if let Some(ms) = self.interval_ms {
            config.autoplay.interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.progress_tick_ms {
            config.autoplay.progress_tick = Duration::from_millis(ms);
        }
        if let Some(gap) = self.gap_px {
            config.gap = gap;
        }
        if let Some(index) = self.initial_index {
            config.initial_index = index;
        }

        let fallback = self
            .fallback_items
            .unwrap_or_else(|| config.breakpoints.fallback());
        let tiers = match &self.breakpoints {
            Some(tiers) => tiers
                .iter()
                .map(|t| Breakpoint::new(t.min_width, t.items_per_view))
                .collect(),
            None => config.breakpoints.tiers().to_vec(),
        };
        config.breakpoints = BreakpointTable::new(tiers, fallback);

        let spring = &mut config.spring;
        if let Some(v) = self.spring.stiffness {
            spring.stiffness = v;
        }
        if let Some(v) = self.spring.mass {
            spring.mass = v;
        }
        if let Some(v) = self.spring.rest_delta_px {
            spring.rest_delta = v;
        }
        if let Some(v) = self.spring.rest_speed_px_s {
            spring.rest_speed = v;
        }

        let gesture = &mut config.gesture;
        if let Some(v) = self.gesture.distance_threshold_px {
            gesture.distance_threshold = v;
        }
        if let Some(v) = self.gesture.velocity_threshold_px_s {
            gesture.velocity_threshold = v;
        }
        if let Some(v) = self.gesture.elastic {
            gesture.elastic = v;
        }
        if let Some(ms) = self.gesture.velocity_window_ms {
            gesture.velocity_window = Duration::from_millis(ms);
        }
        if let Some(v) = self.gesture.max_fling_px_s {
            gesture.max_fling = v;
            config.glide.max_speed = v;
        }

        if let Some(ms) = self.glide.decay_tau_ms {
            config.glide.decay_tau = Duration::from_millis(ms);
        }
        if let Some(v) = self.glide.min_speed_px_s {
            config.glide.min_speed = v;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_settings_reproduce_the_presets() {
        let settings = CarouselSettings::default();
        assert_eq!(
            settings.carousel_config(CarouselKind::Testimonials),
            CarouselConfig::testimonial_defaults()
        );
        assert_eq!(
            settings.carousel_config(CarouselKind::Partners),
            CarouselConfig::partner_defaults()
        );
    }

    #[test]
    fn partial_sections_keep_the_preset_mode() {
        let settings = CarouselSettings::parse_from_str(
            r#"
            [partners]
            speed_px_s = 80.0

            [testimonials]
            interval_ms = 7000
            fallback_items = 2

            [testimonials.spring]
            stiffness = 170.0
            "#,
            "inline",
        )
        .unwrap();

        let partners = settings.carousel_config(CarouselKind::Partners);
        assert_eq!(partners.mode, Mode::Continuous { speed: 80.0 });

        let testimonials =
            settings.carousel_config(CarouselKind::Testimonials);
        assert_eq!(testimonials.mode, Mode::Discrete);
        assert_eq!(testimonials.autoplay.interval, Duration::from_secs(7));
        assert_eq!(testimonials.spring.stiffness, 170.0);
        assert_eq!(testimonials.spring.mass, 1.0);
        assert_eq!(testimonials.breakpoints.fallback(), 2);
        assert_eq!(testimonials.breakpoints.items_for(1280.0), 3);
    }

    #[test]
    fn json_is_accepted_without_an_extension() {
        let settings = CarouselSettings::parse_from_str(
            r#"{"testimonials": {"mode": "continuous", "speed_px_s": 30.0}}"#,
            "inline",
        )
        .unwrap();
        assert_eq!(
            settings.carousel_config(CarouselKind::Testimonials).mode,
            Mode::Continuous { speed: 30.0 }
        );
    }

    #[test]
    fn garbage_reports_both_parsers() {
        let err =
            CarouselSettings::parse_from_str("not = [valid", "inline").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("toml error"));
        assert!(msg.contains("json error"));
    }

    #[test]
    fn env_path_wins_over_inline_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[partners]\nautoplay = false\n").unwrap();

        let vars = HashMap::from([
            (ENV_CONFIG_PATH, path.display().to_string()),
            (ENV_CONFIG_JSON, "{}".to_string()),
        ]);
        let (settings, source) = CarouselSettings::load_with(
            |key| vars.get(key).cloned(),
            dir.path(),
        )
        .unwrap();
        assert_eq!(source, SettingsSource::EnvPath(path));
        assert_eq!(settings.partners.autoplay, Some(false));
    }

    #[test]
    fn inline_json_then_default_file_then_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let vars = HashMap::from([(
            ENV_CONFIG_JSON,
            r#"{"max_frame_delta_ms": 50}"#.to_string(),
        )]);
        let (settings, source) = CarouselSettings::load_with(
            |key| vars.get(key).cloned(),
            dir.path(),
        )
        .unwrap();
        assert_eq!(source, SettingsSource::EnvInline);
        assert_eq!(settings.max_frame_delta_ms, Some(50));

        let (_, source) =
            CarouselSettings::load_with(|_| None, dir.path()).unwrap();
        assert_eq!(source, SettingsSource::Default);

        let file = dir.path().join("reel.toml");
        fs::write(&file, "[testimonials]\ngap_px = 16.0\n").unwrap();
        let (settings, source) =
            CarouselSettings::load_with(|_| None, dir.path()).unwrap();
        assert_eq!(source, SettingsSource::File(file));
        assert_eq!(settings.testimonials.gap_px, Some(16.0));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let vars = HashMap::from([
            (ENV_CONFIG_PATH, "  ".to_string()),
            (ENV_CONFIG_JSON, String::new()),
        ]);
        let (_, source) = CarouselSettings::load_with(
            |key| vars.get(key).cloned(),
            dir.path(),
        )
        .unwrap();
        assert_eq!(source, SettingsSource::Default);
    }
}
