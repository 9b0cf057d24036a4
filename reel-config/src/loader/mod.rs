//! Settings discovery plus guard rails in one call.

pub mod error;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    models::{CarouselSettings, SettingsSource},
    validation::{ConfigWarnings, apply_guard_rails},
};

use error::ConfigLoadError;

#[derive(Debug, Clone, Default)]
pub struct ConfigLoaderOptions {
    /// Explicit settings file; skips environment discovery.
    pub config_path: Option<PathBuf>,
}

/// Validated settings plus where they came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub settings: CarouselSettings,
    pub source: SettingsSource,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (settings, source) = match &self.options.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingFile {
                        path: path.clone(),
                    });
                }
                let settings = CarouselSettings::load_from_file(path)
                    .map_err(ConfigLoadError::Settings)?;
                (settings, SettingsSource::File(path.clone()))
            }
            None => CarouselSettings::load_from_env()
                .map_err(ConfigLoadError::Settings)?,
        };
        debug!(?source, "carousel settings read");

        let warnings = apply_guard_rails(&settings)?;
        info!(
            ?source,
            warnings = warnings.len(),
            "carousel settings loaded"
        );
        Ok(ConfigLoad {
            settings,
            source,
            warnings,
        })
    }
}
