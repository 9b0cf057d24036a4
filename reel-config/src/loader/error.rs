use super::super::validation::ConfigGuardRailError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("settings file {path} does not exist")]
    MissingFile { path: PathBuf },
    #[error("failed to load carousel settings: {0}")]
    Settings(#[source] anyhow::Error),
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
}
