use std::env;
use std::path::PathBuf;

use log::warn;

use crate::error::{Result, StampError};

pub const ENV_FOLDER_READ: &str = "STAMP_FOLDER_READ";
pub const ENV_FOLDER_SAVE: &str = "STAMP_FOLDER_SAVE";
pub const ENV_RESULTS_FILE: &str = "STAMP_RESULTS_FILE";

/// Locations used by a single batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Folder with the scanned sheets.
    pub read_dir: PathBuf,
    /// Folder receiving annotated copies, same file names.
    pub save_dir: PathBuf,
    /// CSV report path.
    pub results_file: PathBuf,
}

impl DetectorConfig {
    pub fn new(
        read_dir: impl Into<PathBuf>,
        save_dir: impl Into<PathBuf>,
        results_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            read_dir: read_dir.into(),
            save_dir: save_dir.into(),
            results_file: results_file.into(),
        }
    }

    /// Reads all three locations from the environment.
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            require(ENV_FOLDER_READ)?,
            require(ENV_FOLDER_SAVE)?,
            require(ENV_RESULTS_FILE)?,
        ))
    }

    /// Like [DetectorConfig::from_env], but every unset key falls back to
    /// the matching location of `defaults` on its own.
    pub fn from_env_or(defaults: DetectorConfig) -> Self {
        Self {
            read_dir: or_default(ENV_FOLDER_READ, defaults.read_dir),
            save_dir: or_default(ENV_FOLDER_SAVE, defaults.save_dir),
            results_file: or_default(ENV_RESULTS_FILE, defaults.results_file),
        }
    }
}

fn or_default(key: &'static str, default: PathBuf) -> PathBuf {
    require(key).unwrap_or_else(|err| {
        warn!("{}, using {:?}", err, default);
        default
    })
}

fn require(key: &'static str) -> Result<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(StampError::MissingConfig(key))
}
