//! Application settings.
//!
//! Settings come from an optional TOML file. Every key has a default, so an
//! empty file (or no file) gives the stock behaviour:
//!
//! ```toml
//! entry_screen = "landing"
//! submit_delay_ms = 1500
//! search_delay_ms = 1000
//! lookup_delay_ms = 1000
//! max_photo_bytes = 5242880
//! max_photos = 3
//! # rng_seed = 42
//!
//! [catalog]
//! backend = "csv"
//! location = "found_items.csv"
//!
//! [log]
//! level = "info"
//! # file = "intake.log"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use intake_core::{CatalogConfig, Latency, MAX_PHOTO_BYTES, MAX_PHOTOS, PhotoLimits, Screen};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{LostFoundOptions, RegistrationOptions};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen a lost-and-found session opens on. Unknown names mean landing.
    pub entry_screen: String,
    pub submit_delay_ms: u64,
    pub search_delay_ms: u64,
    pub lookup_delay_ms: u64,
    pub max_photo_bytes: u64,
    pub max_photos: usize,
    pub rng_seed: Option<u64>,
    pub catalog: CatalogConfig,
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entry_screen: Screen::Landing.as_str().to_string(),
            submit_delay_ms: 1500,
            search_delay_ms: 1000,
            lookup_delay_ms: 1000,
            max_photo_bytes: MAX_PHOTO_BYTES,
            max_photos: MAX_PHOTOS,
            rng_seed: None,
            catalog: CatalogConfig::default(),
            log: LogSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn entry_screen(&self) -> Screen {
        Screen::parse(&self.entry_screen)
    }

    pub fn photo_limits(&self) -> PhotoLimits {
        PhotoLimits {
            max_bytes: self.max_photo_bytes,
            max_count: self.max_photos,
        }
    }

    pub fn lost_found_options(&self, latency: Arc<dyn Latency>) -> LostFoundOptions {
        LostFoundOptions {
            entry_screen: self.entry_screen(),
            limits: self.photo_limits(),
            submit_delay: Duration::from_millis(self.submit_delay_ms),
            search_delay: Duration::from_millis(self.search_delay_ms),
            latency,
        }
    }

    pub fn registration_options(&self, latency: Arc<dyn Latency>) -> RegistrationOptions {
        RegistrationOptions {
            lookup_delay: Duration::from_millis(self.lookup_delay_ms),
            latency,
            rng_seed: self.rng_seed,
        }
    }
}
