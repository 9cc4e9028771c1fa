//! # Runtime Configuration Module
//!
//! Environment-driven settings for the catalog service.
//!
//! ## Environment Variables
//!
//! ### `TOWERSTATS_DATA`
//!
//! Path of the catalog document to load (JSON, or YAML with a `.yaml`/`.yml`
//! extension). The `--data` flag overrides it.
//!
//! Default: `data/btd6_data.json`
//!
//! When the default document does not exist the service starts on the
//! built-in sample catalog and logs a warning. A path named by the flag or
//! the variable must exist. A file that fails to read, parse or validate is
//! fatal.
//!
//! ## Usage
//!
//! ```rust
//! use towerstats::runtime_config::ServiceConfig;
//!
//! let config = ServiceConfig::from_env();
//! println!("catalog document: {}", config.data_path.display());
//! ```

use std::env;
use std::path::PathBuf;
use tracing::warn;

use crate::catalog::{CatalogSource, FileSource, SampleSource};

/// Variable naming the catalog document.
pub const DATA_ENV: &str = "TOWERSTATS_DATA";

/// Document path used when neither the flag nor the variable is set.
pub const DEFAULT_DATA_PATH: &str = "data/btd6_data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_path: PathBuf,
    /// Set when the path came from `--data` or `TOWERSTATS_DATA`.
    explicit: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            explicit: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        match env::var_os(DATA_ENV) {
            Some(path) if !path.is_empty() => Self {
                data_path: PathBuf::from(path),
                explicit: true,
            },
            _ => Self::default(),
        }
    }

    /// Apply a command-line override.
    #[must_use]
    pub fn with_data(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data_path = path;
            self.explicit = true;
        }
        self
    }

    /// The source to load the catalog from.
    ///
    /// Only a missing default document falls back to the sample data; an
    /// explicit path is handed to [`FileSource`] and fails on load.
    #[must_use]
    pub fn source(&self) -> Box<dyn CatalogSource> {
        if self.explicit || self.data_path.exists() {
            Box::new(FileSource::new(&self.data_path))
        } else {
            warn!(
                path = %self.data_path.display(),
                "catalog document not found, using built-in sample data"
            );
            Box::new(SampleSource)
        }
    }
}
