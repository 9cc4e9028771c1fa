//! Optional `towerstats-gen.toml` settings.
//!
//! ```toml
//! output = "generated/catalog_data.rs"
//! template = "templates/catalog_data.rs.j2"
//! renderer = "fallback"
//! data_output = "data/btd6_data.json"
//! ```
//!
//! Every key is optional; command-line flags take precedence.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::templates::RendererKind;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "towerstats-gen.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Destination of the generated module
    pub output: Option<PathBuf>,
    /// Template overriding the bundled one
    pub template: Option<PathBuf>,
    pub renderer: Option<RendererKind>,
    /// Destination of `export-data`
    pub data_output: Option<PathBuf>,
}

/// Load generator settings.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but
/// cannot be read or parsed.
pub fn load_generator_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!("Failed to read generator config: {}", config_path.display())
    })?;

    let config: GeneratorConfig = toml::from_str(&contents).with_context(|| {
        format!("Failed to parse generator config: {}", config_path.display())
    })?;

    Ok(Some(config))
}

/// Explicit path first, then `towerstats-gen.toml` in `dir`.
#[must_use]
pub fn resolve_config_path(explicit_path: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    candidate.exists().then_some(candidate)
}
