//! Error taxonomy shared by the catalog service and the generator.
//!
//! Lookups that can miss return `Option` or a per-id marker; only operations
//! that target a single record surface [`CatalogError::NotFound`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, querying, rendering or writing.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unknown identifier or an invalid enumerated selector
    /// (category, difficulty, upgrade path).
    #[error("{kind} not found: {key}")]
    NotFound {
        /// What was being looked up (e.g. "tower", "upgrade path")
        kind: &'static str,
        /// The key that did not resolve
        key: String,
    },

    /// A source record violates a catalog invariant; the whole load is rejected.
    #[error("invalid catalog record '{record}': {message}")]
    Validation { record: String, message: String },

    /// The template uses syntax the selected renderer cannot model, or the
    /// engine failed while rendering.
    #[error("template error at line {line}: {message}")]
    Template { line: usize, message: String },

    /// Reading a source document/template or writing generated output failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source document could not be parsed.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl CatalogError {
    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub(crate) fn validation(record: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            record: record.into(),
            message: message.into(),
        }
    }

    pub(crate) fn template(line: usize, message: impl Into<String>) -> Self {
        CatalogError::Template {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a structured negative lookup result.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
