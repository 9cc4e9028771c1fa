use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::catalog::CatalogDocument;
use crate::error::{CatalogError, Result};

/// Default destination of `export-data`.
pub const DEFAULT_DATA_OUTPUT: &str = "data/btd6_data.json";

/// Replace `path` with `contents` via a temp file in the same directory and a rename.
///
/// Parent directories are created. On failure the previous file, if any, is
/// left as it was and the temp file is removed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| CatalogError::io(&parent, e))?;

    let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| CatalogError::io(&parent, e))?;
    debug!(tmp = %tmp.path().display(), target = %path.display(), "staging write");
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| CatalogError::io(path, e))?;
    tmp.persist(path).map_err(|e| CatalogError::io(path, e.error))?;
    Ok(())
}

/// Write `document` as pretty JSON in the persisted catalog schema.
pub fn export_document(document: &CatalogDocument, path: &Path) -> Result<usize> {
    let mut json = serde_json::to_string_pretty(document).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    json.push('\n');
    write_atomic(path, json.as_bytes())?;
    info!(
        path = %path.display(),
        towers = document.towers.len(),
        heroes = document.heroes.len(),
        "exported catalog data"
    );
    Ok(json.len())
}
