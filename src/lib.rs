//! Example gallery indexing for documentation builds.
//!
//! The crate scans a folder of example files (Python scripts, Jupyter
//! notebooks, anything else), derives a reference id and category for each
//! from its path, extracts a title and one-paragraph summary, and groups the
//! results into a catalog a documentation renderer turns into pages and index
//! cards. Rendering itself belongs to the host build; everything here is
//! plain data in, plain data out.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod gallery;
mod schema_loader;

pub use catalog::{
    Catalog, CatalogBuild, CatalogBuilder, CatalogEntry, CatalogRepository, Classification,
    Diagnostic, ExampleSetCatalog, FilePattern, ReferenceId, build, classify,
};
pub use config::{ExampleSet, GalleryConfig};
pub use error::GalleryError;
pub use extract::{Extracted, Extractor, ExtractorRegistry, SourceKind, extract_summary};
pub use gallery::{CategoryRequest, GallerySection, plan_gallery};

/// File name searched for when no configuration path is given.
pub const CONFIG_FILE_NAME: &str = "gallery.json";

/// Environment variable naming the configuration file explicitly.
pub const CONFIG_ENV: &str = "GALLERY_CONFIG";

/// Returns the config path from an explicit hint when it names a real file.
fn config_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.trim().is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.is_file() {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

/// Nearest `gallery.json` in `start` or one of its ancestors.
pub fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the gallery configuration.
///
/// Honors `GALLERY_CONFIG` when it points at a file, then climbs up from the
/// current directory looking for `gallery.json`.
pub fn find_gallery_config() -> Result<PathBuf> {
    if let Ok(hint) = env::var(CONFIG_ENV) {
        if let Some(path) = config_from_hint(&hint) {
            return Ok(path);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = search_upwards(&cwd) {
            return Ok(path);
        }
    }

    bail!(
        "Unable to locate {CONFIG_FILE_NAME}. Set {CONFIG_ENV} to the gallery configuration file."
    )
}
