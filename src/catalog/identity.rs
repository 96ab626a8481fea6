use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Anchor-safe cross-reference target for one example (e.g. `plots-sine-wave`).
///
/// Construction normalizes underscores and spaces to hyphens, so an id never
/// contains either.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub fn new(raw: &str) -> Self {
        Self(raw.replace(['_', ' '], "-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// Where an example sits in the gallery: its reference id and category.
pub struct Classification {
    pub reference_id: ReferenceId,
    /// Immediate parent directory for nested examples, empty at the root.
    pub category: String,
}

/// Derive reference id and category from an example path.
///
/// The path is measured relative to the parent of `source_root`, so a file
/// directly inside the root has two segments (`root/file.py`). Anything deeper
/// is nested and takes its immediate parent directory as category and id
/// prefix. Pure path arithmetic; the filesystem is not consulted.
pub fn classify(path: &Path, source_root: &Path) -> Classification {
    let base = source_root.parent().unwrap_or(source_root);
    let relative = path.strip_prefix(base).unwrap_or(path);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let nested = relative.components().count() > 2;
    let parent = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned());

    match parent {
        Some(parent) if nested => Classification {
            reference_id: ReferenceId::new(&format!("{parent}-{stem}")),
            category: parent,
        },
        _ => Classification {
            reference_id: ReferenceId::new(&stem),
            category: String::new(),
        },
    }
}
