//! In-memory catalog produced by one scan of an example set.
//!
//! Entries are built once and handed out by shared reference only. The
//! catalog groups them by category; the empty category holds root-level
//! examples.

use crate::catalog::identity::{ReferenceId, classify};
use crate::extract::{Extracted, SourceKind};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize)]
/// Metadata for one example file.
pub struct CatalogEntry {
    pub source_path: PathBuf,
    pub source_root: PathBuf,
    pub kind: SourceKind,
    pub display_name: String,
    pub reference_id: ReferenceId,
    pub summary: String,
    pub category: String,
}

impl CatalogEntry {
    /// Classify `path` and attach the extracted title and summary.
    pub fn new(path: &Path, source_root: &Path, kind: SourceKind, extracted: Extracted) -> Self {
        let classification = classify(path, source_root);
        Self {
            source_path: path.to_path_buf(),
            source_root: source_root.to_path_buf(),
            kind,
            display_name: extracted.display_name,
            reference_id: classification.reference_id,
            summary: extracted.summary,
            category: classification.category,
        }
    }

    /// Path of the example relative to its source root.
    pub fn relative_path(&self) -> &Path {
        self.source_path
            .strip_prefix(&self.source_root)
            .unwrap_or(&self.source_path)
    }
}

#[derive(Clone, Debug, Default)]
/// Category name to entries. Categories and the entries inside each keep
/// the order in which the scan first found them.
pub struct Catalog {
    groups: Vec<(String, Vec<CatalogEntry>)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: CatalogEntry) {
        match self
            .groups
            .iter_mut()
            .find(|(category, _)| *category == entry.category)
        {
            Some((_, entries)) => entries.push(entry),
            None => self.groups.push((entry.category.clone(), vec![entry])),
        }
    }

    /// Category names in discovery order; `""` is the uncategorized group.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(category, _)| category.as_str())
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.categories().any(|known| known == category)
    }

    /// Entries of one category, empty when the category is unknown.
    pub fn entries(&self, category: &str) -> &[CatalogEntry] {
        self.groups()
            .find(|(known, _)| *known == category)
            .map(|(_, entries)| entries)
            .unwrap_or(&[])
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[CatalogEntry])> {
        self.groups
            .iter()
            .map(|(category, entries)| (category.as_str(), entries.as_slice()))
    }

    /// Every entry, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.groups.iter().flat_map(|(_, entries)| entries)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (category, entries) in &self.groups {
            map.serialize_entry(category, entries)?;
        }
        map.end()
    }
}
