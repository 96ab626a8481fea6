//! Holds the catalogs of every example set built in one pass.
//!
//! Gallery blocks refer to an example set by name; the repository resolves
//! that name and keeps a set's catalog next to the directory its pages are
//! written to.

use crate::catalog::builder::CatalogBuild;
use crate::catalog::model::Catalog;
use crate::error::{GalleryError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Clone, Debug, Serialize)]
/// A built example set: output directory plus its scan result.
pub struct ExampleSetCatalog {
    pub target: PathBuf,
    #[serde(flatten)]
    pub build: CatalogBuild,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
/// Built example sets keyed by their configured name.
pub struct CatalogRepository {
    sets: BTreeMap<String, ExampleSetCatalog>,
}

impl CatalogRepository {
    /// Register a built example set, replacing any earlier build of it.
    pub fn register(&mut self, name: impl Into<String>, set: ExampleSetCatalog) {
        self.sets.insert(name.into(), set);
    }

    pub fn get(&self, name: &str) -> Option<&ExampleSetCatalog> {
        self.sets.get(name)
    }

    /// Catalog of a named set; unknown names are a configuration error.
    pub fn catalog(&self, name: &str) -> Result<&Catalog> {
        self.get(name)
            .map(|set| &set.build.catalog)
            .ok_or_else(|| GalleryError::UnknownExampleSet(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Total number of diagnostics across every set.
    pub fn diagnostic_count(&self) -> usize {
        self.sets
            .values()
            .map(|set| set.build.diagnostics.len())
            .sum()
    }
}
