//! Directory scan that turns an example folder into a [`Catalog`].
//!
//! Every configured pattern is walked recursively under the source root in
//! sorted path order. Files whose path contains a space are skipped with a
//! diagnostic; every other file is classified, summarized by the extractor
//! registered for its pattern's kind, and filed under its category. Duplicate
//! reference ids are checked once the walk is complete.

use crate::catalog::diagnostics::Diagnostic;
use crate::catalog::index::duplicate_references;
use crate::catalog::model::{Catalog, CatalogEntry};
use crate::error::{GalleryError, Result};
use crate::extract::{ExtractorRegistry, SourceKind};
use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Clone, Debug, Eq, PartialEq)]
/// A glob (`*.py`, `tutorials/*.ipynb`) and the kind of files it selects.
pub struct FilePattern {
    pub pattern: String,
    pub kind: SourceKind,
}

impl FilePattern {
    pub fn new(pattern: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }

    /// Pattern whose kind is inferred from its extension.
    pub fn inferred(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let kind = SourceKind::for_pattern(&pattern);
        Self { pattern, kind }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
/// Result of one scan: the catalog plus everything worth warning about.
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub diagnostics: Vec<Diagnostic>,
}

impl CatalogBuild {
    pub fn has_duplicate_references(&self) -> bool {
        self.diagnostics
            .iter()
            .any(Diagnostic::is_duplicate_reference)
    }

    /// Paths dropped because they contain spaces.
    pub fn skipped_paths(&self) -> impl Iterator<Item = &Path> {
        self.diagnostics.iter().filter_map(|diagnostic| match diagnostic {
            Diagnostic::SpaceInPath { path } => Some(path.as_path()),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, Default)]
/// Catalog builder with an explicit extractor registry.
pub struct CatalogBuilder {
    registry: ExtractorRegistry,
    doc_root: Option<PathBuf>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Measure the space-in-path rule against the documentation root rather
    /// than the example folder.
    pub fn with_doc_root(mut self, doc_root: impl Into<PathBuf>) -> Self {
        self.doc_root = Some(doc_root.into());
        self
    }

    /// Scan `source_root` for every pattern and build the catalog.
    ///
    /// A missing source directory and unparseable examples are errors; spaces
    /// in paths and duplicate reference ids are reported as diagnostics.
    pub fn build(&self, source_root: &Path, patterns: &[FilePattern]) -> Result<CatalogBuild> {
        if !source_root.is_dir() {
            return Err(GalleryError::MissingSourceFolder(source_root.to_path_buf()));
        }

        let mut result = CatalogBuild::default();
        for pattern in patterns {
            let files = collect_matching(source_root, &pattern.pattern, &mut result.diagnostics)?;
            for path in files {
                let checked = self.space_check_path(&path, source_root);
                if checked.to_string_lossy().contains(' ') {
                    tracing::warn!(
                        path = %checked.display(),
                        "example has a space in the pathname which is not yet supported; skipping"
                    );
                    result.diagnostics.push(Diagnostic::SpaceInPath {
                        path: checked.to_path_buf(),
                    });
                    continue;
                }

                let extracted = match self.registry.extract(&path, pattern.kind) {
                    Ok(extracted) => extracted,
                    Err(GalleryError::Io { path, source }) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %source,
                            "unable to read example; skipping"
                        );
                        result.diagnostics.push(Diagnostic::Unreadable {
                            path,
                            message: source.to_string(),
                        });
                        continue;
                    }
                    Err(err) => return Err(err),
                };
                let entry = CatalogEntry::new(&path, source_root, pattern.kind, extracted);
                tracing::debug!(
                    path = %path.display(),
                    reference = %entry.reference_id,
                    category = %entry.category,
                    "cataloged example"
                );
                result.catalog.push(entry);
            }
        }

        for duplicate in duplicate_references(&result.catalog) {
            tracing::error!("{duplicate}");
            result.diagnostics.push(duplicate);
        }
        Ok(result)
    }

    fn space_check_path<'a>(&self, path: &'a Path, source_root: &Path) -> &'a Path {
        let base = self.doc_root.as_deref().unwrap_or(source_root);
        path.strip_prefix(base).unwrap_or(path)
    }
}

/// Build a catalog with the built-in extractors.
pub fn build(source_root: &Path, patterns: &[FilePattern]) -> Result<CatalogBuild> {
    CatalogBuilder::new().build(source_root, patterns)
}

/// Every file under `root` matching `pattern`, sorted by path.
///
/// Patterns without a `/` match file names at any depth; patterns with one
/// match the tail of the path relative to `root`. Entries the walk cannot
/// read are recorded in `unreadable` and skipped.
fn collect_matching(
    root: &Path,
    pattern: &str,
    unreadable: &mut Vec<Diagnostic>,
) -> Result<Vec<PathBuf>> {
    let by_path = pattern.contains('/');
    let matcher = compile_pattern(pattern, by_path)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                tracing::warn!(path = %path.display(), error = %err, "unable to walk examples");
                unreadable.push(Diagnostic::Unreadable {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matched = if by_path {
            matcher.is_match(path.strip_prefix(root).unwrap_or(path))
        } else {
            matcher.is_match(entry.file_name())
        };
        if matched {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn compile_pattern(pattern: &str, by_path: bool) -> Result<GlobMatcher> {
    let pattern = pattern.trim().trim_start_matches("./");
    let full = if by_path && !pattern.starts_with("**/") {
        format!("**/{pattern}")
    } else {
        pattern.to_string()
    };
    let glob = GlobBuilder::new(&full).literal_separator(true).build()?;
    Ok(glob.compile_matcher())
}
