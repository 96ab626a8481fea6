//! Summary extraction for example files.
//!
//! Each [`SourceKind`] has one pure extractor producing the display title and
//! the one-paragraph summary shown on gallery cards. The builder never decides
//! how a kind is read; it asks an [`ExtractorRegistry`], so swapping the
//! notebook reader (or any other) is a registry change only.

pub mod notebook;
pub mod script;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The declared format of an example file.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Python scripts; the module docstring is the summary.
    Script,
    /// Jupyter notebooks; the first markdown cell carries title and summary.
    Notebook,
    /// Anything else. Listed by file name only.
    Generic,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Script => "script",
            SourceKind::Notebook => "notebook",
            SourceKind::Generic => "generic",
        }
    }

    /// Infer the kind for a configured file pattern such as `*.py`.
    pub fn for_pattern(pattern: &str) -> Self {
        let pattern = pattern.trim();
        if pattern.contains("ipynb") {
            SourceKind::Notebook
        } else if pattern.ends_with(".py") {
            SourceKind::Script
        } else {
            SourceKind::Generic
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Title and summary pulled out of one example.
pub struct Extracted {
    pub display_name: String,
    pub summary: String,
}

/// Reads one example file of a known kind.
pub type Extractor = fn(&Path) -> Result<Extracted>;

#[derive(Clone, Copy)]
/// Static mapping from every [`SourceKind`] to its extractor.
///
/// One slot per kind keeps the mapping exhaustive; `with` replaces a slot.
pub struct ExtractorRegistry {
    script: Extractor,
    notebook: Extractor,
    generic: Extractor,
}

impl ExtractorRegistry {
    /// The built-in extractors.
    pub fn standard() -> Self {
        Self {
            script: script::extract,
            notebook: notebook::extract,
            generic: extract_generic,
        }
    }

    pub fn with(mut self, kind: SourceKind, extractor: Extractor) -> Self {
        match kind {
            SourceKind::Script => self.script = extractor,
            SourceKind::Notebook => self.notebook = extractor,
            SourceKind::Generic => self.generic = extractor,
        }
        self
    }

    pub fn get(&self, kind: SourceKind) -> Extractor {
        match kind {
            SourceKind::Script => self.script,
            SourceKind::Notebook => self.notebook,
            SourceKind::Generic => self.generic,
        }
    }

    pub fn extract(&self, path: &Path, kind: SourceKind) -> Result<Extracted> {
        (self.get(kind))(path)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry").finish_non_exhaustive()
    }
}

/// Extract `(display_name, summary)` with the built-in extractor for `kind`.
pub fn extract_summary(path: &Path, kind: SourceKind) -> Result<Extracted> {
    ExtractorRegistry::standard().extract(path, kind)
}

/// Generic examples are listed by name; the file is never opened.
pub fn extract_generic(path: &Path) -> Result<Extracted> {
    Ok(Extracted {
        display_name: file_name(path),
        summary: String::new(),
    })
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn kind_follows_pattern_extension() {
        assert_eq!(SourceKind::for_pattern("*.py"), SourceKind::Script);
        assert_eq!(SourceKind::for_pattern("*.ipynb"), SourceKind::Notebook);
        assert_eq!(SourceKind::for_pattern("*.txt"), SourceKind::Generic);
        assert_eq!(SourceKind::for_pattern("*"), SourceKind::Generic);
    }

    #[test]
    fn generic_extractor_uses_file_name_without_reading() {
        let extracted = extract_generic(&PathBuf::from("/does/not/exist/data.csv")).unwrap();
        assert_eq!(extracted.display_name, "data.csv");
        assert!(extracted.summary.is_empty());
    }

    #[test]
    fn registry_override_replaces_only_one_kind() {
        fn fixed(_: &Path) -> Result<Extracted> {
            Ok(Extracted {
                display_name: "fixed".to_string(),
                summary: "Fixed.".to_string(),
            })
        }

        let registry = ExtractorRegistry::standard().with(SourceKind::Generic, fixed);
        let path = PathBuf::from("notes.txt");
        assert_eq!(
            registry.extract(&path, SourceKind::Generic).unwrap().display_name,
            "fixed"
        );
        let standard = ExtractorRegistry::standard();
        assert_eq!(
            standard.extract(&path, SourceKind::Generic).unwrap().display_name,
            "notes.txt"
        );
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SourceKind::Notebook).unwrap(),
            "\"notebook\""
        );
    }
}
