//! Error type shared by the classifier, extractors and catalog builder.
//!
//! Configuration problems abort a whole example set, parse failures abort the
//! build that hit them. Recoverable conditions (spaces in paths, duplicate
//! reference ids, unreadable files) are not errors; they travel as [`crate::Diagnostic`] values.

use crate::extract::SourceKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// The declared source directory of an example set does not exist.
    #[error("Source folder for examples must exist: '{}'", .0.display())]
    MissingSourceFolder(PathBuf),

    #[error("There are no {0:?} examples configured")]
    UnknownExampleSet(String),

    /// A gallery block asked for categories the catalog does not contain.
    #[error("Unknown example category: {requested:?}; available: {available:?}")]
    UnknownCategory {
        requested: Vec<String>,
        available: Vec<String>,
    },

    /// An example could not be parsed as its declared kind.
    #[error("unable to parse {kind} example {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        kind: SourceKind,
        message: String,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GalleryError {
    pub(crate) fn parse(path: &Path, kind: SourceKind, message: impl Into<String>) -> Self {
        GalleryError::Parse {
            path: path.to_path_buf(),
            kind,
            message: message.into(),
        }
    }

    /// True for errors that should abort the whole example set.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            GalleryError::MissingSourceFolder(_) | GalleryError::UnknownExampleSet(_)
        )
    }
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
