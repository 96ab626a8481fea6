use crate::catalog::identity::ReferenceId;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Recoverable condition observed while building a catalog.
///
/// Diagnostics never abort a build; they are returned next to the catalog so
/// callers can fail, warn or ignore as they see fit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The example was skipped: cross references cannot target paths with spaces.
    SpaceInPath { path: PathBuf },
    /// Several examples map to one reference id.
    DuplicateReference {
        reference_id: ReferenceId,
        paths: Vec<PathBuf>,
    },
    /// The file or directory could not be read; the rest of the set is kept.
    Unreadable { path: PathBuf, message: String },
}

impl Diagnostic {
    pub fn is_duplicate_reference(&self) -> bool {
        matches!(self, Diagnostic::DuplicateReference { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SpaceInPath { path } => write!(
                f,
                "The example '{}' has a space in the pathname which is not yet supported.",
                path.display()
            ),
            Diagnostic::DuplicateReference {
                reference_id,
                paths,
            } => {
                let paths = paths
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "duplicate example reference '{reference_id}' shared by {paths}"
                )
            }
            Diagnostic::Unreadable { path, message } => {
                write!(f, "could not read example '{}': {message}", path.display())
            }
        }
    }
}
