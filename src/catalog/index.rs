//! Reference-id uniqueness check over a finished catalog.
//!
//! Two examples sharing an id would make their pages collide as
//! cross-reference targets. The check runs once after every file has been
//! classified and reports each shared id with all of its paths.

use crate::catalog::diagnostics::Diagnostic;
use crate::catalog::identity::ReferenceId;
use crate::catalog::model::Catalog;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One `DuplicateReference` diagnostic per reference id used more than once.
pub fn duplicate_references(catalog: &Catalog) -> Vec<Diagnostic> {
    let mut by_id: BTreeMap<&ReferenceId, Vec<PathBuf>> = BTreeMap::new();
    for entry in catalog.iter() {
        by_id
            .entry(&entry.reference_id)
            .or_default()
            .push(entry.source_path.clone());
    }

    by_id
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(reference_id, paths)| Diagnostic::DuplicateReference {
            reference_id: reference_id.clone(),
            paths,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::extract::{Extracted, SourceKind};
    use std::path::Path;

    fn push(catalog: &mut Catalog, path: &str) {
        catalog.push(CatalogEntry::new(
            Path::new(path),
            Path::new("/ex"),
            SourceKind::Generic,
            Extracted::default(),
        ));
    }

    #[test]
    fn unique_ids_produce_no_diagnostics() {
        let mut catalog = Catalog::new();
        push(&mut catalog, "/ex/a.py");
        push(&mut catalog, "/ex/sub/a.py");
        assert!(duplicate_references(&catalog).is_empty());
    }

    #[test]
    fn shared_ids_report_every_path() {
        let mut catalog = Catalog::new();
        push(&mut catalog, "/ex/foo.py");
        push(&mut catalog, "/ex/foo.txt");
        push(&mut catalog, "/ex/foo_bar.py");
        push(&mut catalog, "/ex/foo-bar.txt");

        let diagnostics = duplicate_references(&catalog);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics[0],
            Diagnostic::DuplicateReference {
                reference_id: ReferenceId::new("foo"),
                paths: vec![PathBuf::from("/ex/foo.py"), PathBuf::from("/ex/foo.txt")],
            }
        );
        assert!(diagnostics.iter().all(Diagnostic::is_duplicate_reference));
    }
}
