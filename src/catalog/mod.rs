//! Example catalog wiring.
//!
//! `identity` turns paths into reference ids and categories, `builder` walks
//! an example folder into a [`Catalog`], `index` checks reference uniqueness,
//! and `repository` keeps the catalogs of every configured example set.

pub mod builder;
pub mod diagnostics;
pub mod identity;
pub mod index;
pub mod model;
pub mod repository;

pub use builder::{CatalogBuild, CatalogBuilder, FilePattern, build};
pub use diagnostics::Diagnostic;
pub use identity::{Classification, ReferenceId, classify};
pub use index::duplicate_references;
pub use model::{Catalog, CatalogEntry};
pub use repository::{CatalogRepository, ExampleSetCatalog};
