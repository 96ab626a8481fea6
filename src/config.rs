//! Gallery configuration: named example sets and where their pages go.
//!
//! The configuration is a JSON object keyed by example-set name, checked
//! against the bundled `schema/gallery_config.schema.json` before it is
//! deserialized. Relative directories resolve against the documentation root,
//! which is the directory holding the configuration file.

use crate::catalog::{
    CatalogBuilder, CatalogEntry, CatalogRepository, ExampleSetCatalog, FilePattern,
};
use crate::error::GalleryError;
use crate::extract::ExtractorRegistry;
use crate::schema_loader::compile_json_schema;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Bundled contract for gallery configuration files.
pub const CONFIG_SCHEMA: &str = include_str!("../schema/gallery_config.schema.json");

#[derive(Clone, Debug, Deserialize)]
/// One example set exactly as written in the configuration file.
struct RawExampleSet {
    source: PathBuf,
    #[serde(default)]
    target: Option<PathBuf>,
    file_ext: Vec<String>,
    #[serde(default)]
    categories: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
/// An example set with its directories resolved against the doc root.
pub struct ExampleSet {
    pub name: String,
    pub source: PathBuf,
    pub target: PathBuf,
    pub patterns: Vec<FilePattern>,
    /// Display titles per category, used when a gallery lists every category.
    pub categories: BTreeMap<String, String>,
}

impl ExampleSet {
    fn resolve(name: String, raw: RawExampleSet, doc_root: &Path) -> Self {
        let source = doc_root.join(&raw.source);
        let target = raw
            .target
            .map(|target| doc_root.join(target))
            .unwrap_or_else(|| source.clone());
        Self {
            name,
            source,
            target,
            patterns: raw.file_ext.into_iter().map(FilePattern::inferred).collect(),
            categories: raw.categories,
        }
    }

    /// Output page for an entry: `target/<relative path>.md`.
    pub fn page_path(&self, entry: &CatalogEntry) -> PathBuf {
        self.target.join(entry.relative_path()).with_extension("md")
    }

    /// Scan the set's source folder.
    ///
    /// The source folder must exist; a missing one aborts this set.
    pub fn build(
        &self,
        doc_root: &Path,
        registry: ExtractorRegistry,
    ) -> Result<ExampleSetCatalog, GalleryError> {
        if !self.source.is_dir() {
            return Err(GalleryError::MissingSourceFolder(self.source.clone()));
        }
        tracing::info!(
            set = %self.name,
            source = %self.source.display(),
            patterns = self.patterns.len(),
            "building example set"
        );
        let build = CatalogBuilder::new()
            .with_registry(registry)
            .with_doc_root(doc_root)
            .build(&self.source, &self.patterns)?;
        Ok(ExampleSetCatalog {
            target: self.target.clone(),
            build,
        })
    }
}

#[derive(Clone, Debug)]
/// Every configured example set plus the documentation root.
pub struct GalleryConfig {
    doc_root: PathBuf,
    sets: BTreeMap<String, ExampleSet>,
    registry: ExtractorRegistry,
}

impl GalleryConfig {
    /// Load, validate and resolve a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let value: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing gallery configuration {}", path.display()))?;
        let doc_root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::from_value(&doc_root, value)
            .with_context(|| format!("loading gallery configuration {}", path.display()))
    }

    /// Validate and resolve an in-memory configuration.
    pub fn from_value(doc_root: &Path, value: Value) -> Result<Self> {
        let schema = compile_json_schema(CONFIG_SCHEMA, "gallery_config.schema.json")?;
        schema.validate(&value, schema.title().unwrap_or("gallery configuration"))?;

        let raw: BTreeMap<String, RawExampleSet> =
            serde_json::from_value(value).context("decoding example sets")?;
        let sets = raw
            .into_iter()
            .map(|(name, set)| {
                let resolved = ExampleSet::resolve(name.clone(), set, doc_root);
                (name, resolved)
            })
            .collect();
        Ok(Self {
            doc_root: doc_root.to_path_buf(),
            sets,
            registry: ExtractorRegistry::standard(),
        })
    }

    /// Use a custom extractor registry for every set.
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn doc_root(&self) -> &Path {
        &self.doc_root
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn example_set(&self, name: &str) -> Result<&ExampleSet, GalleryError> {
        self.sets
            .get(name)
            .ok_or_else(|| GalleryError::UnknownExampleSet(name.to_string()))
    }

    /// Build one named example set.
    pub fn build_example_set(&self, name: &str) -> Result<ExampleSetCatalog, GalleryError> {
        self.example_set(name)?.build(&self.doc_root, self.registry)
    }

    /// Build every set; the first configuration or parse error aborts.
    pub fn build_all(&self) -> Result<CatalogRepository, GalleryError> {
        let mut repository = CatalogRepository::default();
        for (name, set) in &self.sets {
            repository.register(name.clone(), set.build(&self.doc_root, self.registry)?);
        }
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::SourceKind;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn resolves_directories_and_infers_kinds() {
        let config = GalleryConfig::from_value(
            Path::new("/docs"),
            json!({
                "python": {"source": "examples", "file_ext": ["*.py", "*.ipynb", "*.txt"]},
                "other": {"source": "more", "target": "out/more", "file_ext": ["*"],
                          "categories": {"io": "Input and output"}}
            }),
        )
        .unwrap();

        let python = config.example_set("python").unwrap();
        assert_eq!(python.source, PathBuf::from("/docs/examples"));
        assert_eq!(python.target, python.source);
        let kinds: Vec<_> = python.patterns.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![SourceKind::Script, SourceKind::Notebook, SourceKind::Generic]
        );

        let other = config.example_set("other").unwrap();
        assert_eq!(other.target, PathBuf::from("/docs/out/more"));
        assert_eq!(other.categories["io"], "Input and output");
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["other", "python"]);
    }

    #[test]
    fn schema_rejects_missing_fields_and_unknown_keys() {
        let err = GalleryConfig::from_value(
            Path::new("/docs"),
            json!({"python": {"source": "examples", "file_ext": [], "extra": 1}}),
        )
        .expect_err("invalid config");
        let message = format!("{err:#}");
        assert!(message.contains("failed schema validation"), "{message}");

        assert!(GalleryConfig::from_value(Path::new("/docs"), json!({})).is_err());
        assert!(
            GalleryConfig::from_value(Path::new("/docs"), json!({"python": {"file_ext": ["*.py"]}}))
                .is_err()
        );
    }

    #[test]
    fn missing_source_folder_is_fatal() {
        let temp = TempDir::new().expect("temp dir");
        let config = GalleryConfig::from_value(
            temp.path(),
            json!({"python": {"source": "absent", "file_ext": ["*.py"]}}),
        )
        .unwrap();
        let err = config.build_example_set("python").expect_err("missing source");
        assert!(matches!(err, GalleryError::MissingSourceFolder(_)));
        assert!(err.to_string().contains("must exist"));
        assert!(config.build_all().is_err());
    }

    #[test]
    fn unknown_example_set_is_an_error() {
        let config = GalleryConfig::from_value(
            Path::new("/docs"),
            json!({"python": {"source": "examples", "file_ext": ["*.py"]}}),
        )
        .unwrap();
        assert!(matches!(
            config.build_example_set("jupyter"),
            Err(GalleryError::UnknownExampleSet(_))
        ));
    }

    #[test]
    fn load_uses_config_directory_as_doc_root() -> Result<()> {
        let temp = TempDir::new()?;
        fs::create_dir_all(temp.path().join("examples").join("io"))?;
        fs::write(
            temp.path().join("examples").join("io").join("read_csv.py"),
            "\"\"\"Read a CSV file\"\"\"\n",
        )?;
        let config_path = temp.path().join("gallery.json");
        fs::write(
            &config_path,
            r#"{"python": {"source": "examples", "target": "generated", "file_ext": ["*.py"]}}"#,
        )?;

        let config = GalleryConfig::load(&config_path)?;
        assert_eq!(config.doc_root(), temp.path());
        let built = config.build_example_set("python")?;
        let entry = &built.build.catalog.entries("io")[0];
        assert_eq!(entry.summary, "Read a CSV file.");

        let set = config.example_set("python")?;
        assert_eq!(
            set.page_path(entry),
            temp.path().join("generated").join("io").join("read_csv.md")
        );
        Ok(())
    }
}
