//! JSON Schema compilation and validation shared by configuration loaders.
//!
//! Schemas are compiled from an in-memory value so the bundled copy can be
//! embedded in the binary. Validation reports every violation at once, one
//! per line, prefixed with the JSON pointer of the offending value.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

/// A compiled validator plus the schema it was built from.
pub(crate) struct SchemaLoadResult {
    pub compiled: JSONSchema,
    pub raw: Value,
}

/// Compile a schema given as a JSON string, labelled for error messages.
pub(crate) fn compile_json_schema(text: &str, label: &str) -> Result<SchemaLoadResult> {
    let raw: Value =
        serde_json::from_str(text).with_context(|| format!("parsing schema {label}"))?;
    compile_value(raw, label)
}

fn compile_value(raw: Value, label: &str) -> Result<SchemaLoadResult> {
    if !raw.is_object() {
        bail!("schema {label} must be a JSON object");
    }
    let compiled = JSONSchema::compile(&raw)
        .map_err(|err| anyhow!("compiling schema {label}: {err}"))?;
    Ok(SchemaLoadResult { compiled, raw })
}

impl SchemaLoadResult {
    /// Validate `instance`, joining every violation into one error.
    pub(crate) fn validate(&self, instance: &Value, subject: &str) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| {
                    let pointer = err.instance_path.to_string();
                    if pointer.is_empty() {
                        err.to_string()
                    } else {
                        format!("{pointer}: {err}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{subject} failed schema validation:\n{details}");
        }
        Ok(())
    }

    /// Title declared by the schema, used in diagnostics.
    pub(crate) fn title(&self) -> Option<&str> {
        self.raw.get("title").and_then(Value::as_str)
    }
}
