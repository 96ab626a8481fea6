//! Title and summary extraction for Jupyter notebooks.
//!
//! Notebooks are JSON documents; only the first markdown cell is consulted.
//! Its first `#` heading becomes the title and the surrounding text, up to the
//! first blank line after the heading, becomes the summary. nbformat 3
//! documents (cells nested in `worksheets`, dedicated `heading` cells) are
//! read the way nbformat upgrades them to version 4.

use crate::error::{GalleryError, Result};
use crate::extract::{Extracted, SourceKind};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct NotebookDocument {
    #[serde(default)]
    cells: Option<Vec<Cell>>,
    #[serde(default)]
    worksheets: Option<Vec<Worksheet>>,
}

#[derive(Debug, Deserialize)]
struct Worksheet {
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    cell_type: String,
    #[serde(default)]
    source: Option<CellSource>,
    /// Heading level of nbformat 3 `heading` cells.
    #[serde(default)]
    level: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl CellSource {
    fn text(&self) -> String {
        match self {
            CellSource::Text(text) => text.clone(),
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

impl Cell {
    /// Markdown text of the cell, or `None` for code and raw cells.
    fn markdown(&self) -> Option<String> {
        let text = self.source.as_ref().map(CellSource::text).unwrap_or_default();
        match self.cell_type.as_str() {
            "markdown" => Some(text),
            "heading" => Some(format!("{} {}", "#".repeat(self.level.unwrap_or(1)), text)),
            _ => None,
        }
    }
}

/// Read a notebook from disk and summarize its first markdown cell.
pub fn extract(path: &Path) -> Result<Extracted> {
    let contents = fs::read_to_string(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    summarize_notebook(&contents)
        .map_err(|message| GalleryError::parse(path, SourceKind::Notebook, message))
}

/// Parse notebook JSON and extract title and summary.
pub fn summarize_notebook(contents: &str) -> std::result::Result<Extracted, String> {
    let document: NotebookDocument =
        serde_json::from_str(contents).map_err(|err| format!("invalid notebook JSON: {err}"))?;
    let cells = match (document.cells, document.worksheets) {
        (Some(cells), _) => cells,
        (None, Some(worksheets)) => worksheets
            .into_iter()
            .next()
            .map(|sheet| sheet.cells)
            .unwrap_or_default(),
        (None, None) => return Err("notebook has neither cells nor worksheets".to_string()),
    };

    Ok(cells
        .iter()
        .find_map(Cell::markdown)
        .map(|text| summarize_markdown(&text))
        .unwrap_or_default())
}

/// Title and summary of one markdown cell.
pub fn summarize_markdown(text: &str) -> Extracted {
    let mut title: Option<String> = None;
    let mut lines = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if title.is_some() {
                break;
            }
        } else if title.is_none() && line.starts_with('#') {
            title = Some(heading_text(line));
        } else {
            lines.push(line.trim());
        }
    }

    Extracted {
        display_name: title.unwrap_or_default(),
        summary: lines.join(" "),
    }
}

/// Strip every leading `#` and one following space.
fn heading_text(line: &str) -> String {
    let stripped = line.trim_start_matches('#');
    stripped
        .strip_prefix(' ')
        .unwrap_or(stripped)
        .trim_end()
        .to_string()
}
