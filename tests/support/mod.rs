use anyhow::{Context, Result, bail};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Throwaway documentation tree with an example folder inside it.
pub struct ExampleTree {
    _temp: TempDir,
    doc_root: PathBuf,
    source_root: PathBuf,
}

impl ExampleTree {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let doc_root = temp.path().join("docs");
        let source_root = doc_root.join("examples");
        fs::create_dir_all(&source_root).expect("create example root");
        Self {
            _temp: temp,
            doc_root,
            source_root,
        }
    }

    pub fn doc_root(&self) -> &Path {
        &self.doc_root
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Write `contents` to `rel` under the example folder.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.source_root.join(rel);
        fs::create_dir_all(path.parent().expect("parent dir")).expect("create parent");
        fs::write(&path, contents).expect("write example");
        path
    }

    /// Write a file relative to the documentation root.
    pub fn write_doc(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.doc_root.join(rel);
        fs::create_dir_all(path.parent().expect("parent dir")).expect("create parent");
        fs::write(&path, contents).expect("write doc file");
        path
    }
}

/// Minimal nbformat 4 notebook: one code cell, then one markdown cell.
pub fn notebook_json(markdown: &str) -> String {
    json!({
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {},
        "cells": [
            {"cell_type": "code", "execution_count": null, "metadata": {},
             "outputs": [], "source": ["import numpy as np\n"]},
            {"cell_type": "markdown", "metadata": {}, "source": markdown},
        ]
    })
    .to_string()
}

pub fn gallery_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gallery-catalog"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
