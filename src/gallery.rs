//! Category selection for gallery index blocks.
//!
//! A gallery block names an example set and optionally lists the categories
//! to show, one per line: `Plotting <plots>` gives an explicit title, `self`
//! selects the uncategorized examples, and a bare name is both category and
//! title. Without a list every category is shown in catalog order. The plan is
//! handed to the renderer, which owns the card markup.

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{GalleryError, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const SELF_CATEGORY: &str = "self";

static EXPLICIT_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.+?)\s*<([^<]*?)>$").expect("explicit title pattern"));

#[derive(Clone, Debug, Eq, PartialEq)]
/// One requested category and the heading it is shown under.
pub struct CategoryRequest {
    pub category: String,
    pub title: String,
    explicit: bool,
}

impl CategoryRequest {
    /// Parse one content line of a gallery block.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Some(captures) = EXPLICIT_TITLE.captures(line) {
            let reference = &captures[2];
            let category = if reference == SELF_CATEGORY { "" } else { reference };
            return Self {
                category: category.to_string(),
                title: captures[1].to_string(),
                explicit: true,
            };
        }
        if line == SELF_CATEGORY {
            return Self {
                category: String::new(),
                title: String::new(),
                explicit: true,
            };
        }
        Self {
            category: line.to_string(),
            title: line.to_string(),
            explicit: false,
        }
    }

    fn bare(category: &str) -> Self {
        Self {
            category: category.to_string(),
            title: category.to_string(),
            explicit: false,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
/// A category group as it should appear in the index.
pub struct GallerySection<'a> {
    pub category: String,
    pub title: String,
    pub entries: &'a [CatalogEntry],
}

/// Resolve a gallery block's content against a catalog.
///
/// `titles` supplies display names for categories that were not given an
/// explicit title. Repeated categories keep their first position and take the
/// last title. Categories missing from the catalog are an error.
pub fn plan_gallery<'a, S: AsRef<str>>(
    catalog: &'a Catalog,
    content: &[S],
    titles: &BTreeMap<String, String>,
) -> Result<Vec<GallerySection<'a>>> {
    let lines: Vec<&str> = content
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !line.trim().is_empty())
        .collect();
    let parsed: Vec<CategoryRequest> = if lines.is_empty() {
        catalog.categories().map(CategoryRequest::bare).collect()
    } else {
        lines.into_iter().map(CategoryRequest::parse).collect()
    };

    let mut requests: Vec<CategoryRequest> = Vec::new();
    for request in parsed {
        match requests
            .iter_mut()
            .find(|existing| existing.category == request.category)
        {
            Some(existing) => *existing = request,
            None => requests.push(request),
        }
    }

    let unknown: Vec<String> = requests
        .iter()
        .filter(|request| !catalog.contains_category(&request.category))
        .map(|request| request.category.clone())
        .collect();
    if !unknown.is_empty() {
        return Err(GalleryError::UnknownCategory {
            requested: unknown,
            available: catalog.categories().map(str::to_string).collect(),
        });
    }

    Ok(requests
        .into_iter()
        .map(|request| {
            let title = if request.explicit {
                request.title
            } else {
                titles.get(&request.category).cloned().unwrap_or(request.title)
            };
            GallerySection {
                entries: catalog.entries(&request.category),
                category: request.category,
                title,
            }
        })
        .collect())
}
