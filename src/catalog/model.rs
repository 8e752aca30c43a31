use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;

/// One category as authored in the catalog document.
///
/// Only the ordered subject list is consumed by the ranking code; every other
/// field rides along untouched in `metadata`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryRecord {
    #[serde(alias = "subjects")]
    pub languages: Vec<String>,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl CategoryRecord {
    pub fn new<I, S>(subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: subjects.into_iter().map(Into::into).collect(),
            metadata: BTreeMap::new(),
        }
    }

    /// Subjects in authored order, rank 0 first.
    pub fn subjects(&self) -> &[String] {
        &self.languages
    }
}

/// Canonical form used for every subject comparison: hyphens become spaces,
/// surrounding whitespace is trimmed, and the result is lowercased.
pub fn normalize_subject(raw: &str) -> String {
    raw.replace('-', " ").trim().to_lowercase()
}

/// Parse a catalog document from disk.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    Catalog::from_json_str(&data).with_context(|| format!("parsing catalog {}", path.display()))
}

pub(crate) fn parse_records(raw: &str) -> Result<BTreeMap<String, CategoryRecord>> {
    serde_json::from_str(raw)
        .context("catalog must be a JSON object mapping category names to {\"languages\": [...]}")
}
