//! Validated, normalized view of a category catalog.
//!
//! The index is built once and never mutated afterwards. Ingestion normalizes
//! every subject identifier, rejects blank category names, and drops repeated
//! subjects inside a category so each subject has exactly one rank per
//! category.

use crate::catalog::model::parse_records;
use crate::catalog::{CategoryRecord, load_catalog_from_path, normalize_subject};
use crate::error::LookupError;
use anyhow::{Result, bail};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
/// Category name to ordered subject list, keyed in stable order.
pub struct Catalog {
    by_name: BTreeMap<String, CategoryRecord>,
}

impl Catalog {
    /// Load and validate a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        load_catalog_from_path(path)
    }

    /// Parse a catalog from its JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_records(parse_records(raw)?)
    }

    /// Build a catalog from in-memory records, applying the same validation
    /// and normalization as a file load.
    pub fn from_records<I, K>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, CategoryRecord)>,
        K: Into<String>,
    {
        let mut by_name = BTreeMap::new();
        for (name, record) in records {
            let name = name.into();
            if name.trim().is_empty() {
                bail!("catalog contains a category with an empty name");
            }
            let record = normalize_record(&name, record);
            by_name.insert(name, record);
        }
        if by_name.is_empty() {
            bail!("catalog contains no categories");
        }
        Ok(Self { by_name })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn record(&self, name: &str) -> Option<&CategoryRecord> {
        self.by_name.get(name)
    }

    /// Ordered, normalized subjects of a category.
    pub fn subjects(&self, name: &str) -> Result<&[String], LookupError> {
        self.by_name
            .get(name)
            .map(CategoryRecord::subjects)
            .ok_or_else(|| LookupError::UnknownCategory(name.to_string()))
    }

    /// Every subject mentioned anywhere in the catalog, sorted.
    pub fn all_subjects(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self
            .by_name
            .values()
            .flat_map(|record| record.languages.iter())
            .collect();
        set.into_iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryRecord)> {
        self.by_name.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Fail on the first name the catalog does not contain.
    pub fn ensure_known<'a, I>(&self, names: I) -> Result<(), LookupError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if !self.contains(name) {
                return Err(LookupError::UnknownCategory(name.to_string()));
            }
        }
        Ok(())
    }
}

fn normalize_record(category: &str, record: CategoryRecord) -> CategoryRecord {
    let mut seen = BTreeSet::new();
    let mut subjects = Vec::with_capacity(record.languages.len());
    for raw in record.languages {
        let subject = normalize_subject(&raw);
        if subject.is_empty() {
            continue;
        }
        if !seen.insert(subject.clone()) {
            warn!(category, subject = %subject, "dropping repeated subject; first position wins");
            continue;
        }
        subjects.push(subject);
    }
    CategoryRecord {
        languages: subjects,
        metadata: record.metadata,
    }
}
