//! Category name filters.
//!
//! Filters never look inside category contents; they match on names only and
//! always return a sorted list so repeated queries are reproducible.

use crate::catalog::Catalog;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    StartsWith,
    Contains,
}

/// A name predicate: any-of a set of needles, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFilter {
    kind: MatchKind,
    needles: Vec<String>,
    invert: bool,
}

impl CategoryFilter {
    pub fn starts_with_any<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MatchKind::StartsWith, needles)
    }

    pub fn contains_any<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MatchKind::Contains, needles)
    }

    fn new<I, S>(kind: MatchKind, needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // An empty needle would match every name; it never counts as a hit.
        let needles = needles
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| !n.is_empty())
            .collect();
        Self {
            kind,
            needles,
            invert: false,
        }
    }

    /// Keep the names that do *not* match instead.
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn matches(&self, category: &str) -> bool {
        let hit = self.needles.iter().any(|needle| match self.kind {
            MatchKind::StartsWith => category.starts_with(needle.as_str()),
            MatchKind::Contains => category.contains(needle.as_str()),
        });
        hit != self.invert
    }

    /// Apply to `candidates`, or to every catalog category when `None`.
    pub fn apply(&self, catalog: &Catalog, candidates: Option<&[String]>) -> Vec<String> {
        filter_categories(catalog, |cat| self.matches(cat), candidates)
    }
}

/// Sorted names from `candidates` (default: the whole catalog) that satisfy
/// `predicate`.
pub fn filter_categories<F>(
    catalog: &Catalog,
    predicate: F,
    candidates: Option<&[String]>,
) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut out: Vec<String> = match candidates {
        Some(list) => list
            .iter()
            .filter(|cat| predicate(cat.as_str()))
            .cloned()
            .collect(),
        None => catalog
            .categories()
            .filter(|cat| predicate(*cat))
            .map(str::to_string)
            .collect(),
    };
    out.sort();
    out
}

pub fn cat_starts_with(
    catalog: &Catalog,
    needles: &[&str],
    candidates: Option<&[String]>,
    invert: bool,
) -> Vec<String> {
    CategoryFilter::starts_with_any(needles.iter().copied())
        .inverted(invert)
        .apply(catalog, candidates)
}

pub fn cat_includes(
    catalog: &Catalog,
    needles: &[&str],
    candidates: Option<&[String]>,
    invert: bool,
) -> Vec<String> {
    CategoryFilter::contains_any(needles.iter().copied())
        .inverted(invert)
        .apply(catalog, candidates)
}
