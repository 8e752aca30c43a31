//! Typed failures for catalog queries.
//!
//! Loading a catalog from disk reports through `anyhow`; the query layer
//! returns these enums so callers can match on the failure and recover
//! without reloading the catalog.

use thiserror::Error;

/// A category name that the catalog does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Failures while aggregating ranks into z-scores.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// More than one spec name is contained in a single catalog category.
    #[error("category '{category}' matches more than one spec: {specs:?}")]
    AmbiguousSpec {
        category: String,
        specs: Vec<String>,
    },

    /// No category matched any spec, so there is nothing to normalize.
    #[error("no subjects were scored; no category matched the given specs")]
    EmptyPopulation,

    /// Every subject ended with the same total; the standard deviation is zero.
    #[error("all {count} subjects share the aggregate total {total}; z-scores are undefined")]
    ZeroVariance { total: i64, count: usize },
}

/// Failures while turning raw selections into category specs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("search '{0}' matched no categories")]
    NoMatches(String),

    #[error("search '{search}' matched {count} categories (limit {limit}); be more specific")]
    TooManyMatches {
        search: String,
        count: usize,
        limit: usize,
    },

    #[error("search '{search}' matched several categories, pick one or more: {candidates:?}")]
    Ambiguous {
        search: String,
        candidates: Vec<String>,
    },

    #[error("bad index expression '{0}'")]
    BadIndex(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
