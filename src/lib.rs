pub mod catalog;
pub mod cover;
pub mod error;
pub mod filter;
pub mod query;
pub mod rank;
pub mod score;
pub mod views;

pub use catalog::{
    Catalog, CategoryRecord, DEFAULT_CATALOG_PATH, ENV_CATALOG_PATH, load_catalog_from_path,
    normalize_subject,
};
pub use cover::{
    CoverEntry, CoverOptions, CoverReport, CoverSolution, CoverStep, cover_solutions,
    cover_solutions_with, greedy_cover,
};
pub use error::{LookupError, QueryError, ScoreError};
pub use filter::{CategoryFilter, MatchKind, cat_includes, cat_starts_with, filter_categories};
pub use query::{
    IndexPick, InvertChoice, RawSelection, find_category, parse_indices, resolve_named, resolve_query,
};
pub use rank::{SubjectSet, best_ranks, filter_good_subjects, ranks, subject_set};
pub use score::{
    CategorySpec, ScoreOptions, ScoredSubject, SpecTable, compute_scores, compute_scores_with,
};
pub use views::DerivedViews;

use std::env;
use std::path::PathBuf;

/// Pick the catalog document: explicit path, then `RANKCOVER_CATALOG`, then
/// `languages.json` in the working directory.
pub fn resolve_catalog_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    match env::var(ENV_CATALOG_PATH) {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_CATALOG_PATH),
    }
}

/// Split a comma-separated list, trimming each entry and dropping empties.
///
/// Whitespace is not a separator: subject names such as "common lisp" contain
/// spaces.
pub fn split_commas(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
