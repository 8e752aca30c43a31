//! Weighted aggregate scoring.
//!
//! Each catalog category matched by a `CategorySpec` awards every listed
//! subject points by position: `list_len - i` normally, `i + 1` when the spec
//! is inverted. Totals are summed per subject and standardized to z-scores
//! rounded to two decimals.
//!
//! The `"none"` sentinel is removed before the mean and standard deviation are
//! taken, so the returned scores are standardized over exactly the subjects
//! that are returned.

use crate::catalog::{Catalog, normalize_subject};
use crate::error::ScoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Points awarded to rank 0 in a non-inverted category.
pub const DEFAULT_LIST_LEN: i64 = 52;

/// Sentinel subject meaning "nothing applies"; never scored.
pub const NO_SUBJECT: &str = "none";

/// One input axis of a score query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub invert: bool,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, invert: bool) -> Self {
        Self {
            name: name.into(),
            invert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOptions {
    pub list_len: i64,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            list_len: DEFAULT_LIST_LEN,
        }
    }
}

/// A row of the league table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSubject {
    pub subject: String,
    pub total: i64,
    pub score: f64,
}

/// Catalog categories resolved to the single spec that claims each of them.
///
/// Built once per query; a spec claims a category when the lowercased spec
/// name is a substring of the trimmed, lowercased category name.
#[derive(Debug)]
pub struct SpecTable<'a> {
    matches: Vec<(&'a str, &'a CategorySpec)>,
}

impl<'a> SpecTable<'a> {
    pub fn build(catalog: &'a Catalog, specs: &'a [CategorySpec]) -> Result<Self, ScoreError> {
        let mut matches = Vec::new();
        let needles: Vec<String> = specs.iter().map(|spec| spec.name.to_lowercase()).collect();
        for category in catalog.categories() {
            let folded = category.trim().to_lowercase();
            let claimed: Vec<&CategorySpec> = specs
                .iter()
                .zip(&needles)
                .filter(|(_, needle)| folded.contains(needle.as_str()))
                .map(|(spec, _)| spec)
                .collect();
            match claimed.as_slice() {
                [] => {}
                [spec] => matches.push((category, *spec)),
                many => {
                    return Err(ScoreError::AmbiguousSpec {
                        category: category.to_string(),
                        specs: many.iter().map(|spec| spec.name.clone()).collect(),
                    });
                }
            }
        }
        Ok(Self { matches })
    }

    /// Matched `(category, spec)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CategorySpec)> + '_ {
        self.matches.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

pub fn compute_scores(
    catalog: &Catalog,
    specs: &[CategorySpec],
) -> Result<Vec<ScoredSubject>, ScoreError> {
    compute_scores_with(catalog, specs, &ScoreOptions::default())
}

/// League table for `specs`, best score first.
///
/// Ties keep the order in which subjects were first encountered while walking
/// the catalog.
pub fn compute_scores_with(
    catalog: &Catalog,
    specs: &[CategorySpec],
    options: &ScoreOptions,
) -> Result<Vec<ScoredSubject>, ScoreError> {
    let table = SpecTable::build(catalog, specs)?;
    let totals = accumulate(catalog, &table, options.list_len);
    debug!(
        categories = table.len(),
        subjects = totals.len(),
        "accumulated category points"
    );

    let sentinel = normalize_subject(NO_SUBJECT);
    let totals: Vec<(String, i64)> = totals
        .into_iter()
        .filter(|(subject, _)| *subject != sentinel)
        .collect();

    let Some(&(_, first)) = totals.first() else {
        return Err(ScoreError::EmptyPopulation);
    };
    if totals.iter().all(|&(_, total)| total == first) {
        return Err(ScoreError::ZeroVariance {
            total: first,
            count: totals.len(),
        });
    }

    let count = totals.len() as f64;
    let mean = totals.iter().map(|&(_, t)| t as f64).sum::<f64>() / count;
    let variance = totals
        .iter()
        .map(|&(_, t)| {
            let d = t as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / count;
    let stdev = variance.sqrt();

    let mut table: Vec<ScoredSubject> = totals
        .into_iter()
        .map(|(subject, total)| ScoredSubject {
            subject,
            total,
            score: round2((total as f64 - mean) / stdev),
        })
        .collect();
    table.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(table)
}

fn accumulate(catalog: &Catalog, table: &SpecTable<'_>, list_len: i64) -> Vec<(String, i64)> {
    let mut order: Vec<(String, i64)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for (category, spec) in table.iter() {
        let Ok(subjects) = catalog.subjects(category) else {
            continue;
        };
        for (i, subject) in subjects.iter().enumerate() {
            let i = i as i64;
            let points = if spec.invert { i + 1 } else { list_len - i };
            let idx = *slot.entry(subject.as_str()).or_insert_with(|| {
                order.push((subject.clone(), 0));
                order.len() - 1
            });
            order[idx].1 += points;
        }
    }
    order
}

fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Fold -0.0 into 0.0 so it ties with other zero scores.
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"{
                "speed": {"languages": ["c", "rust", "go"]},
                "safety": {"languages": ["rust", "go", "c"]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn positional_points_sum_across_categories() {
        let catalog = catalog();
        let specs = [
            CategorySpec::new("speed", false),
            CategorySpec::new("safety", false),
        ];
        let table = compute_scores(&catalog, &specs).unwrap();
        let totals: Vec<(&str, i64)> = table
            .iter()
            .map(|row| (row.subject.as_str(), row.total))
            .collect();
        assert_eq!(totals, [("rust", 103), ("c", 102), ("go", 101)]);
        assert_eq!(table[0].score, 1.22);
        assert_eq!(table[1].score, 0.0);
        assert_eq!(table[2].score, -1.22);
    }

    #[test]
    fn inverted_category_flips_polarity() {
        let catalog = catalog();
        let specs = [CategorySpec::new("speed", true)];
        let table = compute_scores(&catalog, &specs).unwrap();
        let order: Vec<&str> = table.iter().map(|row| row.subject.as_str()).collect();
        assert_eq!(order, ["go", "rust", "c"]);
        assert_eq!(table[0].total, 3);
    }

    #[test]
    fn ambiguous_spec_is_rejected() {
        let catalog = catalog();
        let specs = [CategorySpec::new("s", false), CategorySpec::new("speed", true)];
        let err = compute_scores(&catalog, &specs).unwrap_err();
        assert!(matches!(err, ScoreError::AmbiguousSpec { ref category, .. } if category == "speed"));
    }

    #[test]
    fn unmatched_specs_yield_empty_population() {
        let catalog = catalog();
        let specs = [CategorySpec::new("elegance", false)];
        assert_eq!(
            compute_scores(&catalog, &specs),
            Err(ScoreError::EmptyPopulation)
        );
    }

    #[test]
    fn equal_totals_fail_instead_of_dividing_by_zero() {
        let catalog = Catalog::from_json_str(
            r#"{"up": {"languages": ["a", "b"]}, "down": {"languages": ["b", "a"]}}"#,
        )
        .unwrap();
        let specs = [CategorySpec::new("up", false), CategorySpec::new("down", false)];
        assert_eq!(
            compute_scores(&catalog, &specs),
            Err(ScoreError::ZeroVariance {
                total: 103,
                count: 2
            })
        );
    }

    #[test]
    fn spec_table_matches_on_folded_category_name() {
        let catalog = Catalog::from_json_str(
            r#"{" Fast Code ": {"languages": ["c"]}, "other": {"languages": ["go"]}}"#,
        )
        .unwrap();
        let specs = [CategorySpec::new("fast", false)];
        let table = SpecTable::build(&catalog, &specs).unwrap();
        let matched: Vec<&str> = table.iter().map(|(cat, _)| cat).collect();
        assert_eq!(matched, [" Fast Code "]);
    }

    #[test]
    fn mixed_case_spec_name_still_claims_its_category() {
        let catalog = Catalog::from_json_str(
            r#"{"Fast Code": {"languages": ["c", "go"]}, "other": {"languages": ["go"]}}"#,
        )
        .unwrap();
        let specs = [CategorySpec::new("Fast Code", false)];
        let table = compute_scores(&catalog, &specs).unwrap();
        let order: Vec<&str> = table.iter().map(|row| row.subject.as_str()).collect();
        assert_eq!(order, ["c", "go"]);
    }

    #[test]
    fn custom_list_len_changes_headroom() {
        let catalog = catalog();
        let specs = [CategorySpec::new("speed", false)];
        let table = compute_scores_with(&catalog, &specs, &ScoreOptions { list_len: 2 }).unwrap();
        let go = table.iter().find(|row| row.subject == "go").unwrap();
        assert_eq!(go.total, 0);
    }
}
