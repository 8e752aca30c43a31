//! Turning user selections into score queries.
//!
//! A selection is a search string, an optional index expression choosing among
//! the categories it matched, and an inversion choice. Resolution is pure: the
//! caller gathers the raw answers however it likes and hands them over here.

use crate::catalog::Catalog;
use crate::error::{LookupError, QueryError};
use crate::filter::cat_includes;
use crate::score::CategorySpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// A search that matches more categories than this must be narrowed first.
pub const MAX_SELECTION_MATCHES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvertChoice {
    #[default]
    Keep,
    Invert,
    /// One flag per chosen category; missing trailing flags mean "keep".
    PerCategory(Vec<bool>),
}

impl InvertChoice {
    fn flag(&self, position: usize) -> bool {
        match self {
            InvertChoice::Keep => false,
            InvertChoice::Invert => true,
            InvertChoice::PerCategory(flags) => flags.get(position).copied().unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSelection {
    pub search: String,
    #[serde(default)]
    pub indices: Option<String>,
    #[serde(default)]
    pub invert: InvertChoice,
}

impl RawSelection {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            indices: None,
            invert: InvertChoice::Keep,
        }
    }

    pub fn pick(mut self, indices: impl Into<String>) -> Self {
        self.indices = Some(indices.into());
        self
    }

    pub fn invert(mut self, invert: InvertChoice) -> Self {
        self.invert = invert;
        self
    }
}

/// Resolve every selection in order and concatenate the resulting specs.
pub fn resolve_query(
    catalog: &Catalog,
    selections: &[RawSelection],
) -> Result<Vec<CategorySpec>, QueryError> {
    let mut specs = Vec::new();
    for selection in selections {
        let candidates = cat_includes(catalog, &[selection.search.as_str()], None, false);
        if candidates.is_empty() {
            return Err(QueryError::NoMatches(selection.search.clone()));
        }
        if candidates.len() > MAX_SELECTION_MATCHES {
            return Err(QueryError::TooManyMatches {
                search: selection.search.clone(),
                count: candidates.len(),
                limit: MAX_SELECTION_MATCHES,
            });
        }

        let chosen = if candidates.len() == 1 {
            IndexPick::List(BTreeSet::from([0]))
        } else {
            match selection.indices.as_deref() {
                Some(raw) => parse_indices(raw)?,
                None => {
                    return Err(QueryError::Ambiguous {
                        search: selection.search.clone(),
                        candidates,
                    });
                }
            }
        };

        // Indices past the candidate list are ignored.
        let picked = candidates
            .into_iter()
            .enumerate()
            .filter(|(i, _)| chosen.contains(*i))
            .map(|(_, name)| name);
        for (position, name) in picked.enumerate() {
            specs.push(CategorySpec::new(name, selection.invert.flag(position)));
        }
    }
    Ok(specs)
}

/// Specs for categories the caller already named exactly.
pub fn resolve_named<S: AsRef<str>>(
    catalog: &Catalog,
    named: &[(S, bool)],
) -> Result<Vec<CategorySpec>, QueryError> {
    named
        .iter()
        .map(|(name, invert)| {
            let name = name.as_ref();
            if catalog.contains(name) {
                Ok(CategorySpec::new(name, *invert))
            } else {
                Err(QueryError::from(LookupError::UnknownCategory(
                    name.to_string(),
                )))
            }
        })
        .collect()
}

/// Candidate positions chosen by an index expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexPick {
    List(BTreeSet<usize>),
    /// Inclusive bounds, never expanded into a list.
    Range(RangeInclusive<usize>),
}

impl IndexPick {
    pub fn contains(&self, index: usize) -> bool {
        match self {
            IndexPick::List(set) => set.contains(&index),
            IndexPick::Range(range) => range.contains(&index),
        }
    }
}

/// Parse `"0, 2, 5"` or an inclusive range `"2..5"`.
pub fn parse_indices(raw: &str) -> Result<IndexPick, QueryError> {
    let bad = || QueryError::BadIndex(raw.to_string());
    if raw.contains("..") {
        let bounds = raw
            .split("..")
            .map(|part| part.trim().parse::<usize>().map_err(|_| bad()))
            .collect::<Result<Vec<_>, _>>()?;
        let [start, end] = bounds.as_slice() else {
            return Err(bad());
        };
        return Ok(IndexPick::Range(*start..=*end));
    }
    raw.split(',')
        .map(|part| part.trim().parse::<usize>().map_err(|_| bad()))
        .collect::<Result<BTreeSet<_>, _>>()
        .map(IndexPick::List)
}

/// The single category whose name contains `needle`.
///
/// An exact name match wins over longer names that merely contain it.
pub fn find_category<'a>(catalog: &'a Catalog, needle: &str) -> Result<&'a str, QueryError> {
    if let Some((name, _)) = catalog.iter().find(|(name, _)| *name == needle) {
        return Ok(name);
    }
    let candidates: Vec<&str> = catalog
        .categories()
        .filter(|name| !needle.is_empty() && name.contains(needle))
        .collect();
    match candidates.as_slice() {
        [] => Err(QueryError::NoMatches(needle.to_string())),
        [only] => Ok(*only),
        many => Err(QueryError::Ambiguous {
            search: needle.to_string(),
            candidates: many.iter().map(|name| name.to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_list_and_range() {
        assert_eq!(
            parse_indices("0, 2,5").unwrap(),
            IndexPick::List(BTreeSet::from([0, 2, 5]))
        );
        assert_eq!(parse_indices("2..5").unwrap(), IndexPick::Range(2..=5));
        assert_eq!(parse_indices(" 3 .. 3").unwrap(), IndexPick::Range(3..=3));
    }

    #[test]
    fn unbounded_range_is_not_materialized() {
        let pick = parse_indices("0..18446744073709551615").unwrap();
        assert_eq!(pick, IndexPick::Range(0..=usize::MAX));
        assert!(pick.contains(0));
        assert!(pick.contains(usize::MAX));
    }

    #[test]
    fn empty_range_picks_nothing() {
        let pick = parse_indices("5..2").unwrap();
        assert!(!pick.contains(2));
        assert!(!pick.contains(5));
    }

    #[test]
    fn malformed_indices_are_rejected() {
        for raw in ["", "a", "1,,2", "1..", "1..2..3", "-1"] {
            assert_eq!(
                parse_indices(raw),
                Err(QueryError::BadIndex(raw.to_string())),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn per_category_flags_default_to_keep() {
        let choice = InvertChoice::PerCategory(vec![true]);
        assert!(choice.flag(0));
        assert!(!choice.flag(1));
    }
}
