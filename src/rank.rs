//! Rank lookup: where a subject sits inside each category's ordered list.
//!
//! Ranks are 0-based. A subject missing from a category has no rank there and
//! is simply absent from the returned map. An allow-list narrows each category
//! to the listed subjects before positions are counted, which re-ranks the
//! survivors as if everything else had been removed.

use crate::catalog::{Catalog, normalize_subject};
use crate::error::LookupError;
use std::collections::{BTreeMap, BTreeSet};

/// Normalized subjects that may be counted when computing positions.
pub type SubjectSet = BTreeSet<String>;

/// Build an allow-list from raw subject identifiers.
pub fn subject_set<I, S>(subjects: I) -> SubjectSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    subjects
        .into_iter()
        .map(|s| normalize_subject(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Position of `subject` in each of `categories`.
///
/// An empty allow-list is treated the same as no allow-list.
pub fn ranks<I, S>(
    catalog: &Catalog,
    subject: &str,
    categories: I,
    available: Option<&SubjectSet>,
) -> Result<BTreeMap<String, usize>, LookupError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let subject = normalize_subject(subject);
    let available = available.filter(|set| !set.is_empty());
    let mut out = BTreeMap::new();
    for category in categories {
        let category = category.as_ref();
        let listed = catalog.subjects(category)?;
        if let Some(rank) = position_in(listed, &subject, available) {
            out.insert(category.to_string(), rank);
        }
    }
    Ok(out)
}

pub(crate) fn position_in(
    listed: &[String],
    subject: &str,
    available: Option<&SubjectSet>,
) -> Option<usize> {
    listed
        .iter()
        .filter(|s| available.is_none_or(|set| set.contains(s.as_str())))
        .position(|s| s == subject)
}

/// Every category that lists `subject`, strongest association first.
pub fn best_ranks(catalog: &Catalog, subject: &str) -> Vec<(String, usize)> {
    let subject = normalize_subject(subject);
    let mut out: Vec<(String, usize)> = catalog
        .iter()
        .filter_map(|(name, record)| {
            position_in(record.subjects(), &subject, None).map(|rank| (name.to_string(), rank))
        })
        .collect();
    out.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Drop every category that one of `subjects` already dominates.
///
/// A category survives only if each subject is either unranked in it or ranked
/// strictly worse than `rank_floor`. With `rank_floor == 4`, a category is kept
/// only when every subject sits at position 5 or later. Input order of
/// `categories` is preserved.
pub fn filter_good_subjects<I, S>(
    catalog: &Catalog,
    subjects: I,
    rank_floor: usize,
    categories: &[String],
    available: Option<&SubjectSet>,
) -> Result<Vec<String>, LookupError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    catalog.ensure_known(categories.iter().map(String::as_str))?;
    let mut remaining = categories.to_vec();
    for subject in subjects {
        let found = ranks(catalog, subject.as_ref(), &remaining, available)?;
        remaining.retain(|cat| found.get(cat).is_none_or(|&rank| rank > rank_floor));
    }
    Ok(remaining)
}
