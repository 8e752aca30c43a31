//! Greedy category cover search.
//!
//! For each strictness cutoff `c`, subjects are picked one at a time: the
//! winner is the subject that claims the most still-uncovered categories with
//! a rank `<= c`, where ranks are recomputed among the candidate subjects only.
//! Ties go to the earliest subject in the candidate order. A run that stalls
//! before every target category is claimed is discarded.
//!
//! Distinct complete runs are collected into a `CoverReport`, each tagged with
//! the smallest cutoff that produced it.

use crate::catalog::{Catalog, normalize_subject};
use crate::error::LookupError;
use crate::rank::{SubjectSet, ranks};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Loosest cutoff tried by default; the sweep covers `0..=9`.
pub const DEFAULT_MAX_CUTOFF: usize = 9;

/// One pick of a cover run: the subject and the categories it took.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CoverStep {
    pub subject: String,
    pub claimed: BTreeSet<String>,
}

/// Picks in the order the greedy run made them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CoverSolution {
    pub steps: Vec<CoverStep>,
}

impl CoverSolution {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.subject.as_str())
    }

    /// Union of every step's claimed categories.
    pub fn covered(&self) -> BTreeSet<&str> {
        self.steps
            .iter()
            .flat_map(|step| step.claimed.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverOptions {
    pub max_cutoff: usize,
}

impl Default for CoverOptions {
    fn default() -> Self {
        Self {
            max_cutoff: DEFAULT_MAX_CUTOFF,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverEntry {
    pub cutoff: usize,
    pub solution: CoverSolution,
}

/// Distinct complete covers, each with the smallest cutoff that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverReport {
    solutions: BTreeMap<CoverSolution, usize>,
}

impl CoverReport {
    /// Keep `cutoff` unless a smaller one is already recorded.
    pub fn record(&mut self, solution: CoverSolution, cutoff: usize) {
        self.solutions
            .entry(solution)
            .and_modify(|best| *best = (*best).min(cutoff))
            .or_insert(cutoff);
    }

    pub fn cutoff_for(&self, solution: &CoverSolution) -> Option<usize> {
        self.solutions.get(solution).copied()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CoverSolution, usize)> {
        self.solutions.iter().map(|(solution, &cutoff)| (solution, cutoff))
    }

    /// Entries ordered by cutoff, then by number of subjects.
    pub fn ranked(&self) -> Vec<CoverEntry> {
        let mut entries: Vec<CoverEntry> = self
            .iter()
            .map(|(solution, cutoff)| CoverEntry {
                cutoff,
                solution: solution.clone(),
            })
            .collect();
        entries.sort_by(|a, b| {
            a.cutoff
                .cmp(&b.cutoff)
                .then_with(|| a.solution.len().cmp(&b.solution.len()))
                .then_with(|| a.solution.cmp(&b.solution))
        });
        entries
    }

    pub fn into_map(self) -> BTreeMap<CoverSolution, usize> {
        self.solutions
    }
}

pub fn cover_solutions<S, T>(
    catalog: &Catalog,
    all_subjects: &[S],
    targets: &[T],
) -> Result<CoverReport, LookupError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    cover_solutions_with(catalog, all_subjects, targets, &CoverOptions::default())
}

/// Sweep group bounds `1..n` and cutoffs `0..=max_cutoff` over `all_subjects`.
///
/// The group bound does not cap how many subjects a run may pick, so every
/// bound observes the same run for a given cutoff. Runs are computed once per
/// cutoff and replayed across the bound sweep.
pub fn cover_solutions_with<S, T>(
    catalog: &Catalog,
    all_subjects: &[S],
    targets: &[T],
    options: &CoverOptions,
) -> Result<CoverReport, LookupError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let targets: BTreeSet<String> = targets.iter().map(|t| t.as_ref().to_string()).collect();
    catalog.ensure_known(targets.iter().map(String::as_str))?;

    let subjects = dedup_subjects(all_subjects);
    let mut report = CoverReport::default();
    if subjects.len() < 2 {
        return Ok(report);
    }
    let allowed: SubjectSet = subjects.iter().cloned().collect();

    let runs = (0..=options.max_cutoff)
        .map(|cutoff| greedy_cover(catalog, &subjects, &allowed, &targets, cutoff))
        .collect::<Result<Vec<_>, _>>()?;

    for group_bound in 1..subjects.len() {
        for (cutoff, run) in runs.iter().enumerate() {
            match run {
                Some(solution) => {
                    debug!(group_bound, cutoff, picks = solution.len(), "complete cover");
                    report.record(solution.clone(), cutoff);
                }
                None => debug!(group_bound, cutoff, "cover stalled; sweep point dropped"),
            }
        }
    }
    Ok(report)
}

/// One greedy run at a fixed cutoff; `None` when it stalls short of a cover.
pub fn greedy_cover(
    catalog: &Catalog,
    subjects: &[String],
    allowed: &SubjectSet,
    targets: &BTreeSet<String>,
    cutoff: usize,
) -> Result<Option<CoverSolution>, LookupError> {
    let mut remaining = targets.clone();
    let mut steps = Vec::new();
    while !remaining.is_empty() {
        let mut best: Option<CoverStep> = None;
        for subject in subjects {
            let found = ranks(catalog, subject, &remaining, Some(allowed))?;
            let claimed: BTreeSet<String> = found
                .into_iter()
                .filter(|&(_, rank)| rank <= cutoff)
                .map(|(cat, _)| cat)
                .collect();
            let leader = best.as_ref().map_or(0, |step| step.claimed.len());
            if claimed.len() > leader {
                best = Some(CoverStep {
                    subject: subject.clone(),
                    claimed,
                });
            }
        }
        let Some(step) = best else {
            return Ok(None);
        };
        remaining.retain(|cat| !step.claimed.contains(cat));
        steps.push(step);
    }
    Ok(Some(CoverSolution { steps }))
}

fn dedup_subjects<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.iter()
        .map(|s| normalize_subject(s.as_ref()))
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}
