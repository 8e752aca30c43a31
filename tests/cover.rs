// Greedy cover sweep: worked example, completeness, and cutoff minimality.
mod support;

use anyhow::Result;
use rankcover::{
    CoverOptions, CoverSolution, CoverStep, SubjectSet, cover_solutions, cover_solutions_with,
    greedy_cover,
};
use std::collections::BTreeSet;

use support::{languages, speed_safety, strings};

fn step(subject: &str, claimed: &[&str]) -> CoverStep {
    CoverStep {
        subject: subject.to_string(),
        claimed: claimed.iter().map(|c| c.to_string()).collect(),
    }
}

fn solution(steps: Vec<CoverStep>) -> CoverSolution {
    CoverSolution { steps }
}

#[test]
fn worked_example_surfaces_each_tradeoff() -> Result<()> {
    let catalog = speed_safety();
    let report = cover_solutions(&catalog, &["c", "rust", "go"], &["speed", "safety"])?;

    let pair = solution(vec![step("c", &["speed"]), step("rust", &["safety"])]);
    let rust_alone = solution(vec![step("rust", &["safety", "speed"])]);
    let c_alone = solution(vec![step("c", &["safety", "speed"])]);

    assert_eq!(report.cutoff_for(&pair), Some(0));
    assert_eq!(report.cutoff_for(&rust_alone), Some(1));
    assert_eq!(report.cutoff_for(&c_alone), Some(2));
    assert_eq!(report.len(), 3);

    // Nothing single-subject is possible at the strictest cutoff.
    assert!(
        report
            .iter()
            .filter(|(_, cutoff)| *cutoff == 0)
            .all(|(solution, _)| solution.len() == 2)
    );

    let ranked = report.ranked();
    let cutoffs: Vec<usize> = ranked.iter().map(|entry| entry.cutoff).collect();
    assert_eq!(cutoffs, [0, 1, 2]);
    Ok(())
}

#[test]
fn every_solution_covers_the_target_exactly_once() -> Result<()> {
    let catalog = languages();
    let targets = strings(&[
        "this language excels at concurrency",
        "this language has a strong static type system",
        "code written in this language is very readable",
        "this language is minimal",
    ]);
    let subjects = strings(&["go", "haskell", "rust", "python", "scheme"]);
    let report = cover_solutions(&catalog, &subjects, &targets)?;
    assert!(!report.is_empty());

    let expected: BTreeSet<&str> = targets.iter().map(String::as_str).collect();
    for (solution, _) in report.iter() {
        assert_eq!(solution.covered(), expected);
        let claimed_total: usize = solution.steps.iter().map(|s| s.claimed.len()).sum();
        assert_eq!(claimed_total, expected.len(), "claims overlap in {solution:?}");
    }
    Ok(())
}

#[test]
fn recorded_cutoff_is_the_smallest_that_produced_the_solution() -> Result<()> {
    let catalog = languages();
    let targets = strings(&[
        "this language excels at concurrency",
        "this language has a strong static type system",
        "this language is large",
    ]);
    let subjects = strings(&["go", "haskell", "rust", "c++", "scala"]);
    let report = cover_solutions(&catalog, &subjects, &targets)?;

    let allowed: SubjectSet = subjects.iter().cloned().collect();
    let target_set: BTreeSet<String> = targets.iter().cloned().collect();
    for (solution, cutoff) in report.iter() {
        let first_hit = (0..=9)
            .find(|&c| {
                greedy_cover(&catalog, &subjects, &allowed, &target_set, c)
                    .ok()
                    .flatten()
                    .as_ref()
                    == Some(solution)
            })
            .expect("solution reproduced by some cutoff");
        assert_eq!(cutoff, first_hit);
    }
    Ok(())
}

#[test]
fn allow_list_reranks_before_claiming() -> Result<()> {
    let catalog = speed_safety();
    // Without c, rust leads both lists and covers everything at cutoff 0.
    let report = cover_solutions(&catalog, &["rust", "go"], &["speed", "safety"])?;
    let rust_alone = solution(vec![step("rust", &["safety", "speed"])]);
    assert_eq!(report.cutoff_for(&rust_alone), Some(0));
    assert_eq!(report.len(), 1);
    Ok(())
}

#[test]
fn unreachable_target_yields_no_solutions() -> Result<()> {
    let catalog = languages();
    let report = cover_solutions(
        &catalog,
        &["rust", "go"],
        &["this language excels at symbolic manipulation"],
    )?;
    assert!(report.is_empty());
    Ok(())
}

#[test]
fn narrower_sweep_only_sees_strict_covers() -> Result<()> {
    let catalog = speed_safety();
    let report = cover_solutions_with(
        &catalog,
        &["c", "rust", "go"],
        &["speed", "safety"],
        &CoverOptions { max_cutoff: 0 },
    )?;
    assert_eq!(report.len(), 1);
    assert!(report.iter().all(|(solution, cutoff)| cutoff == 0 && solution.len() == 2));
    Ok(())
}
