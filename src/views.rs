//! Named subject and category groupings derived from a loaded catalog.
//!
//! `DerivedViews` is computed once from a `Catalog` and then only read. Views
//! backed by a single category resolve it by substring; a view whose category
//! is missing or ambiguous is left as `None` and logged rather than failing
//! the whole build.

use crate::catalog::Catalog;
use crate::filter::{cat_includes, cat_starts_with};
use crate::query::find_category;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

const GITHUB_CATEGORY: &str = "github repo rankings";
const SMALL_WINDOW: usize = 18;
const PRACTICAL_EXCLUDES: [&str; 3] = ["beginner", "children", "symbolic"];

const CORPORATE_LANGUAGES: [&str; 5] = ["csharp", "fsharp", "visual basic", "objective c", "swift"];
const LISPS: [&str; 5] = ["scheme", "elisp", "emacs lisp", "clojure", "common lisp"];
const ML_LANGS: [&str; 7] = ["standard ml", "ocaml", "fsharp", "haskell", "scala", "coq", "agda"];
const HARD_LANGS: [&str; 6] = ["c++", "common lisp", "scala", "haskell", "ocaml", "fsharp"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedViews {
    pub all_categories: Vec<String>,
    pub practical_categories: Vec<String>,

    pub github: Option<Vec<String>>,
    pub open_source: Option<Vec<String>>,
    pub minimal: Option<Vec<String>>,
    pub large: Option<Vec<String>>,
    pub small: Vec<String>,
    pub smart_enough: Option<Vec<String>>,
    pub glance: Option<Vec<String>>,
    pub accidental_complexity: Option<Vec<String>>,
    pub semantics: Option<Vec<String>>,
    pub tacked_on: Option<Vec<String>>,
    pub shoot_yourself: Option<Vec<String>>,
    pub readable: Option<Vec<String>>,
    pub looks_like: Option<Vec<String>>,
    pub improved: Option<Vec<String>>,
    pub influence: Option<Vec<String>>,
    pub static_type: Option<Vec<String>>,

    pub corporate_languages: Vec<String>,
    pub lisps: BTreeSet<String>,
    pub ml_langs: BTreeSet<String>,
    pub hard_langs: BTreeSet<String>,
}

impl DerivedViews {
    pub fn build(catalog: &Catalog) -> Self {
        let minimal = view(catalog, "minimal");
        let large = view(catalog, "this language is large");
        let small = small_subjects(minimal.as_deref(), large.as_deref());

        Self {
            all_categories: catalog.categories().map(str::to_string).collect(),
            practical_categories: practical_categories(catalog),
            github: catalog
                .subjects(GITHUB_CATEGORY)
                .map(<[String]>::to_vec)
                .inspect_err(|err| warn!(view = "github", %err, "view unavailable"))
                .ok(),
            open_source: view(catalog, "open source"),
            minimal,
            large,
            small,
            smart_enough: view(catalog, "smart"),
            glance: view(catalog, "glance"),
            accidental_complexity: view(catalog, "complexity"),
            semantics: view(catalog, "semantics"),
            tacked_on: view(catalog, "tacked on"),
            shoot_yourself: view(catalog, "shoot yourself"),
            readable: view(catalog, "readable"),
            looks_like: view(catalog, "looks like"),
            improved: view(catalog, "improve"),
            influence: view(catalog, "influence"),
            static_type: view(catalog, "static"),
            corporate_languages: CORPORATE_LANGUAGES.map(String::from).to_vec(),
            lisps: LISPS.map(String::from).into(),
            ml_langs: ML_LANGS.map(String::from).into(),
            hard_langs: HARD_LANGS.map(String::from).into(),
        }
    }
}

fn view(catalog: &Catalog, needle: &str) -> Option<Vec<String>> {
    let found = find_category(catalog, needle).and_then(|name| {
        catalog
            .subjects(name)
            .map(<[String]>::to_vec)
            .map_err(Into::into)
    });
    match found {
        Ok(subjects) => Some(subjects),
        Err(err) => {
            warn!(view = needle, %err, "view unavailable");
            None
        }
    }
}

/// Categories describing real-world use, minus the teaching and toy ones.
pub fn practical_categories(catalog: &Catalog) -> Vec<String> {
    let would_use = cat_starts_with(catalog, &["i would use"], None, false);
    let good_for = cat_includes(catalog, &["good for"], None, false);
    let good_for = cat_includes(catalog, &["beginner", "children"], Some(good_for.as_slice()), true);
    let excels = cat_includes(catalog, &["excels"], None, false);
    let suitable = cat_includes(catalog, &["suitable for real"], None, false);

    [would_use, good_for, excels, suitable]
        .into_iter()
        .flatten()
        .filter(|cat| !PRACTICAL_EXCLUDES.iter().any(|ex| cat.contains(*ex)))
        .collect()
}

/// Subjects in the head of `minimal` that also sit in the tail of `large`.
pub fn small_subjects(minimal: Option<&[String]>, large: Option<&[String]>) -> Vec<String> {
    let (Some(minimal), Some(large)) = (minimal, large) else {
        return Vec::new();
    };
    let tail = &large[large.len().saturating_sub(SMALL_WINDOW)..];
    minimal
        .iter()
        .take(SMALL_WINDOW)
        .filter(|subject| tail.contains(*subject))
        .cloned()
        .collect()
}
