//! Command-line front end over the ranking library.
//!
//! Every subcommand loads the catalog (`--catalog`, `RANKCOVER_CATALOG`, or
//! `./languages.json`), runs one query, and prints the result as JSON on
//! stdout. Diagnostics go to stderr through `tracing`; set `RANKCOVER_LOG`
//! (for example `RANKCOVER_LOG=debug`) to see sweep details.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rankcover::{
    Catalog, CategoryFilter, CategorySpec, CoverOptions, DerivedViews, RawSelection,
    ScoreOptions, best_ranks, compute_scores_with, cover_solutions_with, filter_good_subjects,
    ranks, resolve_catalog_path, resolve_named, resolve_query, split_commas, subject_set,
};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, stdin};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RANKCOVER_LOG";

#[derive(Parser, Debug)]
#[command(name = "rankcover")]
#[command(about = "Score and cover subjects against a catalog of ranked categories")]
struct Cli {
    /// Catalog document; defaults to $RANKCOVER_CATALOG, then ./languages.json.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List category names matching substring/prefix filters.
    Categories {
        #[arg(long)]
        contains: Vec<String>,
        #[arg(long = "starts-with")]
        starts_with: Vec<String>,
        /// Keep the names that do not match.
        #[arg(long)]
        invert: bool,
    },
    /// Rank of one subject in the given categories (all when omitted).
    Ranks {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        category: Vec<String>,
        /// Comma-separated allow-list used to re-rank.
        #[arg(long)]
        within: Option<String>,
    },
    /// Every category listing the subject, strongest first.
    BestRanks {
        #[arg(long)]
        subject: String,
    },
    /// Z-score league table over the chosen categories.
    Score {
        /// Category scored normally (earlier is better).
        #[arg(long)]
        category: Vec<String>,
        /// Category scored inverted (earlier is worse).
        #[arg(long)]
        invert: Vec<String>,
        /// JSON array of selections to resolve; `-` reads stdin.
        #[arg(long)]
        selections: Option<PathBuf>,
        #[arg(long, default_value_t = rankcover::score::DEFAULT_LIST_LEN)]
        list_len: i64,
    },
    /// Greedy covers of the target categories by the given subjects.
    Cover {
        /// Comma-separated candidate subjects, in tie-break order.
        #[arg(long)]
        subjects: String,
        #[arg(long, required = true)]
        category: Vec<String>,
        #[arg(long, default_value_t = rankcover::cover::DEFAULT_MAX_CUTOFF)]
        max_cutoff: usize,
    },
    /// Categories not dominated by any of the given subjects.
    FilterGood {
        #[arg(long)]
        subjects: String,
        #[arg(long)]
        rank_floor: usize,
        #[arg(long, required = true)]
        category: Vec<String>,
        #[arg(long)]
        within: Option<String>,
    },
    /// Derived subject and category groupings.
    Views,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("rankcover: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let catalog_path = resolve_catalog_path(cli.catalog);
    let catalog = Catalog::load(&catalog_path)?;

    match cli.command {
        Command::Categories {
            contains,
            starts_with,
            invert,
        } => {
            let names = filter_names(&catalog, contains, starts_with, invert);
            emit(&names)
        }
        Command::Ranks {
            subject,
            category,
            within,
        } => {
            let categories: Vec<String> = if category.is_empty() {
                catalog.categories().map(str::to_string).collect()
            } else {
                category
            };
            let allowed = within.as_deref().map(|raw| subject_set(split_commas(raw)));
            let found = ranks(&catalog, &subject, &categories, allowed.as_ref())?;
            emit(&found)
        }
        Command::BestRanks { subject } => emit(&best_ranks(&catalog, &subject)),
        Command::Score {
            category,
            invert,
            selections,
            list_len,
        } => {
            let specs = score_specs(&catalog, category, invert, selections)?;
            if specs.is_empty() {
                bail!("no categories chosen; pass --category, --invert, or --selections");
            }
            let table = compute_scores_with(&catalog, &specs, &ScoreOptions { list_len })?;
            emit(&table)
        }
        Command::Cover {
            subjects,
            category,
            max_cutoff,
        } => {
            let subjects = split_commas(&subjects);
            let report =
                cover_solutions_with(&catalog, &subjects, &category, &CoverOptions { max_cutoff })?;
            emit(&report.ranked())
        }
        Command::FilterGood {
            subjects,
            rank_floor,
            category,
            within,
        } => {
            let allowed = within.as_deref().map(|raw| subject_set(split_commas(raw)));
            let kept = filter_good_subjects(
                &catalog,
                split_commas(&subjects),
                rank_floor,
                &category,
                allowed.as_ref(),
            )?;
            emit(&kept)
        }
        Command::Views => emit(&DerivedViews::build(&catalog)),
    }
}

fn filter_names(
    catalog: &Catalog,
    contains: Vec<String>,
    starts_with: Vec<String>,
    invert: bool,
) -> Vec<String> {
    let mut names: Option<Vec<String>> = None;
    if !starts_with.is_empty() {
        let filter = CategoryFilter::starts_with_any(starts_with).inverted(invert);
        names = Some(filter.apply(catalog, None));
    }
    if !contains.is_empty() {
        let filter = CategoryFilter::contains_any(contains).inverted(invert);
        names = Some(filter.apply(catalog, names.as_deref()));
    }
    names.unwrap_or_else(|| catalog.categories().map(str::to_string).collect())
}

fn score_specs(
    catalog: &Catalog,
    normal: Vec<String>,
    inverted: Vec<String>,
    selections: Option<PathBuf>,
) -> Result<Vec<CategorySpec>> {
    let named: Vec<(String, bool)> = normal
        .into_iter()
        .map(|name| (name, false))
        .chain(inverted.into_iter().map(|name| (name, true)))
        .collect();
    let mut specs = resolve_named(catalog, &named)?;
    if let Some(path) = selections {
        let raw: Vec<RawSelection> = serde_json::from_str(&read_input(&path)?)
            .context("parsing selections; expected a JSON array of {search, indices, invert}")?;
        specs.extend(resolve_query(catalog, &raw)?);
    }
    Ok(specs)
}

fn read_input(path: &Path) -> Result<String> {
    let mut buf = String::new();
    if path.as_os_str() == "-" {
        stdin()
            .read_to_string(&mut buf)
            .context("reading selections from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("opening selections file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading selections file {}", path.display()))?;
    }
    Ok(buf)
}

fn emit<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
