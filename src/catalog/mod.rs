//! Category catalog wiring.
//!
//! This module wraps the category document on disk (for example
//! `languages.json`) so query code can work against a validated, normalized
//! snapshot. `CategoryRecord` mirrors the document shape; callers use
//! `Catalog` for lookups.

pub mod index;
pub mod model;

pub use index::Catalog;
pub use model::{CategoryRecord, load_catalog_from_path, normalize_subject};

/// Default relative path to the catalog document.
pub const DEFAULT_CATALOG_PATH: &str = "languages.json";

/// Environment variable that overrides the catalog location.
pub const ENV_CATALOG_PATH: &str = "RANKCOVER_CATALOG";
