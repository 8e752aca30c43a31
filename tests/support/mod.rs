#![allow(dead_code)]

use anyhow::Result;
use rankcover::Catalog;
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

/// Two-category catalog used by the worked examples.
pub fn speed_safety_json() -> Value {
    json!({
        "speed": {"languages": ["C", "Rust", "Go"]},
        "safety": {"languages": ["rust", "go", "c"]}
    })
}

/// A small catalog shaped like the real languages document.
pub fn languages_json() -> Value {
    json!({
        "github repo rankings": {"languages": ["JavaScript", "Python", "Java", "Go", "C++", "Rust"]},
        "i would use this language for a desktop gui project": {
            "languages": ["C#", "Java", "C++", "Python"]
        },
        "i would use this language for mobile development": {
            "languages": ["Swift", "Java", "C#"]
        },
        "this language is good for beginners": {"languages": ["Python", "Ruby", "Go"]},
        "this language is good for numeric computing": {
            "languages": ["Fortran", "Python", "C++", "Haskell"]
        },
        "this language excels at concurrency": {"languages": ["Erlang", "Go", "Rust", "Haskell"]},
        "this language excels at symbolic manipulation": {
            "languages": ["Common-Lisp", "Haskell", "Scheme"]
        },
        "this language is suitable for real-world projects": {
            "languages": ["Java", "C#", "Python", "Go", "Rust"]
        },
        "this language is minimal": {
            "languages": ["Scheme", "Go", "C", "Lua", "Forth"],
            "votes": 341
        },
        "this language is large": {"languages": ["C++", "Scala", "Common Lisp", "C", "Go"]},
        "code written in this language is very readable": {
            "languages": ["Python", "Ruby", "Go", "Haskell", "none"]
        },
        "this language has a strong static type system": {
            "languages": ["Haskell", "Rust", "Scala", "OCaml", "Java", "Go", "C"]
        },
        "when i write code in this language i can get a lot done": {
            "languages": ["Python", "Ruby", "None", "Go"]
        }
    })
}

pub fn catalog_from(value: &Value) -> Catalog {
    Catalog::from_json_str(&value.to_string()).expect("fixture catalog parses")
}

pub fn speed_safety() -> Catalog {
    catalog_from(&speed_safety_json())
}

pub fn languages() -> Catalog {
    catalog_from(&languages_json())
}

/// Write a catalog document to a temp file that lives as long as the handle.
pub fn write_catalog(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
