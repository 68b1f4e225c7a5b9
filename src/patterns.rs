//! Compiled regex patterns used by the extractors.
//!
//! All patterns are compiled once on first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Any run of whitespace, collapsed to one space during text normalization.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

/// Leading language label of a file's `language-meta` text.
///
/// `English (EN) (310.46 KB - PDF)` -> `English (EN)`.
/// The optional two-letter country code stays part of the label.
pub static LANGUAGE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^(]+(?:\([A-Z]{2}\))?)").expect("LANGUAGE_LABEL regex"));

/// Parenthesized `(size - format)` group of a file's `language-meta` text.
pub static SIZE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\s*-\s*([^)]+)\)").expect("SIZE_FORMAT regex"));
