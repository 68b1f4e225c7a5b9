//! Configuration options for parsing and markdown rendering.
//!
//! The `Options` struct controls where the parser starts on a full page, how
//! deep it is allowed to recurse, and which block kinds the markdown renderer
//! leaves out.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::block::BlockKind;

/// Selector for the main content region of a BCL page.
pub const DEFAULT_MAIN_CONTENT_SELECTOR: &str = "main.main-content-wrapper";

/// Default recursion limit for the block walk.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Block kinds omitted from markdown by default.
///
/// These are navigational or promotional widgets rather than prose.
pub const DEFAULT_SKIP_TYPES: [BlockKind; 5] = [
    BlockKind::Banner,
    BlockKind::Listing,
    BlockKind::Card,
    BlockKind::Alert,
    BlockKind::Date,
];

/// The default markdown skip-set as an owned set.
#[must_use]
pub fn default_skip_types() -> BTreeSet<BlockKind> {
    DEFAULT_SKIP_TYPES.into_iter().collect()
}

/// Configuration options for the parser and renderer.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings. Missing fields fall back to their defaults when
/// deserializing, so a partial JSON object is a valid configuration.
///
/// # Example
///
/// ```rust
/// use rs_bcl_blocks::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     max_depth: 64,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// CSS selector locating the main content element in a full page.
    ///
    /// Only used by the page-level entry points; `BlockParser::parse` is
    /// given the element directly.
    ///
    /// Default: `"main.main-content-wrapper"`
    pub main_content_selector: String,

    /// Maximum element nesting the walk descends into.
    ///
    /// Subtrees below this depth are dropped with a warning instead of
    /// recursing further.
    ///
    /// Default: `256`
    pub max_depth: usize,

    /// Block kinds left out of markdown output.
    ///
    /// Default: `banner`, `listing`, `card`, `alert`, `date`
    pub skip_types: BTreeSet<BlockKind>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            main_content_selector: DEFAULT_MAIN_CONTENT_SELECTOR.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            skip_types: default_skip_types(),
        }
    }
}

impl Options {
    /// Load options from a JSON object. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let options = Options::default();
        assert_eq!(options.main_content_selector, "main.main-content-wrapper");
        assert_eq!(options.max_depth, 256);
        assert_eq!(options.skip_types.len(), 5);
        assert!(options.skip_types.contains(&BlockKind::Card));
        assert!(!options.skip_types.contains(&BlockKind::Paragraph));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = Options::from_json(r#"{"max_depth": 12}"#).unwrap();
        assert_eq!(options.max_depth, 12);
        assert_eq!(options.main_content_selector, DEFAULT_MAIN_CONTENT_SELECTOR);
        assert_eq!(options.skip_types, default_skip_types());
    }

    #[test]
    fn test_skip_types_from_json() {
        let options = Options::from_json(r#"{"skip_types": ["table", "description_list"]}"#).unwrap();
        assert_eq!(
            options.skip_types,
            [BlockKind::Table, BlockKind::DescriptionList].into_iter().collect()
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Options::from_json(r#"{"skip_types": ["sidebar"]}"#).is_err());
    }
}
