//! Tag and class catalogs that drive structural dispatch.
//!
//! Arrays for iteration, `HashSet`s for lookup.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Tags skipped entirely: no block, no recursion.
pub static SKIP_TAGS: [&str; 8] = [
    "script", "style", "noscript", "svg", "button", "form", "input", "nav",
];

/// Class tokens of navigation widgets skipped entirely.
pub static SKIP_CLASSES: [&str; 3] = ["bcl-inpage-navigation", "breadcrumb", "dropdown-menu"];

/// Heading tags: h1-h6
pub static HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Generic containers the walk recurses into without consuming.
pub static CONTAINER_TAGS: [&str; 8] = [
    "div", "section", "article", "main", "aside", "header", "footer", "span",
];

/// `SKIP_TAGS` as a `HashSet`
pub static SKIP_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SKIP_TAGS.into_iter().collect());

/// `SKIP_CLASSES` as a `HashSet`
pub static SKIP_CLASS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SKIP_CLASSES.into_iter().collect());

/// `CONTAINER_TAGS` as a `HashSet`
pub static CONTAINER_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CONTAINER_TAGS.into_iter().collect());

#[inline]
#[must_use]
pub fn is_skip_tag(tag: &str) -> bool {
    SKIP_TAG_SET.contains(tag)
}

#[inline]
#[must_use]
pub fn is_skip_class(class: &str) -> bool {
    SKIP_CLASS_SET.contains(class)
}

#[inline]
#[must_use]
pub fn is_heading_tag(tag: &str) -> bool {
    HEADING_TAGS.contains(&tag)
}

#[inline]
#[must_use]
pub fn is_container_tag(tag: &str) -> bool {
    CONTAINER_TAG_SET.contains(tag)
}

/// Heading level from the tag name: `h3` -> 3.
#[must_use]
pub fn heading_level(tag: &str) -> Option<u8> {
    if !is_heading_tag(tag) {
        return None;
    }
    tag[1..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_tags() {
        for tag in ["script", "style", "nav", "button", "form"] {
            assert!(is_skip_tag(tag), "{tag} should be skipped");
        }
        assert!(!is_skip_tag("div"));
        assert!(!is_skip_tag("a"));
    }

    #[test]
    fn test_skip_classes() {
        assert!(is_skip_class("breadcrumb"));
        assert!(is_skip_class("bcl-inpage-navigation"));
        assert!(!is_skip_class("breadcrumb-item"));
    }

    #[test]
    fn test_containers() {
        assert!(is_container_tag("section"));
        assert!(is_container_tag("span"));
        assert!(!is_container_tag("p"));
        assert!(!is_container_tag("figure"));
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("p"), None);
    }
}
