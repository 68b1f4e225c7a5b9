//! Outbound link collection.
//!
//! Anchors are recorded as `{text, href}` in document order. In-page
//! fragments (`#...`) and `javascript:` pseudo-links are not followable and
//! are dropped; an anchor without visible text uses its href as text.

use dom_query::Selection;

use crate::block::Link;
use crate::dom;

use super::state::ParseState;

/// True when an href points somewhere worth recording.
#[must_use]
pub fn is_followable(href: &str) -> bool {
    !href.is_empty() && !href.starts_with('#') && !href.starts_with("javascript:")
}

/// Build the link for a single anchor, if it is followable.
#[must_use]
pub fn link_from_anchor(anchor: &Selection) -> Option<Link> {
    let href = dom::get_attribute(anchor, "href")?;
    if !is_followable(&href) {
        return None;
    }

    let mut text = dom::text(anchor);
    if text.is_empty() {
        text.clone_from(&href);
    }
    Some(Link { text, href })
}

/// Record a single anchor.
pub fn extract_link(anchor: &Selection, state: &mut ParseState) {
    if let Some(link) = link_from_anchor(anchor) {
        state.push_link(link);
    }
}

/// Record every anchor below `element`.
pub fn extract_links(element: &Selection, state: &mut ParseState) {
    for anchor in dom::find_all_tags(element, "a") {
        extract_link(&anchor, state);
    }
}
