//! Per-run parser state.
//!
//! `ParseState` owns everything that lives for exactly one `parse()` call:
//! the set of DOM nodes already consumed by an extractor, the link list,
//! and the current recursion depth. A fresh state is created for every call,
//! so nothing leaks from one page to the next.

use std::collections::HashSet;

use dom_query::{NodeId, Selection};

use crate::block::Link;
use crate::dom;
use crate::error::{Error, Result};

/// Tracks consumed nodes, collected links and walk depth for one parser run.
#[derive(Debug, Default)]
pub struct ParseState {
    /// Nodes consumed by an extractor; never emitted again by the walk.
    visited: HashSet<NodeId>,

    /// Links in document order, duplicates included.
    links: Vec<Link>,

    /// Current `parse_children` nesting.
    depth: usize,
}

impl ParseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an element and all of its descendant elements as consumed.
    pub fn mark_visited(&mut self, element: &Selection) {
        self.visited.extend(dom::subtree_ids(element));
    }

    /// Check whether an element has been consumed.
    #[must_use]
    pub fn is_visited(&self, element: &Selection) -> bool {
        dom::node_id(element).is_some_and(|id| self.visited.contains(&id))
    }

    /// Number of consumed nodes.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn push_link(&mut self, link: Link) {
        self.links.push(link);
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Consume the state, keeping only the collected links.
    #[must_use]
    pub fn into_links(self) -> Vec<Link> {
        self.links
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter one level of nesting, failing once `max` levels are open.
    pub fn descend(&mut self, max: usize) -> Result<()> {
        if self.depth >= max {
            return Err(Error::DepthLimitExceeded {
                depth: self.depth + 1,
                max,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level of nesting.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_visited_covers_subtree() {
        let doc = dom::parse(r#"<div id="outer"><p id="inner"><b>x</b></p></div><p id="other">y</p>"#);
        let mut state = ParseState::new();

        state.mark_visited(&doc.select("#outer"));

        assert!(state.is_visited(&doc.select("#outer")));
        assert!(state.is_visited(&doc.select("#inner")));
        assert!(state.is_visited(&doc.select("b")));
        assert!(!state.is_visited(&doc.select("#other")));
        assert_eq!(state.visited_count(), 3);
    }

    #[test]
    fn test_empty_selection_is_never_visited() {
        let doc = dom::parse("<p>x</p>");
        let state = ParseState::new();
        assert!(!state.is_visited(&doc.select("span")));
    }

    #[test]
    fn test_links_keep_order_and_duplicates() {
        let mut state = ParseState::new();
        for href in ["/a", "/b", "/a"] {
            state.push_link(Link {
                text: href.to_string(),
                href: href.to_string(),
            });
        }
        let hrefs: Vec<&str> = state.links().iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/a", "/b", "/a"]);
        assert_eq!(state.into_links().len(), 3);
    }

    #[test]
    fn test_depth_limit() {
        let mut state = ParseState::new();
        assert!(state.descend(2).is_ok());
        assert!(state.descend(2).is_ok());
        let err = state.descend(2).unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { depth: 3, max: 2 }));

        state.ascend();
        assert_eq!(state.depth(), 1);
        assert!(state.descend(2).is_ok());
    }
}
