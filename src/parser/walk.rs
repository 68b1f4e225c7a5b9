//! The recursive child walk.
//!
//! `parse_children` visits the direct element children of a node in
//! document order and, for each one, either skips it, hands it to a
//! component extractor, dispatches on its tag, or recurses into it.
//! Failures are recovered per child: the child is logged and skipped and
//! the walk moves on to its next sibling.

use dom_query::Selection;
use tracing::warn;

use crate::block::Block;
use crate::dom;
use crate::error::Result;
use crate::Options;

use super::components::match_component;
use super::links::extract_link;
use super::state::ParseState;
use super::structural;
use super::tags::{is_container_tag, is_heading_tag, is_skip_class, is_skip_tag};

/// Signature shared by every block extractor.
pub type Extractor = fn(&Selection, &mut ParseState, &Options) -> Result<Option<Block>>;

/// Parse the children of `element` into blocks.
///
/// Returns `Err` only when `element` itself sits deeper than
/// `Options::max_depth`; anything that goes wrong below it is recovered.
pub fn parse_children(element: &Selection, state: &mut ParseState, opts: &Options) -> Result<Vec<Block>> {
    state.descend(opts.max_depth)?;
    let blocks = walk_children(element, state, opts);
    state.ascend();
    Ok(blocks)
}

/// Check if element should be skipped.
#[must_use]
pub fn should_skip(element: &Selection, state: &ParseState) -> bool {
    if dom::tag_name(element).is_some_and(|tag| is_skip_tag(&tag)) {
        return true;
    }

    if state.is_visited(element) {
        return true;
    }

    dom::classes(element).iter().any(|class| is_skip_class(class))
}

fn walk_children(element: &Selection, state: &mut ParseState, opts: &Options) -> Vec<Block> {
    let mut blocks = Vec::new();

    for child in dom::element_children(element) {
        if should_skip(&child, state) {
            continue;
        }

        // Components first; the table order decides precedence
        if let Some((component, extract)) = match_component(&child) {
            let outcome = extract(&child, state, opts);
            push_outcome(&mut blocks, outcome, &child, component);
            state.mark_visited(&child);
            continue;
        }

        let tag = dom::tag_name(&child).unwrap_or_default();
        match tag.as_str() {
            t if is_heading_tag(t) => {
                let outcome = structural::heading(&child, state, opts);
                push_outcome(&mut blocks, outcome, &child, "heading");
            }
            "p" => {
                let outcome = structural::paragraph(&child, state, opts);
                push_outcome(&mut blocks, outcome, &child, "paragraph");
            }
            "table" => consume(&mut blocks, &child, state, opts, structural::table, "table"),
            "ul" | "ol" => consume(&mut blocks, &child, state, opts, structural::list, "list"),
            "dl" => consume(
                &mut blocks,
                &child,
                state,
                opts,
                structural::description_list,
                "description_list",
            ),
            "blockquote" => consume(&mut blocks, &child, state, opts, structural::blockquote, "blockquote"),
            "a" => extract_link(&child, state),
            t if is_container_tag(t) => recurse(&mut blocks, &child, state, opts),
            _ => {
                warn!(
                    tag = %tag,
                    parent = ?dom::tag_name(element),
                    "unknown tag during structural dispatch; recursing"
                );
                recurse(&mut blocks, &child, state, opts);
            }
        }
    }

    blocks
}

/// Run an extractor whose element is consumed whole, then mark it visited.
fn consume(
    blocks: &mut Vec<Block>,
    child: &Selection,
    state: &mut ParseState,
    opts: &Options,
    extract: Extractor,
    what: &'static str,
) {
    let outcome = extract(child, state, opts);
    push_outcome(blocks, outcome, child, what);
    state.mark_visited(child);
}

fn recurse(blocks: &mut Vec<Block>, child: &Selection, state: &mut ParseState, opts: &Options) {
    match parse_children(child, state, opts) {
        Ok(nested) => blocks.extend(nested),
        Err(err) => warn!(
            tag = ?dom::tag_name(child),
            class = ?dom::get_attribute(child, "class"),
            error = %err,
            "skipping subtree"
        ),
    }
}

fn push_outcome(blocks: &mut Vec<Block>, outcome: Result<Option<Block>>, child: &Selection, what: &'static str) {
    match outcome {
        Ok(Some(block)) => blocks.push(block),
        Ok(None) => {}
        Err(err) => warn!(
            extractor = what,
            tag = ?dom::tag_name(child),
            class = ?dom::get_attribute(child, "class"),
            error = %err,
            "extraction failed; skipping element"
        ),
    }
}
