//! DOM Operations Adapter
//!
//! Provides the element operations the block walk needs on top of the
//! `dom_query` crate: direct element children in document order, tag and
//! class access, predicate-based descendant search, stable node identities
//! and whitespace-normalized inner text.

pub use dom_query::{Document, NodeId, NodeRef, Selection};

pub use tendril::StrTendril;

use crate::patterns::WHITESPACE;

/// Tags whose text never counts as visible content.
const NON_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Identity ===

/// Stable identity of the first node in the selection.
///
/// Identities are only meaningful within the document the selection came from.
#[inline]
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|node| node.id)
}

// === Tag / Attribute Access ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).as_ref().map(StrTendril::to_string)
}

/// Get an attribute value, treating an empty value as absent.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    get_attribute(sel, name).filter(|value| !value.is_empty())
}

/// Class attribute split into tokens, in attribute order.
#[must_use]
pub fn classes(sel: &Selection) -> Vec<String> {
    sel.attr("class")
        .map(|class| class.split_ascii_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// True when one class token equals `name` exactly.
#[must_use]
pub fn has_class(sel: &Selection, name: &str) -> bool {
    sel.attr("class")
        .is_some_and(|class| class.split_ascii_whitespace().any(|token| token == name))
}

/// True when one class token contains `fragment`.
///
/// `reference-number` matches `reference-number` and `bcl-reference-number--small`.
#[must_use]
pub fn has_class_containing(sel: &Selection, fragment: &str) -> bool {
    sel.attr("class")
        .is_some_and(|class| class.split_ascii_whitespace().any(|token| token.contains(fragment)))
}

/// True when the element's tag is `tag`.
#[must_use]
pub fn is_tag(sel: &Selection, tag: &str) -> bool {
    tag_name(sel).is_some_and(|name| name == tag)
}

// === Tree Navigation ===

/// Direct element children, in document order. Text and comment nodes are skipped.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes()
        .first()
        .map(|node| {
            node.children()
                .into_iter()
                .filter(NodeRef::is_element)
                .map(Selection::from)
                .collect()
        })
        .unwrap_or_default()
}

/// All descendant elements in document (pre-)order, excluding the element itself.
#[must_use]
pub fn descendant_elements<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    let mut out = Vec::new();
    if let Some(node) = sel.nodes().first() {
        collect_elements(node, &mut out);
    }
    out
}

/// Pre-order, using an explicit stack.
fn collect_elements<'a>(node: &NodeRef<'a>, out: &mut Vec<Selection<'a>>) {
    let mut stack: Vec<NodeRef<'a>> = element_nodes_reversed(node);
    while let Some(current) = stack.pop() {
        stack.extend(element_nodes_reversed(&current));
        out.push(Selection::from(current));
    }
}

fn element_nodes_reversed<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut children: Vec<NodeRef<'a>> = node.children().into_iter().filter(NodeRef::is_element).collect();
    children.reverse();
    children
}

/// Node identities of the element and every descendant element.
#[must_use]
pub fn subtree_ids(sel: &Selection) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = node_id(sel).into_iter().collect();
    ids.extend(descendant_elements(sel).iter().filter_map(node_id));
    ids
}

// === Querying ===

/// First descendant element matching the predicate, in document order.
#[must_use]
pub fn find_first<'a, F>(sel: &Selection<'a>, predicate: F) -> Option<Selection<'a>>
where
    F: Fn(&Selection) -> bool,
{
    descendant_elements(sel).into_iter().find(|el| predicate(el))
}

/// Every descendant element matching the predicate, in document order.
#[must_use]
pub fn find_all<'a, F>(sel: &Selection<'a>, predicate: F) -> Vec<Selection<'a>>
where
    F: Fn(&Selection) -> bool,
{
    descendant_elements(sel)
        .into_iter()
        .filter(|el| predicate(el))
        .collect()
}

/// First descendant with the given tag.
#[must_use]
pub fn find_tag<'a>(sel: &Selection<'a>, tag: &str) -> Option<Selection<'a>> {
    find_first(sel, |el| is_tag(el, tag))
}

/// Every descendant with the given tag.
#[must_use]
pub fn find_all_tags<'a>(sel: &Selection<'a>, tag: &str) -> Vec<Selection<'a>> {
    find_all(sel, |el| is_tag(el, tag))
}

/// First descendant carrying the exact class token.
#[must_use]
pub fn find_class<'a>(sel: &Selection<'a>, class: &str) -> Option<Selection<'a>> {
    find_first(sel, |el| has_class(el, class))
}

/// First descendant anchor with a non-empty `href`.
#[must_use]
pub fn find_anchor<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    find_first(sel, |el| is_tag(el, "a") && non_empty_attribute(el, "href").is_some())
}

/// Direct element children with the given tag.
#[must_use]
pub fn child_tags<'a>(sel: &Selection<'a>, tag: &str) -> Vec<Selection<'a>> {
    element_children(sel)
        .into_iter()
        .filter(|el| is_tag(el, tag))
        .collect()
}

/// First element in the document matching a CSS selector.
///
/// Returns `None` for invalid selectors as well as for no match.
#[must_use]
pub fn select_first<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.try_select(selector)
        .and_then(|sel| sel.nodes().first().copied())
        .map(Selection::from)
}

// === Text Content ===

/// Whitespace-normalized inner text.
///
/// Descendant text nodes are trimmed, empty ones dropped, the rest joined
/// with single spaces, and any remaining whitespace run collapsed to one
/// space. Text inside `script`/`style` is not content and is skipped.
#[must_use]
pub fn text(sel: &Selection) -> String {
    let Some(node) = sel.nodes().first() else {
        return String::new();
    };

    let mut pieces: Vec<String> = Vec::new();
    if node.is_text() {
        pieces.push(node.text().trim().to_string());
    } else {
        collect_text(node, &mut pieces);
    }

    let joined = pieces
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    WHITESPACE.replace_all(&joined, " ").trim().to_string()
}

fn collect_text(node: &NodeRef, pieces: &mut Vec<String>) {
    let mut stack: Vec<NodeRef> = node.children().into_iter().rev().collect();
    while let Some(current) = stack.pop() {
        if current.is_text() {
            pieces.push(current.text().trim().to_string());
        } else if current.is_element() {
            let skip = current
                .node_name()
                .is_some_and(|name| NON_TEXT_TAGS.contains(&name.to_ascii_lowercase().as_str()));
            if !skip {
                stack.extend(current.children().into_iter().rev());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_and_attributes() {
        let doc = parse(r#"<div id="main" class="bcl-file  extra" data-x="">content</div>"#);
        let div = doc.select("div");

        assert_eq!(tag_name(&div), Some("div".to_string()));
        assert_eq!(get_attribute(&div, "id"), Some("main".to_string()));
        assert_eq!(get_attribute(&div, "data-x"), Some(String::new()));
        assert_eq!(non_empty_attribute(&div, "data-x"), None);
        assert_eq!(classes(&div), vec!["bcl-file".to_string(), "extra".to_string()]);
    }

    #[test]
    fn test_class_matching_is_token_based() {
        let doc = parse(r#"<small class="bcl-reference-number--small">x</small>"#);
        let small = doc.select("small");

        assert!(!has_class(&small, "reference-number"));
        assert!(has_class_containing(&small, "reference-number"));
        assert!(has_class(&small, "bcl-reference-number--small"));
    }

    #[test]
    fn test_element_children_skip_text() {
        let doc = parse(r#"<div id="root">text <p>1</p> more <!-- c --><span>2</span></div>"#);
        let root = doc.select("#root");

        let kids = element_children(&root);
        assert_eq!(kids.len(), 2);
        assert_eq!(tag_name(&kids[0]), Some("p".to_string()));
        assert_eq!(tag_name(&kids[1]), Some("span".to_string()));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = parse(r#"<div id="root"><p><b>1</b></p><i>2</i></div>"#);
        let root = doc.select("#root");

        let tags: Vec<String> = descendant_elements(&root)
            .iter()
            .filter_map(tag_name)
            .collect();
        assert_eq!(tags, vec!["p", "b", "i"]);
    }

    #[test]
    fn test_subtree_ids_include_root() {
        let doc = parse(r#"<div id="root"><p><b>1</b></p></div>"#);
        let root = doc.select("#root");

        let ids = subtree_ids(&root);
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], node_id(&root).unwrap());
    }

    #[test]
    fn test_find_helpers() {
        let doc = parse(
            r##"<div id="root">
                <a href="#top">skip</a>
                <a>no href</a>
                <p class="card-title">T</p>
                <a href="/doc.pdf">Doc</a>
            </div>"##,
        );
        let root = doc.select("#root");

        assert_eq!(text(&find_class(&root, "card-title").unwrap()), "T");
        assert_eq!(
            get_attribute(&find_anchor(&root).unwrap(), "href"),
            Some("#top".to_string())
        );
        assert_eq!(find_all_tags(&root, "a").len(), 3);
        assert!(find_tag(&root, "table").is_none());
    }

    #[test]
    fn test_text_joins_nodes_with_spaces() {
        let doc = parse(r#"<p>This is a <a href="/x">test link</a> paragraph.</p>"#);
        assert_eq!(text(&doc.select("p")), "This is a test link paragraph.");
    }

    #[test]
    fn test_text_separates_adjacent_elements() {
        let doc = parse(r#"<time><span>08 Jan</span><span>2026</span></time>"#);
        assert_eq!(text(&doc.select("time")), "08 Jan 2026");
    }

    #[test]
    fn test_text_collapses_whitespace() {
        let doc = parse("<p>  lots \n\n of\t\tspace&nbsp; here </p>");
        assert_eq!(text(&doc.select("p")), "lots of space here");
    }

    #[test]
    fn test_text_skips_scripts() {
        let doc = parse(r#"<div><script>var x = 1;</script><p>Visible</p></div>"#);
        assert_eq!(text(&doc.select("div")), "Visible");
    }

    #[test]
    fn test_text_of_empty_selection() {
        let doc = parse("<div>content</div>");
        assert_eq!(text(&doc.select("span")), "");
    }

    #[test]
    fn test_deep_inline_nesting() {
        let depth = 50_000;
        let html = format!("<p>{}deep{}</p>", "<span>".repeat(depth), "</span>".repeat(depth));
        let doc = parse(&html);
        let p = doc.select("p");

        assert_eq!(text(&p), "deep");
        assert_eq!(descendant_elements(&p).len(), depth);
        assert_eq!(subtree_ids(&p).len(), depth + 1);
    }

    #[test]
    fn test_select_first() {
        let doc = parse(r#"<main class="main-content-wrapper"><p>x</p></main>"#);
        assert!(select_first(&doc, "main.main-content-wrapper").is_some());
        assert!(select_first(&doc, "main.other").is_none());
    }
}
