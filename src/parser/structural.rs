//! Extractors for plain structural HTML: headings, paragraphs, lists,
//! tables, description lists and blockquotes.
//!
//! Every extractor returns `Ok(None)` when it finds nothing worth keeping,
//! so no empty block ever reaches the output.

use dom_query::Selection;

use crate::block::{Block, Blockquote, DescriptionList, Heading, List, Paragraph, Table};
use crate::dom;
use crate::error::Result;
use crate::Options;

use super::links::extract_links;
use super::state::ParseState;
use super::tags::heading_level;
use super::walk::parse_children;

/// `h1`-`h6`. Nested links are recorded, not turned into blocks.
pub fn heading(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let text = dom::text(el);
    if text.is_empty() {
        return Ok(None);
    }
    let Some(level) = dom::tag_name(el).as_deref().and_then(heading_level) else {
        return Ok(None);
    };

    extract_links(el, state);
    Ok(Some(Block::Heading(Heading { level, text })))
}

pub fn paragraph(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let text = dom::text(el);
    if text.is_empty() {
        return Ok(None);
    }

    extract_links(el, state);
    Ok(Some(Block::Paragraph(Paragraph { text })))
}

/// `ul` / `ol`. Every `li` below the list counts, nested ones included.
pub fn list(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let mut items = Vec::new();

    for li in dom::find_all_tags(el, "li") {
        let text = dom::text(&li);
        if !text.is_empty() {
            items.push(text);
            extract_links(&li, state);
        }
    }

    if items.is_empty() {
        return Ok(None);
    }

    Ok(Some(Block::List(List {
        ordered: dom::is_tag(el, "ol"),
        items,
    })))
}

/// `table`.
///
/// Headers come from `thead th` cells. Without a `thead`, a leading row made
/// only of `th` cells becomes the header row instead of a data row.
pub fn table(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    if let Some(thead) = dom::find_tag(el, "thead") {
        for th in dom::find_all_tags(&thead, "th") {
            headers.push(dom::text(&th));
            extract_links(&th, state);
        }
    }

    let body = dom::find_tag(el, "tbody").unwrap_or_else(|| el.clone());
    for tr in dom::child_tags(&body, "tr") {
        let cells = dom::find_all(&tr, |cell| dom::is_tag(cell, "td") || dom::is_tag(cell, "th"));

        if headers.is_empty() && cells.iter().all(|cell| dom::is_tag(cell, "th")) {
            for cell in &cells {
                headers.push(dom::text(cell));
                extract_links(cell, state);
            }
            continue;
        }

        let mut row = Vec::with_capacity(cells.len());
        for cell in &cells {
            row.push(dom::text(cell));
            extract_links(cell, state);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    if headers.is_empty() && rows.is_empty() {
        return Ok(None);
    }

    Ok(Some(Block::Table(Table { headers, rows })))
}

/// `dl`, pairing each `dt` with the `dd` that follows it.
///
/// A `dd` without a pending term gets an empty term; a trailing `dt`
/// without a `dd` gets an empty description.
pub fn description_list(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let mut items = Vec::new();
    let mut pending: Option<String> = None;

    for child in dom::element_children(el) {
        match dom::tag_name(&child).as_deref() {
            Some("dt") => {
                pending = Some(dom::text(&child));
                extract_links(&child, state);
            }
            Some("dd") => {
                let description = dom::text(&child);
                extract_links(&child, state);
                items.push((pending.take().unwrap_or_default(), description));
            }
            _ => {}
        }
    }

    if let Some(term) = pending {
        items.push((term, String::new()));
    }

    if items.is_empty() {
        return Ok(None);
    }

    Ok(Some(Block::DescriptionList(DescriptionList { items })))
}

/// `blockquote`, parsed recursively; bare quoted text becomes one paragraph.
pub fn blockquote(el: &Selection, state: &mut ParseState, opts: &Options) -> Result<Option<Block>> {
    let mut content = parse_children(el, state, opts)?;

    if content.is_empty() {
        let text = dom::text(el);
        if !text.is_empty() {
            content.push(Block::Paragraph(Paragraph { text }));
        }
    }

    if content.is_empty() {
        return Ok(None);
    }

    Ok(Some(Block::Blockquote(Blockquote { content })))
}
