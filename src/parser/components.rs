//! Extractors for BCL (Bootstrap Component Library) widgets.
//!
//! A component is recognized by one class token on the element itself. The
//! first matching entry of [`COMPONENTS`] wins, and the whole element is
//! consumed by its extractor whether or not a block comes out of it.

use dom_query::Selection;
use tracing::warn;

use crate::block::{Accordion, AccordionItem, Alert, Banner, Block, Card, Date, File, Listing};
use crate::dom;
use crate::error::{Error, Result};
use crate::patterns::{LANGUAGE_LABEL, SIZE_FORMAT};
use crate::Options;

use super::links::{extract_link, extract_links, link_from_anchor};
use super::state::ParseState;
use super::walk::{parse_children, Extractor};

/// Component class tokens and their extractors, most specific first.
pub static COMPONENTS: [(&str, Extractor); 7] = [
    ("bcl-file", file),
    ("accordion", accordion),
    ("bcl-content-banner", banner),
    ("bcl-listing", listing),
    ("bcl-date-block", date_block),
    ("listing-item", card),
    ("alert", alert),
];

/// First component whose class token the element carries.
#[must_use]
pub fn match_component(element: &Selection) -> Option<(&'static str, Extractor)> {
    let classes = dom::classes(element);
    if classes.is_empty() {
        return None;
    }
    COMPONENTS
        .iter()
        .find(|(class, _)| classes.iter().any(|c| c == class))
        .copied()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn first_image_src(el: &Selection) -> Option<String> {
    dom::find_tag(el, "img").and_then(|img| dom::non_empty_attribute(&img, "src"))
}

/// `.bcl-file` download card.
///
/// ```html
/// <div class="bcl-file" data-ema-document-type="guideline">
///   <p class="file-title">Guideline</p>
///   <small class="reference-number"><span class="value">EMA/123</span></small>
///   <p class="language-meta">English (EN) (310.46 KB - PDF)</p>
///   <small class="first-published"><time datetime="2024-01-05T10:00:00Z">05/01/2024</time></small>
///   <a href="/doc.pdf">View</a>
/// </div>
/// ```
pub fn file(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let mut block = File {
        document_type: dom::non_empty_attribute(el, "data-ema-document-type"),
        ..File::default()
    };

    if let Some(title) = dom::find_class(el, "file-title") {
        block.title = dom::text(&title);
    }

    block.reference_number = dom::find_first(el, |e| dom::has_class_containing(e, "reference-number"))
        .and_then(|reference| dom::find_class(&reference, "value"))
        .and_then(|value| non_empty(dom::text(&value)));

    if let Some(meta) = dom::find_class(el, "language-meta") {
        let text = dom::text(&meta);
        block.language = parse_language(&text);
        match parse_size_format(&text) {
            Ok(Some((size, format))) => {
                block.file_size = Some(size);
                block.file_format = Some(format);
            }
            Ok(None) => {}
            Err(err) => warn!(
                title = %block.title,
                language_meta = %text,
                error = %err,
                "ignoring file size/format"
            ),
        }
    }

    block.first_published = published_date(el, "first-published");
    block.last_updated = published_date(el, "last-updated");

    if let Some(anchor) = dom::find_anchor(el) {
        block.url = dom::non_empty_attribute(&anchor, "href");
        if let Some(mut link) = link_from_anchor(&anchor) {
            if !block.title.is_empty() {
                link.text.clone_from(&block.title);
            }
            state.push_link(link);
        }
    }

    if block.title.is_empty() && block.url.is_none() {
        return Ok(None);
    }

    Ok(Some(Block::File(block)))
}

/// Language label at the start of `language-meta`, country code included.
fn parse_language(text: &str) -> Option<String> {
    LANGUAGE_LABEL
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str().trim().to_string()))
}

/// `(size - format)` group of `language-meta`.
///
/// `Ok(None)` when there is no such group; `Err` when the group is present
/// but one side of the dash is blank.
fn parse_size_format(text: &str) -> Result<Option<(String, String)>> {
    let Some(caps) = SIZE_FORMAT.captures(text) else {
        return Ok(None);
    };

    let size = caps.get(1).map_or("", |m| m.as_str().trim());
    let format = caps.get(2).map_or("", |m| m.as_str().trim());
    if size.is_empty() || format.is_empty() {
        return Err(Error::MalformedComponent {
            component: "file",
            reason: format!("incomplete size/format group in '{text}'"),
        });
    }

    Ok(Some((size.to_string(), format.to_string())))
}

/// Date from a `first-published` / `last-updated` container.
///
/// Prefers the nested `time` element's `datetime` (cut to `YYYY-MM-DD`),
/// then that element's text.
fn published_date(el: &Selection, class_fragment: &str) -> Option<String> {
    let container = dom::find_first(el, |e| dom::has_class_containing(e, class_fragment))?;
    let time = dom::find_tag(&container, "time")?;

    match dom::non_empty_attribute(&time, "datetime") {
        Some(datetime) => Some(datetime.chars().take(10).collect()),
        None => non_empty(dom::text(&time)),
    }
}

/// `.accordion`.
///
/// Every `.accordion-item` below the element becomes one item, nested
/// accordions included. Item bodies are parsed recursively.
pub fn accordion(el: &Selection, state: &mut ParseState, opts: &Options) -> Result<Option<Block>> {
    let mut items = Vec::new();

    for item_el in dom::find_all(el, |e| dom::has_class(e, "accordion-item")) {
        let title = dom::find_class(&item_el, "accordion-header")
            .map(|header| match dom::find_tag(&header, "button") {
                Some(button) => dom::text(&button),
                None => dom::text(&header),
            })
            .unwrap_or_default();

        let content = match dom::find_class(&item_el, "accordion-body") {
            Some(body) => parse_children(&body, state, opts).unwrap_or_else(|err| {
                warn!(title = %title, error = %err, "dropping accordion item body");
                Vec::new()
            }),
            None => Vec::new(),
        };

        if !title.is_empty() || !content.is_empty() {
            items.push(AccordionItem { title, content });
        }
    }

    if items.is_empty() {
        return Ok(None);
    }

    Ok(Some(Block::Accordion(Accordion { items })))
}

/// `.bcl-content-banner` hero.
pub fn banner(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let mut block = Banner::default();

    if let Some(title) = dom::find_class(el, "content-banner-title").or_else(|| dom::find_tag(el, "h1")) {
        block.title = dom::text(&title);
        extract_links(&title, state);
    }

    if let Some(summary) = dom::find_class(el, "content").or_else(|| dom::find_class(el, "card-text")) {
        block.summary = non_empty(dom::text(&summary));
        extract_links(&summary, state);
    }

    block.image_url = first_image_src(el);

    if let Some(anchor) = dom::find_anchor(el) {
        block.link_url = dom::non_empty_attribute(&anchor, "href");
        extract_link(&anchor, state);
    }

    if block.title.is_empty() {
        return Ok(None);
    }

    Ok(Some(Block::Banner(block)))
}

/// `.bcl-date-block`. The `datetime` attribute is kept verbatim.
pub fn date_block(el: &Selection, _state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let date = dom::get_attribute(el, "datetime").unwrap_or_default();
    let display_text = non_empty(dom::text(el));

    if date.is_empty() && display_text.is_none() {
        return Ok(None);
    }

    Ok(Some(Block::Date(Date { date, display_text })))
}

/// `.listing-item` / `.card`.
pub fn card(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    Ok(extract_card(el, state).map(Block::Card))
}

fn extract_card(el: &Selection, state: &mut ParseState) -> Option<Card> {
    let mut card = Card::default();

    if let Some(title) = dom::find_class(el, "card-title").or_else(|| dom::find_class(el, "teaser-title")) {
        card.title = dom::text(&title);
        if let Some(anchor) = dom::find_anchor(&title) {
            card.link_url = dom::non_empty_attribute(&anchor, "href");
            extract_link(&anchor, state);
        }
    }

    if let Some(text) = dom::find_class(el, "card-text") {
        card.text = non_empty(dom::text(&text));
        extract_links(&text, state);
    }

    card.image_url = first_image_src(el);

    let metadata: Vec<String> = dom::find_all(el, |e| dom::has_class(e, "metadata-item"))
        .iter()
        .map(dom::text)
        .filter(|text| !text.is_empty())
        .collect();
    if !metadata.is_empty() {
        card.metadata = Some(metadata);
    }

    if card.title.is_empty() {
        return None;
    }

    Some(card)
}

/// `.bcl-listing` grid.
///
/// The variant comes from the `bcl-listing--*` class. Every descendant
/// classed `*listing-item*` or `card` is read as a card.
pub fn listing(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let variant = dom::classes(el)
        .iter()
        .find_map(|class| class.strip_prefix("bcl-listing--").map(str::to_string));

    let mut items = Vec::new();
    let candidates = dom::find_all(el, |e| {
        dom::classes(e)
            .iter()
            .any(|class| class.contains("listing-item") || class == "card")
    });
    for item_el in candidates {
        if let Some(card) = extract_card(&item_el, state) {
            items.push(card);
        }
        state.mark_visited(&item_el);
    }

    if items.is_empty() {
        return Ok(None);
    }

    Ok(Some(Block::Listing(Listing { variant, items })))
}

/// `.alert` notification.
pub fn alert(el: &Selection, state: &mut ParseState, _opts: &Options) -> Result<Option<Block>> {
    let variant = dom::classes(el).iter().find_map(|class| {
        if class == "alert-dismissible" {
            return None;
        }
        class.strip_prefix("alert-").map(str::to_string)
    });

    let content = dom::find_class(el, "notification--content").unwrap_or_else(|| el.clone());
    let message = dom::text(&content);
    extract_links(&content, state);

    if message.is_empty() {
        return Ok(None);
    }

    Ok(Some(Block::Alert(Alert { variant, message })))
}
