//! Markdown rendering of block trees.
//!
//! `MarkdownConverter` walks a block list in order, drops the kinds in its
//! skip-set, renders the rest and joins the non-empty fragments with a blank
//! line. Only prose-like kinds have a renderer; banners, listings, cards,
//! alerts and dates render to nothing even when they are not skipped.

use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::debug;

use crate::block::{Accordion, Block, BlockKind, Blockquote, DescriptionList, File, Heading, List, Table};
use crate::options::default_skip_types;

/// Separator between rendered blocks.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Whether a kind has a markdown renderer at all.
#[must_use]
pub const fn has_renderer(kind: BlockKind) -> bool {
    matches!(
        kind,
        BlockKind::Heading
            | BlockKind::Paragraph
            | BlockKind::List
            | BlockKind::Table
            | BlockKind::File
            | BlockKind::DescriptionList
            | BlockKind::Blockquote
            | BlockKind::Accordion
    )
}

/// Converts parsed blocks to markdown.
///
/// # Example
///
/// ```rust
/// use rs_bcl_blocks::block::{Block, Heading, Paragraph};
/// use rs_bcl_blocks::MarkdownConverter;
///
/// let blocks = vec![
///     Block::Heading(Heading { level: 2, text: "Scope".into() }),
///     Block::Paragraph(Paragraph { text: "Applies to all products.".into() }),
/// ];
/// let md = MarkdownConverter::default().convert(&blocks);
/// assert_eq!(md, "## Scope\n\nApplies to all products.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownConverter {
    skip_types: BTreeSet<BlockKind>,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new(default_skip_types())
    }
}

impl MarkdownConverter {
    /// Converter that leaves out the given kinds.
    #[must_use]
    pub fn new(skip_types: BTreeSet<BlockKind>) -> Self {
        Self { skip_types }
    }

    #[must_use]
    pub fn skip_types(&self) -> &BTreeSet<BlockKind> {
        &self.skip_types
    }

    /// Render blocks to markdown, `\n\n` between blocks.
    #[must_use]
    pub fn convert(&self, blocks: &[Block]) -> String {
        blocks
            .iter()
            .filter(|block| !self.skip_types.contains(&block.kind()))
            .filter_map(|block| self.render(block))
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }

    /// Render stored JSON blocks.
    ///
    /// Values that are not a known, well-formed block are left out rather
    /// than failing the whole conversion.
    #[must_use]
    pub fn convert_values(&self, values: &[serde_json::Value]) -> String {
        let blocks: Vec<Block> = values
            .iter()
            .filter_map(|value| match Block::deserialize(value) {
                Ok(block) => Some(block),
                Err(err) => {
                    debug!(
                        kind = ?value.get("type"),
                        error = %err,
                        "skipping unrenderable block"
                    );
                    None
                }
            })
            .collect();
        self.convert(&blocks)
    }

    /// Render one block; `None` for kinds without a renderer.
    #[must_use]
    pub fn render(&self, block: &Block) -> Option<String> {
        match block {
            Block::Heading(heading) => Some(render_heading(heading)),
            Block::Paragraph(paragraph) => Some(paragraph.text.clone()),
            Block::List(list) => Some(render_list(list)),
            Block::Table(table) => Some(render_table(table)),
            Block::File(file) => Some(render_file(file)),
            Block::DescriptionList(dl) => Some(render_description_list(dl)),
            Block::Blockquote(quote) => Some(self.render_blockquote(quote)),
            Block::Accordion(accordion) => Some(self.render_accordion(accordion)),
            Block::Banner(_) | Block::Date(_) | Block::Card(_) | Block::Listing(_) | Block::Alert(_) => None,
        }
    }

    fn render_blockquote(&self, quote: &Blockquote) -> String {
        let inner = self.convert(&quote.content);
        if inner.is_empty() {
            return inner;
        }
        inner
            .split('\n')
            .map(|line| format!("> {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_accordion(&self, accordion: &Accordion) -> String {
        let mut parts = Vec::new();
        for item in &accordion.items {
            if !item.title.is_empty() {
                parts.push(format!("### {}", item.title));
            }
            let inner = self.convert(&item.content);
            if !inner.is_empty() {
                parts.push(inner);
            }
        }
        parts.join(BLOCK_SEPARATOR)
    }
}

fn render_heading(heading: &Heading) -> String {
    format!("{} {}", "#".repeat(usize::from(heading.level)), heading.text)
}

fn render_list(list: &List) -> String {
    list.items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if list.ordered {
                format!("{}. {item}", i + 1)
            } else {
                format!("- {item}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_description_list(dl: &DescriptionList) -> String {
    dl.items
        .iter()
        .filter_map(|(term, description)| match (term.is_empty(), description.is_empty()) {
            (false, false) => Some(format!("**{term}:** {description}")),
            (false, true) => Some(format!("**{term}**")),
            (true, false) => Some(description.clone()),
            (true, true) => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Pipe table. The separator row only appears with headers; short data rows
/// are padded to the header width.
fn render_table(table: &Table) -> String {
    if table.headers.is_empty() && table.rows.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    let width = table.headers.len();

    if width > 0 {
        lines.push(table_row(&table.headers));
        lines.push(table_row(&vec!["---".to_string(); width]));
    }

    for row in &table.rows {
        if row.len() < width {
            let mut padded = row.clone();
            padded.resize(width, String::new());
            lines.push(table_row(&padded));
        } else {
            lines.push(table_row(row));
        }
    }

    lines.join("\n")
}

/// Bold (linked) title, then an optional metadata line after a hard break.
fn render_file(file: &File) -> String {
    let title = if file.title.is_empty() { "Untitled" } else { file.title.as_str() };
    let first = match file.url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => format!("**[{title}]({url})**"),
        None => format!("**{title}**"),
    };

    let mut meta = Vec::new();
    if let Some(reference) = file.reference_number.as_deref().filter(|r| !r.is_empty()) {
        meta.push(format!("Reference: {reference}"));
    }

    let info: Vec<&str> = [file.file_format.as_deref(), file.file_size.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    if !info.is_empty() {
        meta.push(info.join(", "));
    }

    if let Some(published) = file.first_published.as_deref().filter(|p| !p.is_empty()) {
        meta.push(format!("Published: {published}"));
    }

    if meta.is_empty() {
        first
    } else {
        format!("{first}  \n{}", meta.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{AccordionItem, Card, Paragraph};

    fn para(text: &str) -> Block {
        Block::Paragraph(Paragraph { text: text.to_string() })
    }

    #[test]
    fn test_heading_levels() {
        let md = MarkdownConverter::default().convert(&[Block::Heading(Heading {
            level: 4,
            text: "Deep".to_string(),
        })]);
        assert_eq!(md, "#### Deep");
    }

    #[test]
    fn test_lists() {
        let converter = MarkdownConverter::default();
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            converter.convert(&[Block::List(List { ordered: true, items: items.clone() })]),
            "1. a\n2. b"
        );
        assert_eq!(
            converter.convert(&[Block::List(List { ordered: false, items })]),
            "- a\n- b"
        );
    }

    #[test]
    fn test_description_list_forms() {
        let dl = Block::DescriptionList(DescriptionList {
            items: vec![
                ("Term".to_string(), "Desc".to_string()),
                ("Only term".to_string(), String::new()),
                (String::new(), "Only desc".to_string()),
                (String::new(), String::new()),
            ],
        });
        assert_eq!(
            MarkdownConverter::default().convert(&[dl]),
            "**Term:** Desc\n**Only term**\nOnly desc"
        );
    }

    #[test]
    fn test_table_pads_short_rows() {
        let table = Block::Table(Table {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["3".to_string()],
            ],
        });
        assert_eq!(
            MarkdownConverter::default().convert(&[table]),
            "| A | B |\n| --- | --- |\n| 1 | 2 |\n| 3 |  |"
        );
    }

    #[test]
    fn test_table_without_headers() {
        let table = Block::Table(Table {
            headers: Vec::new(),
            rows: vec![vec!["x".to_string()]],
        });
        assert_eq!(MarkdownConverter::default().convert(&[table]), "| x |");
    }

    #[test]
    fn test_blockquote_prefixes_every_line() {
        let quote = Block::Blockquote(Blockquote {
            content: vec![para("One"), para("Two")],
        });
        assert_eq!(MarkdownConverter::default().convert(&[quote]), "> One\n> \n> Two");
    }

    #[test]
    fn test_blockquote_of_skipped_content_is_omitted() {
        let quote = Block::Blockquote(Blockquote {
            content: vec![Block::Card(Card {
                title: "Promo".to_string(),
                ..Card::default()
            })],
        });
        assert_eq!(MarkdownConverter::default().convert(&[quote, para("After")]), "After");
    }

    #[test]
    fn test_file_with_metadata() {
        let file = Block::File(File {
            title: "Guideline".to_string(),
            url: Some("/g.pdf".to_string()),
            reference_number: Some("EMA/1".to_string()),
            file_size: Some("1.2 MB".to_string()),
            file_format: Some("PDF".to_string()),
            first_published: Some("2024-01-05".to_string()),
            ..File::default()
        });
        assert_eq!(
            MarkdownConverter::default().convert(&[file]),
            "**[Guideline](/g.pdf)**  \nReference: EMA/1 | PDF, 1.2 MB | Published: 2024-01-05"
        );
    }

    #[test]
    fn test_file_title_only() {
        let file = Block::File(File {
            title: "Plain".to_string(),
            ..File::default()
        });
        assert_eq!(MarkdownConverter::default().convert(&[file]), "**Plain**");
    }

    #[test]
    fn test_accordion() {
        let accordion = Block::Accordion(Accordion {
            items: vec![
                AccordionItem {
                    title: "Q1".to_string(),
                    content: vec![para("A1")],
                },
                AccordionItem {
                    title: String::new(),
                    content: vec![para("Untitled body")],
                },
            ],
        });
        assert_eq!(
            MarkdownConverter::default().convert(&[accordion]),
            "### Q1\n\nA1\n\nUntitled body"
        );
    }

    #[test]
    fn test_default_skip_set_drops_cards() {
        let card = Block::Card(Card {
            title: "News".to_string(),
            ..Card::default()
        });
        assert_eq!(MarkdownConverter::default().convert(&[card]), "");
    }

    #[test]
    fn test_empty_skip_set_still_has_no_card_renderer() {
        let card = Block::Card(Card {
            title: "News".to_string(),
            ..Card::default()
        });
        let converter = MarkdownConverter::new(BTreeSet::new());
        assert_eq!(converter.convert(&[card]), "");
        assert!(!has_renderer(BlockKind::Card));
    }

    #[test]
    fn test_custom_skip_set() {
        let converter = MarkdownConverter::new([BlockKind::Paragraph].into_iter().collect());
        let blocks = vec![
            para("hidden"),
            Block::Heading(Heading {
                level: 1,
                text: "Shown".to_string(),
            }),
        ];
        assert_eq!(converter.convert(&blocks), "# Shown");
    }

    #[test]
    fn test_convert_values_skips_unknown_and_malformed() {
        let values = vec![
            serde_json::json!({"type": "heading", "level": 2, "text": "Kept"}),
            serde_json::json!({"type": "video", "src": "/v.mp4"}),
            serde_json::json!({"type": "list", "items": "not a list"}),
            serde_json::json!({"type": "paragraph", "text": "Also kept"}),
        ];
        assert_eq!(
            MarkdownConverter::default().convert_values(&values),
            "## Kept\n\nAlso kept"
        );
    }
}
