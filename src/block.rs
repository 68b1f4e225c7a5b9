//! Block tree types produced by the parser.
//!
//! A page is turned into an ordered list of [`Block`]s plus a flat list of
//! outbound [`Link`]s. Blocks are plain values: they carry no reference back
//! to the DOM and are never mutated once the parser hands them out.
//!
//! Every type serializes to the JSON shape consumed downstream: blocks are
//! records with a `"type"` discriminator, optional fields become `null`, and
//! nested blocks follow the same shape recursively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One typed unit of extracted page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    Table(Table),
    File(File),
    DescriptionList(DescriptionList),
    Blockquote(Blockquote),
    Banner(Banner),
    Date(Date),
    Card(Card),
    Listing(Listing),
    Alert(Alert),
    Accordion(Accordion),
}

impl Block {
    /// The kind discriminator of this block.
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading(_) => BlockKind::Heading,
            Self::Paragraph(_) => BlockKind::Paragraph,
            Self::List(_) => BlockKind::List,
            Self::Table(_) => BlockKind::Table,
            Self::File(_) => BlockKind::File,
            Self::DescriptionList(_) => BlockKind::DescriptionList,
            Self::Blockquote(_) => BlockKind::Blockquote,
            Self::Banner(_) => BlockKind::Banner,
            Self::Date(_) => BlockKind::Date,
            Self::Card(_) => BlockKind::Card,
            Self::Listing(_) => BlockKind::Listing,
            Self::Alert(_) => BlockKind::Alert,
            Self::Accordion(_) => BlockKind::Accordion,
        }
    }
}

/// `h1`-`h6`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heading {
    /// 1 through 6.
    pub level: u8,
    pub text: String,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            level: 1,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    pub text: String,
}

/// `ul` / `ol`, flattened to item texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A `.bcl-file` download card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub title: String,
    pub reference_number: Option<String>,
    /// From the `data-ema-document-type` attribute.
    pub document_type: Option<String>,
    /// e.g. `English (EN)`.
    pub language: Option<String>,
    /// e.g. `310.46 KB`.
    pub file_size: Option<String>,
    /// e.g. `PDF`.
    pub file_format: Option<String>,
    /// `YYYY-MM-DD` when taken from a `datetime` attribute.
    pub first_published: Option<String>,
    pub last_updated: Option<String>,
    pub url: Option<String>,
}

/// `dl`, as `(term, description)` pairs. Serialized as two-element arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionList {
    pub items: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blockquote {
    pub content: Vec<Block>,
}

/// A `.bcl-content-banner` hero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub title: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
}

/// A `.bcl-date-block`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Date {
    /// The `datetime` attribute verbatim, or empty.
    pub date: String,
    /// Rendered text, e.g. `08 Jan 2026`.
    pub display_text: Option<String>,
}

/// A card or listing item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub title: String,
    pub text: Option<String>,
    pub link_url: Option<String>,
    pub image_url: Option<String>,
    /// Dates, categories and similar `.metadata-item` texts.
    pub metadata: Option<Vec<String>>,
}

/// A `.bcl-listing` grid of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    /// e.g. `highlight-3-col`, taken from the `bcl-listing--*` class.
    pub variant: Option<String>,
    #[serde(with = "card_items")]
    pub items: Vec<Card>,
}

/// An `.alert` notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    /// `info`, `warning`, `danger`, `success`, ...
    pub variant: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accordion {
    pub items: Vec<AccordionItem>,
}

/// One collapsible section of an [`Accordion`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionItem {
    pub title: String,
    pub content: Vec<Block>,
}

/// An outbound link, recorded in document order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// Output of one parser run: `{"blocks": [...], "links": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub blocks: Vec<Block>,
    pub links: Vec<Link>,
}

impl ParseResult {
    /// True when neither blocks nor links were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.links.is_empty()
    }

    /// Compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The `"type"` discriminator of a [`Block`], used for renderer skip-sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    List,
    Table,
    File,
    DescriptionList,
    Blockquote,
    Banner,
    Date,
    Card,
    Listing,
    Alert,
    Accordion,
}

impl BlockKind {
    /// Every kind, in declaration order.
    pub const ALL: [BlockKind; 13] = [
        Self::Heading,
        Self::Paragraph,
        Self::List,
        Self::Table,
        Self::File,
        Self::DescriptionList,
        Self::Blockquote,
        Self::Banner,
        Self::Date,
        Self::Card,
        Self::Listing,
        Self::Alert,
        Self::Accordion,
    ];

    /// The serialized `"type"` string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::List => "list",
            Self::Table => "table",
            Self::File => "file",
            Self::DescriptionList => "description_list",
            Self::Blockquote => "blockquote",
            Self::Banner => "banner",
            Self::Date => "date",
            Self::Card => "card",
            Self::Listing => "listing",
            Self::Alert => "alert",
            Self::Accordion => "accordion",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| Error::UnknownBlockKind(wanted.to_string()))
    }
}

/// Listing items are written as card records that carry `"type": "card"`.
mod card_items {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Card;

    #[derive(serde::Serialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum TaggedRef<'a> {
        Card(&'a Card),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum Tagged {
        Card(Card),
    }

    pub fn serialize<S: Serializer>(items: &[Card], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(items.iter().map(TaggedRef::Card))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Card>, D::Error> {
        let tagged = Vec::<Tagged>::deserialize(deserializer)?;
        Ok(tagged.into_iter().map(|Tagged::Card(card)| card).collect())
    }
}
