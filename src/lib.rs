//! # rs-bcl-blocks
//!
//! Structured content extraction for pages built with the Bootstrap
//! Component Library (BCL), the design system behind EMA and other EU
//! agency websites.
//!
//! A page's main content is walked top-down and turned into an ordered list
//! of typed blocks (headings, paragraphs, tables, file downloads, accordions,
//! listings and so on) together with every outbound link found on the way.
//! The blocks serialize to JSON and render to markdown.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_bcl_blocks::{parse_page, Block, MarkdownConverter};
//!
//! let html = r#"<html><body><main class="main-content-wrapper">
//!     <h1>Medicines</h1>
//!     <p>See the <a href="/epar">assessment report</a>.</p>
//! </main></body></html>"#;
//!
//! let result = parse_page(html);
//! assert!(matches!(result.blocks[0], Block::Heading(_)));
//! assert_eq!(result.links[0].href, "/epar");
//!
//! let md = MarkdownConverter::default().convert(&result.blocks);
//! assert_eq!(md, "# Medicines\n\nSee the assessment report.");
//! ```
//!
//! ## Logging
//!
//! Elements that cannot be interpreted are skipped and reported through
//! `tracing`. The library never installs a subscriber.

mod error;
mod options;
mod patterns;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Block types, links and the parse result.
pub mod block;

/// The recursive block parser and BCL component extractors.
pub mod parser;

/// Markdown rendering of blocks.
pub mod markdown;

/// Character encoding detection and transcoding.
pub mod encoding;

use dom_query::{Document, Selection};

// Public API - re-exports
pub use block::{Block, BlockKind, Link, ParseResult};
pub use error::{Error, Result};
pub use markdown::MarkdownConverter;
pub use options::{default_skip_types, Options, DEFAULT_MAIN_CONTENT_SELECTOR, DEFAULT_MAX_DEPTH};
pub use parser::BlockParser;

/// Parse a full HTML page with default options.
///
/// A page without a main content element yields an empty result.
#[must_use]
pub fn parse_page(html: &str) -> ParseResult {
    parse_page_with_options(html, &Options::default())
}

/// Parse a full HTML page, locating the main content with
/// `options.main_content_selector`.
///
/// # Example
///
/// ```rust
/// use rs_bcl_blocks::{parse_page_with_options, Options};
///
/// let html = r#"<article id="body"><h2>Scope</h2></article>"#;
/// let options = Options {
///     main_content_selector: "#body".to_string(),
///     ..Options::default()
/// };
/// assert_eq!(parse_page_with_options(html, &options).blocks.len(), 1);
/// ```
#[must_use]
pub fn parse_page_with_options(html: &str, options: &Options) -> ParseResult {
    let doc = dom::parse(html);
    BlockParser::with_options(options.clone()).parse_document(&doc)
}

/// Parse a page given as raw bytes.
///
/// The charset comes from a byte-order mark or a `<meta>` declaration and
/// defaults to UTF-8; undecodable bytes become U+FFFD.
///
/// ```rust
/// use rs_bcl_blocks::{parse_page_bytes, Block};
///
/// let html = b"<meta charset=\"ISO-8859-1\"><main class=\"main-content-wrapper\"><p>Caf\xE9</p></main>";
/// let result = parse_page_bytes(html);
/// assert!(matches!(&result.blocks[0], Block::Paragraph(p) if p.text == "Café"));
/// ```
#[must_use]
pub fn parse_page_bytes(html: &[u8]) -> ParseResult {
    parse_page(&encoding::transcode_to_utf8(html))
}

/// Parse a page and render it to markdown, leaving out `options.skip_types`.
#[must_use]
pub fn page_to_markdown(html: &str, options: &Options) -> String {
    let result = parse_page_with_options(html, options);
    MarkdownConverter::new(options.skip_types.clone()).convert(&result.blocks)
}

/// First element matching `selector`.
///
/// # Errors
///
/// Returns [`Error::MainContentNotFound`] when nothing matches or the
/// selector does not parse.
pub fn find_main_content<'a>(doc: &'a Document, selector: &str) -> Result<Selection<'a>> {
    dom::select_first(doc, selector).ok_or_else(|| Error::MainContentNotFound(selector.to_string()))
}
