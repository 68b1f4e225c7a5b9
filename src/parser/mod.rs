//! Block parser.
//!
//! Walks the main content element of a page top-down and turns it into an
//! ordered list of typed blocks plus the outbound links found along the way.
//!
//! # Module Structure
//!
//! - `tags`: skip-lists, heading and container tag catalogs
//! - `state`: per-run state (visited nodes, links, depth)
//! - `walk`: the recursive child walk and structural dispatch
//! - `structural`: heading/paragraph/list/table/dl/blockquote extractors
//! - `components`: BCL component table and extractors
//! - `links`: anchor filtering and link recording
//!
//! # Usage
//!
//! ```rust
//! use rs_bcl_blocks::{dom, BlockParser};
//!
//! let doc = dom::parse(r#"<main class="main-content-wrapper"><h1>Title</h1></main>"#);
//! let main = doc.select("main");
//!
//! let result = BlockParser::new().parse(&main);
//! assert_eq!(result.blocks.len(), 1);
//! ```

pub mod components;
pub mod links;
pub mod state;
pub mod structural;
pub mod tags;
pub mod walk;

use dom_query::{Document, Selection};
use tracing::{debug, warn};

use crate::block::ParseResult;
use crate::dom;
use crate::Options;

pub use state::ParseState;
pub use walk::{parse_children, Extractor};

/// Parser for pages built from BCL components.
///
/// The parser holds only configuration. Each [`parse`](Self::parse) call
/// builds its own [`ParseState`], so one parser can be reused for any
/// number of pages and calls never see each other's state.
#[derive(Debug, Clone, Default)]
pub struct BlockParser {
    options: Options,
}

impl BlockParser {
    /// Parser with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse the children of `root` into blocks and links.
    ///
    /// Never fails: problems inside individual elements are logged and the
    /// element skipped. An empty selection yields an empty result.
    #[must_use]
    pub fn parse(&self, root: &Selection) -> ParseResult {
        let mut state = ParseState::new();

        let blocks = parse_children(root, &mut state, &self.options).unwrap_or_else(|err| {
            warn!(error = %err, "main content not parsed");
            Vec::new()
        });

        debug!(
            blocks = blocks.len(),
            links = state.links().len(),
            consumed = state.visited_count(),
            "parsed main content"
        );

        ParseResult {
            blocks,
            links: state.into_links(),
        }
    }

    /// Locate the main content element with `Options::main_content_selector`
    /// and parse it. A page without one yields an empty result.
    #[must_use]
    pub fn parse_document(&self, doc: &Document) -> ParseResult {
        match dom::select_first(doc, &self.options.main_content_selector) {
            Some(main) => self.parse(&main),
            None => {
                debug!(
                    selector = %self.options.main_content_selector,
                    "no main content element"
                );
                ParseResult::default()
            }
        }
    }
}
