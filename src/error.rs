//! Error types for rs-bcl-blocks.
//!
//! Most failures inside the block walk are recovered where they happen and
//! only show up as `tracing` warnings. This type is what travels between an
//! extractor and the dispatch loop that recovers it, plus the few fallible
//! entry points (main-content lookup, JSON output).

/// Error type for parsing and rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The DOM nesting is deeper than `Options::max_depth`.
    #[error("Nesting depth {depth} exceeds limit of {max}")]
    DepthLimitExceeded {
        /// Depth at which the walk stopped.
        depth: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A component carried a sub-structure that could not be interpreted.
    #[error("Malformed {component} component: {reason}")]
    MalformedComponent {
        /// Component name, e.g. `"file"`.
        component: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// No element matched the main-content selector.
    #[error("Main content not found for selector '{0}'")]
    MainContentNotFound(String),

    /// A block kind name that is not part of the catalog.
    #[error("Unknown block kind '{0}'")]
    UnknownBlockKind(String),

    /// JSON serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;
