//! Error taxonomy: construction errors, path errors, and parse failures.
//!
//! Transport failures are deliberately absent here — an unreachable or
//! unreadable source yields absence (`Ok(None)`) from its load, never an
//! error (see [`crate::fetch`]).

use crate::parse::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A dotted path was empty.
    #[error("empty key")]
    EmptyPath,

    /// A dotted path contained an empty segment (`a..b`, `.a`, `a.`).
    #[error("empty key segment in path `{path}`")]
    EmptySegment { path: String },

    /// A path segment was missing. `prefix` is the dotted chain up to and
    /// including the segment that failed to resolve.
    #[error("key not found at `{prefix}` ({path})")]
    KeyNotFound { prefix: String, path: String },

    /// Traversal hit a value that is not a mapping before the path ended.
    #[error("`{prefix}` is not a mapping ({path})")]
    NotAMapping { prefix: String, path: String },

    /// An explicit format hint did not match the hint vocabulary.
    #[error("unrecognized config format hint `{0}`")]
    UnknownHint(String),

    /// A file source was constructed with an empty location.
    #[error("source not provided for file config")]
    MissingSource,

    /// A literal source was constructed without a format hint.
    #[error("hint must be provided for a literal source")]
    HintRequired,

    /// A file source used a URL scheme other than `http`/`https`/`file`.
    #[error("unsupported source scheme `{0}`")]
    UnsupportedScheme(String),

    /// A non-mapping value was handed to an operation that requires one.
    #[error("expected a mapping, got {0}")]
    NotMappingValue(&'static str),

    /// Content failed to parse under an explicitly requested format.
    #[error("failed to parse {format} config: {reason}")]
    Parse { format: Format, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
