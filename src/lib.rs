//! figtree: multi-format configuration assembler.
//!
//! Loads configuration data from heterogeneous sources (files, HTTP
//! endpoints, literal text, in-memory objects) in heterogeneous formats
//! (YAML, JSON, INI, XML) and normalizes everything into one hierarchical
//! mapping addressed by dotted paths. Multiple sources merge with
//! deterministic precedence: later sources override earlier ones, or the
//! first source that yields data wins, depending on the entry point.
//!
//! ```
//! use figtree::{load_config, ConfigSource};
//!
//! let sources = [
//!     ConfigSource::literal("[server]\nhost = localhost\nport = 8080\n", "ini")?,
//!     ConfigSource::literal(r#"{"server": {"port": 9090}}"#, "json")?,
//! ];
//! let conf = load_config(sources)?;
//!
//! assert_eq!(conf.get("server.port")?.as_i64(), Some(9090));
//! assert_eq!(conf.get("server.host")?.as_str(), Some("localhost"));
//! # Ok::<(), figtree::Error>(())
//! ```

pub mod error;
pub mod fetch;
pub mod loader;
pub mod parse;
pub mod source;
pub mod tree;

pub use error::{Error, Result};
pub use loader::{load_config, load_first_found_config, IntoSource};
pub use parse::{Format, FormatAdapter, Registry};
pub use source::ConfigSource;
pub use tree::{ConfigTree, Value};
