//! Aggregation: turn an ordered list of targets into one merged tree.
//!
//! Two precedence policies share one engine. `load_config` merges every
//! source that yields data, so later sources override earlier ones.
//! `load_first_found_config` stops at the first source that yields data, so
//! the first listed source wins and later ones are ignored even when
//! available.

use crate::error::Result;
use crate::parse::Registry;
use crate::source::ConfigSource;
use crate::tree::ConfigTree;

/// Anything that can be normalized into a [`ConfigSource`]: strings become
/// file sources, trees become object sources, `None` becomes the empty
/// source.
pub trait IntoSource {
    fn into_source(self) -> Result<ConfigSource>;
}

impl IntoSource for ConfigSource {
    fn into_source(self) -> Result<ConfigSource> {
        Ok(self)
    }
}

impl IntoSource for &str {
    fn into_source(self) -> Result<ConfigSource> {
        ConfigSource::file(self)
    }
}

impl IntoSource for String {
    fn into_source(self) -> Result<ConfigSource> {
        ConfigSource::file(&self)
    }
}

impl IntoSource for &String {
    fn into_source(self) -> Result<ConfigSource> {
        ConfigSource::file(self)
    }
}

impl IntoSource for ConfigTree {
    fn into_source(self) -> Result<ConfigSource> {
        Ok(ConfigSource::Object(self))
    }
}

/// In-memory JSON trees act as object sources (dotted keys nest).
impl IntoSource for serde_json::Value {
    fn into_source(self) -> Result<ConfigSource> {
        Ok(ConfigSource::Object(ConfigTree::try_from(self)?))
    }
}

impl<T: IntoSource> IntoSource for Option<T> {
    fn into_source(self) -> Result<ConfigSource> {
        match self {
            Some(inner) => inner.into_source(),
            None => Ok(ConfigSource::Empty),
        }
    }
}

/// Load every target in order and deep-merge the results; later sources
/// override earlier ones. Sources that yield nothing contribute nothing.
pub fn load_config<I>(targets: I) -> Result<ConfigTree>
where
    I: IntoIterator,
    I::Item: IntoSource,
{
    load(targets, true)
}

/// Load targets in order and return the first one that yields data,
/// ignoring the rest.
pub fn load_first_found_config<I>(targets: I) -> Result<ConfigTree>
where
    I: IntoIterator,
    I::Item: IntoSource,
{
    load(targets, false)
}

fn load<I>(targets: I, merge_all: bool) -> Result<ConfigTree>
where
    I: IntoIterator,
    I::Item: IntoSource,
{
    let registry = Registry::builtin();
    let mut merged = ConfigTree::new();

    for target in targets {
        let source = target.into_source()?;
        if matches!(source, ConfigSource::Empty) {
            continue;
        }

        match source.load(&registry)? {
            Some(tree) if !tree.is_empty() => {
                tracing::debug!(source = %source, "merging configuration source");
                merged.merge(&tree);
                if !merge_all {
                    break;
                }
            }
            _ => {
                tracing::debug!(source = %source, "source contributed nothing");
            }
        }
    }

    Ok(merged)
}
