//! Format adapters and dispatch.
//!
//! Each adapter turns raw text of one format into a [`ConfigTree`]. A
//! [`Registry`] dispatches either by explicit format (parse failures
//! propagate) or, when no hint is available, by trying every adapter in a
//! fixed order and taking the first success — best-effort sniffing that
//! trades correctness for convenience on ambiguous content.

use crate::error::{Error, Result};
use crate::tree::{ConfigTree, Value};
use std::fmt;

pub mod ini;
pub mod json;
pub mod scalar;
pub mod xml;
pub mod yaml;

pub use ini::IniAdapter;
pub use json::JsonAdapter;
pub use xml::XmlAdapter;
pub use yaml::YamlAdapter;

/// Canonical format identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
    Ini,
    Xml,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Ini => "ini",
            Format::Xml => "xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One format decoder.
pub trait FormatAdapter {
    fn format(&self) -> Format;

    /// Parse raw text into a tree. Must reject content whose top level is
    /// not a mapping, so that sniffing can move on to the next adapter.
    fn parse(&self, raw: &str) -> Result<ConfigTree>;
}

/// Explicitly constructed adapter table. The vector order is the sniffing
/// order; no global registration state.
pub struct Registry {
    adapters: Vec<Box<dyn FormatAdapter>>,
}

impl Registry {
    /// The built-in adapters, sniffed strictest-grammar-first: JSON, XML,
    /// YAML, INI. YAML accepts almost any text as a scalar and INI accepts
    /// many line-oriented layouts, so both sit late in the order.
    pub fn builtin() -> Self {
        Self::with_adapters(vec![
            Box::new(JsonAdapter),
            Box::new(XmlAdapter),
            Box::new(YamlAdapter),
            Box::new(IniAdapter),
        ])
    }

    pub fn with_adapters(adapters: Vec<Box<dyn FormatAdapter>>) -> Self {
        Registry { adapters }
    }

    /// Dispatch `raw` to an adapter.
    ///
    /// With a hint that matches a registered adapter, only that adapter runs
    /// and its failure propagates. Otherwise every adapter is tried in
    /// registry order; per-adapter failures are logged and swallowed, and
    /// exhaustion yields `Ok(None)`.
    pub fn parse(&self, raw: &str, hint: Option<Format>) -> Result<Option<ConfigTree>> {
        if let Some(format) = hint {
            if let Some(adapter) = self.adapters.iter().find(|a| a.format() == format) {
                return adapter.parse(raw).map(Some);
            }
        }

        for adapter in &self.adapters {
            match adapter.parse(raw) {
                Ok(tree) => {
                    tracing::debug!(format = %adapter.format(), "sniffing adapter accepted content");
                    return Ok(Some(tree));
                }
                Err(err) => {
                    tracing::debug!(format = %adapter.format(), error = %err, "sniffing adapter rejected content");
                }
            }
        }

        Ok(None)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Unwrap a converted value, requiring a mapping at the top level.
pub(crate) fn require_mapping(value: Value, format: Format) -> Result<ConfigTree> {
    match value {
        Value::Map(tree) => Ok(tree),
        other => Err(Error::Parse {
            format,
            reason: format!("top-level value is {}, expected a mapping", other.kind()),
        }),
    }
}

/// Accumulate repeated keys: a second occurrence converts the existing value
/// into a sequence, later occurrences append to it.
pub(crate) fn accumulate(tree: &mut ConfigTree, path: &str, value: Value) -> Result<()> {
    match tree.get_mut(path) {
        Ok(existing) => {
            if let Value::Seq(items) = existing {
                items.push(value);
            } else {
                let first = std::mem::replace(existing, Value::Null);
                *existing = Value::Seq(vec![first, value]);
            }
            Ok(())
        }
        Err(_) => tree.set(path, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_hint_failure_propagates() {
        let registry = Registry::builtin();
        let err = registry.parse("not json at all", Some(Format::Json)).expect_err("bad json");
        assert!(matches!(err, Error::Parse { format: Format::Json, .. }));
    }

    #[test]
    fn sniffing_identifies_each_builtin_format() {
        let registry = Registry::builtin();
        let cases = [
            (r#"{"a": {"b": 1}}"#, "json"),
            ("<config><a><b>1</b></a></config>", "xml"),
            ("a:\n  b: 1\n", "yaml"),
            ("[a]\nb = 1\n", "ini"),
        ];
        for (raw, label) in cases {
            let tree = registry.parse(raw, None).expect("no hard error").expect("sniffed");
            assert_eq!(tree, json!({"a": {"b": 1}}), "format {label}");
        }
    }

    #[test]
    fn sniffing_exhaustion_yields_none() {
        let registry = Registry::builtin();
        // Passes no adapter: not JSON/XML, YAML scalar (non-mapping), no INI section.
        let result = registry.parse("just some words", None).expect("no hard error");
        assert!(result.is_none());
    }

    #[test]
    fn hint_skips_other_adapters() {
        let registry = Registry::builtin();
        // Valid INI, but the caller insists on YAML: `[a]` alone is a YAML
        // sequence, so the follow-up line makes it invalid YAML.
        let err = registry.parse("[a]\nb = 1\n", Some(Format::Yaml)).expect_err("yaml only");
        assert!(matches!(err, Error::Parse { format: Format::Yaml, .. }));
    }

    #[test]
    fn accumulate_wraps_then_appends() {
        let mut tree = ConfigTree::new();
        accumulate(&mut tree, "k", Value::Str("a".into())).expect("first");
        accumulate(&mut tree, "k", Value::Str("b".into())).expect("second");
        accumulate(&mut tree, "k", Value::Str("c".into())).expect("third");
        assert_eq!(tree, json!({"k": ["a", "b", "c"]}));
    }
}
