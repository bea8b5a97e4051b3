//! INI adapter.
//!
//! Each `[section]` with `key = value` lines becomes the path `section.key`;
//! keys may themselves be dotted and nest further. Duplicate keys within a
//! section accumulate into a sequence in order of appearance. Values go
//! through scalar inference. The grammar is strict about shape: content must
//! live under a section and every line needs a delimiter, so that sniffing
//! can reject non-INI text.

use crate::error::{Error, Result};
use crate::parse::{accumulate, scalar, Format, FormatAdapter};
use crate::tree::ConfigTree;

pub struct IniAdapter;

impl FormatAdapter for IniAdapter {
    fn format(&self) -> Format {
        Format::Ini
    }

    fn parse(&self, raw: &str) -> Result<ConfigTree> {
        let mut tree = ConfigTree::new();
        let mut section: Option<String> = None;

        for (index, line) in raw.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest.strip_suffix(']').ok_or_else(|| parse_error(index, "unterminated section header"))?.trim();
                if name.is_empty() {
                    return Err(parse_error(index, "empty section header"));
                }
                section = Some(name.to_string());
                continue;
            }

            let current = section
                .as_deref()
                .ok_or_else(|| parse_error(index, "entry outside of any section"))?;

            let delimiter = trimmed
                .find(['=', ':'])
                .ok_or_else(|| parse_error(index, "missing `=` or `:` delimiter"))?;
            let key = trimmed[..delimiter].trim();
            if key.is_empty() {
                return Err(parse_error(index, "empty key"));
            }
            let value = scalar::infer(trimmed[delimiter + 1..].trim());

            accumulate(&mut tree, &format!("{current}.{key}"), value)?;
        }

        Ok(tree)
    }
}

fn parse_error(index: usize, reason: &str) -> Error {
    Error::Parse {
        format: Format::Ini,
        reason: format!("{reason} at line {}", index + 1),
    }
}
