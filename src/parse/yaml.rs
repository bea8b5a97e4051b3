//! YAML adapter. Values arrive natively typed; no scalar inference.

use crate::error::{Error, Result};
use crate::parse::{require_mapping, Format, FormatAdapter};
use crate::tree::{ConfigTree, Value};

pub struct YamlAdapter;

impl FormatAdapter for YamlAdapter {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn parse(&self, raw: &str) -> Result<ConfigTree> {
        let parsed: serde_yaml::Value = serde_yaml::from_str(raw).map_err(|err| Error::Parse {
            format: Format::Yaml,
            reason: err.to_string(),
        })?;
        require_mapping(Value::from_yaml(parsed)?, Format::Yaml)
    }
}
