//! JSON adapter. Values arrive natively typed; no scalar inference.

use crate::error::{Error, Result};
use crate::parse::{require_mapping, Format, FormatAdapter};
use crate::tree::{ConfigTree, Value};

pub struct JsonAdapter;

impl FormatAdapter for JsonAdapter {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, raw: &str) -> Result<ConfigTree> {
        let parsed: serde_json::Value = serde_json::from_str(raw).map_err(|err| Error::Parse {
            format: Format::Json,
            reason: err.to_string(),
        })?;
        require_mapping(Value::from_json(parsed)?, Format::Json)
    }
}
