//! Configuration values and conversions from foreign (serde) value trees.
//!
//! `Value` is a tagged variant so "is this a mapping" is a tag check rather
//! than a runtime capability probe. Conversions from `serde_json` and
//! `serde_yaml` trees walk the input with an explicit work queue instead of
//! recursing, so deeply nested documents cannot exhaust the stack.

use crate::error::{Error, Result};
use crate::tree::ConfigTree;
use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// A configuration value: scalar, sequence, or nested mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(ConfigTree),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigTree> {
        match self {
            Value::Map(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Human-readable variant name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Int(_) => "an integer",
            Value::Float(_) => "a float",
            Value::Str(_) => "a string",
            Value::Seq(_) => "a sequence",
            Value::Map(_) => "a mapping",
        }
    }

    /// Convert a parsed JSON tree, reinterpreting dotted mapping keys as
    /// nested paths.
    pub fn from_json(value: serde_json::Value) -> Result<Value> {
        from_foreign(value)
    }

    /// Convert a parsed YAML tree, reinterpreting dotted mapping keys as
    /// nested paths. Non-string YAML keys are rendered to their string form.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Value> {
        from_foreign(value)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<ConfigTree> for Value {
    fn from(tree: ConfigTree) -> Self {
        Value::Map(tree)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Seq(items) => items.serialize(serializer),
            Value::Map(tree) => tree.serialize(serializer),
        }
    }
}

/// Structural equality against plain JSON trees, for verification. Integers
/// and floats compare numerically against JSON numbers.
impl PartialEq<serde_json::Value> for Value {
    fn eq(&self, other: &serde_json::Value) -> bool {
        use serde_json::Value as Json;
        match (self, other) {
            (Value::Null, Json::Null) => true,
            (Value::Bool(a), Json::Bool(b)) => a == b,
            (Value::Int(a), Json::Number(_)) => {
                other.as_i64() == Some(*a) || other.as_f64() == Some(*a as f64)
            }
            (Value::Float(a), Json::Number(_)) => other.as_f64() == Some(*a),
            (Value::Str(a), Json::String(b)) => a == b,
            (Value::Seq(a), Json::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(mine, theirs)| mine == theirs)
            }
            (Value::Map(a), _) => a == other,
            _ => false,
        }
    }
}

impl TryFrom<serde_json::Value> for ConfigTree {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match Value::from_json(value)? {
            Value::Map(tree) => Ok(tree),
            other => Err(Error::NotMappingValue(other.kind())),
        }
    }
}

impl TryFrom<serde_yaml::Value> for ConfigTree {
    type Error = Error;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        match Value::from_yaml(value)? {
            Value::Map(tree) => Ok(tree),
            other => Err(Error::NotMappingValue(other.kind())),
        }
    }
}

/// Shallow classification of one foreign node.
enum Node<F> {
    Scalar(Value),
    Map(Vec<(String, F)>),
    Seq(Vec<F>),
}

trait Foreign: Sized {
    fn classify(self) -> Node<Self>;
}

impl Foreign for serde_json::Value {
    fn classify(self) -> Node<Self> {
        use serde_json::Value as Json;
        match self {
            Json::Null => Node::Scalar(Value::Null),
            Json::Bool(b) => Node::Scalar(Value::Bool(b)),
            Json::Number(n) => Node::Scalar(match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            Json::String(s) => Node::Scalar(Value::Str(s)),
            Json::Array(items) => Node::Seq(items),
            Json::Object(map) => Node::Map(map.into_iter().collect()),
        }
    }
}

impl Foreign for serde_yaml::Value {
    fn classify(self) -> Node<Self> {
        use serde_yaml::Value as Yaml;
        match self {
            Yaml::Null => Node::Scalar(Value::Null),
            Yaml::Bool(b) => Node::Scalar(Value::Bool(b)),
            Yaml::Number(n) => Node::Scalar(match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            Yaml::String(s) => Node::Scalar(Value::Str(s)),
            Yaml::Sequence(items) => Node::Seq(items),
            Yaml::Mapping(map) => {
                Node::Map(map.into_iter().map(|(k, v)| (yaml_key_to_string(k), v)).collect())
            }
            Yaml::Tagged(tagged) => tagged.value.classify(),
        }
    }
}

fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;
    match key {
        Yaml::String(s) => s,
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_yaml::to_string(&other).unwrap_or_default().trim_end().to_string(),
    }
}

/// Where a finished value belongs: the root slot, a key of a pending map, or
/// an index of a pending sequence.
enum Slot {
    Root,
    MapKey(usize, String),
    SeqIndex(usize, usize),
}

/// A container still collecting its children.
enum Built {
    Map(ConfigTree),
    Seq(Vec<Value>),
}

/// Queue-driven conversion of a foreign value tree.
///
/// Pass one walks the input breadth-first, placing scalars immediately and
/// parking containers in an arena. Containers are created strictly after
/// their parents, so pass two drains the arena back-to-front and every
/// container lands in an already-complete parent slot. Dotted mapping keys
/// go through [`ConfigTree::set`] and therefore nest.
fn from_foreign<F: Foreign>(root: F) -> Result<Value> {
    let mut built: Vec<(Slot, Built)> = Vec::new();
    let mut root_value = Value::Null;

    let mut pending: VecDeque<(Slot, F)> = VecDeque::new();
    pending.push_back((Slot::Root, root));

    while let Some((slot, node)) = pending.pop_front() {
        match node.classify() {
            Node::Scalar(value) => place(&mut built, &mut root_value, slot, value)?,
            Node::Map(entries) => {
                let id = built.len();
                built.push((slot, Built::Map(ConfigTree::new())));
                for (key, child) in entries {
                    pending.push_back((Slot::MapKey(id, key), child));
                }
            }
            Node::Seq(items) => {
                let id = built.len();
                built.push((slot, Built::Seq(vec![Value::Null; items.len()])));
                for (index, child) in items.into_iter().enumerate() {
                    pending.push_back((Slot::SeqIndex(id, index), child));
                }
            }
        }
    }

    while let Some((slot, container)) = built.pop() {
        let value = match container {
            Built::Map(tree) => Value::Map(tree),
            Built::Seq(items) => Value::Seq(items),
        };
        place(&mut built, &mut root_value, slot, value)?;
    }

    Ok(root_value)
}

fn place(
    built: &mut [(Slot, Built)],
    root: &mut Value,
    slot: Slot,
    value: Value,
) -> Result<()> {
    match slot {
        Slot::Root => *root = value,
        Slot::MapKey(id, key) => {
            if let Built::Map(tree) = &mut built[id].1 {
                tree.set(&key, value)?;
            }
        }
        Slot::SeqIndex(id, index) => {
            if let Built::Seq(items) = &mut built[id].1 {
                items[index] = value;
            }
        }
    }
    Ok(())
}
