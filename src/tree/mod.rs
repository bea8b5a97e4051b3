//! Hierarchical configuration mapping addressed by dotted paths.
//!
//! A `ConfigTree` maps string keys to [`Value`]s, where a value may itself be
//! a nested tree. External access goes through dotted paths (`"a.b.c"`);
//! writes auto-vivify intermediate mappings, and merges are deep and
//! right-biased.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub mod path;
pub mod value;

pub use value::Value;

/// Nested string-keyed configuration mapping.
///
/// Iteration follows key order; insertion order is not preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    entries: BTreeMap<String, Value>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value at a dotted path.
    ///
    /// Fails if the path is empty, a segment is empty, an intermediate value
    /// is missing or not a mapping, or the terminal key is absent. The error
    /// names the dotted prefix that broke the traversal.
    pub fn get(&self, path: &str) -> Result<&Value> {
        let segments = path::split_path(path)?;
        let last = segments.len() - 1;

        let mut tree = self;
        for (i, segment) in segments.iter().enumerate() {
            let value = tree.entries.get(*segment).ok_or_else(|| Error::KeyNotFound {
                prefix: path::prefix(&segments, i + 1),
                path: path.to_string(),
            })?;
            if i == last {
                return Ok(value);
            }
            tree = match value {
                Value::Map(next) => next,
                _ => {
                    return Err(Error::NotAMapping {
                        prefix: path::prefix(&segments, i + 2),
                        path: path.to_string(),
                    })
                }
            };
        }

        Err(Error::EmptyPath)
    }

    /// Mutable variant of [`get`](Self::get) with the same error taxonomy.
    pub fn get_mut(&mut self, path: &str) -> Result<&mut Value> {
        let segments = path::split_path(path)?;
        let last = segments.len() - 1;

        let mut tree = self;
        for (i, segment) in segments.iter().enumerate() {
            let value = tree.entries.get_mut(*segment).ok_or_else(|| Error::KeyNotFound {
                prefix: path::prefix(&segments, i + 1),
                path: path.to_string(),
            })?;
            if i == last {
                return Ok(value);
            }
            tree = match value {
                Value::Map(next) => next,
                _ => {
                    return Err(Error::NotAMapping {
                        prefix: path::prefix(&segments, i + 2),
                        path: path.to_string(),
                    })
                }
            };
        }

        Err(Error::EmptyPath)
    }

    /// Store a value at a dotted path.
    ///
    /// Intermediate segments that are missing, or present but not mappings,
    /// are replaced with fresh empty mappings; the prior value at that
    /// position is discarded.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let segments = path::split_path(path)?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(Error::EmptyPath);
        };

        let mut tree = self;
        for (i, segment) in parents.iter().enumerate() {
            let slot = tree
                .entries
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Map(ConfigTree::new()));
            if !slot.is_map() {
                *slot = Value::Map(ConfigTree::new());
            }
            tree = match slot {
                Value::Map(next) => next,
                _ => {
                    // just replaced above; kept for totality
                    return Err(Error::NotAMapping {
                        prefix: path::prefix(&segments, i + 1),
                        path: path.to_string(),
                    });
                }
            };
        }

        tree.entries.insert((*last).to_string(), value.into());
        Ok(())
    }

    /// Remove and return the value at a dotted path.
    ///
    /// The parent chain must resolve through mappings; a broken chain fails
    /// with the same taxonomy as [`get`](Self::get).
    pub fn remove(&mut self, path: &str) -> Result<Value> {
        let segments = path::split_path(path)?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(Error::EmptyPath);
        };

        let mut tree = self;
        for (i, segment) in parents.iter().enumerate() {
            let value = tree.entries.get_mut(*segment).ok_or_else(|| Error::KeyNotFound {
                prefix: path::prefix(&segments, i + 1),
                path: path.to_string(),
            })?;
            tree = match value {
                Value::Map(next) => next,
                _ => {
                    return Err(Error::NotAMapping {
                        prefix: path::prefix(&segments, i + 1),
                        path: path.to_string(),
                    })
                }
            };
        }

        tree.entries.remove(*last).ok_or_else(|| Error::KeyNotFound {
            prefix: path.to_string(),
            path: path.to_string(),
        })
    }

    /// Deep-merge `other` into `self`, in place.
    ///
    /// Keys absent here are copied in; keys mapping-typed on both sides
    /// recurse; any other conflict takes `other`'s value wholesale — a
    /// sequence replaces a sequence, it does not append.
    pub fn merge(&mut self, other: &ConfigTree) {
        for (key, incoming) in &other.entries {
            match (self.entries.get_mut(key), incoming) {
                (Some(Value::Map(existing)), Value::Map(new)) => existing.merge(new),
                (Some(slot), _) => *slot = incoming.clone(),
                (None, _) => {
                    self.entries.insert(key.clone(), incoming.clone());
                }
            }
        }
    }

    /// Merge an arbitrary value, failing unless it is a mapping.
    pub fn merge_value(&mut self, other: Value) -> Result<()> {
        match other {
            Value::Map(tree) => {
                self.merge(&tree);
                Ok(())
            }
            other => Err(Error::NotMappingValue(other.kind())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a full dotted path resolves to a value.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Whether a top-level key exists (no path semantics).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Render as compact JSON.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Render as YAML.
    pub fn to_yaml_string(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }
}

/// Builds a tree from `(key, value)` pairs. Keys are used verbatim — no
/// dotted-path splitting. Use [`ConfigTree::set`] for path semantics.
impl FromIterator<(String, Value)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        ConfigTree { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a ConfigTree {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl PartialEq<serde_json::Value> for ConfigTree {
    fn eq(&self, other: &serde_json::Value) -> bool {
        let serde_json::Value::Object(map) = other else {
            return false;
        };
        self.entries.len() == map.len()
            && map.iter().all(|(key, theirs)| {
                self.entries.get(key).map_or(false, |mine| mine == theirs)
            })
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => write!(f, "{:?}", self.entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(doc: serde_json::Value) -> ConfigTree {
        ConfigTree::try_from(doc).expect("tree from json")
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut conf = ConfigTree::new();
        conf.set("a.b.c", 41).expect("set");
        conf.set("a.b.c", 42).expect("overwrite");
        assert_eq!(conf.get("a.b.c").expect("get").as_i64(), Some(42));
    }

    #[test]
    fn set_auto_vivifies_intermediates() {
        let mut conf = tree(json!({"one": "a"}));
        conf.set("two.child.grandchild", 1).expect("set");

        assert_eq!(
            conf,
            json!({
                "one": "a",
                "two": {"child": {"grandchild": 1}}
            })
        );
        assert!(conf.get("two").expect("two").is_map());
    }

    #[test]
    fn set_into_created_empty_mapping() {
        let mut conf = tree(json!({"one": "a"}));
        conf.set("two.child.grandchild", ConfigTree::new()).expect("set empty map");
        conf.set("two.child.grandchild.first", 1).expect("set leaf");

        assert_eq!(
            conf,
            json!({
                "one": "a",
                "two": {"child": {"grandchild": {"first": 1}}}
            })
        );
    }

    #[test]
    fn set_overwrites_non_mapping_intermediate() {
        let mut conf = tree(json!({"one": "a", "two": "b"}));
        conf.set("two.child.grandchild", 1).expect("set");

        assert_eq!(
            conf,
            json!({
                "one": "a",
                "two": {"child": {"grandchild": 1}}
            })
        );
    }

    #[test]
    fn lookup_through_null_fails() {
        let conf = tree(json!({"one": null}));
        let err = conf.get("one.noexist").expect_err("null is not a mapping");
        assert!(matches!(err, Error::NotAMapping { ref prefix, .. } if prefix == "one.noexist"));
    }

    #[test]
    fn lookup_through_scalar_fails() {
        let conf = tree(json!({"one": "a"}));
        assert!(matches!(conf.get("one.noexist"), Err(Error::NotAMapping { .. })));
    }

    #[test]
    fn lookup_missing_key_reports_prefix() {
        let conf = tree(json!({"one": {"two": 2}}));
        let err = conf.get("one.three.four").expect_err("missing");
        assert!(matches!(err, Error::KeyNotFound { ref prefix, .. } if prefix == "one.three"));
    }

    #[test]
    fn lookup_empty_paths_fail() {
        let conf = tree(json!({"one": "a"}));
        assert!(matches!(conf.get(""), Err(Error::EmptyPath)));
        assert!(matches!(conf.get("one..b"), Err(Error::EmptySegment { .. })));
    }

    #[test]
    fn delete_removes_exactly_one_key() {
        let mut conf = tree(json!({"one": 1, "two": 2}));
        let removed = conf.remove("one").expect("remove");
        assert_eq!(removed.as_i64(), Some(1));
        assert_eq!(conf, json!({"two": 2}));
    }

    #[test]
    fn delete_through_null_fails() {
        let mut conf = tree(json!({"one": null}));
        assert!(matches!(conf.remove("one.noexist"), Err(Error::NotAMapping { .. })));
    }

    #[test]
    fn delete_through_scalar_fails() {
        let mut conf = tree(json!({"one": "a"}));
        assert!(matches!(conf.remove("one.noexist"), Err(Error::NotAMapping { .. })));
        assert!(matches!(
            conf.remove("one.noexist.reallynotthere"),
            Err(Error::NotAMapping { .. })
        ));
    }

    #[test]
    fn delete_missing_leaf_fails() {
        let mut conf = tree(json!({"one": {"two": 2}}));
        assert!(matches!(conf.remove("one.three"), Err(Error::KeyNotFound { .. })));
    }

    #[test]
    fn merge_overrides_duplicate_keys() {
        let mut first = tree(json!({"one": 1, "two": 2}));
        let second = tree(json!({"two": 22, "three": 3}));

        first.merge(&second);
        assert_eq!(first.len(), 3);
        assert_eq!(first, json!({"one": 1, "two": 22, "three": 3}));
    }

    #[test]
    fn merge_unions_unique_keys() {
        let mut first = tree(json!({"one": 1, "two": 2}));
        let second = tree(json!({"three": 3, "four": 4}));

        first.merge(&second);
        assert_eq!(first, json!({"one": 1, "two": 2, "three": 3, "four": 4}));
    }

    #[test]
    fn merge_recurses_into_nested_mappings() {
        let mut first = tree(json!({
            "one": 1,
            "two": {"two_a": "2a", "two_b": "2b"}
        }));
        let second = tree(json!({
            "two": {"two_b": "22b", "two_c": "2c"},
            "three": {"three_a": "3a"},
            "four": 4
        }));

        first.merge(&second);
        assert_eq!(
            first,
            json!({
                "one": 1,
                "two": {"two_a": "2a", "two_b": "22b", "two_c": "2c"},
                "three": {"three_a": "3a"},
                "four": 4
            })
        );
    }

    #[test]
    fn merge_replaces_on_type_disagreement() {
        let mut first = tree(json!({"one": 1, "two": {"two_a": "2a"}}));
        let second = tree(json!({"two": [2, 1, 2]}));

        first.merge(&second);
        assert_eq!(first, json!({"one": 1, "two": [2, 1, 2]}));
    }

    #[test]
    fn merge_value_rejects_non_mapping() {
        let mut first = tree(json!({"one": 1}));
        let err = first
            .merge_value(Value::Seq(vec![Value::Str("a".into()), Value::Str("b".into())]))
            .expect_err("sequence");
        assert!(matches!(err, Error::NotMappingValue("a sequence")));
    }

    #[test]
    fn leaf_paths_read_back_original_scalars() {
        let doc = json!({
            "parent_a": {"child_aa": 1, "child_ab": 2},
            "parent_b": {
                "child_ba": {"grand_child_baa": 3},
                "child_bb": 5
            }
        });
        let conf = tree(doc.clone());

        for (path, pointer) in [
            ("parent_a.child_aa", "/parent_a/child_aa"),
            ("parent_a.child_ab", "/parent_a/child_ab"),
            ("parent_b.child_ba.grand_child_baa", "/parent_b/child_ba/grand_child_baa"),
            ("parent_b.child_bb", "/parent_b/child_bb"),
        ] {
            let direct = doc.pointer(pointer).expect("pointer").as_i64();
            assert_eq!(conf.get(path).expect("path").as_i64(), direct, "path {path}");
        }
    }

    #[test]
    fn contains_walks_paths() {
        let conf = tree(json!({"a": {"b": 1}}));
        assert!(conf.contains("a.b"));
        assert!(!conf.contains("a.c"));
        assert!(conf.contains_key("a"));
        assert!(!conf.contains_key("a.b"));
    }
}
