//! XML adapter.
//!
//! Each leaf element becomes a path built from its ancestor chain with the
//! document root excluded; repeated leaf paths accumulate into a sequence.
//! Leaf text goes through scalar inference. The tree is walked breadth-first
//! with an explicit queue so element depth never translates into stack
//! depth.

use crate::error::{Error, Result};
use crate::parse::{accumulate, scalar, Format, FormatAdapter};
use crate::tree::ConfigTree;
use std::collections::VecDeque;

pub struct XmlAdapter;

impl FormatAdapter for XmlAdapter {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn parse(&self, raw: &str) -> Result<ConfigTree> {
        let doc = roxmltree::Document::parse(raw).map_err(|err| Error::Parse {
            format: Format::Xml,
            reason: err.to_string(),
        })?;

        let mut tree = ConfigTree::new();
        let mut queue: VecDeque<(String, roxmltree::Node<'_, '_>)> = VecDeque::new();

        for child in doc.root_element().children().filter(roxmltree::Node::is_element) {
            queue.push_back((String::new(), child));
        }

        while let Some((prefix, node)) = queue.pop_front() {
            let tag = node.tag_name().name();
            let path = if prefix.is_empty() { tag.to_string() } else { format!("{prefix}.{tag}") };

            let mut children = node.children().filter(roxmltree::Node::is_element).peekable();
            if children.peek().is_some() {
                for child in children {
                    queue.push_back((path.clone(), child));
                }
            } else {
                let text = node.text().unwrap_or("").trim();
                accumulate(&mut tree, &path, scalar::infer(text))?;
            }
        }

        Ok(tree)
    }
}
