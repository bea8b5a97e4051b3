//! Dotted-path parsing shared by lookup, insertion, and removal.

use crate::error::{Error, Result};

/// Split `path` on `.`, rejecting empty paths and empty segments.
pub(crate) fn split_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }

    let segments: Vec<&str> = path.split('.').collect();
    for segment in &segments {
        if segment.is_empty() {
            return Err(Error::EmptySegment { path: path.to_string() });
        }
    }

    Ok(segments)
}

/// Join the first `upto` segments back into the dotted prefix reported by
/// path errors.
pub(crate) fn prefix(segments: &[&str], upto: usize) -> String {
    segments[..upto.min(segments.len())].join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_dots() {
        let segments = split_path("a.b.c").expect("valid path");
        assert_eq!(segments, vec!["a", "b", "c"]);
    }

    #[test]
    fn single_segment_is_valid() {
        let segments = split_path("alone").expect("valid path");
        assert_eq!(segments, vec!["alone"]);
    }

    #[test]
    fn rejects_empty_path() {
        assert!(matches!(split_path(""), Err(Error::EmptyPath)));
    }

    #[test]
    fn rejects_empty_segments() {
        for bad in ["a..b", ".a", "a.", "."] {
            assert!(
                matches!(split_path(bad), Err(Error::EmptySegment { .. })),
                "path {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn prefix_joins_leading_segments() {
        let segments = vec!["a", "b", "c"];
        assert_eq!(prefix(&segments, 2), "a.b");
        assert_eq!(prefix(&segments, 5), "a.b.c");
    }
}
