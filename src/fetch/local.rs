//! Local file reading with encoding detection.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::path::Path;

/// Read a config file to text, or `None` if it cannot be read.
///
/// An explicit encoding label takes precedence; otherwise strict UTF-8 is
/// tried first and chardetng detection covers the rest.
pub fn read(path: &Path, encoding: Option<&str>) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(decode(&bytes, encoding)),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed reading config file");
            None
        }
    }
}

fn decode(bytes: &[u8], encoding: Option<&str>) -> String {
    if let Some(label) = encoding {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            let (decoded, _, _) = encoding.decode(bytes);
            return decoded.into_owned();
        }
        tracing::warn!(encoding = label, "unknown encoding label, falling back to detection");
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, true);
    let (decoded, _, _) = guessed.decode(bytes);
    decoded.into_owned()
}
