//! Configuration sources: un-loaded references to configuration content.
//!
//! A source pairs a location (file path, URL, literal text, in-memory tree)
//! with an optional format hint. Loading a source produces either a
//! [`ConfigTree`] or absence — transport failures are absorbed here and
//! surface as `Ok(None)`, never as errors.

use crate::error::{Error, Result};
use crate::fetch;
use crate::parse::{Format, Registry};
use crate::tree::ConfigTree;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Map a file extension (or explicit hint word) to its canonical format.
pub(crate) fn format_for_extension(ext: &str) -> Option<Format> {
    match ext.to_ascii_lowercase().as_str() {
        "yaml" | "yml" => Some(Format::Yaml),
        "json" => Some(Format::Json),
        "cfg" | "conf" | "cnf" | "config" | "ini" => Some(Format::Ini),
        "xml" => Some(Format::Xml),
        _ => None,
    }
}

/// Map an HTTP media type to its canonical format. Parameters such as
/// `; charset=utf-8` are ignored.
pub(crate) fn format_for_media_type(media_type: &str) -> Option<Format> {
    let essence = media_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    match essence.as_str() {
        "text/yaml" | "text/x-yaml" | "application/yaml" | "application/x-yaml" => {
            Some(Format::Yaml)
        }
        "application/json" => Some(Format::Json),
        "text/plain" => Some(Format::Ini),
        "text/xml" | "application/xml" => Some(Format::Xml),
        _ => None,
    }
}

/// Resolve an explicit, caller-supplied hint. Unrecognized words are a hard
/// configuration error, unlike inferred hints which simply stay unset.
pub fn resolve_hint(hint: &str) -> Result<Format> {
    format_for_extension(hint).ok_or_else(|| Error::UnknownHint(hint.to_string()))
}

/// An un-loaded reference to configuration content.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(FileSource),
    Literal { text: String, hint: Format },
    Object(ConfigTree),
    Empty,
}

#[derive(Debug, Clone)]
pub struct FileSource {
    location: Location,
    hint: Option<Format>,
    encoding: Option<String>,
}

#[derive(Debug, Clone)]
enum Location {
    Local(PathBuf),
    Remote(Url),
}

impl ConfigSource {
    /// A file or URL source; the hint is inferred from the extension for
    /// local files and resolved from the response for remote ones.
    pub fn file(spec: &str) -> Result<Self> {
        Self::file_with_options(spec, None, None)
    }

    /// A file or URL source with an explicit hint word.
    pub fn file_with_hint(spec: &str, hint: &str) -> Result<Self> {
        Self::file_with_options(spec, Some(resolve_hint(hint)?), None)
    }

    /// A file or URL source with a resolved hint and/or a text encoding
    /// label for decoding local content.
    pub fn file_with_options(
        spec: &str,
        hint: Option<Format>,
        encoding: Option<&str>,
    ) -> Result<Self> {
        if spec.is_empty() {
            return Err(Error::MissingSource);
        }

        // A leading `@` forces local-path semantics even if the rest looks
        // like a URL.
        let (forced_local, spec) = match spec.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };
        if spec.is_empty() {
            return Err(Error::MissingSource);
        }

        let location = if forced_local {
            Location::Local(PathBuf::from(spec))
        } else {
            match Url::parse(spec) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Location::Remote(url),
                Ok(url) if url.scheme() == "file" => Location::Local(PathBuf::from(url.path())),
                // Single-letter schemes are Windows drive prefixes.
                Ok(url) if url.scheme().len() == 1 => Location::Local(PathBuf::from(spec)),
                Ok(url) => return Err(Error::UnsupportedScheme(url.scheme().to_string())),
                Err(_) => Location::Local(PathBuf::from(spec)),
            }
        };

        let hint = match (&location, hint) {
            (_, Some(explicit)) => Some(explicit),
            (Location::Local(path), None) => extension_hint(path),
            // Remote hints resolve at load time from the response.
            (Location::Remote(_), None) => None,
        };

        Ok(ConfigSource::File(FileSource {
            location,
            hint,
            encoding: encoding.map(str::to_string),
        }))
    }

    /// Literal configuration text. The format hint is mandatory: raw text
    /// carries no extension to sniff a hint from.
    pub fn literal(text: &str, hint: &str) -> Result<Self> {
        if hint.is_empty() {
            return Err(Error::HintRequired);
        }
        Ok(ConfigSource::Literal { text: text.to_string(), hint: resolve_hint(hint)? })
    }

    /// An in-memory tree; loading clones it, no parsing involved.
    pub fn object(tree: ConfigTree) -> Self {
        ConfigSource::Object(tree)
    }

    pub fn empty() -> Self {
        ConfigSource::Empty
    }

    /// Load this source: fetch (if needed), dispatch to the registry, and
    /// return the parsed tree, or `None` when the source yields nothing.
    ///
    /// Parse failures under an explicit hint are genuine errors and
    /// propagate; unreachable or unparseable-by-anything sources are
    /// absences.
    pub fn load(&self, registry: &Registry) -> Result<Option<ConfigTree>> {
        match self {
            ConfigSource::Empty => Ok(None),
            ConfigSource::Object(tree) => Ok(Some(tree.clone())),
            ConfigSource::Literal { text, hint } => registry.parse(text, Some(*hint)),
            ConfigSource::File(file) => file.load(registry),
        }
    }
}

impl FileSource {
    fn load(&self, registry: &Registry) -> Result<Option<ConfigTree>> {
        match &self.location {
            Location::Local(path) => {
                let Some(content) = fetch::local::read(path, self.encoding.as_deref()) else {
                    return Ok(None);
                };
                registry.parse(&content, self.hint)
            }
            Location::Remote(url) => {
                let Some(response) = fetch::http::get(url) else {
                    return Ok(None);
                };
                // Precedence: explicit > response media type > response
                // path extension.
                let hint = self
                    .hint
                    .or_else(|| response.media_type.as_deref().and_then(format_for_media_type))
                    .or_else(|| extension_hint(Path::new(&response.path)));
                registry.parse(&response.body, hint)
            }
        }
    }
}

/// Extension-based hint. Extensionless dot-files (`.yaml`) fall back to the
/// file name itself.
fn extension_hint(path: &Path) -> Option<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .or_else(|| path.file_name().and_then(|n| n.to_str()).map(|n| n.trim_start_matches('.')))?;
    format_for_extension(ext)
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(file) => match &file.location {
                Location::Local(path) => write!(f, "file {}", path.display()),
                Location::Remote(url) => write!(f, "url {url}"),
            },
            ConfigSource::Literal { hint, .. } => write!(f, "literal ({hint})"),
            ConfigSource::Object(_) => f.write_str("object"),
            ConfigSource::Empty => f.write_str("empty"),
        }
    }
}

impl From<ConfigTree> for ConfigSource {
    fn from(tree: ConfigTree) -> Self {
        ConfigSource::Object(tree)
    }
}
