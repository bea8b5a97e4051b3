//! Blocking HTTP fetches for remote configuration sources.

use std::time::Duration;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A successful response with the material needed for hint resolution.
pub struct Fetched {
    pub body: String,
    /// `Content-Type` header, if present.
    pub media_type: Option<String>,
    /// Path component of the final URL, after redirects.
    pub path: String,
}

/// GET a configuration document, or `None` on any transport failure:
/// connection errors, timeouts, and non-success statuses all count.
pub fn get(url: &Url) -> Option<Fetched> {
    match get_impl(url) {
        Ok(fetched) => Some(fetched),
        Err(err) => {
            tracing::warn!(url = %url, error = %err, "config fetch failed");
            None
        }
    }
}

fn get_impl(url: &Url) -> reqwest::Result<Fetched> {
    let client = reqwest::blocking::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let response = client.get(url.as_str()).send()?.error_for_status()?;

    let media_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let path = response.url().path().to_string();
    let body = response.text()?;

    Ok(Fetched { body, media_type, path })
}
