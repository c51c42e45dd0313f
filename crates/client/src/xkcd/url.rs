//! Upstream endpoint addresses.

use super::XkcdError;
use url::Url;

/// Parse and normalize the archive base URL.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Require an http or https scheme
/// 3. Drop query and fragment
/// 4. Ensure the path ends with `/` so relative joins keep any path prefix
pub fn parse_base_url(input: &str) -> Result<Url, XkcdError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(XkcdError::InvalidBaseUrl("empty URL".into()));
    }

    let mut parsed = Url::parse(trimmed).map_err(|e| XkcdError::InvalidBaseUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(XkcdError::InvalidBaseUrl(format!("unsupported scheme: {scheme}"))),
    }

    parsed.set_query(None);
    parsed.set_fragment(None);
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }

    Ok(parsed)
}

/// `{base}/info.0.json`
pub fn latest_url(base: &Url) -> Result<Url, XkcdError> {
    base.join("info.0.json").map_err(|e| XkcdError::InvalidBaseUrl(e.to_string()))
}

/// `{base}/{id}/info.0.json`
pub fn comic_url(base: &Url, id: u32) -> Result<Url, XkcdError> {
    base.join(&format!("{id}/info.0.json"))
        .map_err(|e| XkcdError::InvalidBaseUrl(e.to_string()))
}
