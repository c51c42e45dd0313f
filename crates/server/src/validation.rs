//! Request parameter validation shared by the HTTP and MCP surfaces.
//!
//! Messages are returned to clients verbatim.

/// Longest accepted search query, in characters.
pub const MAX_QUERY_CHARS: usize = 100;

/// Largest accepted search page size.
pub const MAX_LIMIT: u32 = 50;

pub const INVALID_ID: &str = "Comic ID must be a positive integer";
pub const INVALID_QUERY: &str = "Query must be between 1 and 100 characters";
pub const INVALID_PAGE: &str = "Page must be a positive integer";
pub const INVALID_LIMIT: &str = "Limit must be between 1 and 50";

/// Parse a comic id path segment.
///
/// Only plain decimal digits are accepted: no sign, no decimal point.
pub fn parse_id(raw: &str) -> Result<i64, &'static str> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(INVALID_ID);
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(INVALID_ID),
    }
}

/// Trim and length-check a search query.
pub fn validate_query(raw: Option<&str>) -> Result<String, &'static str> {
    let query = raw.map(str::trim).unwrap_or_default();
    let chars = query.chars().count();
    if chars == 0 || chars > MAX_QUERY_CHARS {
        return Err(INVALID_QUERY);
    }
    Ok(query.to_string())
}

/// Check an optional page number.
pub fn validate_page(page: Option<u32>) -> Result<Option<u32>, &'static str> {
    match page {
        Some(0) => Err(INVALID_PAGE),
        other => Ok(other),
    }
}

/// Check an optional page size.
pub fn validate_limit(limit: Option<u32>) -> Result<Option<u32>, &'static str> {
    match limit {
        Some(n) if !(1..=MAX_LIMIT).contains(&n) => Err(INVALID_LIMIT),
        other => Ok(other),
    }
}

/// Parse an optional integer query parameter, then validate it.
pub fn parse_optional(
    raw: Option<&str>, message: &'static str, check: fn(Option<u32>) -> Result<Option<u32>, &'static str>,
) -> Result<Option<u32>, &'static str> {
    let value = match raw.map(str::trim) {
        None | Some("") => None,
        Some(s) if s.bytes().all(|b| b.is_ascii_digit()) => Some(s.parse::<u32>().map_err(|_| message)?),
        Some(_) => return Err(message),
    };
    check(value)
}
