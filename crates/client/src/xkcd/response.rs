//! xkcd API response types and normalization.

use comics_core::Comic;
use serde::Deserialize;

/// Raw comic document from `info.0.json`.
///
/// Extra upstream fields (`link`, `news`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawComic {
    pub num: u32,
    pub title: String,
    pub img: String,
    pub alt: String,
    #[serde(default)]
    pub transcript: Option<String>,
    pub year: String,
    pub month: String,
    pub day: String,
    pub safe_title: String,
}

impl From<RawComic> for Comic {
    /// Normalize the raw payload; a missing or null transcript becomes "".
    fn from(raw: RawComic) -> Self {
        Comic {
            id: raw.num,
            title: raw.title,
            img: raw.img,
            alt: raw.alt,
            transcript: raw.transcript.unwrap_or_default(),
            year: raw.year,
            month: raw.month,
            day: raw.day,
            safe_title: raw.safe_title,
        }
    }
}
