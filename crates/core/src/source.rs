//! Upstream comic source abstraction.

use crate::{Comic, Error};
use async_trait::async_trait;

/// A read-only archive of comics addressed by sequential ids.
///
/// Implementations perform exactly one upstream request per call, do not
/// retry, and never touch the cache.
#[async_trait]
pub trait ComicSource: Send + Sync {
    /// Fetch the newest comic.
    async fn fetch_latest(&self) -> Result<Comic, Error>;

    /// Fetch one comic by id.
    ///
    /// Returns `Error::ComicNotFound` when upstream confirms the id does not exist.
    async fn fetch_by_id(&self, id: u32) -> Result<Comic, Error>;
}
