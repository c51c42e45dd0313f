//! Keyword search over a bounded window of recent comics.
//!
//! No archive-wide index is kept. A search only ever looks at the
//! `window_size` most recent ids, scanned newest first:
//!
//! - `max(1, max_id - window_size + 1) ..= max_id`, descending
//! - each id resolved through the cache-aware lookup path
//! - ids that fail to resolve (gaps, upstream errors) are skipped
//! - case-insensitive substring match on title or transcript
//!
//! `total` counts every match in the window; `results` is one page of them.

use crate::comic::{Pagination, SearchResult};
use crate::service::ComicService;
use crate::Error;
use futures_util::stream::{self, StreamExt};
use std::time::Instant;

/// Ids scanned for a given latest id, newest first.
pub fn scan_window(max_id: u32, window_size: u32) -> impl Iterator<Item = u32> {
    let window_size = window_size.max(1);
    let start = max_id.saturating_sub(window_size - 1).max(1);
    (start..=max_id).rev()
}

/// Scans the recent window through a [`ComicService`].
pub struct SearchEngine<'a> {
    service: &'a ComicService,
    window_size: u32,
    concurrency: usize,
}

impl<'a> SearchEngine<'a> {
    pub fn new(service: &'a ComicService, window_size: u32, concurrency: usize) -> Self {
        Self { service, window_size, concurrency: concurrency.max(1) }
    }

    /// Run a search and slice the matches down to one page.
    ///
    /// Fails only if the latest comic cannot be resolved.
    pub async fn search(&self, query: &str, pagination: Pagination) -> Result<SearchResult, Error> {
        let start = Instant::now();
        let max_id = self.service.get_latest().await?.id;
        let needle = query.to_lowercase();
        let service = self.service;

        // `buffered` keeps results in scan order
        let resolved: Vec<_> = stream::iter(scan_window(max_id, self.window_size))
            .map(move |id| async move { (id, service.lookup(id).await) })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut skipped = 0usize;
        let matches: Vec<_> = resolved
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(comic) => Some(comic),
                Err(e) => {
                    tracing::debug!(id, error = %e, "skipping comic in search scan");
                    skipped += 1;
                    None
                }
            })
            .filter(|comic| comic.matches(&needle))
            .collect();

        let total = matches.len();
        let results = pagination
            .slice(&matches)
            .into_iter()
            .map(|comic| comic.as_ref().clone())
            .collect();

        tracing::debug!(query, max_id, total, skipped, "search completed in {:?}", start.elapsed());

        Ok(SearchResult { query: query.to_string(), results, total, pagination })
    }
}
