//! Comic service: cache-aware lookups, random picks and search.
//!
//! Construct one instance per process and share it behind an `Arc`. All
//! lookups go through the TTL cache; upstream is only called on a miss or
//! after expiry. Concurrent misses for the same key may each call upstream.

use crate::cache::{CacheKey, TtlCache};
use crate::comic::{Comic, Pagination, SearchResult};
use crate::config::AppConfig;
use crate::search::SearchEngine;
use crate::source::ComicSource;
use crate::Error;
use rand::Rng;
use std::sync::Arc;

/// Default page for search when the caller omits it.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size for search when the caller omits it.
pub const DEFAULT_LIMIT: u32 = 10;

/// Tuning knobs for the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Number of most recent comics scanned by search.
    pub search_window: u32,
    /// Maximum lookups in flight during a search scan.
    pub search_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { search_window: 100, search_concurrency: 8 }
    }
}

impl From<&AppConfig> for ServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self { search_window: config.search_window, search_concurrency: config.search_concurrency }
    }
}

/// Orchestrates the upstream source and the TTL cache.
pub struct ComicService {
    source: Arc<dyn ComicSource>,
    cache: Arc<TtlCache>,
    config: ServiceConfig,
}

impl ComicService {
    /// Create a new service over the given source and cache.
    pub fn new(source: Arc<dyn ComicSource>, cache: Arc<TtlCache>, config: ServiceConfig) -> Self {
        Self { source, cache, config }
    }

    /// Get the newest comic.
    ///
    /// On a miss the fetched comic is stored under both `"latest"` and its own
    /// id, so a following `get_by_id` for it is already warm.
    pub async fn get_latest(&self) -> Result<Arc<Comic>, Error> {
        if let Some(comic) = self.cache.get(CacheKey::Latest) {
            tracing::debug!(id = comic.id, "cache hit for latest comic");
            return Ok(comic);
        }

        tracing::debug!("cache miss for latest comic");
        let comic = Arc::new(self.source.fetch_latest().await?);
        if comic.id == 0 {
            return Err(Error::invalid_payload("latest comic reported id 0"));
        }
        self.cache.put(CacheKey::Latest, Arc::clone(&comic));
        self.cache.put(CacheKey::Id(comic.id), Arc::clone(&comic));

        Ok(comic)
    }

    /// Get a comic by id.
    ///
    /// The id is re-checked here even though the boundary validates it too.
    pub async fn get_by_id(&self, id: i64) -> Result<Arc<Comic>, Error> {
        let id = u32::try_from(id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(Error::InvalidComicId(id))?;

        self.lookup(id).await
    }

    /// Cache-aware fetch of a validated id.
    ///
    /// A payload describing a different comic is rejected and not cached.
    pub(crate) async fn lookup(&self, id: u32) -> Result<Arc<Comic>, Error> {
        let key = CacheKey::Id(id);
        if let Some(comic) = self.cache.get(key) {
            tracing::debug!(id, "cache hit");
            return Ok(comic);
        }

        tracing::debug!(id, "cache miss");
        let comic = Arc::new(self.source.fetch_by_id(id).await?);
        if comic.id != id {
            return Err(Error::invalid_payload(format!("requested comic {id}, upstream returned {}", comic.id)));
        }
        self.cache.put(key, Arc::clone(&comic));

        Ok(comic)
    }

    /// Get a uniformly random comic between 1 and the latest id.
    ///
    /// A drawn id missing upstream surfaces as `ComicNotFound`; no retry.
    pub async fn get_random(&self) -> Result<Arc<Comic>, Error> {
        let max_id = self.get_latest().await?.id;
        let id = rand::thread_rng().gen_range(1..=max_id);
        tracing::debug!(id, max_id, "picked random comic");

        self.lookup(id).await
    }

    /// Search the most recent comics by title and transcript.
    ///
    /// `page` defaults to 1 and `limit` to 10.
    pub async fn search(&self, query: &str, page: Option<u32>, limit: Option<u32>) -> Result<SearchResult, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidArgument("query cannot be empty".into()));
        }

        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page == 0 {
            return Err(Error::InvalidArgument("page must be a positive integer".into()));
        }
        if limit == 0 {
            return Err(Error::InvalidArgument("limit must be a positive integer".into()));
        }

        SearchEngine::new(self, self.config.search_window, self.config.search_concurrency)
            .search(query, Pagination::new(page, limit))
            .await
    }

    /// Get reference to the cache.
    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::UpstreamKind;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    pub(crate) fn make_comic(id: u32, title: &str, transcript: &str) -> Comic {
        Comic {
            id,
            title: title.to_string(),
            img: format!("https://imgs.xkcd.com/comics/comic_{id}.png"),
            alt: format!("alt {id}"),
            transcript: transcript.to_string(),
            year: "2023".to_string(),
            month: "4".to_string(),
            day: "1".to_string(),
            safe_title: title.to_string(),
        }
    }

    /// In-process archive that counts upstream calls.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub latest: u32,
        pub comics: Vec<Comic>,
        pub missing: HashSet<u32>,
        /// Requested id -> id of the comic actually served.
        pub mislabeled: HashMap<u32, u32>,
        pub fail_latest: bool,
        pub latest_calls: AtomicUsize,
        pub id_calls: AtomicUsize,
        pub requested: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        /// Archive of comics 1..=latest titled "Comic {id}".
        pub(crate) fn with_latest(latest: u32) -> Self {
            let comics = (1..=latest).map(|id| make_comic(id, &format!("Comic {id}"), "")).collect();
            Self { latest, comics, ..Default::default() }
        }

        pub(crate) fn upstream_calls(&self) -> usize {
            self.latest_calls.load(Ordering::SeqCst) + self.id_calls.load(Ordering::SeqCst)
        }

        fn find(&self, id: u32) -> Option<Comic> {
            if self.missing.contains(&id) {
                return None;
            }
            self.comics.iter().find(|c| c.id == id).cloned()
        }
    }

    #[async_trait]
    impl ComicSource for FakeSource {
        async fn fetch_latest(&self) -> Result<Comic, Error> {
            self.latest_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_latest {
                return Err(Error::upstream_status(500, "Internal Server Error"));
            }
            self.find(self.latest).ok_or_else(|| Error::upstream("latest missing"))
        }

        async fn fetch_by_id(&self, id: u32) -> Result<Comic, Error> {
            self.id_calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().push(id);
            let served = self.mislabeled.get(&id).copied().unwrap_or(id);
            self.find(served).ok_or(Error::ComicNotFound(id))
        }
    }

    pub(crate) fn make_service(source: Arc<FakeSource>) -> ComicService {
        ComicService::new(source, Arc::new(TtlCache::default()), ServiceConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_latest_normalized_fields() {
        let source = Arc::new(FakeSource {
            latest: 2750,
            comics: vec![make_comic(2750, "Test Comic", "")],
            ..Default::default()
        });
        let service = make_service(Arc::clone(&source));

        let comic = service.get_latest().await.unwrap();
        assert_eq!(comic.id, 2750);
        assert_eq!(comic.title, "Test Comic");
        assert_eq!(comic.transcript, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_latest_cached() {
        let source = Arc::new(FakeSource::with_latest(2750));
        let service = make_service(Arc::clone(&source));

        service.get_latest().await.unwrap();
        service.get_latest().await.unwrap();

        assert_eq!(source.latest_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.upstream_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_latest_warms_id_key() {
        let source = Arc::new(FakeSource::with_latest(2750));
        let service = make_service(Arc::clone(&source));

        let latest = service.get_latest().await.unwrap();
        let by_id = service.get_by_id(2750).await.unwrap();

        assert!(Arc::ptr_eq(&latest, &by_id));
        assert_eq!(source.id_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_id_cached_within_ttl() {
        let source = Arc::new(FakeSource::with_latest(700));
        let service = make_service(Arc::clone(&source));

        let first = service.get_by_id(614).await.unwrap();
        tokio::time::advance(Duration::from_secs(120)).await;
        let second = service.get_by_id(614).await.unwrap();

        assert_eq!(first.id, 614);
        assert_eq!(second.id, 614);
        assert_eq!(source.id_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_id_refetches_after_ttl() {
        let source = Arc::new(FakeSource::with_latest(700));
        let service = make_service(Arc::clone(&source));

        let first = service.get_by_id(614).await.unwrap();
        tokio::time::advance(Duration::from_secs(301)).await;
        let second = service.get_by_id(614).await.unwrap();

        assert_eq!(source.id_calls.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&first, &second));

        // the replacement entry carries a fresh timestamp
        tokio::time::advance(Duration::from_secs(200)).await;
        service.get_by_id(614).await.unwrap();
        assert_eq!(source.id_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_id_rejects_non_positive() {
        let source = Arc::new(FakeSource::with_latest(10));
        let service = make_service(Arc::clone(&source));

        assert!(matches!(service.get_by_id(0).await, Err(Error::InvalidComicId(0))));
        assert!(matches!(service.get_by_id(-1).await, Err(Error::InvalidComicId(-1))));
        assert!(matches!(service.get_by_id(i64::from(u32::MAX) + 1).await, Err(Error::InvalidComicId(_))));
        assert_eq!(source.upstream_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_id_not_found() {
        let source = Arc::new(FakeSource::with_latest(2750));
        let service = make_service(Arc::clone(&source));

        let result = service.get_by_id(999_999).await;
        assert!(matches!(result, Err(Error::ComicNotFound(999_999))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_is_not_cached() {
        let source = Arc::new(FakeSource::with_latest(10));
        let service = make_service(Arc::clone(&source));

        assert!(service.get_by_id(404).await.is_err());
        assert!(service.get_by_id(404).await.is_err());
        assert_eq!(source.id_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upstream_error_propagates() {
        let source = Arc::new(FakeSource { fail_latest: true, ..FakeSource::with_latest(5) });
        let service = make_service(Arc::clone(&source));

        let result = service.get_latest().await;
        assert!(matches!(result, Err(Error::Upstream { status: Some(500), .. })));
        assert!(service.cache().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_random_within_bounds() {
        let source = Arc::new(FakeSource::with_latest(2750));
        let service = make_service(Arc::clone(&source));

        for _ in 0..200 {
            let comic = service.get_random().await.unwrap();
            assert!((1..=2750).contains(&comic.id));
        }
        assert_eq!(source.latest_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_random_single_comic() {
        let source = Arc::new(FakeSource::with_latest(1));
        let service = make_service(Arc::clone(&source));

        let comic = service.get_random().await.unwrap();
        assert_eq!(comic.id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_random_propagates_not_found() {
        let missing: HashSet<u32> = (1..=3).collect();
        let source = Arc::new(FakeSource { missing, ..FakeSource::with_latest(4) });
        let service = make_service(Arc::clone(&source));

        // warm latest so only id 4 resolves without upstream
        service.get_latest().await.unwrap();

        let mut saw_not_found = false;
        for _ in 0..50 {
            match service.get_random().await {
                Ok(comic) => assert_eq!(comic.id, 4),
                Err(Error::ComicNotFound(id)) => {
                    assert!((1..=3).contains(&id));
                    saw_not_found = true;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(saw_not_found);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_applies_defaults() {
        let source = Arc::new(FakeSource::with_latest(30));
        let service = make_service(Arc::clone(&source));

        let result = service.search("comic", None, None).await.unwrap();
        assert_eq!(result.pagination, Pagination { page: 1, limit: 10, offset: 0 });
        assert_eq!(result.total, 30);
        assert_eq!(result.results.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_rejects_bad_arguments() {
        let source = Arc::new(FakeSource::with_latest(30));
        let service = make_service(Arc::clone(&source));

        assert!(matches!(service.search("  ", None, None).await, Err(Error::InvalidArgument(_))));
        assert!(matches!(service.search("x", Some(0), None).await, Err(Error::InvalidArgument(_))));
        assert!(matches!(service.search("x", None, Some(0)).await, Err(Error::InvalidArgument(_))));
        assert_eq!(source.upstream_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_by_id_rejects_mismatched_payload() {
        let source = Arc::new(FakeSource {
            mislabeled: HashMap::from([(5, 7)]),
            ..FakeSource::with_latest(10)
        });
        let service = make_service(Arc::clone(&source));

        let err = service.get_by_id(5).await.unwrap_err();
        assert!(matches!(err, Error::Upstream { kind: UpstreamKind::InvalidPayload, .. }));
        assert!(service.cache().get(CacheKey::Id(5)).is_none());
        assert!(service.cache().get(CacheKey::Id(7)).is_none());

        let comic = service.get_by_id(7).await.unwrap();
        assert_eq!(comic.id, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_latest_rejects_zero_id() {
        let source = Arc::new(FakeSource {
            latest: 0,
            comics: vec![make_comic(0, "Zero", "")],
            ..Default::default()
        });
        let service = make_service(Arc::clone(&source));

        let err = service.get_latest().await.unwrap_err();
        assert!(matches!(err, Error::Upstream { kind: UpstreamKind::InvalidPayload, .. }));
        assert!(service.cache().is_empty());
        assert!(service.get_random().await.is_err());
    }
}
