//! In-process comic archive for server tests.

use async_trait::async_trait;
use comics_core::{Comic, ComicService, ComicSource, Error, ServiceConfig, TtlCache};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn make_comic(id: u32, title: &str, transcript: &str) -> Comic {
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

pub struct StubSource {
    pub latest: u32,
    pub comics: HashMap<u32, Comic>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl StubSource {
    /// Three comics; only #2 mentions python.
    pub fn archive() -> Self {
        let mut comics = HashMap::new();
        comics.insert(1, make_comic(1, "Barrel - Part 1", ""));
        comics.insert(2, make_comic(2, "Python Love", "[[Python code]]"));
        comics.insert(3, make_comic(3, "Regular Comic", "nothing here"));
        Self { latest: 3, comics, fail: false, calls: AtomicUsize::new(0) }
    }

    /// Every call fails with a 503.
    pub fn failing() -> Self {
        Self { fail: true, ..Self::archive() }
    }
}

#[async_trait]
impl ComicSource for StubSource {
    async fn fetch_latest(&self) -> Result<Comic, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::upstream_status(503, "Service Unavailable"));
        }
        Ok(self.comics[&self.latest].clone())
    }

    async fn fetch_by_id(&self, id: u32) -> Result<Comic, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::upstream_status(503, "Service Unavailable"));
        }
        self.comics.get(&id).cloned().ok_or(Error::ComicNotFound(id))
    }
}

pub fn make_service(source: StubSource) -> Arc<ComicService> {
    make_service_shared(Arc::new(source))
}

/// Like [`make_service`], keeping a handle on the source so tests can read `calls`.
pub fn make_service_shared(source: Arc<StubSource>) -> Arc<ComicService> {
    let cache = Arc::new(TtlCache::new(Duration::from_secs(300)));
    Arc::new(ComicService::new(source, cache, ServiceConfig::default()))
}
