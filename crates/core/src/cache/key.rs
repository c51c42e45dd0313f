//! Cache keys.

use std::fmt;

/// Key of a cached comic: either a numeric id or the `"latest"` alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Latest,
    Id(u32),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Latest => f.write_str("latest"),
            CacheKey::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<u32> for CacheKey {
    fn from(id: u32) -> Self {
        CacheKey::Id(id)
    }
}
