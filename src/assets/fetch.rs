use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use futures_util::future::{self, LocalBoxFuture};
use futures_util::FutureExt;
use rustc_hash::FxHashMap;

use super::handle::AssetData;

/// A single key failed to fetch.
///
/// Never escapes [`AssetPreloadCache::load`](super::AssetPreloadCache::load),
/// which turns it into a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    key: String,
    reason: String,
}

impl FetchError {
    /// Failure of `key` for `reason`.
    #[must_use]
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The key that failed.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Why it failed.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to fetch '{}': {}", self.key, self.reason)
    }
}

impl std::error::Error for FetchError {}

/// Future returned by [`AssetFetcher::fetch`].
pub type FetchFuture = LocalBoxFuture<'static, Result<AssetData, FetchError>>;

/// Source of asset bytes.
///
/// Fetch futures must own everything they need: the cache may keep polling
/// them after the batch that started them has been dropped.
pub trait AssetFetcher {
    /// Begin fetching `key`.
    fn fetch(&self, key: &str) -> FetchFuture;
}

/// Reads keys as relative paths under a root directory.
///
/// Keys that are absolute or climb out of the root with `..` fail.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Fetcher rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Option<PathBuf> {
        let relative = Path::new(key);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        contained.then(|| self.root.join(relative))
    }
}

impl AssetFetcher for FsFetcher {
    fn fetch(&self, key: &str) -> FetchFuture {
        let key = key.to_owned();
        let Some(path) = self.resolve(&key) else {
            return future::ready(Err(FetchError::new(
                key,
                "key escapes the asset root",
            )))
            .boxed_local();
        };
        async move {
            std::fs::read(&path)
                .map(AssetData::from)
                .map_err(|e| FetchError::new(key, e.to_string()))
        }
        .boxed_local()
    }
}

/// Serves keys from an in-memory table; unknown keys fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    assets: FxHashMap<String, AssetData>,
}

impl MemoryFetcher {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace `key`.
    pub fn insert(&mut self, key: impl Into<String>, data: AssetData) {
        let _ = self.assets.insert(key.into(), data);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, data: AssetData) -> Self {
        self.insert(key, data);
        self
    }
}

impl AssetFetcher for MemoryFetcher {
    fn fetch(&self, key: &str) -> FetchFuture {
        let result = self
            .assets
            .get(key)
            .cloned()
            .ok_or_else(|| FetchError::new(key, "not found"));
        future::ready(result).boxed_local()
    }
}

impl<T: AssetFetcher + ?Sized> AssetFetcher for Rc<T> {
    fn fetch(&self, key: &str) -> FetchFuture {
        (**self).fetch(key)
    }
}
