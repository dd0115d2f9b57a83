//! Preloading asset cache with single-flight fetches.
//!
//! The cache is single-threaded: state lives behind `Rc<RefCell<_>>` and
//! fetches are `!Send` local futures. A batch resolves only after every
//! key settles; failures degrade to placeholders and are never memoised,
//! so a later batch retries them.

use std::cell::RefCell;
use std::rc::Rc;

use futures_util::future::Shared;
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use rustc_hash::FxHashMap;

use super::fetch::{AssetFetcher, FetchFuture};
use super::handle::{AssetData, AssetHandle, Placeholder};
use super::progress::{LoadBatch, LoadProgress, LoadStatus};

type SharedFetch = Shared<FetchFuture>;

#[derive(Default)]
struct CacheState {
    /// Successfully loaded assets.
    entries: FxHashMap<Rc<str>, AssetData>,
    /// At most one outstanding fetch per key, shared by every batch that
    /// asks for it.
    in_flight: FxHashMap<Rc<str>, SharedFetch>,
}

/// Key → asset cache that preloads batches with aggregate progress.
///
/// Cloning yields another handle onto the same cache.
#[derive(Clone)]
pub struct AssetPreloadCache {
    fetcher: Rc<dyn AssetFetcher>,
    state: Rc<RefCell<CacheState>>,
}

impl AssetPreloadCache {
    /// Empty cache fetching through `fetcher`.
    #[must_use]
    pub fn new(fetcher: impl AssetFetcher + 'static) -> Self {
        Self {
            fetcher: Rc::new(fetcher),
            state: Rc::new(RefCell::new(CacheState::default())),
        }
    }

    /// Load every key, reporting progress as each one settles.
    ///
    /// Resolves to one handle per key, in input order, once all have
    /// settled; never fails. Cached keys settle immediately. A key already
    /// being fetched by another batch joins that fetch instead of issuing
    /// a new one. `on_progress` sees a non-decreasing percentage and
    /// reaches 100 exactly once, on the last key (or immediately, for an
    /// empty batch).
    pub async fn load<K: AsRef<str>>(
        &self,
        keys: &[K],
        mut on_progress: impl FnMut(LoadProgress),
    ) -> Vec<AssetHandle> {
        let mut batch =
            LoadBatch::new(keys.iter().map(|k| -> &str { k.as_ref() }));
        let mut handles: Vec<Option<AssetHandle>> =
            keys.iter().map(|_| None).collect();
        let mut pending = FuturesUnordered::new();

        if keys.is_empty() {
            on_progress(batch.progress());
        }

        for (index, key) in keys.iter().enumerate() {
            let key: &str = key.as_ref();
            let key: Rc<str> = Rc::from(key);
            if let Some(data) = self.cached(&key) {
                handles[index] = Some(AssetHandle::Loaded { key, data });
                on_progress(batch.settle(index, LoadStatus::Loaded));
                continue;
            }
            let fetch = self.join_or_start(&key);
            let awaited = fetch.clone();
            pending.push(async move { (index, key, awaited, fetch.await) });
        }

        while let Some((index, key, fetch, result)) = pending.next().await {
            let (handle, status) = match result {
                Ok(data) => {
                    self.finish(&key, &fetch, Some(&data));
                    (AssetHandle::Loaded { key, data }, LoadStatus::Loaded)
                }
                Err(err) => {
                    log::warn!("{err}; using placeholder");
                    self.finish(&key, &fetch, None);
                    (
                        AssetHandle::Placeholder {
                            key,
                            placeholder: Placeholder,
                        },
                        LoadStatus::Failed,
                    )
                }
            };
            handles[index] = Some(handle);
            on_progress(batch.settle(index, status));
        }

        if batch.failed() > 0 {
            log::info!(
                "asset batch settled: {} of {} failed",
                batch.failed(),
                keys.len()
            );
        }

        handles
            .into_iter()
            .zip(keys)
            .map(|(handle, key)| {
                let key: &str = key.as_ref();
                handle.unwrap_or_else(|| AssetHandle::Placeholder {
                    key: Rc::from(key),
                    placeholder: Placeholder,
                })
            })
            .collect()
    }

    fn cached(&self, key: &str) -> Option<AssetData> {
        self.state.borrow().entries.get(key).cloned()
    }

    fn join_or_start(&self, key: &Rc<str>) -> SharedFetch {
        let existing = self.state.borrow().in_flight.get(key).cloned();
        if let Some(fetch) = existing {
            log::debug!("joining in-flight fetch of '{key}'");
            return fetch;
        }
        let fetch = self.fetcher.fetch(key).shared();
        let _ = self
            .state
            .borrow_mut()
            .in_flight
            .insert(Rc::clone(key), fetch.clone());
        fetch
    }

    /// Retire the in-flight entry for `key`, keeping the data on success.
    ///
    /// Only the entry for `fetch` itself is removed: a batch settling late
    /// on a failed fetch must not retire a retry started since.
    fn finish(
        &self,
        key: &Rc<str>,
        fetch: &SharedFetch,
        data: Option<&AssetData>,
    ) {
        let mut state = self.state.borrow_mut();
        if state
            .in_flight
            .get(key)
            .is_some_and(|current| current.ptr_eq(fetch))
        {
            let _ = state.in_flight.remove(key);
        }
        if let Some(data) = data {
            let _ = state.entries.insert(Rc::clone(key), data.clone());
        }
    }

    /// Whether `key` is loaded. Never fetches.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.state.borrow().entries.contains_key(key)
    }

    /// Handle for a loaded `key`. Never fetches or blocks.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<AssetHandle> {
        let state = self.state.borrow();
        state
            .entries
            .get_key_value(key)
            .map(|(key, data)| AssetHandle::Loaded {
                key: Rc::clone(key),
                data: data.clone(),
            })
    }

    /// Number of loaded assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Whether nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Number of fetches currently outstanding.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.state.borrow().in_flight.len()
    }

    /// Drop every loaded asset. Outstanding fetches are unaffected.
    pub fn clear(&self) {
        self.state.borrow_mut().entries.clear();
    }
}

impl std::fmt::Debug for AssetPreloadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetPreloadCache")
            .field("loaded", &self.len())
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}
