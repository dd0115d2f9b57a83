//! Asset preloading: fetchers, the single-flight cache, per-batch progress,
//! and the placeholder that stands in for failed loads.

/// The preloading cache.
pub mod cache;
/// Fetcher trait, errors, and the filesystem and in-memory fetchers.
pub mod fetch;
/// Loaded data, placeholders, and per-key handles.
pub mod handle;
/// Batch bookkeeping and aggregate progress.
pub mod progress;

pub use cache::AssetPreloadCache;
pub use fetch::{
    AssetFetcher, FetchError, FetchFuture, FsFetcher, MemoryFetcher,
};
pub use handle::{AssetData, AssetHandle, Placeholder};
pub use progress::{LoadBatch, LoadProgress, LoadStatus, LoadTask};
