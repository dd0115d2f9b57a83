use serde::Serialize;

/// Aggregate progress of one load batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadProgress {
    /// Keys settled so far, successes and failures alike.
    pub loaded: usize,
    /// Keys in the batch.
    pub total: usize,
    /// `loaded / total` as a whole percentage, rounded down so that 100 is
    /// only ever reported for a finished batch. An empty batch is 100.
    pub percentage: u32,
}

impl LoadProgress {
    /// Progress for `loaded` of `total` keys.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(loaded: usize, total: usize) -> Self {
        let loaded = loaded.min(total);
        let percentage = if total == 0 {
            100
        } else {
            (loaded * 100 / total) as u32
        };
        Self {
            loaded,
            total,
            percentage,
        }
    }

    /// Whether every key has settled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.loaded == self.total
    }
}

/// Settlement state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadStatus {
    /// Not settled yet.
    Pending,
    /// Fetched (or already cached).
    Loaded,
    /// Fetch failed; a placeholder stands in.
    Failed,
}

/// One key of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadTask {
    /// Asset key.
    pub key: String,
    /// Current status.
    pub status: LoadStatus,
}

/// Per-key bookkeeping for one call to
/// [`AssetPreloadCache::load`](super::AssetPreloadCache::load).
///
/// Each task settles at most once, so `loaded` and the percentage never go
/// down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBatch {
    tasks: Vec<LoadTask>,
    settled: usize,
}

impl LoadBatch {
    /// A batch with every key pending.
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            tasks: keys
                .into_iter()
                .map(|key| LoadTask {
                    key: key.to_owned(),
                    status: LoadStatus::Pending,
                })
                .collect(),
            settled: 0,
        }
    }

    /// Record the outcome for task `index` and return the new progress.
    ///
    /// Settling an already-settled or out-of-range task changes nothing.
    pub fn settle(&mut self, index: usize, status: LoadStatus) -> LoadProgress {
        if status != LoadStatus::Pending {
            if let Some(task) = self.tasks.get_mut(index) {
                if task.status == LoadStatus::Pending {
                    task.status = status;
                    self.settled += 1;
                }
            }
        }
        self.progress()
    }

    /// Current progress.
    #[must_use]
    pub fn progress(&self) -> LoadProgress {
        LoadProgress::new(self.settled, self.tasks.len())
    }

    /// Tasks in input order.
    #[must_use]
    pub fn tasks(&self) -> &[LoadTask] {
        &self.tasks
    }

    /// Number of tasks that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == LoadStatus::Failed)
            .count()
    }
}
