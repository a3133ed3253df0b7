//! Metrics source contract and an in-memory implementation.
//!
//! The renderer never talks to a registry directly: the HTTP layer pulls one
//! [`Snapshot`] per scrape through [`MetricsSource::dump_metrics`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::model::{MetricSample, MetricValue, Snapshot};

/// Anything that can hand out a point-in-time snapshot of finalized metrics.
///
/// Implementations must tolerate concurrent callers and give each call a
/// consistent view. With `reset == true` the source may clear counters and
/// summaries as a side effect, so callers dump exactly once per scrape.
pub trait MetricsSource: Send + Sync {
    fn dump_metrics(&self, reset: bool) -> Snapshot;
}

#[derive(Default)]
struct Store {
    entries: Snapshot,
    index: HashMap<MetricSample, usize>,
}

/// Thread-safe store of finalized values, dumped in publication order.
#[derive(Default)]
pub struct MemorySource {
    inner: Mutex<Store>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest value for `sample`. A re-published sample keeps its
    /// original position.
    pub fn publish(&self, sample: MetricSample, value: MetricValue) {
        let mut store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = store.index.get(&sample).copied();
        if let Some(i) = existing {
            store.entries[i].1 = value;
            return;
        }
        let i = store.entries.len();
        store.index.insert(sample.clone(), i);
        store.entries.push((sample, value));
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetricsSource for MemorySource {
    fn dump_metrics(&self, reset: bool) -> Snapshot {
        let mut store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if reset {
            std::mem::take(&mut *store).entries
        } else {
            store.entries.clone()
        }
    }
}
