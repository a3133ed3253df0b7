//! Snapshot data model handed from a metrics source to the renderer.
//!
//! A snapshot is an ordered list of `(MetricSample, MetricValue)` pairs. The
//! value's field set decides how the sample is exposed; see
//! [`crate::exposition::Kind`].

pub mod number;
pub mod tags;

use std::collections::BTreeMap;

use serde::Deserialize;

pub use number::Number;
pub use tags::TagSet;

/// Field names recognised in a [`MetricValue`].
pub mod field {
    pub const COUNT: &str = "count";
    pub const VALUE: &str = "value";
    pub const AVG: &str = "avg";
    pub const MAX: &str = "max";
    pub const MIN: &str = "min";
    pub const STD_DEV: &str = "std_dev";
    pub const SUM: &str = "sum";
    pub const P75: &str = "75_percentile";
    pub const P95: &str = "95_percentile";
    pub const P99: &str = "99_percentile";
    pub const P999: &str = "999_percentile";
}

/// Point-in-time view of a registry, in source iteration order.
pub type Snapshot = Vec<(MetricSample, MetricValue)>;

/// One observation point: a metric name plus its labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricSample {
    key: String,
    tags: TagSet,
}

impl MetricSample {
    pub fn new(key: impl Into<String>, tags: TagSet) -> Self {
        Self { key: key.into(), tags }
    }

    /// Sample without labels.
    pub fn untagged(key: impl Into<String>) -> Self {
        Self::new(key, TagSet::new())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }
}

/// Finalized numeric fields of one sample.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MetricValue {
    fields: BTreeMap<String, Number>,
}

impl MetricValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter shape (`count`).
    pub fn counter(count: impl Into<Number>) -> Self {
        Self::new().with_field(field::COUNT, count)
    }

    /// Gauge shape (`value`).
    pub fn gauge(value: impl Into<Number>) -> Self {
        Self::new().with_field(field::VALUE, value)
    }

    /// Summary shape (all ten summary fields).
    pub fn summary(stats: SummaryStats) -> Self {
        Self::new()
            .with_field(field::AVG, stats.avg)
            .with_field(field::COUNT, stats.count)
            .with_field(field::MAX, stats.max)
            .with_field(field::MIN, stats.min)
            .with_field(field::STD_DEV, stats.std_dev)
            .with_field(field::SUM, stats.sum)
            .with_field(field::P75, stats.p75)
            .with_field(field::P95, stats.p95)
            .with_field(field::P99, stats.p99)
            .with_field(field::P999, stats.p999)
    }

    pub fn with_field(mut self, name: impl Into<String>, v: impl Into<Number>) -> Self {
        self.fields.insert(name.into(), v.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<Number> {
        self.fields.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// Summary statistics as produced by a registry's reservoir.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub avg: Number,
    pub count: Number,
    pub max: Number,
    pub min: Number,
    pub std_dev: Number,
    pub sum: Number,
    pub p75: Number,
    pub p95: Number,
    pub p99: Number,
    pub p999: Number,
}
