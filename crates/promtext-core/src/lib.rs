//! promtext core: metric snapshot model, metrics source contract, and the
//! Prometheus text exposition renderer.
//!
//! This crate carries no transport or runtime dependencies. The renderer
//! produces an owned, lazy sequence of byte chunks that any transport can
//! drain at its own pace.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. A malformed metric
//! is dropped from the output, never turned into a failed scrape.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod exposition;
pub mod model;
pub mod source;

pub use error::{PromTextError, Result};
pub use exposition::{render, Exposition};
pub use model::{MetricSample, MetricValue, Number, Snapshot, TagSet};
pub use source::{MemorySource, MetricsSource};
