//! Shared application state for the exporter.
//!
//! Holds the metrics source and the settings read once at startup. Missing
//! configuration fails here, not on the first scrape.

use std::sync::Arc;

use promtext_core::error::Result;
use promtext_core::{exposition, Exposition, MetricsSource};

use crate::config::ExporterConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    source: Arc<dyn MetricsSource>,
}

struct AppStateInner {
    app_name: String,
    metrics_path: String,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: &ExporterConfig, source: Arc<dyn MetricsSource>) -> Result<Self> {
        let app_name = cfg.app.name()?.to_string();
        let metrics_path = cfg.prometheus.metrics_path();

        tracing::info!(app = %app_name, path = %metrics_path, "exporter state ready");

        Ok(Self {
            inner: Arc::new(AppStateInner { app_name, metrics_path }),
            source,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.inner.app_name
    }

    pub fn metrics_path(&self) -> &str {
        &self.inner.metrics_path
    }

    /// Take one snapshot (resetting the source) and render it lazily.
    /// Call exactly once per scrape.
    pub fn scrape(&self) -> Exposition {
        let snapshot = self.source.dump_metrics(true);
        tracing::debug!(samples = snapshot.len(), "snapshot taken");
        exposition::render(self.app_name(), snapshot)
    }
}
