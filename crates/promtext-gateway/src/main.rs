//! promtext exporter
//!
//! Serves the process's metrics source over HTTP:
//! - `GET <endpoint>/metrics` in Prometheus text format 0.0.4
//! - `GET /healthz`
//!
//! Usage: `promtext-gateway [config.yaml]` (default `promtext.yaml`).
//!
//! Standalone, the binary serves an empty [`MemorySource`] and is mainly a
//! smoke target for config and routing. Applications embed the exporter by
//! building the router around their own source:
//!
//! ```ignore
//! let source: Arc<MemorySource> = Arc::new(MemorySource::new());
//! let state = AppState::new(&cfg, source.clone())?;
//! let app = router::build_router(state);
//! tokio::spawn(async move { axum::serve(listener, app).await });
//! source.publish(MetricSample::untagged("jobs_done"), MetricValue::counter(3));
//! ```

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use promtext_core::{error::Result, MemorySource};
use promtext_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "promtext.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let source = Arc::new(MemorySource::new());
    let state = AppState::new(&cfg, source)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "promtext exporter starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
