//! Router tests driven through `tower::ServiceExt::oneshot` (no TCP port).

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use futures_util::StreamExt;
use tower::ServiceExt; // .oneshot()

use promtext_core::{MemorySource, MetricSample, MetricValue, MetricsSource, Snapshot, TagSet};
use promtext_gateway::{app_state::AppState, config, router::build_router};

// ── Helper ────────────────────────────────────────────────────

fn cfg(extra: &str) -> config::ExporterConfig {
    config::load_from_str(&format!("version: 1\napp:\n  name: \"svc\"\n{extra}")).unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Records how often it was dumped and with which flag.
#[derive(Default)]
struct CountingSource {
    inner: MemorySource,
    dumps: AtomicUsize,
    resets: AtomicUsize,
}

impl MetricsSource for CountingSource {
    fn dump_metrics(&self, reset: bool) -> Snapshot {
        self.dumps.fetch_add(1, Ordering::SeqCst);
        if reset {
            self.resets.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.dump_metrics(reset)
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn healthz_returns_200() {
    let state = AppState::new(&cfg(""), Arc::new(MemorySource::new())).unwrap();
    let resp = build_router(state).oneshot(get_req("/healthz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "ok");
}

#[tokio::test]
async fn empty_registry_scrapes_empty_body() {
    let state = AppState::new(&cfg(""), Arc::new(MemorySource::new())).unwrap();
    let resp = build_router(state).oneshot(get_req("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4"
    );
    assert_eq!(body_string(resp).await, "");
}

#[tokio::test]
async fn scrape_renders_and_resets_once() {
    let source = Arc::new(CountingSource::default());
    let tags: TagSet = [("method", "GET")].into_iter().collect();
    source
        .inner
        .publish(MetricSample::new("http_requests", tags), MetricValue::counter(5));
    source
        .inner
        .publish(MetricSample::untagged("queue_depth"), MetricValue::gauge(3.0));

    let state = AppState::new(&cfg(""), source.clone()).unwrap();
    let resp = build_router(state).oneshot(get_req("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_string(resp).await;
    assert_eq!(
        body,
        "# TYPE http_requests counter\n\
         http_requests{method=\"GET\",app_name=\"svc\"} 5\n\
         \n\
         # TYPE queue_depth gauge\n\
         queue_depth{app_name=\"svc\"} 3.0\n\
         \n"
    );
    assert_eq!(source.dumps.load(Ordering::SeqCst), 1);
    assert_eq!(source.resets.load(Ordering::SeqCst), 1);
    assert!(source.inner.is_empty());
}

#[tokio::test]
async fn endpoint_prefix_moves_route() {
    let cfg = cfg("prometheus:\n  endpoint: \"/ops\"\n");
    let state = AppState::new(&cfg, Arc::new(MemorySource::new())).unwrap();
    let app = build_router(state);

    let resp = app.clone().oneshot(get_req("/ops/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get_req("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dropped_body_leaves_router_usable() {
    let source = Arc::new(CountingSource::default());
    for i in 0..1000 {
        source
            .inner
            .publish(MetricSample::untagged(format!("family_{i}")), MetricValue::counter(i));
    }

    let state = AppState::new(&cfg(""), source.clone()).unwrap();
    let app = build_router(state);

    let resp = app.clone().oneshot(get_req("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let mut frames = resp.into_body().into_data_stream();
    let first = frames.next().await.unwrap().unwrap();
    assert_eq!(&first[..], b"# TYPE family_0 counter\n");
    // client goes away after one frame
    drop(frames);

    assert_eq!(source.dumps.load(Ordering::SeqCst), 1);
    assert!(source.inner.is_empty());

    source
        .inner
        .publish(MetricSample::untagged("after"), MetricValue::gauge(1));
    let resp = app.oneshot(get_req("/metrics")).await.unwrap();
    assert_eq!(
        body_string(resp).await,
        "# TYPE after gauge\nafter{app_name=\"svc\"} 1\n\n"
    );
    assert_eq!(source.dumps.load(Ordering::SeqCst), 2);
}

#[test]
fn missing_app_name_fails_construction() {
    let cfg = config::ExporterConfig {
        version: 1,
        app: config::AppSection { name: None },
        server: config::ServerSection::default(),
        prometheus: config::PrometheusSection::default(),
    };
    let err = AppState::new(&cfg, Arc::new(MemorySource::new())).err().unwrap();
    assert_eq!(err.code().as_str(), "MISSING_CONFIG");
}
