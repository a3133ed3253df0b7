//! In-memory metrics source.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use promtext_core::{MemorySource, MetricSample, MetricValue, MetricsSource, TagSet};

fn sample(key: &str, zone: &str) -> MetricSample {
    MetricSample::new(key, [("zone", zone)].into_iter().collect::<TagSet>())
}

#[test]
fn dump_keeps_publication_order() {
    let src = MemorySource::new();
    src.publish(sample("b", "1"), MetricValue::counter(1));
    src.publish(sample("a", "1"), MetricValue::counter(2));
    src.publish(sample("b", "2"), MetricValue::counter(3));

    let keys: Vec<_> = src
        .dump_metrics(false)
        .into_iter()
        .map(|(s, _)| format!("{}/{}", s.key(), s.tags().get("zone").unwrap()))
        .collect();
    assert_eq!(keys, vec!["b/1", "a/1", "b/2"]);
}

#[test]
fn republish_replaces_value_in_place() {
    let src = MemorySource::new();
    src.publish(sample("a", "1"), MetricValue::counter(1));
    src.publish(sample("b", "1"), MetricValue::counter(1));
    src.publish(sample("a", "1"), MetricValue::counter(5));

    let snap = src.dump_metrics(false);
    assert_eq!(snap.len(), 2);
    assert_eq!(snap[0].0.key(), "a");
    assert_eq!(snap[0].1, MetricValue::counter(5));
}

#[test]
fn reset_clears_after_dump() {
    let src = MemorySource::new();
    src.publish(sample("a", "1"), MetricValue::gauge(1.5));

    assert_eq!(src.dump_metrics(false).len(), 1);
    assert_eq!(src.dump_metrics(true).len(), 1);
    assert!(src.is_empty());
    assert!(src.dump_metrics(true).is_empty());

    // index is cleared too: republishing appends again
    src.publish(sample("a", "1"), MetricValue::gauge(2.5));
    assert_eq!(src.len(), 1);
}

#[test]
fn concurrent_publish_and_dump() {
    let src = Arc::new(MemorySource::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let src = Arc::clone(&src);
            thread::spawn(move || {
                for i in 0..100 {
                    src.publish(sample("jobs", &format!("{t}-{i}")), MetricValue::counter(i));
                }
            })
        })
        .collect();

    let mut seen = 0;
    for _ in 0..10 {
        seen += src.dump_metrics(true).len();
    }
    for h in handles {
        h.join().unwrap();
    }
    seen += src.dump_metrics(true).len();
    assert_eq!(seen, 400);
}
