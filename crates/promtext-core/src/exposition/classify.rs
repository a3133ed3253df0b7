//! Exposition type of a metric family.

use crate::model::{field, MetricValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Counter,
    Gauge,
    Summary,
}

impl Kind {
    /// Pick the type from a value's field set. First match wins:
    /// `avg` => summary, `value` => gauge, `count` => counter.
    pub fn classify(value: &MetricValue) -> Option<Kind> {
        if value.contains(field::AVG) {
            Some(Kind::Summary)
        } else if value.contains(field::VALUE) {
            Some(Kind::Gauge)
        } else if value.contains(field::COUNT) {
            Some(Kind::Counter)
        } else {
            None
        }
    }

    /// Name used on the `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Counter => "counter",
            Kind::Gauge => "gauge",
            Kind::Summary => "summary",
        }
    }
}
