//! Prometheus text exposition renderer.
//!
//! Pipeline: group samples by key -> classify each family from its first
//! entry -> render lines per kind. Output is lazy: one [`Bytes`] chunk per line,
//! produced only when the consumer asks for it, so large registries are never
//! buffered into a single body.

pub mod classify;
pub mod writer;

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use bytes::Bytes;

use crate::model::{MetricValue, Snapshot, TagSet};

pub use classify::Kind;
pub use writer::{escape_label_value, metric_line, QUANTILE_LABEL};

/// Label carrying the configured application name on every sample.
pub const APP_NAME_LABEL: &str = "app_name";

/// Content type of the rendered body.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// All samples sharing one metric name, in snapshot order.
#[derive(Debug, Clone)]
pub struct Family {
    pub name: String,
    pub entries: Vec<(TagSet, MetricValue)>,
}

impl Family {
    /// Kind of the family, decided by its first entry only.
    pub fn kind(&self) -> Option<Kind> {
        self.entries.first().and_then(|(_, v)| Kind::classify(v))
    }
}

/// Group a snapshot by metric name, tagging every sample with `app_name`.
///
/// Families appear in order of first occurrence; entries keep snapshot order.
pub fn group(app_name: &str, snapshot: Snapshot) -> Vec<Family> {
    let mut families: Vec<Family> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (sample, value) in snapshot {
        let tags = sample.tags().with(APP_NAME_LABEL, app_name);
        match index.get(sample.key()) {
            Some(&i) => families[i].entries.push((tags, value)),
            None => {
                index.insert(sample.key().to_string(), families.len());
                families.push(Family {
                    name: sample.key().to_string(),
                    entries: vec![(tags, value)],
                });
            }
        }
    }
    families
}

/// Render one snapshot. Consumes the snapshot; the returned stream owns
/// everything it needs.
pub fn render(app_name: &str, snapshot: Snapshot) -> Exposition {
    Exposition {
        lines: Box::new(families_lines(group(app_name, snapshot))),
        emitted: 0,
        done: false,
    }
}

fn families_lines(families: Vec<Family>) -> impl Iterator<Item = Bytes> + Send {
    families
        .into_iter()
        .filter_map(|family| match family.kind() {
            Some(kind) => Some((kind, family)),
            None => {
                tracing::debug!(metric = %family.name, "skipping metric with unrecognised shape");
                None
            }
        })
        .flat_map(|(kind, family)| family_lines(kind, family))
}

fn family_lines(kind: Kind, family: Family) -> impl Iterator<Item = Bytes> + Send {
    let header = writer::type_line(&family.name, kind);
    let name: Arc<str> = Arc::from(family.name);

    let mut body = family
        .entries
        .into_iter()
        .flat_map(move |(tags, value)| {
            writer::entry_lines(kind, &name, &tags, &value).unwrap_or_else(|| {
                tracing::warn!(
                    metric = %name,
                    kind = kind.as_str(),
                    "skipping entry missing fields required by its family"
                );
                Vec::new()
            })
        })
        .peekable();

    // A family with no renderable entry gets neither header nor separator.
    let non_empty = body.peek().is_some();
    let header = non_empty.then_some(header);
    let separator = non_empty.then(|| Bytes::from_static(b"\n"));

    header.into_iter().chain(body).chain(separator)
}

/// Lazily produced exposition body, one chunk per line.
///
/// Lines are formatted only when pulled. Dropping the value part-way (a
/// client that disconnects) stops formatting.
pub struct Exposition {
    lines: Box<dyn Iterator<Item = Bytes> + Send>,
    emitted: usize,
    done: bool,
}

impl Exposition {
    /// Drain into a blocking writer, line by line.
    pub fn write_to<W: io::Write>(self, mut out: W) -> io::Result<()> {
        for line in self {
            out.write_all(&line)?;
        }
        out.flush()
    }

    /// Number of lines handed out so far.
    pub fn lines_emitted(&self) -> usize {
        self.emitted
    }
}

impl Iterator for Exposition {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        match self.lines.next() {
            Some(line) => {
                self.emitted += 1;
                Some(line)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl Drop for Exposition {
    fn drop(&mut self) {
        if self.done {
            tracing::debug!(lines = self.emitted, "exposition complete");
        } else {
            tracing::debug!(lines = self.emitted, "exposition dropped before completion");
        }
    }
}
