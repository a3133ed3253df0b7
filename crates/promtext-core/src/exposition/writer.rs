//! Line-level formatting for the text exposition format (0.0.4).

use std::fmt::Write;

use bytes::Bytes;

use crate::model::{field, MetricValue, Number, TagSet};

use super::Kind;

/// Label added to the per-quantile summary lines.
pub const QUANTILE_LABEL: &str = "quantile";

struct SummaryLine {
    suffix: &'static str,
    field: &'static str,
    quantile: Option<&'static str>,
}

const fn plain(suffix: &'static str, field: &'static str) -> SummaryLine {
    SummaryLine { suffix, field, quantile: None }
}

const fn quantile(q: &'static str, field: &'static str) -> SummaryLine {
    SummaryLine { suffix: "", field, quantile: Some(q) }
}

// Emission order of one summary entry.
const SUMMARY_LINES: [SummaryLine; 10] = [
    plain("_avg", field::AVG),
    plain("_count", field::COUNT),
    plain("_max", field::MAX),
    plain("_min", field::MIN),
    plain("_std_dev", field::STD_DEV),
    plain("_sum", field::SUM),
    quantile("0.75", field::P75),
    quantile("0.95", field::P95),
    quantile("0.99", field::P99),
    quantile("0.999", field::P999),
];

/// Escape a label value: backslash first, then quote, then newline.
pub fn escape_label_value(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// `# TYPE <name> <kind>\n`
pub fn type_line(name: &str, kind: Kind) -> Bytes {
    Bytes::from(format!("# TYPE {} {}\n", name, kind.as_str()))
}

/// `<name>{<label>="<value>",...} <number>\n`, braces omitted when `tags` is empty.
pub fn metric_line(name: &str, tags: &TagSet, value: Number) -> Bytes {
    let mut out = String::with_capacity(name.len() + 32 * (tags.len() + 1));
    out.push_str(name);
    if !tags.is_empty() {
        out.push('{');
        for (i, (k, v)) in tags.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}=\"{}\"", k, escape_label_value(v));
        }
        out.push('}');
    }
    let _ = writeln!(out, " {}", value);
    Bytes::from(out)
}

/// All lines for one entry of a family, or `None` when the entry lacks a
/// field its family's kind requires.
pub fn entry_lines(
    kind: Kind,
    name: &str,
    tags: &TagSet,
    value: &MetricValue,
) -> Option<Vec<Bytes>> {
    match kind {
        Kind::Counter => Some(vec![metric_line(name, tags, value.get(field::COUNT)?)]),
        Kind::Gauge => Some(vec![metric_line(name, tags, value.get(field::VALUE)?)]),
        Kind::Summary => SUMMARY_LINES
            .iter()
            .map(|line| {
                let v = value.get(line.field)?;
                Some(match line.quantile {
                    None => metric_line(&format!("{name}{}", line.suffix), tags, v),
                    Some(q) => metric_line(name, &tags.with(QUANTILE_LABEL, q), v),
                })
            })
            .collect(),
    }
}
