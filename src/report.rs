//! Parsing of the post-processor's effectiveness report.
//!
//! The external post-processor prints a bounded region delimited by two
//! literal markers. Inside the region, each data line is a whitespace
//! separated triple: metric name, query id, value. Everything else in the
//! region (headers, blank lines) has a different token count and is skipped.

use crate::error::{Result, SweepError};
use std::collections::HashMap;

const BEGIN_MARK: &str = "uploaded ----";
const END_MARK: &str = "---- Done ----";

/// Per-query effectiveness values, keyed by query id then metric name.
///
/// Values stay as the exact strings the report printed; nothing downstream
/// needs them as numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalReport {
    queries: HashMap<String, HashMap<String, String>>,
}

impl EvalReport {
    /// Value for a query/metric pair. Absence is an explicit error so the
    /// sweep can report which lookup failed instead of panicking mid-run.
    pub fn value(&self, query: &str, metric: &str) -> Result<&str> {
        let metrics = self
            .queries
            .get(query)
            .ok_or_else(|| SweepError::MissingQuery {
                query: query.to_string(),
            })?;
        metrics
            .get(metric)
            .map(String::as_str)
            .ok_or_else(|| SweepError::MissingMetric {
                query: query.to_string(),
                metric: metric.to_string(),
            })
    }

    /// All metrics recorded for one query id, if the query appeared at all.
    pub fn metrics(&self, query: &str) -> Option<&HashMap<String, String>> {
        self.queries.get(query)
    }

    /// Query ids seen in the report, in no particular order.
    pub fn query_ids(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }
}

/// Extract the marker-delimited region and collect its metric triples.
///
/// Returns `None` when either marker is missing, which is the
/// post-processor's way of saying there is no usable output region. When an
/// interest set is given, metrics outside it are dropped, but the query id's
/// entry is still created (so a query that only reported uninteresting
/// metrics shows up with an empty mapping rather than not at all).
pub fn parse_report(text: &str, interest_set: Option<&[String]>) -> Option<EvalReport> {
    let begin = text.find(BEGIN_MARK)?;
    let end = text.find(END_MARK)?;
    let region = text.get(begin + BEGIN_MARK.len()..end).unwrap_or("");

    let mut report = EvalReport::default();
    for line in region.lines() {
        let seg: Vec<&str> = line.split_whitespace().collect();
        if seg.len() != 3 {
            continue;
        }
        let (metric, query, value) = (seg[0], seg[1], seg[2]);
        let metrics = report.queries.entry(query.to_string()).or_default();
        if let Some(interest) = interest_set {
            if !interest.iter().any(|m| m == metric) {
                continue;
            }
        }
        metrics.insert(metric.to_string(), value.to_string());
    }
    Some(report)
}

/// Running time reported by the evaluator: the 3rd space-separated token of
/// the first line containing `"Time used:"`, or `"none"` when absent.
pub fn parse_time(text: &str) -> &str {
    for line in text.lines() {
        if line.contains("Time used:") {
            let seg: Vec<&str> = line.split(' ').collect();
            return seg.get(2).copied().unwrap_or("none");
        }
    }
    "none"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interest(metrics: &[&str]) -> Vec<String> {
        metrics.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_parse_report_basic() {
        let text = "uploaded ----\nmap q1 0.50\nP10 q1 0.40\n---- Done ----";
        let report = parse_report(text, Some(&interest(&["map"]))).unwrap();

        assert_eq!(report.value("q1", "map").unwrap(), "0.50");
        // P10 filtered out by the interest set
        assert!(matches!(
            report.value("q1", "P10"),
            Err(SweepError::MissingMetric { .. })
        ));
    }

    #[test]
    fn test_parse_report_no_interest_set_keeps_everything() {
        let text = "uploaded ----\nmap q1 0.50\nP10 q1 0.40\n---- Done ----";
        let report = parse_report(text, None).unwrap();

        assert_eq!(report.value("q1", "map").unwrap(), "0.50");
        assert_eq!(report.value("q1", "P10").unwrap(), "0.40");
    }

    #[test]
    fn test_parse_report_missing_begin_marker() {
        let text = "map q1 0.50\n---- Done ----";
        assert!(parse_report(text, None).is_none());
    }

    #[test]
    fn test_parse_report_missing_end_marker() {
        let text = "uploaded ----\nmap q1 0.50\n";
        assert!(parse_report(text, None).is_none());
    }

    #[test]
    fn test_parse_report_skips_non_triple_lines() {
        let text = "uploaded ----\n\nRun summary for all queries\nmap all 0.3196\nextra tokens on this line here\n---- Done ----";
        let report = parse_report(text, None).unwrap();

        assert_eq!(report.value("all", "map").unwrap(), "0.3196");
        assert_eq!(report.query_ids().count(), 1);
    }

    #[test]
    fn test_parse_report_filtered_query_entry_still_created() {
        let text = "uploaded ----\nnum_ret q1 1000\n---- Done ----";
        let report = parse_report(text, Some(&interest(&["map"]))).unwrap();

        // Query id is present even though every metric was filtered
        assert!(report.metrics("q1").unwrap().is_empty());
        assert!(matches!(
            report.value("q1", "map"),
            Err(SweepError::MissingMetric { .. })
        ));
    }

    #[test]
    fn test_parse_report_missing_query() {
        let text = "uploaded ----\nmap q1 0.50\n---- Done ----";
        let report = parse_report(text, None).unwrap();

        assert!(matches!(
            report.value("q2", "map"),
            Err(SweepError::MissingQuery { .. })
        ));
    }

    #[test]
    fn test_parse_time_found() {
        let text = "some header\nTime used: 12.4 seconds\nmore output\n";
        assert_eq!(parse_time(text), "12.4");
    }

    #[test]
    fn test_parse_time_absent() {
        assert_eq!(parse_time("no timing line here\n"), "none");
    }
}
