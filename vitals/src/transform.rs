use crate::record::MetricRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Turns the raw value grid into typed records, preserving row order.
///
/// Rows shorter than the 12 expected columns are padded: missing string cells
/// become empty, missing or malformed numeric cells become 0. Malformed rows
/// never fail the whole batch.
pub fn records_from_rows(rows: Vec<Vec<String>>) -> Vec<MetricRecord> {
    rows.iter().map(|row| record_from_row(row)).collect()
}

fn record_from_row(row: &[String]) -> MetricRecord {
    MetricRecord {
        date: parse_date(cell(row, 0)),
        url: cell(row, 1).to_string(),
        kind: cell(row, 2).to_string(),
        device: cell(row, 3).to_string(),
        ttfb: parse_metric(cell(row, 4)),
        lcp: parse_metric(cell(row, 5)),
        lcp_status: cell(row, 6).to_string(),
        inp: parse_metric(cell(row, 7)),
        inp_status: cell(row, 8).to_string(),
        cls: parse_metric(cell(row, 9)),
        cls_status: cell(row, 10).to_string(),
        overall: cell(row, 11).to_string(),
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Best-effort numeric parse; anything unparseable is 0.
fn parse_metric(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Best-effort timestamp parse. Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and
/// bare `YYYY-MM-DD` (midnight UTC); anything else is the Unix epoch.
fn parse_date(raw: &str) -> DateTime<Utc> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.and_utc();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_time(NaiveTime::MIN).and_utc();
    }
    DateTime::UNIX_EPOCH
}
