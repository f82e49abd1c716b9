//! Derived views over a fetched batch of metric records.
//!
//! The dashboard works on the full in-memory batch: a `Selection` narrows it
//! to one device and optionally one URL, and the functions here derive the
//! latest snapshot, the four stat cards and the chart series from that
//! filtered subset. Input order is trusted throughout; nothing here sorts.

use crate::record::{Device, MetricRecord, ORIGIN_KIND};
use serde::{Deserialize, Serialize};

/// URL narrowing: either every observed URL or one exact match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSelection {
    All,
    Exact(String),
}

impl UrlSelection {
    pub fn matches(&self, url: &str) -> bool {
        match self {
            UrlSelection::All => true,
            UrlSelection::Exact(selected) => selected == url,
        }
    }
}

impl From<&str> for UrlSelection {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            UrlSelection::All
        } else {
            UrlSelection::Exact(s.to_string())
        }
    }
}

/// The dashboard's filter state.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub device: Device,
    pub url: UrlSelection,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            device: Device::Mobile,
            url: UrlSelection::All,
        }
    }
}

/// One point of the four time-series charts.
///
/// Serialized keys match what the chart components bind to; CLS is scaled to
/// an integer (×1000) so it shares an axis range with the millisecond series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    #[serde(rename = "LCP")]
    pub lcp: f64,
    #[serde(rename = "INP")]
    pub inp: f64,
    #[serde(rename = "CLS")]
    pub cls: i64,
    #[serde(rename = "TTFB")]
    pub ttfb: f64,
}

/// Presentation payload for one of the stat cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub status: String,
    pub trend: String,
}

/// Narrows a batch to the selection: device match, URL match, origin rows only.
/// Row order is preserved.
pub fn filter_records<'a>(records: &'a [MetricRecord], selection: &Selection) -> Vec<&'a MetricRecord> {
    records
        .iter()
        .filter(|r| r.device == selection.device.as_str())
        .filter(|r| selection.url.matches(&r.url))
        .filter(|r| r.kind == ORIGIN_KIND)
        .collect()
}

/// The most recent snapshot under the current selection: the last filtered
/// row, since the sheet appends in collection order.
pub fn latest<'a>(filtered: &[&'a MetricRecord]) -> Option<&'a MetricRecord> {
    filtered.last().copied()
}

/// Unique URLs across the whole batch, in first-seen order. Feeds the URL picker.
pub fn observed_urls(records: &[MetricRecord]) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for record in records {
        if !urls.iter().any(|u| u == &record.url) {
            urls.push(record.url.clone());
        }
    }
    urls
}

/// Projects the filtered rows into chart points: day/month date labels, CLS
/// scaled ×1000 and rounded to the nearest integer.
pub fn chart_points(filtered: &[&MetricRecord]) -> Vec<ChartPoint> {
    filtered
        .iter()
        .map(|r| ChartPoint {
            date: r.date.format("%d/%m").to_string(),
            lcp: r.lcp,
            inp: r.inp,
            cls: (r.cls * 1000.0).round() as i64,
            ttfb: r.ttfb,
        })
        .collect()
}

/// TTFB rating. The sheet carries no status column for TTFB, so it is derived
/// from the same thresholds the cards advertise.
pub fn ttfb_status(ttfb: f64) -> &'static str {
    if ttfb < 200.0 {
        "FAST"
    } else if ttfb < 600.0 {
        "AVERAGE"
    } else {
        "SLOW"
    }
}

/// Assembles the four stat cards from the latest snapshot.
pub fn cards(latest: &MetricRecord) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "LCP (Largest Contentful Paint)".to_string(),
            value: format!("{} ms", latest.lcp),
            status: latest.lcp_status.clone(),
            trend: "Target: < 2.5s".to_string(),
        },
        MetricCard {
            title: "INP (Interaction to Next Paint)".to_string(),
            value: format!("{} ms", latest.inp),
            status: latest.inp_status.clone(),
            trend: "Target: < 200ms".to_string(),
        },
        MetricCard {
            title: "CLS (Cumulative Layout Shift)".to_string(),
            value: format!("{:.3}", latest.cls),
            status: latest.cls_status.clone(),
            trend: "Target: < 0.1".to_string(),
        },
        MetricCard {
            title: "TTFB (Time to First Byte)".to_string(),
            value: format!("{} ms", latest.ttfb),
            status: ttfb_status(latest.ttfb).to_string(),
            trend: "Target: < 200ms".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(date: (i32, u32, u32), url: &str, kind: &str, device: &str) -> MetricRecord {
        MetricRecord {
            date: Utc.with_ymd_and_hms(date.0, date.1, date.2, 0, 0, 0).unwrap(),
            url: url.to_string(),
            kind: kind.to_string(),
            device: device.to_string(),
            ttfb: 164.0,
            lcp: 3284.0,
            lcp_status: "AVERAGE".to_string(),
            inp: 235.0,
            inp_status: "AVERAGE".to_string(),
            cls: 0.380,
            cls_status: "SLOW".to_string(),
            overall: "SLOW".to_string(),
        }
    }

    fn sample_batch() -> Vec<MetricRecord> {
        vec![
            record((2024, 12, 28), "https://a.example/", "Origine", "Mobile"),
            record((2024, 12, 28), "https://a.example/", "Origine", "Desktop"),
            record((2024, 12, 29), "https://b.example/", "Origine", "Mobile"),
            record((2024, 12, 29), "https://a.example/", "Page", "Mobile"),
            record((2024, 12, 30), "https://a.example/", "Origine", "Mobile"),
        ]
    }

    #[test]
    fn filter_keeps_only_the_selected_device() {
        let batch = sample_batch();
        let selection = Selection {
            device: Device::Desktop,
            url: UrlSelection::All,
        };

        let filtered = filter_records(&batch, &selection);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|r| r.device == "Desktop"));
    }

    #[test]
    fn url_all_spans_every_url_and_exact_matches_one() {
        let batch = sample_batch();

        let all = filter_records(&batch, &Selection::default());
        assert_eq!(all.len(), 3);

        let only_b = filter_records(
            &batch,
            &Selection {
                device: Device::Mobile,
                url: UrlSelection::Exact("https://b.example/".to_string()),
            },
        );
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b[0].url, "https://b.example/");
    }

    #[test]
    fn non_origin_rows_never_reach_the_dashboard() {
        let batch = sample_batch();
        let filtered = filter_records(&batch, &Selection::default());
        assert!(filtered.iter().all(|r| r.kind == ORIGIN_KIND));
    }

    #[test]
    fn latest_is_the_last_filtered_row_or_absent() {
        let batch = sample_batch();
        let filtered = filter_records(&batch, &Selection::default());

        let last = latest(&filtered).unwrap();
        assert_eq!(
            (last.date.format("%Y-%m-%d").to_string().as_str(), last.url.as_str()),
            ("2024-12-30", "https://a.example/")
        );

        assert!(latest(&[]).is_none());
    }

    #[test]
    fn observed_urls_dedupe_in_first_seen_order() {
        let batch = sample_batch();
        assert_eq!(
            observed_urls(&batch),
            vec!["https://a.example/", "https://b.example/"]
        );
    }

    #[test]
    fn chart_scales_cls_by_a_thousand_and_rounds() {
        let mut batch = sample_batch();
        batch[0].cls = 0.3804;
        batch[2].cls = 0.0996;

        let filtered = filter_records(&batch, &Selection::default());
        let points = chart_points(&filtered);

        assert_eq!(points[0].cls, 380);
        assert_eq!(points[1].cls, 100);
        assert_eq!(points[0].date, "28/12");
        assert_eq!(points[0].lcp, 3284.0);
        assert_eq!(points[0].ttfb, 164.0);
    }

    #[test]
    fn chart_points_serialize_under_metric_keys() {
        let batch = sample_batch();
        let filtered = filter_records(&batch, &Selection::default());
        let json = serde_json::to_value(chart_points(&filtered)).unwrap();

        assert_eq!(json[0]["LCP"], 3284.0);
        assert_eq!(json[0]["CLS"], 380);
        assert_eq!(json[0]["TTFB"], 164.0);
    }

    #[test]
    fn ttfb_rating_boundaries() {
        assert_eq!(ttfb_status(199.9), "FAST");
        assert_eq!(ttfb_status(200.0), "AVERAGE");
        assert_eq!(ttfb_status(599.9), "AVERAGE");
        assert_eq!(ttfb_status(600.0), "SLOW");
    }

    #[test]
    fn cards_format_values_and_derive_ttfb_status() {
        let batch = sample_batch();
        let cards = cards(&batch[0]);

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "3284 ms");
        assert_eq!(cards[0].status, "AVERAGE");
        assert_eq!(cards[2].value, "0.380");
        assert_eq!(cards[3].status, "FAST");
        assert_eq!(cards[3].trend, "Target: < 200ms");
    }

    #[test]
    fn url_selection_parses_all_case_insensitively() {
        assert_eq!(UrlSelection::from("all"), UrlSelection::All);
        assert_eq!(UrlSelection::from("ALL"), UrlSelection::All);
        assert_eq!(
            UrlSelection::from("https://a.example/"),
            UrlSelection::Exact("https://a.example/".to_string())
        );
    }
}
