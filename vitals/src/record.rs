use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row kind used by the data sheet for origin-level aggregates.
/// Page-level rows carry other values and are excluded from the dashboard.
pub const ORIGIN_KIND: &str = "Origine";

/// One row of performance data for a (date, url, device) combination.
///
/// Fields mirror the source sheet's column order. Status columns are kept
/// verbatim ("FAST" / "AVERAGE" / "SLOW"); numeric columns default to 0 when
/// the source cell is absent or malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub date: DateTime<Utc>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub device: String,
    pub ttfb: f64,
    pub lcp: f64,
    pub lcp_status: String,
    pub inp: f64,
    pub inp_status: String,
    pub cls: f64,
    pub cls_status: String,
    pub overall: String,
}

/// Device class a metric row was collected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    Mobile,
    Desktop,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "Mobile",
            Device::Desktop => "Desktop",
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Device::Mobile
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(Device::Mobile),
            "desktop" => Ok(Device::Desktop),
            other => Err(format!("unknown device '{other}', expected Mobile or Desktop")),
        }
    }
}
