//! Core Web Vitals domain types and derivations.
//!
//! `record` defines the typed metric row, `transform` turns raw sheet cells
//! into records, and `dashboard` derives the filtered views the UI consumes
//! (latest metrics, stat cards, chart series).

pub mod dashboard;
pub mod record;
pub mod transform;

pub use record::{Device, MetricRecord, ORIGIN_KIND};
pub use transform::records_from_rows;
