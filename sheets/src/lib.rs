use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Default A1 range covering the metric columns of the data sheet.
pub const DEFAULT_RANGE: &str = "CWV_Data!A2:L1000";

/// Default base URL of the spreadsheet values API.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Characters that must be escaped when the range is embedded as a path segment.
/// Sheet names may contain spaces; the `!` separator and quotes pass through.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Errors produced while talking to the values API.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("sheet id or API key is not configured")]
    MissingConfig,
    #[error("values request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("values API returned status {0}")]
    UpstreamStatus(StatusCode),
}

/// Where and how to read the metric grid.
///
/// `sheet_id` and `api_key` come from process configuration and may be empty
/// when the deployment is not set up; `is_configured` gates every fetch.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub sheet_id: String,
    pub api_key: String,
    pub range: String,
    pub api_base: String,
}

impl SheetsConfig {
    pub fn new(sheet_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            api_key: api_key.into(),
            range: DEFAULT_RANGE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// False when either identifier is missing, i.e. the upstream cannot be reached.
    pub fn is_configured(&self) -> bool {
        !self.sheet_id.is_empty() && !self.api_key.is_empty()
    }

    /// Full URL of the values endpoint for this sheet and range, without the key.
    pub fn values_url(&self) -> String {
        format!(
            "{}/{}/values/{}",
            self.api_base.trim_end_matches('/'),
            utf8_percent_encode(&self.sheet_id, PATH_SEGMENT),
            utf8_percent_encode(&self.range, PATH_SEGMENT)
        )
    }
}

/// Response shape of `GET .../values/{range}`.
///
/// `values` is absent when the range is empty, which must read as an empty grid.
#[derive(Debug, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(rename = "majorDimension", default)]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// Thin client over the spreadsheet values API.
///
/// Holds a single reqwest `Client`; clone freely, the pool is shared.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
}

impl SheetsClient {
    pub fn new() -> Result<Self, SheetsError> {
        let http = Client::builder()
            .user_agent(concat!("perf-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(20))
            .build()?;
        Ok(Self { http })
    }

    /// Fetches the raw value grid for the configured sheet and range.
    ///
    /// # Errors
    /// * `MissingConfig` when sheet id or API key is empty.
    /// * `UpstreamStatus` on a non-success response.
    /// * `Request` on transport or decode failures.
    pub async fn fetch_values(&self, cfg: &SheetsConfig) -> Result<Vec<Vec<String>>, SheetsError> {
        if !cfg.is_configured() {
            return Err(SheetsError::MissingConfig);
        }

        let resp = self
            .http
            .get(cfg.values_url())
            .query(&[("key", cfg.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SheetsError::UpstreamStatus(status));
        }

        let body: ValueRange = resp.json().await?;
        Ok(body.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_url_escapes_the_range() {
        let mut cfg = SheetsConfig::new("sheet-123", "key-abc");
        cfg.range = "CWV Data!A2:L1000".into();

        assert_eq!(
            cfg.values_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/CWV%20Data!A2:L1000"
        );
    }

    #[test]
    fn config_with_empty_key_is_not_configured() {
        assert!(SheetsConfig::new("sheet-123", "key-abc").is_configured());
        assert!(!SheetsConfig::new("sheet-123", "").is_configured());
        assert!(!SheetsConfig::new("", "key-abc").is_configured());
    }

    #[test]
    fn missing_values_field_reads_as_empty_grid() {
        let body: ValueRange =
            serde_json::from_str(r#"{"range":"CWV_Data!A2:L1000","majorDimension":"ROWS"}"#)
                .unwrap();
        assert!(body.values.is_empty());
    }

    #[test]
    fn grid_rows_deserialize_in_order() {
        let body: ValueRange =
            serde_json::from_str(r#"{"values":[["a","b"],["c"]]}"#).unwrap();
        assert_eq!(body.values, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[tokio::test]
    async fn fetch_with_missing_config_fails_before_any_request() {
        let client = SheetsClient::new().unwrap();
        let cfg = SheetsConfig::new("", "");

        let err = client.fetch_values(&cfg).await.unwrap_err();
        assert!(matches!(err, SheetsError::MissingConfig));
    }
}
