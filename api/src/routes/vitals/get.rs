use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use sheets::SheetsError;
use std::str::FromStr;
use util::config;
use util::state::AppState;
use validator::Validate;
use vitals::dashboard::{self, ChartPoint, MetricCard, Selection, UrlSelection};
use vitals::{Device, MetricRecord, records_from_rows};

#[derive(Debug, Deserialize, Validate)]
pub struct DashboardQuery {
    pub device: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct DashboardResponse {
    pub urls: Vec<String>,
    pub latest: Option<MetricRecord>,
    pub cards: Vec<MetricCard>,
    pub chart: Vec<ChartPoint>,
    pub last_updated: Option<String>,
}

/// GET /api/vitals
///
/// Retrieve the full list of metric records from the spreadsheet upstream,
/// transformed into typed records in sheet row order.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "date": "2024-12-28T00:00:00Z",
///       "url": "https://www.example.com/",
///       "type": "Origine",
///       "device": "Mobile",
///       "ttfb": 164.0,
///       "lcp": 3284.0,
///       "lcp_status": "AVERAGE",
///       "inp": 235.0,
///       "inp_status": "AVERAGE",
///       "cls": 0.38,
///       "cls_status": "SLOW",
///       "overall": "SLOW"
///     }
///   ],
///   "message": "Metrics retrieved successfully"
/// }
/// ```
///
/// - `500 Internal Server Error` - Missing sheet configuration or upstream failure
pub async fn list_vitals(State(app_state): State<AppState>) -> impl IntoResponse {
    match fetch_records(&app_state).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(records, "Metrics retrieved successfully")),
        ),
        Err(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<MetricRecord>>::error(message)),
        ),
    }
}

/// GET /api/vitals/dashboard
///
/// Retrieve the derived dashboard view for a device/URL selection: the URL
/// picker options, the latest snapshot with its four stat cards, and the
/// chart series for LCP, INP, CLS (×1000) and TTFB.
///
/// Only origin-level rows matching the selection contribute; row order is
/// preserved from the sheet, and the latest snapshot is the last matching row.
///
/// ### Query Parameters
/// - `device` (optional): `Mobile` or `Desktop` (default: `Mobile`)
/// - `url` (optional): `all` or an exact URL (default: `all`)
///
/// ### Examples
/// ```http
/// GET /api/vitals/dashboard
/// GET /api/vitals/dashboard?device=Desktop
/// GET /api/vitals/dashboard?device=Mobile&url=https://www.example.com/
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "urls": ["https://www.example.com/"],
///     "latest": { "date": "2024-12-30T00:00:00Z", "lcp": 3100.0, "...": "..." },
///     "cards": [
///       {
///         "title": "LCP (Largest Contentful Paint)",
///         "value": "3100 ms",
///         "status": "AVERAGE",
///         "trend": "Target: < 2.5s"
///       }
///     ],
///     "chart": [
///       { "date": "30/12", "LCP": 3100.0, "INP": 225.0, "CLS": 320, "TTFB": 155.0 }
///     ],
///     "last_updated": "30/12/2024 00:00"
///   },
///   "message": "Dashboard retrieved successfully"
/// }
/// ```
///
/// - `400 Bad Request` - Unrecognized device or invalid query parameters
/// - `500 Internal Server Error` - Missing sheet configuration or upstream failure
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<DashboardResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let selection = match selection_from_query(&query) {
        Ok(selection) => selection,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<DashboardResponse>::error(message)),
            );
        }
    };

    let records = match fetch_records(&app_state).await {
        Ok(records) => records,
        Err(message) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DashboardResponse>::error(message)),
            );
        }
    };

    let filtered = dashboard::filter_records(&records, &selection);
    let chart = dashboard::chart_points(&filtered);
    let latest = dashboard::latest(&filtered).cloned();

    let response = DashboardResponse {
        urls: dashboard::observed_urls(&records),
        cards: latest.as_ref().map(dashboard::cards).unwrap_or_default(),
        chart,
        last_updated: latest
            .as_ref()
            .map(|r| r.date.format("%d/%m/%Y %H:%M").to_string()),
        latest,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            response,
            "Dashboard retrieved successfully",
        )),
    )
}

/// Resolves the query into a typed selection, defaulting to Mobile across
/// all URLs when a parameter is absent.
fn selection_from_query(query: &DashboardQuery) -> Result<Selection, String> {
    let device = match query.device.as_deref() {
        Some(raw) => Device::from_str(raw)?,
        None => Device::default(),
    };

    let url = query
        .url
        .as_deref()
        .map(UrlSelection::from)
        .unwrap_or(UrlSelection::All);

    Ok(Selection { device, url })
}

/// Fetches and transforms the sheet rows, collapsing both failure kinds to
/// the generic messages the client sees. Causes are logged here only.
async fn fetch_records(app_state: &AppState) -> Result<Vec<MetricRecord>, &'static str> {
    let cfg = config::sheets_config();
    match app_state.sheets().fetch_values(&cfg).await {
        Ok(rows) => Ok(records_from_rows(rows)),
        Err(SheetsError::MissingConfig) => {
            tracing::error!("sheet id or API key missing from configuration");
            Err("Missing configuration")
        }
        Err(e) => {
            tracing::error!("failed to fetch sheet values: {e}");
            Err("Failed to fetch data")
        }
    }
}
