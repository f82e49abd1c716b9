//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain, each in its own submodule.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/vitals` → Core Web Vitals data endpoints (raw records and dashboard view)

use crate::routes::{health::health_routes, vitals::vitals_routes};
use axum::Router;
use util::state::AppState;

pub mod common;
pub mod health;
pub mod vitals;

/// Builds the complete application router for all HTTP endpoints.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no state required).
/// - `/vitals` → Metric record listing, backed by the spreadsheet upstream.
/// - `/vitals/dashboard` → Derived dashboard view (cards, chart series).
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/vitals", vitals_routes().with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use sheets::SheetsClient;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(SheetsClient::new().unwrap());
        routes(state)
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_routes_fall_through_to_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dashboard_rejects_an_unknown_device() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/vitals/dashboard?device=tablet")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
    }
}
