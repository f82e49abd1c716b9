//! # Vitals Routes Module
//!
//! This module defines and wires up routes for the `/api/vitals` endpoint group.
//!
//! ## Structure
//! - `get.rs` — GET handlers (raw record listing, dashboard view)
//!
//! ## Usage
//! The `vitals_routes()` function returns a `Router` which is nested under
//! `/vitals` in the main application.

use axum::{Router, routing::get};
use get::{get_dashboard, list_vitals};
use util::state::AppState;

pub mod get;

/// Builds the `/vitals` route group, mapping HTTP methods to handlers.
///
/// - `GET /vitals` → `list_vitals`
/// - `GET /vitals/dashboard` → `get_dashboard`
///
/// # Returns
/// A configured `Router` instance to be nested in the main app.
pub fn vitals_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vitals))
        .route("/dashboard", get(get_dashboard))
}
