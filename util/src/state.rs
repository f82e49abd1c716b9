//! Application state container shared across Axum route handlers.
//!
//! Holds the shared upstream client. It is cheap to clone and passed into
//! route handlers via Axum's `State<T>` extractor.

use sheets::SheetsClient;

/// Central application state shared across the server.
///
/// Currently this is just the spreadsheet values client, whose inner HTTP
/// connection pool is shared between all handlers.
#[derive(Clone)]
pub struct AppState {
    sheets: SheetsClient,
}

impl AppState {
    /// Creates a new `AppState` around the given values client.
    pub fn new(sheets: SheetsClient) -> Self {
        Self { sheets }
    }

    /// Returns a shared reference to the internal `SheetsClient`.
    pub fn sheets(&self) -> &SheetsClient {
        &self.sheets
    }

    /// Returns a cloned copy of the values client.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn sheets_clone(&self) -> SheetsClient {
        self.sheets.clone()
    }
}
