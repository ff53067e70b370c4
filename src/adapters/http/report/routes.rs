//! HTTP routes for report endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_full_report, start_report, stripe_webhook, ReportAppState};

/// Create the report API router.
///
/// # Routes
///
/// - `POST /start` - Start a report (probe fan-out + checkout session)
/// - `GET /:access_token` - Fetch a paid full report by bearer token
pub fn report_routes() -> Router<ReportAppState> {
    Router::new()
        .route("/start", post(start_report))
        .route("/:access_token", get(get_full_report))
}

/// Create the payment webhook router.
///
/// Separate from the report routes because webhooks carry no user identity;
/// they are authenticated via signature inside the billing adapter.
pub fn webhook_routes() -> Router<ReportAppState> {
    Router::new().route("/stripe", post(stripe_webhook))
}
