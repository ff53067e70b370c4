//! HTTP handlers for report endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::report::{
    BuildPreviewHandler, GetFullReportHandler, GetFullReportQuery, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler, StartReportCommand, StartReportHandler,
};
use crate::domain::report::ReportError;
use crate::ports::{BillingProvider, ReportStore};

use super::dto::{ErrorResponse, StartReportRequest, StartReportResponse};

// ════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct ReportAppState {
    pub store: Arc<dyn ReportStore>,
    pub billing: Arc<dyn BillingProvider>,
    pub build_preview: Arc<BuildPreviewHandler>,
}

impl ReportAppState {
    /// Create handlers on demand from the shared state.
    pub fn start_report_handler(&self) -> StartReportHandler {
        StartReportHandler::new(
            self.build_preview.clone(),
            self.store.clone(),
            self.billing.clone(),
        )
    }

    pub fn get_full_report_handler(&self) -> GetFullReportHandler {
        GetFullReportHandler::new(self.store.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.store.clone(), self.billing.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/reports/start - Start a brand availability report
pub async fn start_report(
    State(state): State<ReportAppState>,
    Json(req): Json<StartReportRequest>,
) -> Result<impl IntoResponse, ReportApiError> {
    let result = state
        .start_report_handler()
        .handle(StartReportCommand {
            brand_name: req.brand_name,
        })
        .await?;

    let response = StartReportResponse {
        report_id: result.report.id().to_string(),
        checkout_url: result.checkout_url,
        preview_data: result.report.preview_data().clone(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/reports/:access_token - Fetch a paid full report
pub async fn get_full_report(
    State(state): State<ReportAppState>,
    Path(access_token): Path<String>,
) -> Result<impl IntoResponse, ReportApiError> {
    let full_report = state
        .get_full_report_handler()
        .handle(GetFullReportQuery { access_token })
        .await?;

    Ok(Json(full_report))
}

/// POST /api/webhooks/stripe - Handle Stripe webhook events
pub async fn stripe_webhook(
    State(state): State<ReportAppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ReportApiError> {
    // Absence of the header is only fatal when a secret is configured;
    // the billing adapter decides.
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    Ok(StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
pub struct ReportApiError(ReportError);

impl From<ReportError> for ReportApiError {
    fn from(err: ReportError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ReportApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ReportError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            // Signature and format rejections are a 400 acknowledgement so
            // the sender stops retrying a permanently bad delivery.
            ReportError::InvalidSignature(_) | ReportError::MalformedEvent(_) => {
                StatusCode::BAD_REQUEST
            }
            ReportError::NotFound(_) | ReportError::TokenNotFound => StatusCode::NOT_FOUND,
            ReportError::NotPaid => StatusCode::FORBIDDEN,
            ReportError::InvalidState(_)
            | ReportError::PaymentProvider(_)
            | ReportError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}
