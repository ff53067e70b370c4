//! HTTP adapter for report endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, StartReportRequest, StartReportResponse};
pub use handlers::{ReportApiError, ReportAppState};
pub use routes::{report_routes, webhook_routes};
