//! HTTP adapters - REST API implementations.

pub mod report;

pub use report::{report_routes, webhook_routes, ReportAppState};
