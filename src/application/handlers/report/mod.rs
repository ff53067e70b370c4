//! Report command and query handlers.

mod build_preview;
mod get_full_report;
mod handle_payment_webhook;
mod start_report;

pub use build_preview::{BuildPreviewCommand, BuildPreviewHandler};
pub use get_full_report::{GetFullReportHandler, GetFullReportQuery};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use start_report::{StartReportCommand, StartReportHandler, StartReportResult};
