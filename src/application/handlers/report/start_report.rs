//! StartReportHandler - Command handler for starting a report request.

use std::sync::Arc;

use crate::domain::foundation::ReportId;
use crate::domain::report::{Report, ReportError};
use crate::ports::{BillingProvider, CreateCheckoutRequest, ReportStore};

use super::build_preview::{BuildPreviewCommand, BuildPreviewHandler};

/// Command to start a brand availability report.
#[derive(Debug, Clone)]
pub struct StartReportCommand {
    pub brand_name: String,
}

/// Result of a successful report start.
#[derive(Debug, Clone)]
pub struct StartReportResult {
    pub report: Report,
    pub checkout_url: String,
}

/// Handler for starting reports.
///
/// Builds the preview, persists the PENDING report, and opens a checkout
/// session correlated to it. No report is persisted unless the preview was
/// fully assembled first.
pub struct StartReportHandler {
    build_preview: Arc<BuildPreviewHandler>,
    store: Arc<dyn ReportStore>,
    billing: Arc<dyn BillingProvider>,
}

impl StartReportHandler {
    pub fn new(
        build_preview: Arc<BuildPreviewHandler>,
        store: Arc<dyn ReportStore>,
        billing: Arc<dyn BillingProvider>,
    ) -> Self {
        Self {
            build_preview,
            store,
            billing,
        }
    }

    pub async fn handle(&self, cmd: StartReportCommand) -> Result<StartReportResult, ReportError> {
        if cmd.brand_name.trim().is_empty() {
            return Err(ReportError::validation("brandName", "brandName is required"));
        }

        // 1. Aggregate all probe signals (infallible; failures normalized
        //    into per-item statuses).
        let preview = self
            .build_preview
            .handle(BuildPreviewCommand {
                brand_name: cmd.brand_name.clone(),
            })
            .await;

        // 2. Persist the PENDING report.
        let report = Report::new(ReportId::new(), cmd.brand_name, preview)?;
        self.store.create(&report).await?;

        tracing::info!(
            report_id = %report.id(),
            brand_name = report.brand_name(),
            "Report created"
        );

        // 3. Open a checkout session tagged with the report id.
        let checkout = self
            .billing
            .create_checkout(CreateCheckoutRequest {
                report_id: *report.id(),
                brand_name: report.brand_name().to_string(),
            })
            .await
            .map_err(|e| ReportError::payment_provider(e.to_string()))?;

        Ok(StartReportResult {
            report,
            checkout_url: checkout.url,
        })
    }
}
