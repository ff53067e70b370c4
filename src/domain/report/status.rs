//! Report status state machine.
//!
//! A report starts PENDING when the preview is built and becomes PAID when
//! the billing processor confirms checkout. PAID is terminal.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a brand availability report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    /// Preview built and persisted; full report locked until payment.
    Pending,

    /// Payment confirmed; access token minted, full report available.
    Paid,
}

impl ReportStatus {
    /// Returns true if the full report may be served.
    pub fn is_paid(&self) -> bool {
        matches!(self, ReportStatus::Paid)
    }
}

impl StateMachine for ReportStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (ReportStatus::Pending, ReportStatus::Paid))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ReportStatus::Pending => vec![ReportStatus::Paid],
            ReportStatus::Paid => vec![],
        }
    }
}
