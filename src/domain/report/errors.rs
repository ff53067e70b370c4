//! Report-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ReportId};

/// Report-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Report was not found by id.
    NotFound(ReportId),
    /// No report matches the presented access token.
    TokenNotFound,
    /// Report exists but has not been paid for.
    NotPaid,
    /// Webhook signature missing or invalid.
    InvalidSignature(String),
    /// Webhook event payload is structurally unusable.
    MalformedEvent(String),
    /// Invalid state for operation.
    InvalidState(String),
    /// Request field validation failed.
    ValidationFailed { field: String, message: String },
    /// Billing collaborator failed.
    PaymentProvider(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ReportError {
    pub fn not_found(id: ReportId) -> Self {
        ReportError::NotFound(id)
    }

    pub fn token_not_found() -> Self {
        ReportError::TokenNotFound
    }

    pub fn not_paid() -> Self {
        ReportError::NotPaid
    }

    pub fn invalid_signature(message: impl Into<String>) -> Self {
        ReportError::InvalidSignature(message.into())
    }

    pub fn malformed_event(message: impl Into<String>) -> Self {
        ReportError::MalformedEvent(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ReportError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn payment_provider(message: impl Into<String>) -> Self {
        ReportError::PaymentProvider(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReportError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReportError::NotFound(_) => ErrorCode::ReportNotFound,
            ReportError::TokenNotFound => ErrorCode::TokenNotFound,
            ReportError::NotPaid => ErrorCode::Forbidden,
            ReportError::InvalidSignature(_) => ErrorCode::Unauthorized,
            ReportError::MalformedEvent(_) => ErrorCode::InvalidFormat,
            ReportError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            ReportError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReportError::PaymentProvider(_) => ErrorCode::PaymentProviderError,
            ReportError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReportError::NotFound(id) => format!("Report not found: {}", id),
            ReportError::TokenNotFound => "Report not found".to_string(),
            ReportError::NotPaid => "Report not paid yet".to_string(),
            ReportError::InvalidSignature(msg) => {
                format!("Webhook signature verification failed: {}", msg)
            }
            ReportError::MalformedEvent(msg) => format!("Malformed webhook event: {}", msg),
            ReportError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ReportError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReportError::PaymentProvider(msg) => format!("Payment provider error: {}", msg),
            ReportError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReportError {}

impl From<DomainError> for ReportError {
    fn from(err: DomainError) -> Self {
        ReportError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_taxonomy() {
        assert_eq!(ReportError::token_not_found().code(), ErrorCode::TokenNotFound);
        assert_eq!(ReportError::not_paid().code(), ErrorCode::Forbidden);
        assert_eq!(
            ReportError::invalid_signature("bad").code(),
            ErrorCode::Unauthorized
        );
        assert_eq!(
            ReportError::validation("brandName", "required").code(),
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn display_includes_context() {
        let id = ReportId::new();
        let msg = format!("{}", ReportError::not_found(id));
        assert!(msg.contains(&id.to_string()));
    }
}
