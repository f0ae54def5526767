//! Purchase rejection model.

use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use thiserror::Error;

/// Default upper bound on tickets in a single purchase.
pub const DEFAULT_MAX_TICKETS: u64 = 25;

/// Result type used across the purchase domain.
pub type PurchaseResult<T> = Result<T, PurchaseError>;

/// A purchase was rejected before any external service was invoked.
///
/// Each variant is one rejection kind with its own detail payload, so callers
/// can match exhaustively instead of parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// The account id is not a positive integer. `provided` is the value as
    /// received: a number for numeric input, the raw text otherwise.
    #[error("Account ID must be a positive integer.")]
    InvalidAccountId { provided: JsonValue },

    /// No requests were supplied, or they add up to zero tickets.
    #[error("At least one ticket request is required.")]
    NoTicketsRequested,

    /// A request is malformed or asks for a non-positive number of tickets.
    #[error("{reason}")]
    InvalidTicketRequest { reason: String },

    /// The aggregate ticket count is above the configured maximum.
    #[error("Cannot purchase more than {maximum} tickets at a time.")]
    TicketLimitExceeded { requested: u64, maximum: u64 },

    /// A supervised ticket type was requested without any adult-equivalent ticket.
    #[error("Tickets requiring adult supervision cannot be purchased without at least one adult ticket.")]
    AdultSupervisionRequired,
}

impl PurchaseError {
    pub fn invalid_account_id(provided: impl Into<JsonValue>) -> Self {
        Self::InvalidAccountId {
            provided: provided.into(),
        }
    }

    pub fn invalid_ticket_request(reason: impl Into<String>) -> Self {
        Self::InvalidTicketRequest {
            reason: reason.into(),
        }
    }

    pub fn ticket_limit_exceeded(requested: u64, maximum: u64) -> Self {
        Self::TicketLimitExceeded { requested, maximum }
    }

    /// Stable machine-readable code for this rejection.
    pub fn code(&self) -> &'static str {
        match self {
            PurchaseError::InvalidAccountId { .. } => "ACCOUNT_ID_INVALID",
            PurchaseError::NoTicketsRequested => "NO_TICKETS_REQUESTED",
            PurchaseError::InvalidTicketRequest { .. } => "INVALID_TICKET_REQUEST",
            PurchaseError::TicketLimitExceeded { .. } => "TICKET_LIMIT_EXCEEDED",
            PurchaseError::AdultSupervisionRequired => "ADULT_SUPERVISION_REQUIRED",
        }
    }

    /// Structured detail bag (empty object for kinds without details).
    pub fn details(&self) -> JsonValue {
        match self {
            PurchaseError::InvalidAccountId { provided } => json!({ "provided": provided }),
            PurchaseError::InvalidTicketRequest { reason } => json!({ "reason": reason }),
            PurchaseError::TicketLimitExceeded { requested, maximum } => {
                json!({ "requested": requested, "maximum": maximum })
            }
            PurchaseError::NoTicketsRequested
            | PurchaseError::AdultSupervisionRequired => json!({}),
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

/// Serializable view of a [`PurchaseError`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    pub details: JsonValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_limit_exceeded_carries_requested_and_maximum() {
        let err = PurchaseError::ticket_limit_exceeded(26, DEFAULT_MAX_TICKETS);

        assert_eq!(err.code(), "TICKET_LIMIT_EXCEEDED");
        assert_eq!(err.to_string(), "Cannot purchase more than 25 tickets at a time.");
        assert_eq!(err.details(), json!({ "requested": 26, "maximum": 25 }));
    }

    #[test]
    fn custom_maximum_is_reflected_in_message() {
        let err = PurchaseError::ticket_limit_exceeded(11, 10);
        assert_eq!(err.to_string(), "Cannot purchase more than 10 tickets at a time.");
    }

    #[test]
    fn invalid_account_id_records_provided_value() {
        let err = PurchaseError::invalid_account_id(-1);

        assert_eq!(err.code(), "ACCOUNT_ID_INVALID");
        assert_eq!(err.details(), json!({ "provided": -1 }));
        assert_eq!(
            PurchaseError::invalid_account_id(0).details(),
            json!({ "provided": 0 })
        );
    }

    #[test]
    fn non_numeric_account_id_keeps_raw_text() {
        let err = PurchaseError::invalid_account_id("abc");
        assert_eq!(err.details(), json!({ "provided": "abc" }));
    }

    #[test]
    fn invalid_ticket_request_uses_reason_as_message() {
        let err = PurchaseError::invalid_ticket_request("Number of tickets must be greater than 0");

        assert_eq!(err.code(), "INVALID_TICKET_REQUEST");
        assert_eq!(err.to_string(), "Number of tickets must be greater than 0");
        assert_eq!(
            err.details(),
            json!({ "reason": "Number of tickets must be greater than 0" })
        );
    }

    #[test]
    fn report_serializes_code_message_and_details() {
        let report = PurchaseError::NoTicketsRequested.report();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(
            value,
            json!({
                "code": "NO_TICKETS_REQUESTED",
                "message": "At least one ticket request is required.",
                "details": {}
            })
        );
    }

    #[test]
    fn same_kind_produces_equal_errors() {
        assert_eq!(
            PurchaseError::AdultSupervisionRequired,
            PurchaseError::AdultSupervisionRequired
        );
        assert_eq!(
            PurchaseError::AdultSupervisionRequired.code(),
            "ADULT_SUPERVISION_REQUIRED"
        );
    }
}
