//! Ticket request value object.

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use boxoffice_core::ValueObject;

use crate::catalog::{TicketCatalog, TicketType};

/// Construction-time failure of a [`TicketRequest`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TicketRequestError {
    /// The type is not a catalog key. `expected` lists the valid types.
    #[error("type must be {expected}")]
    InvalidTicketType { provided: String, expected: String },

    /// The count is not an integer (fractional or non-numeric).
    #[error("ticket count must be an integer")]
    InvalidTicketCount { provided: String },
}

impl TicketRequestError {
    pub fn code(&self) -> &'static str {
        match self {
            TicketRequestError::InvalidTicketType { .. } => "INVALID_TICKET_TYPE",
            TicketRequestError::InvalidTicketCount { .. } => "INVALID_TICKET_COUNT",
        }
    }
}

/// An immutable `(type, count)` pair.
///
/// The type is always a key of the catalog the request was built against.
/// The count may be zero or negative here; the purchase rejects those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRequest {
    ticket_type: TicketType,
    ticket_count: i64,
}

impl ValueObject for TicketRequest {}

impl TicketRequest {
    pub fn new(
        catalog: &TicketCatalog,
        ticket_type: &str,
        ticket_count: i64,
    ) -> Result<Self, TicketRequestError> {
        let ticket_type = resolve_type(catalog, ticket_type)?;
        Ok(Self {
            ticket_type,
            ticket_count,
        })
    }

    /// Build from an untyped count (e.g. a decoded JSON payload).
    ///
    /// Integral numbers are accepted, including floats with no fractional part;
    /// anything else is `InvalidTicketCount`. Integers too large for an `i64`
    /// saturate to `i64::MAX`/`i64::MIN`. The type is checked first.
    pub fn from_json(
        catalog: &TicketCatalog,
        ticket_type: &str,
        ticket_count: &JsonValue,
    ) -> Result<Self, TicketRequestError> {
        let ticket_type = resolve_type(catalog, ticket_type)?;
        let ticket_count =
            integral_count(ticket_count).ok_or_else(|| TicketRequestError::InvalidTicketCount {
                provided: ticket_count.to_string(),
            })?;

        Ok(Self {
            ticket_type,
            ticket_count,
        })
    }

    pub fn ticket_type(&self) -> &TicketType {
        &self.ticket_type
    }

    pub fn ticket_count(&self) -> i64 {
        self.ticket_count
    }
}

fn resolve_type(catalog: &TicketCatalog, name: &str) -> Result<TicketType, TicketRequestError> {
    catalog
        .ticket_type(name)
        .cloned()
        .ok_or_else(|| TicketRequestError::InvalidTicketType {
            provided: name.to_string(),
            expected: catalog.describe_types(),
        })
}

/// Whole numbers outside the `i64` range saturate; the purchase limit rejects them later.
fn integral_count(value: &JsonValue) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if value.as_u64().is_some() {
        return Some(i64::MAX);
    }
    let f = value.as_f64()?;
    // `as` saturates at the i64 bounds.
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> TicketCatalog {
        TicketCatalog::standard()
    }

    #[test]
    fn creates_requests_for_every_catalog_type() {
        let catalog = catalog();
        for (name, count) in [("ADULT", 2), ("CHILD", 3), ("INFANT", 1)] {
            let request = TicketRequest::new(&catalog, name, count).unwrap();
            assert_eq!(request.ticket_type().as_str(), name);
            assert_eq!(request.ticket_count(), count);
        }
    }

    #[test]
    fn unknown_type_lists_valid_types() {
        let err = TicketRequest::new(&catalog(), "INVALID", 1).unwrap_err();

        assert_eq!(err.to_string(), "type must be ADULT, CHILD, or INFANT");
        assert_eq!(err.code(), "INVALID_TICKET_TYPE");
        assert_eq!(
            err,
            TicketRequestError::InvalidTicketType {
                provided: "INVALID".to_string(),
                expected: "ADULT, CHILD, or INFANT".to_string(),
            }
        );
    }

    #[test]
    fn type_names_are_case_sensitive() {
        assert!(TicketRequest::new(&catalog(), "adult", 1).is_err());
    }

    #[test]
    fn fractional_count_is_rejected() {
        let err = TicketRequest::from_json(&catalog(), "ADULT", &json!(2.5)).unwrap_err();

        assert_eq!(err.to_string(), "ticket count must be an integer");
        assert_eq!(err.code(), "INVALID_TICKET_COUNT");
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let err = TicketRequest::from_json(&catalog(), "ADULT", &json!("two")).unwrap_err();
        assert_eq!(
            err,
            TicketRequestError::InvalidTicketCount {
                provided: "\"two\"".to_string()
            }
        );
        assert!(TicketRequest::from_json(&catalog(), "ADULT", &JsonValue::Null).is_err());
    }

    #[test]
    fn type_is_checked_before_count() {
        let err = TicketRequest::from_json(&catalog(), "VIP", &json!(2.5)).unwrap_err();
        assert_eq!(err.code(), "INVALID_TICKET_TYPE");
    }

    #[test]
    fn integral_json_numbers_are_accepted() {
        let catalog = catalog();
        assert_eq!(
            TicketRequest::from_json(&catalog, "CHILD", &json!(4)).unwrap(),
            TicketRequest::new(&catalog, "CHILD", 4).unwrap()
        );
        assert_eq!(
            TicketRequest::from_json(&catalog, "CHILD", &json!(3.0))
                .unwrap()
                .ticket_count(),
            3
        );
    }

    #[test]
    fn oversized_integers_saturate_instead_of_failing() {
        let catalog = catalog();
        for huge in [json!(u64::MAX), json!(1e20)] {
            let request = TicketRequest::from_json(&catalog, "ADULT", &huge).unwrap();
            assert_eq!(request.ticket_count(), i64::MAX);
        }
        assert_eq!(
            TicketRequest::from_json(&catalog, "ADULT", &json!(-1e20))
                .unwrap()
                .ticket_count(),
            i64::MIN
        );
    }

    #[test]
    fn zero_and_negative_counts_are_allowed_at_construction() {
        let catalog = catalog();
        assert_eq!(TicketRequest::new(&catalog, "ADULT", 0).unwrap().ticket_count(), 0);
        assert_eq!(TicketRequest::new(&catalog, "ADULT", -3).unwrap().ticket_count(), -3);
    }

    #[test]
    fn requests_compare_by_value() {
        let catalog = catalog();
        let first = TicketRequest::new(&catalog, "ADULT", 2).unwrap();
        let second = TicketRequest::from_json(&catalog, "ADULT", &json!(2)).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, TicketRequest::new(&catalog, "ADULT", 3).unwrap());
        assert_eq!(first.clone().ticket_count(), first.ticket_count());
    }
}
