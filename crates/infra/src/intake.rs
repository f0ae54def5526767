//! Decoding of purchase payloads into validated domain inputs.
//!
//! Payload shape:
//!
//! ```json
//! { "account_id": 1, "tickets": [ { "type": "ADULT", "count": 2 } ] }
//! ```
//!
//! The account id is checked before any ticket line, so a payload with both a
//! bad account and a bad line reports the account.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use boxoffice_core::{AccountId, PurchaseError};
use boxoffice_purchasing::{
    PaymentGateway, PurchaseReceipt, SeatReservationGateway, TicketService, TicketServiceError,
};
use boxoffice_tickets::{TicketCatalog, TicketRequest, TicketRequestError};

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("malformed purchase payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A ticket line could not be turned into a request.
    #[error(transparent)]
    Request(#[from] TicketRequestError),

    #[error(transparent)]
    Purchase(#[from] TicketServiceError),
}

impl IntakeError {
    pub fn rejection(&self) -> Option<&PurchaseError> {
        match self {
            IntakeError::Purchase(e) => e.rejection(),
            _ => None,
        }
    }
}

impl From<PurchaseError> for IntakeError {
    fn from(value: PurchaseError) -> Self {
        IntakeError::Purchase(TicketServiceError::Rejected(value))
    }
}

/// One requested ticket line, as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TicketLine {
    #[serde(rename = "type", alias = "ticket_type")]
    pub ticket_type: String,
    #[serde(default)]
    pub count: JsonValue,
}

/// A purchase payload, as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchasePayload {
    #[serde(default)]
    pub account_id: JsonValue,
    #[serde(default)]
    pub tickets: Vec<TicketLine>,
}

/// Validated inputs for [`TicketService::purchase_for_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseCommand {
    pub account_id: AccountId,
    pub requests: Vec<TicketRequest>,
}

impl PurchasePayload {
    pub fn from_json_str(json: &str) -> Result<Self, IntakeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_command(self, catalog: &TicketCatalog) -> Result<PurchaseCommand, IntakeError> {
        let account_id = parse_account_id(&self.account_id)?;
        let requests = self
            .tickets
            .iter()
            .map(|line| TicketRequest::from_json(catalog, &line.ticket_type, &line.count))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PurchaseCommand {
            account_id,
            requests,
        })
    }
}

/// Decode `json` and run it through `service`.
#[tracing::instrument(skip_all)]
pub fn purchase_from_json<P, S>(
    service: &TicketService<P, S>,
    json: &str,
) -> Result<PurchaseReceipt, IntakeError>
where
    P: PaymentGateway,
    S: SeatReservationGateway,
{
    let command = PurchasePayload::from_json_str(json)?.into_command(service.catalog())?;
    Ok(service.purchase_for_account(command.account_id, &command.requests)?)
}

/// Whole numbers are accepted in either integer or float form (`7`, `7.0`),
/// matching how ticket counts are read. Anything else is reported as received.
fn parse_account_id(value: &JsonValue) -> Result<AccountId, PurchaseError> {
    if let Some(id) = value.as_i64() {
        return AccountId::try_from(id);
    }
    if let Some(id) = value.as_u64() {
        return AccountId::try_from(id);
    }
    if let Some(id) = value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f < u64::MAX as f64)
    {
        return AccountId::try_from(id as u64);
    }
    Err(PurchaseError::invalid_account_id(value.clone()))
}
