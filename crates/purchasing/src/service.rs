//! Ticket purchase pipeline.
//!
//! ```text
//! purchase_tickets(account_id, requests)
//!   ↓
//! 1. Validate account id (positive integer)
//!   ↓
//! 2. Validate requests (non-empty, catalog types, counts > 0)
//!   ↓
//! 3. Build summary + total ticket count
//!   ↓
//! 4. Business rules (minimum, maximum, supervision)
//!   ↓
//! 5. Compute amount + seats
//!   ↓
//! 6. Payment      (only if amount > 0)
//!   ↓
//! 7. Reservation  (only if seats > 0)
//! ```
//!
//! Steps 1–4 are hard gates: nothing external happens unless all of them pass.
//! A failing collaborator aborts the remaining steps; there is no compensation.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use boxoffice_core::{AccountId, PurchaseError};
use boxoffice_tickets::{
    BusinessRuleValidator, PurchasePolicy, PurchaseTotals, TicketCalculator, TicketCatalog,
    TicketRequest,
};

use crate::ports::{PaymentGateway, SeatReservationGateway};

#[derive(Debug, Error)]
pub enum TicketServiceError {
    /// The purchase failed validation; no collaborator was called.
    #[error(transparent)]
    Rejected(#[from] PurchaseError),

    /// The payment collaborator failed. Its error is passed through as-is.
    #[error(transparent)]
    Payment(anyhow::Error),

    /// The seat reservation collaborator failed (payment may already have been taken).
    #[error(transparent)]
    SeatReservation(anyhow::Error),
}

impl TicketServiceError {
    pub fn rejection(&self) -> Option<&PurchaseError> {
        match self {
            TicketServiceError::Rejected(e) => Some(e),
            _ => None,
        }
    }

    /// The collaborator's own error, if a collaborator failed.
    pub fn into_collaborator_error(self) -> Option<anyhow::Error> {
        match self {
            TicketServiceError::Rejected(_) => None,
            TicketServiceError::Payment(e) | TicketServiceError::SeatReservation(e) => Some(e),
        }
    }
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub account_id: AccountId,
    #[serde(flatten)]
    pub totals: PurchaseTotals,
}

/// Purchase entry point.
///
/// Stateless between calls: the catalog is shared read-only and each purchase
/// builds its own summary, so one service can be used from many threads as
/// long as the collaborators allow it.
pub struct TicketService<P, S> {
    catalog: Arc<TicketCatalog>,
    policy: PurchasePolicy,
    payments: P,
    seats: S,
}

impl<P, S> TicketService<P, S>
where
    P: PaymentGateway,
    S: SeatReservationGateway,
{
    /// Standard catalog and default policy.
    pub fn new(payments: P, seats: S) -> Self {
        Self::with_catalog(
            Arc::new(TicketCatalog::standard()),
            PurchasePolicy::default(),
            payments,
            seats,
        )
    }

    pub fn with_catalog(
        catalog: Arc<TicketCatalog>,
        policy: PurchasePolicy,
        payments: P,
        seats: S,
    ) -> Self {
        Self {
            catalog,
            policy,
            payments,
            seats,
        }
    }

    pub fn catalog(&self) -> &TicketCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> PurchasePolicy {
        self.policy
    }

    /// Validate, price and fulfil a purchase for a raw account id.
    #[tracing::instrument(skip(self, requests), fields(requests = requests.len()))]
    pub fn purchase_tickets(
        &self,
        account_id: i64,
        requests: &[TicketRequest],
    ) -> Result<PurchaseReceipt, TicketServiceError> {
        let account_id = AccountId::try_from(account_id).map_err(reject)?;
        self.purchase_for_account(account_id, requests)
    }

    /// Same as [`purchase_tickets`](Self::purchase_tickets) for an already
    /// validated account id.
    #[tracing::instrument(skip(self, requests), fields(%account_id, requests = requests.len()))]
    pub fn purchase_for_account(
        &self,
        account_id: AccountId,
        requests: &[TicketRequest],
    ) -> Result<PurchaseReceipt, TicketServiceError> {
        self.validate_requests(requests).map_err(reject)?;

        let calculator = TicketCalculator::new(&self.catalog);
        let summary = calculator.build_summary(requests);
        let total_tickets = calculator.total_ticket_count(&summary);

        BusinessRuleValidator::new(&self.catalog, self.policy)
            .validate(&summary, total_tickets)
            .map_err(reject)?;

        let totals = calculator.totals(&summary);
        tracing::debug!(
            total_tickets = totals.total_tickets,
            total_amount = totals.total_amount,
            total_seats = totals.total_seats,
            "purchase validated"
        );

        if totals.total_amount > 0 {
            tracing::debug!(amount = totals.total_amount, "requesting payment");
            self.payments
                .make_payment(account_id, totals.total_amount)
                .map_err(TicketServiceError::Payment)?;
        }

        if totals.total_seats > 0 {
            tracing::debug!(seats = totals.total_seats, "requesting seat reservation");
            self.seats
                .reserve_seat(account_id, totals.total_seats)
                .map_err(TicketServiceError::SeatReservation)?;
        }

        tracing::info!(
            total_tickets = totals.total_tickets,
            total_amount = totals.total_amount,
            total_seats = totals.total_seats,
            "tickets purchased"
        );

        Ok(PurchaseReceipt { account_id, totals })
    }

    fn validate_requests(&self, requests: &[TicketRequest]) -> Result<(), PurchaseError> {
        if requests.is_empty() {
            return Err(PurchaseError::NoTicketsRequested);
        }

        for request in requests {
            let ticket_type = request.ticket_type();
            if !self.catalog.contains(ticket_type.as_str()) {
                return Err(PurchaseError::invalid_ticket_request(format!(
                    "ticket type {ticket_type} is not offered (expected {})",
                    self.catalog.describe_types()
                )));
            }
            if request.ticket_count() <= 0 {
                return Err(PurchaseError::invalid_ticket_request(
                    "Number of tickets must be greater than 0",
                ));
            }
        }

        Ok(())
    }
}

fn reject(err: PurchaseError) -> TicketServiceError {
    tracing::warn!(code = err.code(), error = %err, "purchase rejected");
    TicketServiceError::Rejected(err)
}
