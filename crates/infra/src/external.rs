//! In-memory payment and seat reservation adapters.
//!
//! Intended for tests/dev. Each adapter records the calls it accepted and can
//! be switched into a failing mode to exercise error propagation.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;

use boxoffice_core::AccountId;
use boxoffice_purchasing::{PaymentGateway, SeatReservationGateway};

/// Failures raised by the in-memory adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    #[error("seat reservation failed: {0}")]
    ReservationFailed(String),

    #[error("gateway state lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentRecord {
    pub account_id: AccountId,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatReservationRecord {
    pub account_id: AccountId,
    pub seat_count: u64,
}

/// Payment adapter that keeps every accepted payment in memory.
#[derive(Debug, Default)]
pub struct RecordingPaymentGateway {
    payments: Mutex<Vec<PaymentRecord>>,
    decline_with: Option<String>,
}

impl RecordingPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that declines every payment with `reason`.
    pub fn declining(reason: impl Into<String>) -> Self {
        Self {
            payments: Mutex::default(),
            decline_with: Some(reason.into()),
        }
    }

    /// Recorded payments. Still readable after a poisoned lock.
    pub fn payments(&self) -> Vec<PaymentRecord> {
        self.payments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn total_charged(&self, account_id: AccountId) -> u64 {
        self.payments()
            .iter()
            .filter(|p| p.account_id == account_id)
            .map(|p| p.amount)
            .sum()
    }
}

impl PaymentGateway for RecordingPaymentGateway {
    fn make_payment(&self, account_id: AccountId, amount: u64) -> anyhow::Result<()> {
        if let Some(reason) = &self.decline_with {
            tracing::warn!(%account_id, amount, reason = %reason, "payment declined");
            return Err(GatewayError::PaymentDeclined(reason.clone()).into());
        }

        let mut payments = self.payments.lock().map_err(|_| GatewayError::LockPoisoned)?;
        payments.push(PaymentRecord { account_id, amount });
        tracing::info!(%account_id, amount, "payment recorded");
        Ok(())
    }
}

/// Seat reservation adapter that keeps every accepted reservation in memory.
#[derive(Debug, Default)]
pub struct RecordingSeatReservation {
    reservations: Mutex<Vec<SeatReservationRecord>>,
    fail_with: Option<String>,
}

impl RecordingSeatReservation {
    pub fn new() -> Self {
        Self::default()
    }

    /// An adapter that rejects every reservation with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            reservations: Mutex::default(),
            fail_with: Some(reason.into()),
        }
    }

    pub fn reservations(&self) -> Vec<SeatReservationRecord> {
        self.reservations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn total_reserved(&self, account_id: AccountId) -> u64 {
        self.reservations()
            .iter()
            .filter(|r| r.account_id == account_id)
            .map(|r| r.seat_count)
            .sum()
    }
}

impl SeatReservationGateway for RecordingSeatReservation {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> anyhow::Result<()> {
        if let Some(reason) = &self.fail_with {
            tracing::warn!(%account_id, seat_count, reason = %reason, "seat reservation failed");
            return Err(GatewayError::ReservationFailed(reason.clone()).into());
        }

        let mut reservations = self
            .reservations
            .lock()
            .map_err(|_| GatewayError::LockPoisoned)?;
        reservations.push(SeatReservationRecord {
            account_id,
            seat_count,
        });
        tracing::info!(%account_id, seat_count, "seats reserved");
        Ok(())
    }
}
