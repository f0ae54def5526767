//! External collaborators invoked after a purchase is validated.
//!
//! Implementations live elsewhere (payment provider, seat booking system).
//! Errors are opaque to the purchase flow and are handed back to the caller
//! untouched.

use std::sync::Arc;

use boxoffice_core::AccountId;

/// Charges an account.
pub trait PaymentGateway: Send + Sync {
    /// `amount` is in smallest currency unit.
    fn make_payment(&self, account_id: AccountId, amount: u64) -> anyhow::Result<()>;
}

/// Reserves seats for an account.
pub trait SeatReservationGateway: Send + Sync {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> anyhow::Result<()>;
}

impl<T: PaymentGateway + ?Sized> PaymentGateway for Arc<T> {
    fn make_payment(&self, account_id: AccountId, amount: u64) -> anyhow::Result<()> {
        (**self).make_payment(account_id, amount)
    }
}

impl<T: PaymentGateway + ?Sized> PaymentGateway for &T {
    fn make_payment(&self, account_id: AccountId, amount: u64) -> anyhow::Result<()> {
        (**self).make_payment(account_id, amount)
    }
}

impl<T: SeatReservationGateway + ?Sized> SeatReservationGateway for Arc<T> {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> anyhow::Result<()> {
        (**self).reserve_seat(account_id, seat_count)
    }
}

impl<T: SeatReservationGateway + ?Sized> SeatReservationGateway for &T {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> anyhow::Result<()> {
        (**self).reserve_seat(account_id, seat_count)
    }
}
