//! Ticket purchasing (application-level orchestration).
//!
//! Validates a purchase against the ticket domain and, only once every check
//! has passed, charges the account and reserves seats through the injected
//! collaborators.

pub mod ports;
pub mod service;

pub use ports::{PaymentGateway, SeatReservationGateway};
pub use service::{PurchaseReceipt, TicketService, TicketServiceError};
