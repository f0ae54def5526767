//! Infrastructure layer: configuration, payload intake, external service adapters.

pub mod config;
pub mod external;
pub mod intake;

pub use config::{ConfigError, ServiceConfig};
pub use external::{
    GatewayError, PaymentRecord, RecordingPaymentGateway, RecordingSeatReservation,
    SeatReservationRecord,
};
pub use intake::{IntakeError, PurchaseCommand, PurchasePayload, TicketLine};
