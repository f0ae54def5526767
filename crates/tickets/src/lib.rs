//! Ticket domain module.
//!
//! Catalog, requests, price/seat calculation and the purchase-level business
//! rules, implemented purely as deterministic domain logic (no IO, no payment,
//! no seat booking).

pub mod calculator;
pub mod catalog;
pub mod request;
pub mod rules;

pub use calculator::{PurchaseTotals, TicketCalculator, TicketSummary};
pub use catalog::{CatalogEntry, CatalogError, CatalogRow, TicketCatalog, TicketType};
pub use request::{TicketRequest, TicketRequestError};
pub use rules::{BusinessRuleValidator, PurchasePolicy, PurchaseRule};
