//! Ticket catalog: the single source of truth for ticket types.
//!
//! Every type-specific fact (price, seat usage, supervision) is read from a
//! [`TicketCatalog`]. Nothing else in the workspace names a ticket type.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of a ticket type (e.g. `ADULT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketType(String);

impl TicketType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TicketType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TicketType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-type metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Price in smallest currency unit.
    pub price: u64,
    /// Seats consumed by one ticket (0 or 1).
    pub seats_per_ticket: u64,
    /// Purchasing this type needs at least one adult-equivalent ticket.
    pub requires_adult_supervision: bool,
}

/// One configuration row describing a ticket type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    #[serde(rename = "type", alias = "ticket_type")]
    pub ticket_type: String,
    pub price: u64,
    pub seats_per_ticket: u64,
    #[serde(default)]
    pub requires_adult_supervision: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog must contain at least one ticket type")]
    Empty,

    #[error("ticket type name must not be blank")]
    BlankTicketType,

    #[error("duplicate ticket type: {0}")]
    DuplicateTicketType(String),

    #[error("ticket type {ticket_type} uses {seats_per_ticket} seats per ticket (expected 0 or 1)")]
    InvalidSeatsPerTicket {
        ticket_type: String,
        seats_per_ticket: u64,
    },

    #[error("catalog has no ticket type that can be purchased without supervision")]
    NoAdultEquivalentType,
}

/// Immutable, ordered ticket catalog.
///
/// Built once (from [`TicketCatalog::standard`] or configuration rows) and
/// then only read. There are no mutating methods; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCatalog {
    entries: Vec<(TicketType, CatalogEntry)>,
}

impl TicketCatalog {
    /// The venue's standard catalog: ADULT, CHILD and INFANT.
    pub fn standard() -> Self {
        let rows = [("ADULT", 25, 1, false), ("CHILD", 15, 1, true), ("INFANT", 0, 0, true)];

        Self {
            entries: rows
                .into_iter()
                .map(|(name, price, seats_per_ticket, requires_adult_supervision)| {
                    (
                        TicketType(name.to_string()),
                        CatalogEntry {
                            price,
                            seats_per_ticket,
                            requires_adult_supervision,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Build a catalog from configuration rows, keeping their order.
    pub fn from_entries(rows: impl IntoIterator<Item = CatalogRow>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();

        for row in rows {
            let name = row.ticket_type.trim();
            if name.is_empty() {
                return Err(CatalogError::BlankTicketType);
            }
            if !seen.insert(name.to_string()) {
                return Err(CatalogError::DuplicateTicketType(name.to_string()));
            }
            if row.seats_per_ticket > 1 {
                return Err(CatalogError::InvalidSeatsPerTicket {
                    ticket_type: name.to_string(),
                    seats_per_ticket: row.seats_per_ticket,
                });
            }

            entries.push((
                TicketType(name.to_string()),
                CatalogEntry {
                    price: row.price,
                    seats_per_ticket: row.seats_per_ticket,
                    requires_adult_supervision: row.requires_adult_supervision,
                },
            ));
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        if entries.iter().all(|(_, e)| e.requires_adult_supervision) {
            return Err(CatalogError::NoAdultEquivalentType);
        }

        Ok(Self { entries })
    }

    /// Configuration rows equivalent to this catalog.
    pub fn to_rows(&self) -> Vec<CatalogRow> {
        self.entries
            .iter()
            .map(|(t, e)| CatalogRow {
                ticket_type: t.to_string(),
                price: e.price,
                seats_per_ticket: e.seats_per_ticket,
                requires_adult_supervision: e.requires_adult_supervision,
            })
            .collect()
    }

    /// Ticket types in catalog order.
    pub fn types(&self) -> impl Iterator<Item = &TicketType> {
        self.entries.iter().map(|(t, _)| t)
    }

    /// `(type, entry)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&TicketType, &CatalogEntry)> {
        self.entries.iter().map(|(t, e)| (t, e))
    }

    pub fn entry(&self, ticket_type: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|(t, _)| t.as_str() == ticket_type)
            .map(|(_, e)| e)
    }

    /// Resolve a name to the catalog's own [`TicketType`].
    pub fn ticket_type(&self, name: &str) -> Option<&TicketType> {
        self.entries
            .iter()
            .find(|(t, _)| t.as_str() == name)
            .map(|(t, _)| t)
    }

    pub fn contains(&self, ticket_type: &str) -> bool {
        self.entry(ticket_type).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human list of valid types, e.g. `ADULT, CHILD, or INFANT`.
    pub fn describe_types(&self) -> String {
        let names: Vec<&str> = self.types().map(TicketType::as_str).collect();
        match names.as_slice() {
            [] => String::new(),
            [only] => (*only).to_string(),
            [first, second] => format!("{first} or {second}"),
            [init @ .., last] => format!("{}, or {last}", init.join(", ")),
        }
    }
}

impl Default for TicketCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
