//! Ticket calculation: per-type summary and derived totals.
//!
//! Everything here is a pure function of its inputs. Totals only consider
//! catalog types; anything else in a summary is ignored.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{TicketCatalog, TicketType};
use crate::request::TicketRequest;

/// Aggregate ticket count per type for one purchase.
///
/// A summary built by [`TicketCalculator::build_summary`] has an entry for
/// every catalog type. Lookups of absent types return 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    counts: BTreeMap<TicketType, u64>,
}

impl TicketSummary {
    /// Count for `ticket_type`, 0 when absent.
    pub fn count(&self, ticket_type: &str) -> u64 {
        self.counts.get(ticket_type).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TicketType, u64)> {
        self.counts.iter().map(|(t, c)| (t, *c))
    }

    pub fn contains(&self, ticket_type: &str) -> bool {
        self.counts.contains_key(ticket_type)
    }
}

impl FromIterator<(TicketType, u64)> for TicketSummary {
    fn from_iter<I: IntoIterator<Item = (TicketType, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (ticket_type, count) in iter {
            let slot: &mut u64 = counts.entry(ticket_type).or_default();
            *slot = slot.saturating_add(count);
        }
        Self { counts }
    }
}

/// Totals derived from a [`TicketSummary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PurchaseTotals {
    pub total_tickets: u64,
    /// Amount in smallest currency unit.
    pub total_amount: u64,
    pub total_seats: u64,
}

/// Summary and totals over a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct TicketCalculator<'a> {
    catalog: &'a TicketCatalog,
}

impl<'a> TicketCalculator<'a> {
    pub fn new(catalog: &'a TicketCatalog) -> Self {
        Self { catalog }
    }

    /// Initialise every catalog type to 0, then add each request's count.
    ///
    /// Requests whose type is not in this catalog are kept under their own key
    /// and do not contribute to any total. Negative counts contribute 0; the
    /// purchase flow rejects them before calling this.
    pub fn build_summary(&self, requests: &[TicketRequest]) -> TicketSummary {
        let zeroed = self.catalog.types().map(|t| (t.clone(), 0));
        let requested = requests.iter().map(|r| {
            let count = u64::try_from(r.ticket_count()).unwrap_or(0);
            (r.ticket_type().clone(), count)
        });

        zeroed.chain(requested).collect()
    }

    /// Σ count × price over catalog types.
    pub fn total_amount(&self, summary: &TicketSummary) -> u64 {
        self.sum_over_catalog(summary, |entry_price, _| entry_price)
    }

    /// Σ count × seats-per-ticket over catalog types.
    pub fn total_seats(&self, summary: &TicketSummary) -> u64 {
        self.sum_over_catalog(summary, |_, seats| seats)
    }

    /// Σ count over catalog types.
    pub fn total_ticket_count(&self, summary: &TicketSummary) -> u64 {
        self.sum_over_catalog(summary, |_, _| 1)
    }

    pub fn totals(&self, summary: &TicketSummary) -> PurchaseTotals {
        PurchaseTotals {
            total_tickets: self.total_ticket_count(summary),
            total_amount: self.total_amount(summary),
            total_seats: self.total_seats(summary),
        }
    }

    fn sum_over_catalog(&self, summary: &TicketSummary, weight: impl Fn(u64, u64) -> u64) -> u64 {
        self.catalog
            .iter()
            .map(|(t, entry)| {
                summary
                    .count(t.as_str())
                    .saturating_mul(weight(entry.price, entry.seats_per_ticket))
            })
            .fold(0u64, u64::saturating_add)
    }
}
