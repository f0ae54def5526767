//! Purchase-level business rules.
//!
//! Rules run in a fixed order and stop at the first failure, so when several
//! are violated at once the caller always sees the earliest one:
//!
//! ```text
//! 1. MinimumTickets    total == 0                     -> NoTicketsRequested
//! 2. MaximumTickets    total > max_tickets_per_purchase -> TicketLimitExceeded
//! 3. AdultSupervision  supervised type present, no adult-equivalent -> AdultSupervisionRequired
//! ```

use serde::{Deserialize, Serialize};

use boxoffice_core::{DEFAULT_MAX_TICKETS, PurchaseError, PurchaseResult};

use crate::calculator::TicketSummary;
use crate::catalog::TicketCatalog;

/// Tunable limits applied by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasePolicy {
    #[serde(default = "default_max_tickets")]
    pub max_tickets_per_purchase: u64,
}

fn default_max_tickets() -> u64 {
    DEFAULT_MAX_TICKETS
}

impl Default for PurchasePolicy {
    fn default() -> Self {
        Self {
            max_tickets_per_purchase: DEFAULT_MAX_TICKETS,
        }
    }
}

/// A single purchase-level rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseRule {
    MinimumTickets,
    MaximumTickets,
    AdultSupervision,
}

impl PurchaseRule {
    /// Evaluation order.
    pub const ORDERED: [PurchaseRule; 3] = [
        PurchaseRule::MinimumTickets,
        PurchaseRule::MaximumTickets,
        PurchaseRule::AdultSupervision,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PurchaseRule::MinimumTickets => "minimum_tickets",
            PurchaseRule::MaximumTickets => "maximum_tickets",
            PurchaseRule::AdultSupervision => "adult_supervision",
        }
    }
}

/// Runs [`PurchaseRule::ORDERED`] against a summary.
#[derive(Debug, Clone, Copy)]
pub struct BusinessRuleValidator<'a> {
    catalog: &'a TicketCatalog,
    policy: PurchasePolicy,
}

impl<'a> BusinessRuleValidator<'a> {
    pub fn new(catalog: &'a TicketCatalog, policy: PurchasePolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn policy(&self) -> PurchasePolicy {
        self.policy
    }

    pub fn validate(&self, summary: &TicketSummary, total_tickets: u64) -> PurchaseResult<()> {
        self.validate_observed(summary, total_tickets, |_| {})
    }

    /// Like [`validate`](Self::validate), reporting each rule just before it runs.
    pub fn validate_observed(
        &self,
        summary: &TicketSummary,
        total_tickets: u64,
        mut on_rule: impl FnMut(PurchaseRule),
    ) -> PurchaseResult<()> {
        for rule in PurchaseRule::ORDERED {
            on_rule(rule);
            tracing::trace!(rule = rule.name(), total_tickets, "evaluating purchase rule");
            self.check(rule, summary, total_tickets)?;
        }
        Ok(())
    }

    pub fn check(
        &self,
        rule: PurchaseRule,
        summary: &TicketSummary,
        total_tickets: u64,
    ) -> PurchaseResult<()> {
        match rule {
            PurchaseRule::MinimumTickets => {
                if total_tickets == 0 {
                    return Err(PurchaseError::NoTicketsRequested);
                }
            }
            PurchaseRule::MaximumTickets => {
                let maximum = self.policy.max_tickets_per_purchase;
                if total_tickets > maximum {
                    return Err(PurchaseError::ticket_limit_exceeded(total_tickets, maximum));
                }
            }
            PurchaseRule::AdultSupervision => {
                if self.lacks_supervision(summary) {
                    return Err(PurchaseError::AdultSupervisionRequired);
                }
            }
        }
        Ok(())
    }

    fn lacks_supervision(&self, summary: &TicketSummary) -> bool {
        let adult_equivalents: u64 = self
            .catalog
            .iter()
            .filter(|(_, e)| !e.requires_adult_supervision)
            .map(|(t, _)| summary.count(t.as_str()))
            .sum();

        adult_equivalents == 0
            && self
                .catalog
                .iter()
                .any(|(t, e)| e.requires_adult_supervision && summary.count(t.as_str()) > 0)
    }
}
