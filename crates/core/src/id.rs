//! Strongly-typed identifiers used across the purchase domain.

use core::num::NonZeroU64;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::PurchaseError;

/// Identifier of the purchasing account.
///
/// Always a positive integer; the only way to obtain one is through the
/// validating conversions below.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(NonZeroU64);

impl AccountId {
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<i64> for AccountId {
    type Error = PurchaseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| PurchaseError::invalid_account_id(value))
    }
}

impl TryFrom<u64> for AccountId {
    type Error = PurchaseError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| PurchaseError::invalid_account_id(value))
    }
}

impl From<AccountId> for u64 {
    fn from(value: AccountId) -> Self {
        value.get()
    }
}

impl FromStr for AccountId {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| PurchaseError::invalid_account_id(s))?;
        Self::try_from(raw)
    }
}
