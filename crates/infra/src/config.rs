//! Configuration loading and representation.
//!
//! A [`ServiceConfig`] bundles the purchase policy and the catalog rows. It can
//! be read from JSON, or from the environment:
//!
//! - `BOXOFFICE_CONFIG`: path to a JSON config file (optional)
//! - `BOXOFFICE_MAX_TICKETS`: overrides `policy.max_tickets_per_purchase` (optional)
//!
//! ```json
//! {
//!   "policy": { "max_tickets_per_purchase": 25 },
//!   "catalog": [
//!     { "type": "ADULT", "price": 25, "seats_per_ticket": 1 },
//!     { "type": "CHILD", "price": 15, "seats_per_ticket": 1, "requires_adult_supervision": true }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use boxoffice_purchasing::{PaymentGateway, SeatReservationGateway, TicketService};
use boxoffice_tickets::{CatalogError, CatalogRow, PurchasePolicy, TicketCatalog};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("max_tickets_per_purchase must be at least 1")]
    ZeroTicketLimit,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub policy: PurchasePolicy,
    #[serde(default = "standard_rows")]
    pub catalog: Vec<CatalogRow>,
}

fn standard_rows() -> Vec<CatalogRow> {
    TicketCatalog::standard().to_rows()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            policy: PurchasePolicy::default(),
            catalog: standard_rows(),
        }
    }
}

impl ServiceConfig {
    pub const CONFIG_PATH_VAR: &'static str = "BOXOFFICE_CONFIG";
    pub const MAX_TICKETS_VAR: &'static str = "BOXOFFICE_MAX_TICKETS";

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` in place of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(Self::CONFIG_PATH_VAR) {
            Some(path) => Self::from_json_file(path)?,
            None => {
                tracing::warn!(
                    var = Self::CONFIG_PATH_VAR,
                    "config file not set; using standard catalog"
                );
                Self::default()
            }
        };

        if let Some(raw) = lookup(Self::MAX_TICKETS_VAR) {
            let max = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: Self::MAX_TICKETS_VAR,
                    value: raw.clone(),
                })?;
            config.policy.max_tickets_per_purchase = max;
        }

        config.validate()?;
        tracing::info!(
            max_tickets = config.policy.max_tickets_per_purchase,
            ticket_types = config.catalog.len(),
            "service config loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.max_tickets_per_purchase == 0 {
            return Err(ConfigError::ZeroTicketLimit);
        }
        TicketCatalog::from_entries(self.catalog.iter().cloned())?;
        Ok(())
    }

    pub fn build_catalog(&self) -> Result<TicketCatalog, CatalogError> {
        TicketCatalog::from_entries(self.catalog.iter().cloned())
    }

    /// Wire a [`TicketService`] from this config and the given collaborators.
    pub fn build_service<P, S>(&self, payments: P, seats: S) -> Result<TicketService<P, S>, ConfigError>
    where
        P: PaymentGateway,
        S: SeatReservationGateway,
    {
        self.validate()?;
        let catalog = Arc::new(self.build_catalog()?);
        Ok(TicketService::with_catalog(catalog, self.policy, payments, seats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_standard_catalog_and_limit() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.policy.max_tickets_per_purchase, 25);
        assert_eq!(config.build_catalog().unwrap(), TicketCatalog::standard());
    }

    #[test]
    fn max_tickets_can_be_overridden_from_env() {
        let config =
            ServiceConfig::from_lookup(lookup(&[(ServiceConfig::MAX_TICKETS_VAR, " 10 ")])).unwrap();
        assert_eq!(config.policy.max_tickets_per_purchase, 10);
    }

    #[test]
    fn malformed_max_tickets_is_an_error() {
        let err = ServiceConfig::from_lookup(lookup(&[(ServiceConfig::MAX_TICKETS_VAR, "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                var: "BOXOFFICE_MAX_TICKETS",
                ..
            }
        ));

        let err = ServiceConfig::from_lookup(lookup(&[(ServiceConfig::MAX_TICKETS_VAR, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTicketLimit));
    }

    #[test]
    fn missing_config_file_reports_path() {
        let err = ServiceConfig::from_lookup(lookup(&[(
            ServiceConfig::CONFIG_PATH_VAR,
            "/nonexistent/boxoffice.json",
        )]))
        .unwrap_err();

        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/boxoffice.json"))
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn parses_json_with_custom_catalog() {
        let config = ServiceConfig::from_json_str(
            r#"{
                "policy": { "max_tickets_per_purchase": 8 },
                "catalog": [
                    { "type": "ADULT", "price": 30, "seats_per_ticket": 1 },
                    { "type": "CHILD", "price": 10, "seats_per_ticket": 1, "requires_adult_supervision": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.policy.max_tickets_per_purchase, 8);
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.describe_types(), "ADULT or CHILD");
        assert_eq!(catalog.entry("ADULT").map(|e| e.price), Some(30));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        assert_eq!(ServiceConfig::from_json_str("{}").unwrap(), ServiceConfig::default());
    }

    #[test]
    fn invalid_catalog_is_rejected() {
        let err = ServiceConfig::from_json_str(r#"{ "catalog": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Catalog(CatalogError::Empty)));

        let err = ServiceConfig::from_json_str(r#"{ "catalog": "nope" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn reads_config_from_file() {
        let path = std::env::temp_dir().join(format!(
            "boxoffice-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "policy": { "max_tickets_per_purchase": 3 } }"#).unwrap();

        let config = ServiceConfig::from_lookup(lookup(&[(
            ServiceConfig::CONFIG_PATH_VAR,
            path.to_str().unwrap(),
        )]))
        .unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.policy.max_tickets_per_purchase, 3);
        assert_eq!(config.catalog, TicketCatalog::standard().to_rows());
    }
}
