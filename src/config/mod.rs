//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Collection layout and fiscal-year settings for the invoicing operations.
///
/// Defaults match the persisted layout: invoices in `notasFiscais`, each
/// owning an `items` sub-collection, plus a flat `tx` collection used only
/// by the transaction demonstrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Top-level invoice collection.
    pub invoices_collection: String,

    /// Name of the per-invoice item sub-collection.
    pub items_subcollection: String,

    /// Flat collection used by the transaction demonstrations.
    pub tx_collection: String,

    /// The hard-coded year every purchase date and query window lives in.
    pub fiscal_year: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            invoices_collection: "notasFiscais".to_string(),
            items_subcollection: "items".to_string(),
            tx_collection: "tx".to_string(),
            fiscal_year: 2025,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
