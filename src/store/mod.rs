//! JSON persistence gateway.
//!
//! One JSON document holds the four collections: invoices, purchases,
//! clients, and the business profile. The gateway is CRUD-only: it never
//! computes or validates business figures.
//!
//! No concurrent-writer isolation is provided: simultaneous writers race
//! with last-write-wins semantics on the whole document. Single-writer
//! deployments only.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{BusinessProfile, Client, FactureError, Invoice, Purchase};

/// The persisted document. Missing sections load as empty/default so
/// older or partial files keep working.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub profile: BusinessProfile,
}

/// File-backed store for the whole [`DataFile`].
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file yields the default (empty)
    /// document; a present-but-unreadable file is an error.
    pub fn load(&self) -> Result<DataFile, FactureError> {
        if !self.path.exists() {
            return Ok(DataFile::default());
        }
        let text = fs::read_to_string(&self.path)
            .map_err(|e| FactureError::Store(format!("failed to read {}: {e}", self.path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| FactureError::Store(format!("failed to parse {}: {e}", self.path.display())))
    }

    /// Save the whole document. Serialization happens first and the bytes
    /// go through a temp file + rename, so a failed write never truncates
    /// the existing data.
    pub fn save(&self, data: &DataFile) -> Result<(), FactureError> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| FactureError::Store(format!("failed to serialize data: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| FactureError::Store(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            FactureError::Store(format!("failed to replace {}: {e}", self.path.display()))
        })
    }

    /// Append one invoice and persist.
    pub fn append_invoice(&self, invoice: Invoice) -> Result<(), FactureError> {
        let mut data = self.load()?;
        data.invoices.push(invoice);
        self.save(&data)
    }

    /// Append one purchase and persist.
    pub fn append_purchase(&self, purchase: Purchase) -> Result<(), FactureError> {
        let mut data = self.load()?;
        data.purchases.push(purchase);
        self.save(&data)
    }

    /// Append one client and persist.
    pub fn append_client(&self, client: Client) -> Result<(), FactureError> {
        let mut data = self.load()?;
        data.clients.push(client);
        self.save(&data)
    }

    /// Replace the business profile wholesale and persist.
    pub fn replace_profile(&self, profile: BusinessProfile) -> Result<(), FactureError> {
        let mut data = self.load()?;
        data.profile = profile;
        self.save(&data)
    }
}
