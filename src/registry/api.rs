//! Registry collaborator definitions
//!
//! The registry contract and the user's wallet live outside this crate.
//! Anything that can answer these calls can back the application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::entry::Entry;

/// A connected wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnection {
    /// Account address
    pub address: String,
    /// Hex chain id the wallet is currently on
    pub chain_id: String,
}

impl WalletConnection {
    pub fn new(address: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            chain_id: chain_id.into(),
        }
    }
}

/// Stored fields of an entry, as returned by `getEntry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub title: String,
    pub description: String,
}

/// Result of a confirmed write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash
    pub hash: String,
}

/// Failures of registry calls
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("entry {0} does not exist")]
    NotFound(String),
    #[error("entry {0} already exists")]
    AlreadyExists(String),
    #[error("transaction rejected: {0}")]
    Rejected(String),
    #[error("registry call failed: {0}")]
    Call(String),
    #[error("registry snapshot error: {0}")]
    Snapshot(#[from] std::io::Error),
    #[error("registry snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Contract proxy for the entry registry
pub trait EntryRegistry {
    /// All registered abbreviations, in registration order
    fn all_abbreviations(&self) -> Result<Vec<String>, RegistryError>;

    /// Whether an abbreviation is registered
    fn entry_exists(&self, abbreviation: &str) -> Result<bool, RegistryError>;

    /// Fetch title and description of an entry
    fn get_entry(&self, abbreviation: &str) -> Result<EntryRecord, RegistryError>;

    /// Submit a new entry signed by `signer` and wait for confirmation
    fn add_entry(
        &mut self,
        signer: &WalletConnection,
        entry: &Entry,
    ) -> Result<TxReceipt, RegistryError>;
}
