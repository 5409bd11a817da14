//! In-memory registry with JSON snapshots

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::api::{EntryRecord, EntryRegistry, RegistryError, TxReceipt, WalletConnection};
use crate::core::entry::Entry;

/// Registry kept in memory, optionally persisted as a JSON snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRegistry {
    /// Entries in registration order
    entries: Vec<StoredEntry>,
    /// Number of writes applied, used for transaction hashes
    #[serde(default)]
    tx_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(flatten)]
    entry: Entry,
    /// Address that submitted the entry
    author: String,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot; a missing file gives an empty registry
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            tracing::debug!("No registry snapshot at {}", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let registry: Self = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} entries from {}",
            registry.entries.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Write a snapshot
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved registry snapshot to: {}", path.display());
        Ok(())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, abbreviation: &str) -> Option<&StoredEntry> {
        self.entries
            .iter()
            .find(|stored| stored.entry.abbreviation == abbreviation)
    }
}

impl EntryRegistry for InMemoryRegistry {
    fn all_abbreviations(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self
            .entries
            .iter()
            .map(|stored| stored.entry.abbreviation.clone())
            .collect())
    }

    fn entry_exists(&self, abbreviation: &str) -> Result<bool, RegistryError> {
        Ok(self.find(abbreviation).is_some())
    }

    fn get_entry(&self, abbreviation: &str) -> Result<EntryRecord, RegistryError> {
        self.find(abbreviation)
            .map(|stored| EntryRecord {
                title: stored.entry.title.clone(),
                description: stored.entry.description.clone(),
            })
            .ok_or_else(|| RegistryError::NotFound(abbreviation.to_string()))
    }

    fn add_entry(
        &mut self,
        signer: &WalletConnection,
        entry: &Entry,
    ) -> Result<TxReceipt, RegistryError> {
        if signer.address.trim().is_empty() {
            return Err(RegistryError::Rejected("missing signer address".to_string()));
        }

        if self.find(&entry.abbreviation).is_some() {
            return Err(RegistryError::AlreadyExists(entry.abbreviation.clone()));
        }

        self.entries.push(StoredEntry {
            entry: entry.clone(),
            author: signer.address.clone(),
        });
        self.tx_count += 1;

        Ok(TxReceipt {
            hash: format!("0x{:064x}", self.tx_count),
        })
    }
}
