//! Application state and page coordination
//!
//! `RegistryApp` ties the registry, the wallet and the annotator together
//! the way the registry's pages do: the index lists abbreviations with
//! titles, the detail view shows one entry with its description annotated,
//! and the create flow validates a draft before submitting it.

use serde::Serialize;
use thiserror::Error;

use crate::annotate::{annotate, referenced_abbreviations, Segment};
use crate::core::config::AppConfig;
use crate::core::entry::{lookup_key, EntryDraft, EntryError};
use crate::registry::{EntryRegistry, RegistryError, TxReceipt, WalletConnection};

/// One row of the index listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub abbreviation: String,
    /// Empty when the title could not be fetched
    pub title: String,
}

/// Result of looking up one abbreviation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Detail {
    NotFound {
        abbreviation: String,
    },
    Found {
        abbreviation: String,
        title: String,
        description: Vec<Segment>,
        /// Abbreviations the description links to, first mention first
        references: Vec<String>,
    },
}

/// Failures of application actions
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please connect your wallet to add entries")]
    WalletNotConnected,
    #[error("Please switch to {chain_name} network")]
    WrongNetwork { chain_name: String },
    #[error(transparent)]
    Invalid(#[from] EntryError),
    #[error("Failed to add entry: {0}")]
    Registry(#[from] RegistryError),
}

/// Main application state
pub struct RegistryApp<R> {
    /// Application configuration
    pub config: AppConfig,
    /// Registry contract proxy
    registry: R,
}

impl<R: EntryRegistry> RegistryApp<R> {
    /// Create a new application instance
    pub fn new(config: AppConfig, registry: R) -> Self {
        Self { config, registry }
    }

    /// Access the registry
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Give back the registry, e.g. to persist it
    pub fn into_registry(self) -> R {
        self.registry
    }

    /// List all abbreviations with their titles
    pub fn index(&self) -> Result<Vec<IndexEntry>, RegistryError> {
        let abbreviations = self.registry.all_abbreviations()?;
        tracing::debug!("Fetched {} abbreviations", abbreviations.len());

        let entries = abbreviations
            .into_iter()
            .map(|abbreviation| {
                let title = match self.registry.get_entry(&abbreviation) {
                    Ok(record) => record.title,
                    Err(e) => {
                        tracing::warn!("Error fetching title for {}: {}", abbreviation, e);
                        String::new()
                    }
                };
                IndexEntry {
                    abbreviation,
                    title,
                }
            })
            .collect();

        Ok(entries)
    }

    /// Look up one abbreviation and annotate its description
    pub fn detail(&self, abbreviation: &str) -> Result<Detail, RegistryError> {
        let key = lookup_key(abbreviation);
        tracing::debug!("Fetching abbreviation: {}", key);

        if !self.registry.entry_exists(&key)? {
            return Ok(Detail::NotFound { abbreviation: key });
        }

        let record = self.registry.get_entry(&key)?;
        let description = self.preview(&record.description);
        let references = referenced_abbreviations(&description);
        Ok(Detail::Found {
            abbreviation: key,
            title: record.title,
            description,
            references,
        })
    }

    /// Annotate a description as it will be shown
    pub fn preview(&self, description: &str) -> Vec<Segment> {
        let segments = annotate(description);
        let rejected = segments
            .iter()
            .filter(|s| matches!(s, Segment::RejectedMarkup { .. }))
            .count();
        if rejected > 0 {
            tracing::warn!("{} link(s) with unsafe destinations shown as text", rejected);
        }
        segments
    }

    /// Validate a draft and submit it with the connected wallet
    pub fn add_entry(
        &mut self,
        wallet: Option<&WalletConnection>,
        draft: &EntryDraft,
    ) -> Result<TxReceipt, AppError> {
        let wallet = wallet.ok_or(AppError::WalletNotConnected)?;

        if !self.config.network.matches_chain(&wallet.chain_id) {
            return Err(AppError::WrongNetwork {
                chain_name: self.config.network.chain_name.clone(),
            });
        }

        let entry = draft.validate()?;
        tracing::info!("Adding entry: {} - {}", entry.abbreviation, entry.title);

        let receipt = self.registry.add_entry(wallet, &entry)?;
        tracing::info!("Transaction confirmed: {}", receipt.hash);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Entry;
    use crate::registry::{EntryRecord, InMemoryRegistry};

    fn wallet() -> WalletConnection {
        WalletConnection::new("0xabc", "0x190f1b46")
    }

    fn app_with(entries: &[(&str, &str, &str)]) -> RegistryApp<InMemoryRegistry> {
        let mut registry = InMemoryRegistry::new();
        for (abbreviation, title, description) in entries {
            let entry = Entry {
                abbreviation: abbreviation.to_string(),
                title: title.to_string(),
                description: description.to_string(),
            };
            registry.add_entry(&wallet(), &entry).unwrap();
        }
        RegistryApp::new(AppConfig::default(), registry)
    }

    #[test]
    fn test_index() {
        let app = app_with(&[("DOT", "Polkadot", "a"), ("KSM", "Kusama", "b")]);
        assert_eq!(
            app.index().unwrap(),
            vec![
                IndexEntry {
                    abbreviation: "DOT".to_string(),
                    title: "Polkadot".to_string(),
                },
                IndexEntry {
                    abbreviation: "KSM".to_string(),
                    title: "Kusama".to_string(),
                },
            ]
        );
    }

    /// Lists an abbreviation whose entry cannot be read
    struct FlakyRegistry;

    impl EntryRegistry for FlakyRegistry {
        fn all_abbreviations(&self) -> Result<Vec<String>, RegistryError> {
            Ok(vec!["DOT".to_string(), "BAD".to_string()])
        }

        fn entry_exists(&self, _abbreviation: &str) -> Result<bool, RegistryError> {
            Err(RegistryError::Call("rpc unavailable".to_string()))
        }

        fn get_entry(&self, abbreviation: &str) -> Result<EntryRecord, RegistryError> {
            match abbreviation {
                "DOT" => Ok(EntryRecord {
                    title: "Polkadot".to_string(),
                    description: String::new(),
                }),
                _ => Err(RegistryError::Call("execution reverted".to_string())),
            }
        }

        fn add_entry(
            &mut self,
            _signer: &WalletConnection,
            _entry: &Entry,
        ) -> Result<TxReceipt, RegistryError> {
            Err(RegistryError::Rejected("user denied transaction".to_string()))
        }
    }

    #[test]
    fn test_index_keeps_entries_with_failed_titles() {
        let app = RegistryApp::new(AppConfig::default(), FlakyRegistry);
        let index = app.index().unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index[0].title, "Polkadot");
        assert_eq!(index[1].abbreviation, "BAD");
        assert_eq!(index[1].title, "");
    }

    #[test]
    fn test_detail_errors_propagate() {
        let app = RegistryApp::new(AppConfig::default(), FlakyRegistry);
        assert!(matches!(app.detail("DOT"), Err(RegistryError::Call(_))));
    }

    #[test]
    fn test_detail_found_is_annotated() {
        let app = app_with(&[("DOT", "Polkadot", "Relay chain, see #KSM")]);
        assert_eq!(
            app.detail("dot").unwrap(),
            Detail::Found {
                abbreviation: "DOT".to_string(),
                title: "Polkadot".to_string(),
                description: vec![
                    Segment::text("Relay chain, see "),
                    Segment::internal("#KSM", "KSM"),
                ],
                references: vec!["KSM".to_string()],
            }
        );
    }

    #[test]
    fn test_detail_not_found() {
        let app = app_with(&[]);
        assert_eq!(
            app.detail("xyz").unwrap(),
            Detail::NotFound {
                abbreviation: "XYZ".to_string()
            }
        );
    }

    #[test]
    fn test_preview() {
        let app = app_with(&[]);
        assert_eq!(
            app.preview("[x](javascript:void)"),
            vec![Segment::rejected("[x](javascript:void)")]
        );
    }

    #[test]
    fn test_add_entry() {
        let mut app = app_with(&[]);
        let draft = EntryDraft::new("dot", "polkadot token", "Relay chain #DOT");
        let receipt = app.add_entry(Some(&wallet()), &draft).unwrap();
        assert!(receipt.hash.starts_with("0x"));

        match app.detail("DOT").unwrap() {
            Detail::Found { title, .. } => assert_eq!(title, "Polkadot Token"),
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_add_entry_requires_wallet() {
        let mut app = app_with(&[]);
        let draft = EntryDraft::new("DOT", "Polkadot", "Relay chain");
        let err = app.add_entry(None, &draft).unwrap_err();
        assert!(matches!(err, AppError::WalletNotConnected));
        assert_eq!(err.to_string(), "Please connect your wallet to add entries");
    }

    #[test]
    fn test_add_entry_requires_network() {
        let mut app = app_with(&[]);
        let draft = EntryDraft::new("DOT", "Polkadot", "Relay chain");
        let err = app
            .add_entry(Some(&WalletConnection::new("0xabc", "0x1")), &draft)
            .unwrap_err();
        assert_eq!(err.to_string(), "Please switch to Paseo Asset Hub network");
        assert!(app.registry().is_empty());
    }

    #[test]
    fn test_add_entry_validates() {
        let mut app = app_with(&[]);
        let draft = EntryDraft::new("D", "Polkadot", "Relay chain");
        let err = app.add_entry(Some(&wallet()), &draft).unwrap_err();
        assert!(matches!(err, AppError::Invalid(EntryError::AbbreviationTooShort)));
        assert_eq!(err.to_string(), "Abbreviation must be at least 2 characters");
    }

    #[test]
    fn test_add_entry_registry_failure() {
        let mut app = RegistryApp::new(AppConfig::default(), FlakyRegistry);
        let draft = EntryDraft::new("DOT", "Polkadot", "Relay chain");
        let err = app.add_entry(Some(&wallet()), &draft).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to add entry: transaction rejected: user denied transaction"
        );
    }

    #[test]
    fn test_add_duplicate() {
        let mut app = app_with(&[("DOT", "Polkadot", "a")]);
        let draft = EntryDraft::new("DOT", "Polkadot", "Relay chain");
        let err = app.add_entry(Some(&wallet()), &draft).unwrap_err();
        assert!(matches!(
            err,
            AppError::Registry(RegistryError::AlreadyExists(_))
        ));
    }
}
