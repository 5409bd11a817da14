//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Network the registry contract lives on
    pub network: NetworkConfig,
    /// Registry contract address
    pub contract_address: String,
    /// Link rendering settings
    pub render: RenderOptions,
    /// Local registry settings
    pub registry: RegistryConfig,
}

/// Chain settings, in the shape wallets expect for `wallet_addEthereumChain`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Hex chain id, e.g. `0x190f1b46`
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

/// Native currency of a network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Local registry settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Snapshot file for the in-memory registry
    pub snapshot_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            contract_address: "0x3DCd0E5c92b928587AdfA2a7117389CBa722FCDa".to_string(),
            render: RenderOptions::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            // 420420422
            chain_id: "0x190f1b46".to_string(),
            chain_name: "Paseo Asset Hub".to_string(),
            native_currency: NativeCurrency {
                name: "PAS".to_string(),
                symbol: "PAS".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://testnet-passet-hub-eth-rpc.polkadot.io".to_string()],
            block_explorer_urls: vec![
                "https://blockscout-passet-hub.parity-testnet.parity.io/".to_string(),
            ],
        }
    }
}

impl NetworkConfig {
    /// Whether a wallet chain id refers to this network
    pub fn matches_chain(&self, chain_id: &str) -> bool {
        normalize_chain_id(chain_id) == normalize_chain_id(&self.chain_id)
    }
}

/// Lowercase hex without leading zeros, so `0x0A` and `0xa` compare equal
fn normalize_chain_id(chain_id: &str) -> String {
    let lower = chain_id.trim().to_ascii_lowercase();
    let digits = lower.trim_start_matches("0x").trim_start_matches('0');
    format!("0x{}", digits)
}

impl RegistryConfig {
    /// Snapshot path, defaulting to the data directory
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_dir().join("registry.json"))
                .unwrap_or_else(|| PathBuf::from("registry.json"))
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "abbrev", "AbbrevRegistry")
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }
}
