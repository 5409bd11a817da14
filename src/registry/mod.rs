//! Entry registry access

pub mod api;
pub mod memory;

pub use api::{EntryRecord, EntryRegistry, RegistryError, TxReceipt, WalletConnection};
pub use memory::InMemoryRegistry;
