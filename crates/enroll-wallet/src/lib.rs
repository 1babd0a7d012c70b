//! Identity wallets.
//!
//! A wallet maps human-readable labels to [`X509Identity`] records.
//! [`FileSystemWallet`] persists one JSON file per label;
//! [`InMemoryWallet`] keeps everything in a map.

mod filesystem;
mod label;
mod memory;

use async_trait::async_trait;
use enroll_core::{Result, X509Identity};

pub use filesystem::FileSystemWallet;
pub use label::validate_label;
pub use memory::InMemoryWallet;

/// Persisted collection of named identities
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Whether an identity is stored under `label`
    async fn exists(&self, label: &str) -> Result<bool>;

    /// Fetch the identity stored under `label`
    async fn get(&self, label: &str) -> Result<Option<X509Identity>>;

    /// Store `identity` under `label`, replacing any previous entry
    async fn put(&self, label: &str, identity: &X509Identity) -> Result<()>;

    /// All labels, sorted
    async fn list(&self) -> Result<Vec<String>>;

    /// Delete the entry under `label`; returns whether one existed
    async fn remove(&self, label: &str) -> Result<bool>;
}
