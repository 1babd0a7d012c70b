//! In-process wallet.

use std::collections::BTreeMap;

use async_trait::async_trait;
use enroll_core::{Result, X509Identity};
use tokio::sync::RwLock;

use crate::{validate_label, WalletStore};

/// Wallet held in memory; contents are lost when dropped
#[derive(Debug, Default)]
pub struct InMemoryWallet {
    entries: RwLock<BTreeMap<String, X509Identity>>,
}

impl InMemoryWallet {
    /// Create an empty wallet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the wallet holds no identities
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl WalletStore for InMemoryWallet {
    async fn exists(&self, label: &str) -> Result<bool> {
        validate_label(label)?;
        Ok(self.entries.read().await.contains_key(label))
    }

    async fn get(&self, label: &str) -> Result<Option<X509Identity>> {
        validate_label(label)?;
        Ok(self.entries.read().await.get(label).cloned())
    }

    async fn put(&self, label: &str, identity: &X509Identity) -> Result<()> {
        validate_label(label)?;
        self.entries
            .write()
            .await
            .insert(label.to_string(), identity.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn remove(&self, label: &str) -> Result<bool> {
        validate_label(label)?;
        Ok(self.entries.write().await.remove(label).is_some())
    }
}
