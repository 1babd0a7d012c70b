//! Directory-backed wallet.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use enroll_core::{EnrollError, Result, X509Identity};
use tokio::fs;
use tracing::{debug, info};

use crate::{validate_label, WalletStore};

/// File extension of identity entries
const ENTRY_EXTENSION: &str = "id";

/// Wallet storing each identity as `<dir>/<label>.id`
#[derive(Debug, Clone)]
pub struct FileSystemWallet {
    dir: PathBuf,
}

impl FileSystemWallet {
    /// Open the wallet at `dir`, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        debug!(path = %dir.display(), "opened wallet");
        Ok(Self { dir })
    }

    /// Open the wallet at `dir` only if the directory already exists
    pub async fn open_existing(dir: impl Into<PathBuf>) -> Result<Option<Self>> {
        let dir = dir.into();
        match fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => Ok(Some(Self { dir })),
            Ok(_) => Err(EnrollError::Io(std::io::Error::other(format!(
                "wallet path {} is not a directory",
                dir.display()
            )))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Wallet directory
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, label: &str) -> Result<PathBuf> {
        validate_label(label)?;
        Ok(self.dir.join(format!("{label}.{ENTRY_EXTENSION}")))
    }
}

#[async_trait]
impl WalletStore for FileSystemWallet {
    async fn exists(&self, label: &str) -> Result<bool> {
        let path = self.entry_path(label)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, label: &str) -> Result<Option<X509Identity>> {
        let path = self.entry_path(label)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| EnrollError::CorruptIdentity {
                label: label.to_string(),
                message: e.to_string(),
            })
    }

    async fn put(&self, label: &str, identity: &X509Identity) -> Result<()> {
        let path = self.entry_path(label)?;
        let json = serde_json::to_vec_pretty(identity)?;

        // Entries are replaced atomically via rename.
        let tmp = self.dir.join(format!(".{label}.{ENTRY_EXTENSION}.tmp"));
        fs::write(&tmp, &json).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        info!(label, path = %path.display(), "identity stored");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut labels = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            if let Some(label) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_label(label).is_ok() {
                    labels.push(label.to_string());
                }
            }
        }

        labels.sort();
        Ok(labels)
    }

    async fn remove(&self, label: &str) -> Result<bool> {
        let path = self.entry_path(label)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(label, "identity removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
