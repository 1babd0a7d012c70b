//! `enroll-admin list` - show wallet contents.

use anyhow::{Context, Result};
use colored::Colorize;
use enroll_wallet::{FileSystemWallet, WalletStore};
use serde::Serialize;

use crate::config::Settings;
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Serialize)]
pub(crate) struct Entry {
    label: String,
    msp_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn execute(settings: &Settings) -> Result<()> {
    let entries = collect(&settings.wallet).await?;

    match settings.output {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Pretty => {
            if entries.is_empty() {
                println!("No identities in {}", settings.wallet.display());
            }
            for entry in entries {
                match entry.error {
                    Some(error) => println!("  {} {}", entry.label.bold(), error.red()),
                    None => println!(
                        "  {} {}",
                        entry.label.bold(),
                        entry.msp_id.as_deref().unwrap_or("-").dimmed()
                    ),
                }
            }
        }
    }

    Ok(())
}

/// Read every entry of the wallet at `dir`; a missing directory is empty.
pub(crate) async fn collect(dir: &std::path::Path) -> Result<Vec<Entry>> {
    let Some(wallet) = FileSystemWallet::open_existing(dir)
        .await
        .with_context(|| format!("Failed to open wallet {}", dir.display()))?
    else {
        return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    for label in wallet.list().await? {
        let entry = match wallet.get(&label).await {
            Ok(identity) => Entry {
                label,
                msp_id: identity.map(|identity| identity.msp_id),
                error: None,
            },
            Err(e) => Entry {
                label,
                msp_id: None,
                error: Some(e.to_string()),
            },
        };
        entries.push(entry);
    }
    Ok(entries)
}
