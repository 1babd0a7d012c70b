//! `enroll-admin ca-info` - query the certificate authority.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::bootstrap::CaTarget;
use crate::config::Settings;
use crate::output::{print_json, OutputFormat};

pub async fn execute(settings: &Settings) -> Result<()> {
    let target = CaTarget::load(settings)?;
    let info = target
        .client
        .ca_info()
        .await
        .with_context(|| format!("Failed to query CA \"{}\"", settings.ca))?;

    match settings.output {
        OutputFormat::Json => print_json(&info)?,
        OutputFormat::Pretty => {
            println!("{}: {}", "CA Name".bold(), info.ca_name);
            println!("{}: {}", "URL".bold(), target.client.url());
            println!(
                "{}: {}",
                "Version".bold(),
                info.version.as_deref().unwrap_or("unknown")
            );
            println!(
                "{}: {} certificate(s)",
                "Chain".bold(),
                info.ca_chain.matches("-----BEGIN CERTIFICATE-----").count()
            );
            println!("{}: {}", "MSP".bold(), target.msp_id);
        }
    }

    Ok(())
}
