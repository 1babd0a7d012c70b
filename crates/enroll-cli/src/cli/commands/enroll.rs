//! `enroll-admin enroll` - enroll the administrator if needed.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::bootstrap::{self, Outcome};
use crate::config::Settings;
use crate::output::{print_json, OutputFormat};

pub async fn execute(settings: &Settings) -> Result<()> {
    let outcome = bootstrap::run(settings)
        .await
        .with_context(|| format!("Failed to enroll admin user \"{}\"", settings.label))?;

    match settings.output {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Pretty => match &outcome {
            Outcome::AlreadyEnrolled { label } => {
                println!(
                    "An identity for the admin user \"{label}\" already exists in the wallet"
                );
            }
            Outcome::Enrolled { label, msp_id } => {
                println!(
                    "{} admin user \"{label}\" ({msp_id}) and imported it into the wallet",
                    "Successfully enrolled".green().bold()
                );
            }
        },
    }

    Ok(())
}
