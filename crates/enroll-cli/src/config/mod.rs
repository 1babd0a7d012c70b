//! Configuration management.
//!
//! Values are resolved in order: command line (and its environment
//! variables), configuration file, built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use enroll_core::EnrollmentSecret;
use serde::Deserialize;

use crate::cli::args::Cli;
use crate::output::OutputFormat;

/// Connection profile read when none is given
pub const DEFAULT_PROFILE: &str = "connection-Manufacturer.json";

/// Certificate authority entry used when none is given
pub const DEFAULT_CA: &str = "ca.Manufacturer.example.com";

/// Wallet directory, relative to the working directory
pub const DEFAULT_WALLET_DIR: &str = "wallet";

/// Administrator label and enrollment id
pub const DEFAULT_ADMIN: &str = "admin";

/// Administrator bootstrap secret
pub const DEFAULT_SECRET: &str = "adminpw";

/// MSP id used when neither flag nor profile provide one
pub const DEFAULT_MSP_ID: &str = "ManufacturerMSP";

/// Request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Connection profile path.
    pub profile: Option<PathBuf>,

    /// Certificate authority entry name.
    pub ca: Option<String>,

    /// Wallet directory.
    pub wallet: Option<PathBuf>,

    /// Wallet label.
    pub label: Option<String>,

    /// Enrollment id.
    pub enrollment_id: Option<String>,

    /// Enrollment secret.
    pub secret: Option<String>,

    /// MSP id.
    pub msp_id: Option<String>,

    /// Skip TLS verification.
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "hyperledger", "enroll-admin")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        Self::from_file(&path)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Connection profile path
    pub profile: PathBuf,
    /// Certificate authority entry name
    pub ca: String,
    /// Wallet directory
    pub wallet: PathBuf,
    /// Wallet label
    pub label: String,
    /// Enrollment id
    pub enrollment_id: String,
    /// Enrollment secret
    pub secret: EnrollmentSecret,
    /// Explicit MSP id; `None` means look it up in the profile
    pub msp_id: Option<String>,
    /// Skip TLS verification
    pub insecure: bool,
    /// Request timeout
    pub timeout: Duration,
    /// Output format
    pub output: OutputFormat,
}

impl Settings {
    /// Merge command line, file configuration and defaults.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let wallet = match cli.wallet.clone().or_else(|| config.wallet.clone()) {
            Some(path) => path,
            None => std::env::current_dir()
                .context("Failed to determine working directory")?
                .join(DEFAULT_WALLET_DIR),
        };

        Ok(Self {
            profile: cli
                .profile
                .clone()
                .or_else(|| config.profile.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE)),
            ca: pick(cli.ca.as_deref(), config.ca.as_deref(), DEFAULT_CA),
            wallet,
            label: pick(cli.label.as_deref(), config.label.as_deref(), DEFAULT_ADMIN),
            enrollment_id: pick(
                cli.enrollment_id.as_deref(),
                config.enrollment_id.as_deref(),
                DEFAULT_ADMIN,
            ),
            secret: EnrollmentSecret::new(pick(
                cli.secret.as_deref(),
                config.secret.as_deref(),
                DEFAULT_SECRET,
            )),
            msp_id: cli.msp_id.clone().or_else(|| config.msp_id.clone()),
            insecure: cli.insecure || config.insecure,
            timeout: Duration::from_secs(
                cli.timeout
                    .or(config.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            output: cli.output.or(config.output_format).unwrap_or_default(),
        })
    }
}

fn pick(flag: Option<&str>, file: Option<&str>, default: &str) -> String {
    flag.or(file).unwrap_or(default).to_string()
}
