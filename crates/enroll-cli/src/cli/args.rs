//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Enroll the network administrator with its certificate authority
///
/// Reads the connection profile, enrolls the administrator at the CA and
/// imports the identity into a local wallet. Runs after the first are
/// no-ops.
#[derive(Parser, Debug, Default)]
#[command(name = "enroll-admin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, env = "ENROLL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Connection profile (JSON)
    #[arg(short, long, env = "ENROLL_PROFILE", global = true)]
    pub profile: Option<PathBuf>,

    /// Certificate authority entry in the profile
    #[arg(long = "ca", env = "ENROLL_CA", global = true)]
    pub ca: Option<String>,

    /// Wallet directory
    #[arg(short, long, env = "ENROLL_WALLET", global = true)]
    pub wallet: Option<PathBuf>,

    /// Wallet label to store the identity under
    #[arg(long, global = true)]
    pub label: Option<String>,

    /// Registered enrollment id
    #[arg(long, env = "ENROLL_ID", global = true)]
    pub enrollment_id: Option<String>,

    /// Enrollment secret
    #[arg(long, env = "ENROLL_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// MSP id to tag the identity with
    #[arg(long, env = "ENROLL_MSP_ID", global = true)]
    pub msp_id: Option<String>,

    /// Skip TLS server certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Debug logging, including profile and enrollment details
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Enroll the administrator unless the wallet already holds it (default)
    Enroll,

    /// Show the CA's name, version and certificate chain
    CaInfo,

    /// List identities in the wallet
    List,
}
