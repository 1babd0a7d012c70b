//! # enroll-cli
//!
//! Command-line bootstrap for Hyperledger Fabric identities.
//!
//! ## Features
//!
//! - **Idempotent enrollment**: enrolls the administrator once and stores it
//!   in a filesystem wallet; later runs are no-ops
//! - **Connection profiles**: CA address, trust roots and MSP id come from the
//!   network's JSON connection profile
//! - **Inspection**: `ca-info` queries the CA, `list` shows wallet labels

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
