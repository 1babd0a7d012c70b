//! Core types for enrolling identities with a Hyperledger Fabric CA.
//!
//! This crate provides the foundational types shared by the client, the
//! wallet and the command line:
//!
//! - **Types**: the network profile, enrollment request/response, the CA's
//!   response envelope and the X.509 identity stored in a wallet
//! - **Errors**: a single [`EnrollError`] with a [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use enroll_core::{NetworkProfile, Result};
//!
//! fn ca_url(path: &std::path::Path) -> Result<String> {
//!     let profile = NetworkProfile::from_file(path)?;
//!     let ca = profile.certificate_authority("ca.Manufacturer.example.com")?;
//!     Ok(ca.url.clone())
//! }
//! ```

mod error;
pub mod types;

pub use error::{EnrollError, Result};
pub use types::*;
