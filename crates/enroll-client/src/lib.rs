//! HTTP client for the Hyperledger Fabric CA.
//!
//! This crate provides [`CaClient`] for enrolling identities. Key pairs and
//! certificate signing requests are generated locally; the CA only ever sees
//! the CSR.

mod api;
mod client;
mod csr;

pub use client::{CaClient, CaClientBuilder};
pub use csr::{generate_csr, CsrBundle};
pub use enroll_core::{EnrollError, Result};
