//! Local key pair and certificate signing request generation.

use enroll_core::{EnrollError, PrivateKeyPem, Result};
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair, PKCS_ECDSA_P256_SHA256};

/// A CSR and the private key it was signed with
#[derive(Debug, Clone)]
pub struct CsrBundle {
    /// PKCS#10 request in PEM form
    pub csr_pem: String,

    /// PKCS#8 private key in PEM form
    pub key: PrivateKeyPem,
}

/// Generate an ECDSA P-256 key pair and a CSR with `CN=<common_name>`.
pub fn generate_csr(common_name: &str) -> Result<CsrBundle> {
    let key_pair = KeyPair::generate_for(&PKCS_ECDSA_P256_SHA256).map_err(csr_error)?;

    let mut params = CertificateParams::new(Vec::<String>::new()).map_err(csr_error)?;
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    params.distinguished_name = dn;

    let csr = params.serialize_request(&key_pair).map_err(csr_error)?;
    let csr_pem = csr.pem().map_err(csr_error)?;

    Ok(CsrBundle {
        csr_pem,
        key: PrivateKeyPem::new(key_pair.serialize_pem()),
    })
}

fn csr_error(e: rcgen::Error) -> EnrollError {
    EnrollError::Csr(e.to_string())
}
