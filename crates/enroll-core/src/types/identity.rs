use serde::{Deserialize, Serialize};

use crate::{Enrollment, PrivateKeyPem};

/// Identity type tag used in wallet entries
pub const X509_IDENTITY_TYPE: &str = "X.509";

/// Current wallet entry format version
pub const IDENTITY_VERSION: u32 = 1;

/// An X.509 identity as persisted in a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct X509Identity {
    /// Certificate and key
    pub credentials: Credentials,

    /// Organization membership tag
    pub msp_id: String,

    /// Identity type, always `X.509`
    #[serde(rename = "type")]
    pub kind: String,

    /// Entry format version
    pub version: u32,
}

/// Credential material of an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// PEM certificate
    pub certificate: String,

    /// PEM private key
    pub private_key: PrivateKeyPem,
}

impl X509Identity {
    /// Build an identity from its parts
    #[must_use]
    pub fn new(
        msp_id: impl Into<String>,
        certificate: impl Into<String>,
        private_key: PrivateKeyPem,
    ) -> Self {
        Self {
            credentials: Credentials {
                certificate: certificate.into(),
                private_key,
            },
            msp_id: msp_id.into(),
            kind: X509_IDENTITY_TYPE.to_string(),
            version: IDENTITY_VERSION,
        }
    }

    /// Wrap an enrollment under the given MSP id
    #[must_use]
    pub fn from_enrollment(msp_id: impl Into<String>, enrollment: &Enrollment) -> Self {
        Self::new(msp_id, enrollment.certificate.clone(), enrollment.key.clone())
    }

    /// PEM certificate
    #[must_use]
    pub fn certificate(&self) -> &str {
        &self.credentials.certificate
    }

    /// PEM private key
    #[must_use]
    pub fn private_key(&self) -> &PrivateKeyPem {
        &self.credentials.private_key
    }
}
