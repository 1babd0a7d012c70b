use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{EnrollError, Result};

/// A connection profile describing the network topology.
///
/// Only the sections needed to reach a certificate authority are modelled;
/// peers, orderers and channels are ignored when parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    /// Profile name
    #[serde(default)]
    pub name: Option<String>,

    /// Profile format version
    #[serde(default)]
    pub version: Option<String>,

    /// Client section
    #[serde(default)]
    pub client: Option<ClientSection>,

    /// Organizations keyed by name
    #[serde(default)]
    pub organizations: BTreeMap<String, Organization>,

    /// Certificate authorities keyed by logical name
    #[serde(default)]
    pub certificate_authorities: BTreeMap<String, CertificateAuthority>,
}

/// The `client` section of a profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSection {
    /// Organization the client acts for
    #[serde(default)]
    pub organization: Option<String>,
}

/// An organization entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Membership service provider id
    pub mspid: String,

    /// Names of the CAs serving this organization
    #[serde(default)]
    pub certificate_authorities: Vec<String>,
}

/// A certificate authority entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAuthority {
    /// Base URL of the CA server
    pub url: String,

    /// CA instance name on a multi-CA server
    #[serde(default)]
    pub ca_name: Option<String>,

    /// TLS trust material
    #[serde(default, rename = "tlsCACerts")]
    pub tls_ca_certs: Option<TlsCaCerts>,

    /// HTTP client options
    #[serde(default)]
    pub http_options: Option<HttpOptions>,
}

/// TLS trust roots, by file or inline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TlsCaCerts {
    /// Path to a PEM bundle
    #[serde(default)]
    pub path: Option<String>,

    /// Inline PEM
    #[serde(default)]
    pub pem: Option<PemValue>,
}

/// Inline PEM, either one string or a list of certificates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PemValue {
    /// A single PEM string (possibly a bundle)
    One(String),
    /// Several PEM strings
    Many(Vec<String>),
}

impl PemValue {
    /// Concatenate into a single bundle
    #[must_use]
    pub fn to_bundle(&self) -> String {
        match self {
            Self::One(pem) => pem.clone(),
            Self::Many(pems) => pems.join("\n"),
        }
    }
}

/// HTTP options for a CA
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpOptions {
    /// Whether to verify the server certificate
    #[serde(default)]
    pub verify: Option<bool>,
}

impl NetworkProfile {
    /// Parse and validate a profile from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a profile file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EnrollError::Profile(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.certificate_authorities.is_empty() {
            return Err(EnrollError::Profile(
                "no certificateAuthorities defined".into(),
            ));
        }

        for (name, ca) in &self.certificate_authorities {
            let url = Url::parse(&ca.url).map_err(|e| {
                EnrollError::Profile(format!(
                    "certificate authority {name}: bad url {:?}: {e}",
                    ca.url
                ))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(EnrollError::Profile(format!(
                    "certificate authority {name}: unsupported scheme {:?}",
                    url.scheme()
                )));
            }
        }

        Ok(())
    }

    /// Look up a certificate authority by its logical name
    pub fn certificate_authority(&self, name: &str) -> Result<&CertificateAuthority> {
        self.certificate_authorities
            .get(name)
            .ok_or_else(|| EnrollError::CaNotFound { name: name.to_string() })
    }

    /// MSP id of the organization served by `ca_name`.
    ///
    /// Falls back to the client's own organization.
    #[must_use]
    pub fn msp_id_for_ca(&self, ca_name: &str) -> Option<&str> {
        self.organizations
            .values()
            .find(|org| org.certificate_authorities.iter().any(|ca| ca == ca_name))
            .or_else(|| {
                self.client
                    .as_ref()
                    .and_then(|c| c.organization.as_ref())
                    .and_then(|name| self.organizations.get(name))
            })
            .map(|org| org.mspid.as_str())
    }
}

impl CertificateAuthority {
    /// Whether the server certificate should be verified (default: yes)
    #[must_use]
    pub fn verify_tls(&self) -> bool {
        self.http_options
            .as_ref()
            .and_then(|o| o.verify)
            .unwrap_or(true)
    }

    /// Resolved path of the trust-root file, if one is configured.
    ///
    /// Relative paths resolve against `base_dir`.
    #[must_use]
    pub fn trust_root_path(&self, base_dir: &Path) -> Option<PathBuf> {
        let path = self.tls_ca_certs.as_ref()?.path.as_ref()?;
        let path = Path::new(path);
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        })
    }

    /// Load the PEM trust-root bundle.
    ///
    /// A configured file wins over inline PEM.
    pub fn trust_roots(&self, base_dir: &Path) -> Result<Vec<u8>> {
        if let Some(path) = self.trust_root_path(base_dir) {
            return std::fs::read(&path).map_err(|source| EnrollError::TrustRoot { path, source });
        }

        self.tls_ca_certs
            .as_ref()
            .and_then(|certs| certs.pem.as_ref())
            .map(|pem| pem.to_bundle().into_bytes())
            .ok_or_else(|| {
                EnrollError::Profile(format!(
                    "certificate authority at {} has no tlsCACerts",
                    self.url
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "name": "first-network-manufacturer",
        "version": "1.0.0",
        "client": { "organization": "Manufacturer" },
        "organizations": {
            "Manufacturer": {
                "mspid": "ManufacturerMSP",
                "peers": ["peer0.Manufacturer.example.com"],
                "certificateAuthorities": ["ca.Manufacturer.example.com"]
            }
        },
        "peers": { "peer0.Manufacturer.example.com": { "url": "grpcs://localhost:7051" } },
        "certificateAuthorities": {
            "ca.Manufacturer.example.com": {
                "url": "https://localhost:7054",
                "caName": "ca.Manufacturer.example.com",
                "tlsCACerts": { "path": "crypto/ca.pem" },
                "httpOptions": { "verify": false }
            }
        }
    }"#;

    #[test]
    fn parses_connection_profile() {
        let profile = NetworkProfile::from_json(PROFILE).unwrap();
        let ca = profile
            .certificate_authority("ca.Manufacturer.example.com")
            .unwrap();
        assert_eq!(ca.url, "https://localhost:7054");
        assert_eq!(ca.ca_name.as_deref(), Some("ca.Manufacturer.example.com"));
        assert!(!ca.verify_tls());
        assert_eq!(
            profile.msp_id_for_ca("ca.Manufacturer.example.com"),
            Some("ManufacturerMSP")
        );
    }

    #[test]
    fn missing_ca_is_reported_by_name() {
        let profile = NetworkProfile::from_json(PROFILE).unwrap();
        let err = profile.certificate_authority("ca.Retailer.example.com").unwrap_err();
        assert!(matches!(
            err,
            EnrollError::CaNotFound { name } if name == "ca.Retailer.example.com"
        ));
    }

    #[test]
    fn profile_without_cas_is_rejected() {
        let err = NetworkProfile::from_json(r#"{"name": "empty"}"#).unwrap_err();
        assert!(matches!(err, EnrollError::Profile(_)));
    }

    #[test]
    fn non_http_ca_url_is_rejected() {
        let json = r#"{"certificateAuthorities": {"ca": {"url": "grpcs://localhost:7054"}}}"#;
        assert!(matches!(
            NetworkProfile::from_json(json),
            Err(EnrollError::Profile(_))
        ));
    }

    #[test]
    fn verify_defaults_to_true() {
        let json = r#"{"certificateAuthorities": {"ca": {"url": "https://ca:7054"}}}"#;
        let profile = NetworkProfile::from_json(json).unwrap();
        assert!(profile.certificate_authority("ca").unwrap().verify_tls());
        assert_eq!(profile.msp_id_for_ca("ca"), None);
    }

    #[test]
    fn relative_trust_root_resolves_against_base_dir() {
        let profile = NetworkProfile::from_json(PROFILE).unwrap();
        let ca = profile
            .certificate_authority("ca.Manufacturer.example.com")
            .unwrap();
        assert_eq!(
            ca.trust_root_path(Path::new("/etc/fabric")),
            Some(PathBuf::from("/etc/fabric/crypto/ca.pem"))
        );
    }

    #[test]
    fn trust_root_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("crypto")).unwrap();
        std::fs::write(dir.path().join("crypto/ca.pem"), "-----BEGIN CERTIFICATE-----\n").unwrap();

        let profile = NetworkProfile::from_json(PROFILE).unwrap();
        let ca = profile
            .certificate_authority("ca.Manufacturer.example.com")
            .unwrap();
        let pem = ca.trust_roots(dir.path()).unwrap();
        assert!(pem.starts_with(b"-----BEGIN CERTIFICATE-----"));
    }

    #[test]
    fn missing_trust_root_file_is_a_trust_root_error() {
        let dir = tempfile::tempdir().unwrap();
        let profile = NetworkProfile::from_json(PROFILE).unwrap();
        let ca = profile
            .certificate_authority("ca.Manufacturer.example.com")
            .unwrap();
        let err = ca.trust_roots(dir.path()).unwrap_err();
        assert!(matches!(err, EnrollError::TrustRoot { .. }));
    }

    #[test]
    fn inline_pem_list_is_joined() {
        let json = r#"{"certificateAuthorities": {"ca": {
            "url": "https://ca:7054",
            "tlsCACerts": {"pem": ["A", "B"]}
        }}}"#;
        let profile = NetworkProfile::from_json(json).unwrap();
        let pem = profile
            .certificate_authority("ca")
            .unwrap()
            .trust_roots(Path::new("."))
            .unwrap();
        assert_eq!(pem, b"A\nB");
    }

    #[test]
    fn ca_without_trust_material_is_a_profile_error() {
        let json = r#"{"certificateAuthorities": {"ca": {"url": "https://ca:7054"}}}"#;
        let profile = NetworkProfile::from_json(json).unwrap();
        let err = profile
            .certificate_authority("ca")
            .unwrap()
            .trust_roots(Path::new("."))
            .unwrap_err();
        assert!(matches!(err, EnrollError::Profile(_)));
    }
}
