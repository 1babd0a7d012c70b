use serde::{Deserialize, Serialize};

/// Response envelope wrapping every CA REST reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaResponse<T> {
    /// Whether the CA considers the call successful
    #[serde(default)]
    pub success: bool,

    /// Payload, present on success
    #[serde(default = "Option::default")]
    pub result: Option<T>,

    /// Errors reported by the CA
    #[serde(default)]
    pub errors: Vec<CaMessage>,

    /// Informational messages
    #[serde(default)]
    pub messages: Vec<CaMessage>,
}

impl<T> CaResponse<T> {
    /// First reported error, if any
    #[must_use]
    pub fn first_error(&self) -> Option<&CaMessage> {
        self.errors.first()
    }
}

/// Error or informational message from the CA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaMessage {
    /// Numeric code
    #[serde(default)]
    pub code: i64,

    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// Payload of `POST /api/v1/enroll`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollResult {
    /// Base64 of the issued PEM certificate
    #[serde(rename = "Cert")]
    pub cert: String,

    /// Information about the issuing CA
    #[serde(rename = "ServerInfo", default)]
    pub server_info: Option<ServerInfo>,
}

/// CA details returned with an enrollment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// CA instance name
    #[serde(rename = "CAName", default)]
    pub ca_name: String,

    /// Base64 of the PEM chain
    #[serde(rename = "CAChain", default)]
    pub ca_chain: String,
}

/// Payload of `GET /api/v1/cainfo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaInfo {
    /// CA instance name
    #[serde(rename = "CAName", default)]
    pub ca_name: String,

    /// PEM chain; base64 on the wire, decoded by the client
    #[serde(rename = "CAChain", default)]
    pub ca_chain: String,

    /// Server version
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
}
