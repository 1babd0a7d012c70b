use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for enrollment operations
pub type Result<T> = std::result::Result<T, EnrollError>;

/// Errors that can occur while enrolling an identity or storing it
#[derive(Error, Debug)]
pub enum EnrollError {
    /// The network profile is malformed or incomplete
    #[error("invalid network profile: {0}")]
    Profile(String),

    /// The requested certificate authority is not in the profile
    #[error("certificate authority not found in network profile: {name}")]
    CaNotFound {
        /// Logical name that was looked up
        name: String,
    },

    /// The TLS trust root could not be read
    #[error("failed to read TLS trust root {}: {source}", path.display())]
    TrustRoot {
        /// Resolved path of the trust-root file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TLS material was rejected while building the client
    #[error("TLS configuration error: {0}")]
    Tls(String),

    /// Key pair or CSR generation failed
    #[error("failed to generate certificate signing request: {0}")]
    Csr(String),

    /// The CA answered with an error envelope
    #[error("enrollment rejected by CA (HTTP {status}, code {code}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// CA error code
        code: i64,
        /// CA error message
        message: String,
    },

    /// The CA returned an error that was not a CA envelope
    #[error("CA error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body or message
        message: String,
    },

    /// The CA returned a success status with an unusable body
    #[error("invalid CA response: {0}")]
    InvalidResponse(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request to CA timed out")]
    Timeout,

    /// Connection failed
    #[error("connection to CA failed: {0}")]
    Connection(String),

    /// Wallet label is not usable as a store key
    #[error("invalid wallet label: {0:?}")]
    InvalidLabel(String),

    /// Wallet entry exists but cannot be decoded
    #[error("corrupt wallet entry {label:?}: {message}")]
    CorruptIdentity {
        /// Label of the entry
        label: String,
        /// Decoding failure
        message: String,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EnrollError {
    /// Returns true if the CA refused the presented credentials
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        match self {
            Self::Rejected { status, code, .. } => *status == 401 || *code == 20,
            Self::Api { code, .. } => *code == 401,
            _ => false,
        }
    }

    /// Returns the HTTP status code if the CA answered
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
