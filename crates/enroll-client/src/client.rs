//! Fabric CA client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use enroll_core::{CaResponse, EnrollError, Result};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Prefix of every CA REST endpoint
const API_PREFIX: &str = "api/v1/";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a single certificate authority
#[derive(Clone)]
pub struct CaClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    ca_name: Option<String>,
    verify: bool,
}

impl fmt::Debug for CaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaClient")
            .field("url", &self.inner.base_url.as_str())
            .field("ca_name", &self.inner.ca_name)
            .field("verify", &self.inner.verify)
            .finish_non_exhaustive()
    }
}

impl CaClient {
    /// Create a builder for the CA at `url`
    #[must_use]
    pub fn builder(url: impl Into<String>) -> CaClientBuilder {
        CaClientBuilder::new(url)
    }

    /// Base URL of the CA
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.inner.base_url
    }

    /// CA instance name sent with requests
    #[must_use]
    pub fn ca_name(&self) -> Option<&str> {
        self.inner.ca_name.as_deref()
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    /// Absolute URL of an API endpoint
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.inner
            .base_url
            .join(API_PREFIX)
            .and_then(|api| api.join(path))
            .map_err(|e| EnrollError::Http(format!("cannot build endpoint {path}: {e}")))
    }

    /// Send a request and unwrap the CA's response envelope
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(transport_error)?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    let envelope = match serde_json::from_str::<CaResponse<serde_json::Value>>(&body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(EnrollError::InvalidResponse(e.to_string()));
        }
        Err(_) => {
            return Err(EnrollError::Api {
                code: status.as_u16(),
                message: body,
            });
        }
    };

    if let Some(error) = envelope.first_error() {
        warn!(
            status = status.as_u16(),
            code = error.code,
            message = %error.message,
            "CA returned an error"
        );
        return Err(EnrollError::Rejected {
            status: status.as_u16(),
            code: error.code,
            message: error.message.clone(),
        });
    }

    if !status.is_success() {
        return Err(EnrollError::Api {
            code: status.as_u16(),
            message: body,
        });
    }

    match envelope.result {
        Some(result) if envelope.success => serde_json::from_value(result)
            .map_err(|e| EnrollError::InvalidResponse(e.to_string())),
        Some(_) => Err(EnrollError::InvalidResponse(
            "CA reported failure without errors".into(),
        )),
        None => Err(EnrollError::InvalidResponse("missing result".into())),
    }
}

fn transport_error(e: reqwest::Error) -> EnrollError {
    if e.is_timeout() {
        EnrollError::Timeout
    } else if e.is_connect() {
        EnrollError::Connection(e.to_string())
    } else {
        EnrollError::Http(e.to_string())
    }
}

/// Builder for configuring a [`CaClient`]
pub struct CaClientBuilder {
    url: String,
    ca_name: Option<String>,
    trusted_roots: Option<Vec<u8>>,
    verify: bool,
    timeout: Duration,
    user_agent: String,
}

impl CaClientBuilder {
    /// Create a new builder for the CA at `url`
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ca_name: None,
            trusted_roots: None,
            verify: true,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("enroll-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Target a named CA instance on a multi-CA server
    #[must_use]
    pub fn ca_name(mut self, name: impl Into<String>) -> Self {
        self.ca_name = Some(name.into());
        self
    }

    /// Trust only the certificates in this PEM bundle
    #[must_use]
    pub fn trusted_roots(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.trusted_roots = Some(pem.into());
        self
    }

    /// Verify the server certificate (default: true)
    #[must_use]
    pub const fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CaClient> {
        let mut base_url = Url::parse(&self.url)
            .map_err(|e| EnrollError::Profile(format!("invalid CA url {:?}: {e}", self.url)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent);

        if let Some(pem) = &self.trusted_roots {
            let certs = reqwest::Certificate::from_pem_bundle(pem)
                .map_err(|e| EnrollError::Tls(e.to_string()))?;
            if certs.is_empty() {
                return Err(EnrollError::Tls(
                    "trust root contains no PEM certificates".into(),
                ));
            }
            debug!(count = certs.len(), "using profile trust roots");
            http = http.tls_built_in_root_certs(false);
            for cert in certs {
                http = http.add_root_certificate(cert);
            }
        }

        if !self.verify {
            warn!(url = %base_url, "TLS server certificate verification disabled");
            http = http.danger_accept_invalid_certs(true);
        }

        let http = http.build().map_err(|e| EnrollError::Tls(e.to_string()))?;

        Ok(CaClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                ca_name: self.ca_name,
                verify: self.verify,
            }),
        })
    }
}
