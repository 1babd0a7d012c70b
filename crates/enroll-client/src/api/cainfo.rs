//! `GET /api/v1/cainfo`

use enroll_core::{CaInfo, Result};
use tracing::debug;

use super::decode_pem_field;
use crate::CaClient;

impl CaClient {
    /// Fetch the CA's name, version and certificate chain.
    ///
    /// The returned `ca_chain` is decoded PEM.
    pub async fn ca_info(&self) -> Result<CaInfo> {
        let url = self.endpoint("cainfo")?;
        debug!(url = %url, "cainfo request");

        let mut request = self.http().get(url);
        if let Some(name) = self.ca_name() {
            request = request.query(&[("ca", name)]);
        }

        let mut info: CaInfo = self.send(request).await?;
        if !info.ca_chain.trim().is_empty() {
            info.ca_chain = decode_pem_field(&info.ca_chain, "CAChain")?;
        }
        Ok(info)
    }
}
