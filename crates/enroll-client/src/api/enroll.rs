//! `POST /api/v1/enroll`

use enroll_core::{
    AttributeRequest, EnrollError, EnrollResult, Enrollment, EnrollmentRequest, Result,
};
use serde::Serialize;
use tracing::{debug, info};

use super::decode_pem_field;
use crate::{generate_csr, CaClient};

const PEM_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----";

#[derive(Serialize)]
struct EnrollBody<'a> {
    certificate_request: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attr_reqs: Option<&'a [AttributeRequest]>,
}

impl CaClient {
    /// Exchange an enrollment secret for a signed certificate.
    ///
    /// A fresh key pair is generated per call; the returned [`Enrollment`]
    /// carries the private key alongside the certificate the CA issued.
    pub async fn enroll(&self, request: &EnrollmentRequest) -> Result<Enrollment> {
        let csr = generate_csr(&request.enrollment_id)?;

        let body = EnrollBody {
            certificate_request: &csr.csr_pem,
            caname: self.ca_name(),
            profile: request.profile.as_deref(),
            attr_reqs: (!request.attr_reqs.is_empty()).then_some(request.attr_reqs.as_slice()),
        };

        let url = self.endpoint("enroll")?;
        debug!(url = %url, enrollment_id = %request.enrollment_id, "enroll request");

        let http_request = self
            .http()
            .post(url)
            .basic_auth(&request.enrollment_id, Some(request.secret.expose()))
            .json(&body);

        let result: EnrollResult = self.send(http_request).await?;

        let certificate = decode_pem_field(&result.cert, "Cert")?;
        if !certificate.contains(PEM_CERTIFICATE) {
            return Err(EnrollError::InvalidResponse(
                "Cert does not contain a PEM certificate".into(),
            ));
        }

        let ca_chain = result
            .server_info
            .map(|info| info.ca_chain)
            .filter(|chain| !chain.trim().is_empty())
            .map(|chain| decode_pem_field(&chain, "CAChain"))
            .transpose()?;

        info!(enrollment_id = %request.enrollment_id, "enrollment certificate issued");
        debug!(certificate = %certificate, "issued certificate");

        Ok(Enrollment {
            certificate,
            key: csr.key,
            ca_chain,
        })
    }
}
