//! Administrator enrollment flow.
//!
//! 1. Resolve the CA entry from the connection profile
//! 2. Read its TLS trust root and build the CA client
//! 3. Open the wallet
//! 4. If the label is already present, stop
//! 5. Otherwise enroll, wrap the result as an X.509 identity and import it
//!
//! Every step before the final import is read-only, so a failure anywhere
//! leaves the wallet untouched.

use std::path::Path;

use anyhow::{Context, Result};
use enroll_client::CaClient;
use enroll_core::{EnrollmentRequest, NetworkProfile, X509Identity};
use enroll_wallet::{FileSystemWallet, WalletStore};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Settings, DEFAULT_MSP_ID};

/// What a run did
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The label was already in the wallet; nothing was sent to the CA
    AlreadyEnrolled {
        /// Wallet label
        label: String,
    },
    /// A new identity was enrolled and imported
    Enrolled {
        /// Wallet label
        label: String,
        /// MSP id the identity was tagged with
        msp_id: String,
    },
}

/// A CA client bound to the MSP its identities belong to
#[derive(Debug, Clone)]
pub struct CaTarget {
    /// Client for the profile's CA entry
    pub client: CaClient,
    /// MSP id for enrolled identities
    pub msp_id: String,
}

impl CaTarget {
    /// Load the profile, read the trust root and build the client.
    pub fn load(settings: &Settings) -> Result<Self> {
        let profile = NetworkProfile::from_file(&settings.profile).with_context(|| {
            format!(
                "Failed to load connection profile {}",
                settings.profile.display()
            )
        })?;
        debug!(
            profile = ?profile.name,
            cas = profile.certificate_authorities.len(),
            "loaded connection profile"
        );

        let entry = profile.certificate_authority(&settings.ca)?;
        debug!(ca = %settings.ca, info = ?entry, "resolved certificate authority");

        let base_dir = settings
            .profile
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if let Some(path) = entry.trust_root_path(base_dir) {
            debug!(path = %path.display(), "reading TLS trust root");
        }
        let trust_roots = entry.trust_roots(base_dir)?;

        let client = CaClient::builder(&entry.url)
            .ca_name(entry.ca_name.as_deref().unwrap_or(&settings.ca))
            .trusted_roots(trust_roots)
            .verify(entry.verify_tls() && !settings.insecure)
            .timeout(settings.timeout)
            .build()?;
        debug!(client = ?client, "CA client ready");

        let msp_id = settings
            .msp_id
            .clone()
            .or_else(|| profile.msp_id_for_ca(&settings.ca).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_MSP_ID.to_string());

        Ok(Self { client, msp_id })
    }
}

/// Enroll `settings.enrollment_id` into `wallet` unless `settings.label` exists.
pub async fn ensure_identity<W>(
    target: &CaTarget,
    settings: &Settings,
    wallet: &W,
) -> Result<Outcome>
where
    W: WalletStore + ?Sized,
{
    if wallet.exists(&settings.label).await? {
        info!(label = %settings.label, "identity already present in wallet");
        return Ok(Outcome::AlreadyEnrolled {
            label: settings.label.clone(),
        });
    }

    let request = EnrollmentRequest::new(&settings.enrollment_id, settings.secret.expose());
    let enrollment = target.client.enroll(&request).await?;
    debug!(certificate = %enrollment.certificate, "enrollment result");

    let identity = X509Identity::from_enrollment(&target.msp_id, &enrollment);
    debug!(msp_id = %identity.msp_id, kind = %identity.kind, "created identity");

    wallet.put(&settings.label, &identity).await?;

    Ok(Outcome::Enrolled {
        label: settings.label.clone(),
        msp_id: target.msp_id.clone(),
    })
}

/// Run the whole flow against the filesystem wallet in `settings.wallet`.
pub async fn run(settings: &Settings) -> Result<Outcome> {
    let target = CaTarget::load(settings)?;

    let wallet = FileSystemWallet::open(&settings.wallet)
        .await
        .with_context(|| format!("Failed to open wallet {}", settings.wallet.display()))?;
    info!(path = %wallet.path().display(), "wallet path");

    ensure_identity(&target, settings, &wallet).await
}
