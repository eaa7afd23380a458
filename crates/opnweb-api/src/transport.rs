// ── Transport configuration ──
//
// How to build the one persistent HTTP client a session rides on.
// Appliances routinely run self-signed certificates, so skipping TLS
// verification is supported -- but it is an explicit choice, never a
// silent default.

use std::time::Duration;

use crate::error::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS trust policy for the appliance connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Verify the certificate against the system CA store.
    VerifyFull,
    /// Accept any certificate, including self-signed ones.
    DangerAcceptInvalid,
}

/// Connection tuning for a [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl TransportConfig {
    pub fn new(tls: TlsMode) -> Self {
        Self {
            tls,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the cookie-carrying HTTP client. The cookie store is not
    /// optional: the appliance session lives in a PHP session cookie.
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(self.tls == TlsMode::DangerAcceptInvalid)
            .timeout(self.timeout)
            .user_agent(concat!("opnweb/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Transport)
    }
}
