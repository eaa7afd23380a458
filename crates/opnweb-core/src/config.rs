// ── Provider configuration ──
//
// Connection settings for one appliance. Built by the CLI (or whatever
// adapter sits on top) and handed in whole -- this crate never reads
// files or the environment.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use opnweb_api::TlsMode;

/// Everything needed to open one authenticated session.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Appliance root address (e.g. `https://192.168.1.1`).
    pub url: Url,
    /// Admin user.
    pub username: String,
    /// Admin password; only exposed at the login POST.
    pub password: SecretString,
    /// TLS trust policy. Explicit: accepting self-signed certificates is
    /// a caller decision, never a default.
    pub tls: TlsMode,
    /// Request timeout for every round-trip.
    pub timeout: Duration,
}
