//! Record services over the OPNsense web administration interface.
//!
//! Composes the `opnweb-api` mechanics (session, table scraping, form
//! secrets) into the four reconciliation verbs for DHCP static mappings
//! and DNS host overrides. The appliance is the sole source of truth:
//! records are scraped fresh on every call, positional row IDs are
//! derived per snapshot and never cached, and every mutation runs the
//! appliance's submit-then-apply commit protocol.

pub mod config;
pub mod dhcp;
pub mod dns;
pub mod error;
pub mod id;
pub mod model;
pub mod mutation;
pub mod provider;

pub use config::ProviderConfig;
pub use dhcp::DhcpService;
pub use dns::DnsService;
pub use error::CoreError;
pub use id::{MappingId, OverrideId};
pub use model::{HostOverride, StaticMapping};
pub use mutation::MutationStep;
pub use provider::Provider;

// Re-exported so callers can state a TLS policy without depending on
// opnweb-api directly.
pub use opnweb_api::TlsMode;
