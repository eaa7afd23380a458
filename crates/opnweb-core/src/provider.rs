// ── Provider composition ──
//
// One authenticated session per provider, shared by both record services
// and guarded by a single async mutex held across an entire
// reconciliation call. The appliance's server-side session/CSRF state
// cannot survive interleaved form flows from concurrent callers -- a
// form-priming GET and its matching POST must not interleave with
// another caller's priming GET -- so verbs run strictly serially.
// tokio's mutex keeps the guard across await points.

use tokio::sync::Mutex;
use tracing::info;

use opnweb_api::{Session, TransportConfig};

use crate::config::ProviderConfig;
use crate::dhcp::DhcpService;
use crate::dns::DnsService;
use crate::error::CoreError;
use crate::id::{MappingId, OverrideId};
use crate::model::{HostOverride, StaticMapping};

/// The caller-facing entry point: reconciliation verbs for both record
/// kinds over one serialized appliance session.
pub struct Provider {
    state: Mutex<State>,
}

struct State {
    session: Session,
    dhcp: DhcpService,
    dns: DnsService,
}

impl Provider {
    /// Authenticate and build the provider. Fails fast on login problems.
    /// The session is never refreshed automatically afterwards; on token
    /// expiry the caller connects again.
    pub async fn connect(config: ProviderConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::new(config.tls).with_timeout(config.timeout);
        let mut session = Session::connect(config.url.clone(), &transport)?;
        session.login(&config.username, &config.password).await?;
        info!(url = %config.url, "connected to appliance");
        Ok(Self {
            state: Mutex::new(State {
                session,
                dhcp: DhcpService::new(),
                dns: DnsService::new(),
            }),
        })
    }

    // ── DHCP static mappings ─────────────────────────────────────────

    /// Every lease the appliance currently reports, static and dynamic.
    pub async fn dhcp_leases(&self) -> Result<Vec<StaticMapping>, CoreError> {
        let state = self.state.lock().await;
        state.dhcp.leases(&state.session).await
    }

    /// The static mappings configured on `interface`, in table order.
    pub async fn list_static_mappings(
        &self,
        interface: &str,
    ) -> Result<Vec<StaticMapping>, CoreError> {
        let state = self.state.lock().await;
        state.dhcp.static_maps(&state.session, interface).await
    }

    /// Create a mapping and return its natural-key handle.
    pub async fn create_static_mapping(
        &self,
        mapping: &StaticMapping,
    ) -> Result<MappingId, CoreError> {
        let state = self.state.lock().await;
        state.dhcp.create(&state.session, mapping).await?;
        Ok(MappingId::for_mapping(mapping))
    }

    /// Observed record plus its positional row ID for this snapshot.
    pub async fn read_static_mapping(
        &self,
        id: &MappingId,
    ) -> Result<(usize, StaticMapping), CoreError> {
        let state = self.state.lock().await;
        state.dhcp.resolve(&state.session, &id.interface, &id.mac).await
    }

    pub async fn update_static_mapping(
        &self,
        id: &MappingId,
        mapping: &StaticMapping,
    ) -> Result<(), CoreError> {
        let state = self.state.lock().await;
        state.dhcp.update(&state.session, id, mapping).await
    }

    pub async fn delete_static_mapping(&self, id: &MappingId) -> Result<(), CoreError> {
        let state = self.state.lock().await;
        state.dhcp.delete(&state.session, id).await
    }

    // ── DNS host overrides ───────────────────────────────────────────

    /// All overrides in table order; the index is the positional row ID.
    pub async fn list_host_overrides(&self) -> Result<Vec<HostOverride>, CoreError> {
        let state = self.state.lock().await;
        state.dns.overrides(&state.session).await
    }

    /// Create an override and return its handle (natural key plus the row
    /// the entry landed on).
    pub async fn create_host_override(
        &self,
        entry: &HostOverride,
    ) -> Result<OverrideId, CoreError> {
        let state = self.state.lock().await;
        state.dns.create(&state.session, entry).await
    }

    /// Observed record plus its positional row ID for this snapshot.
    pub async fn read_host_override(
        &self,
        id: &OverrideId,
    ) -> Result<(usize, HostOverride), CoreError> {
        let state = self.state.lock().await;
        state.dns.resolve(&state.session, &id.record()).await
    }

    pub async fn update_host_override(
        &self,
        id: &OverrideId,
        entry: &HostOverride,
    ) -> Result<(), CoreError> {
        let state = self.state.lock().await;
        state.dns.update(&state.session, id, entry).await
    }

    pub async fn delete_host_override(&self, id: &OverrideId) -> Result<(), CoreError> {
        let state = self.state.lock().await;
        state.dns.delete(&state.session, id).await
    }
}
