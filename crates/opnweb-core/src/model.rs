// ── Record models ──
//
// What the two configuration tables hold, as the appliance displays it.
// All fields are the scraped display strings; records live only for the
// duration of one reconciliation call.

use serde::{Deserialize, Serialize};

/// Column labels of the DHCP tables.
pub mod dhcp_field {
    pub const INTERFACE: &str = "Interface";
    pub const IP: &str = "IP address";
    pub const MAC: &str = opnweb_api::scrape::MAC_ADDRESS_LABEL;
    pub const HOSTNAME: &str = opnweb_api::scrape::HOSTNAME_LABEL;
}

/// Column labels of the Unbound host-override table.
pub mod dns_field {
    pub const TYPE: &str = "Type";
    pub const HOST: &str = "Host";
    pub const DOMAIN: &str = "Domain";
    pub const VALUE: &str = "Value";
}

/// A DHCP static address reservation.
///
/// Natural key: `(interface, mac)`. The positional row ID is not part of
/// the record -- it is derived from a table snapshot at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMapping {
    pub interface: String,
    pub mac: String,
    pub ipaddr: String,
    pub hostname: String,
}

/// An Unbound DNS host override.
///
/// Natural key: the full `(record_type, host, domain, ip)` tuple. The
/// record type is kept as the appliance's display string (`A`, `AAAA`,
/// `MX`) rather than an enum, since the table is the authority on what
/// types exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostOverride {
    pub record_type: String,
    pub host: String,
    pub domain: String,
    pub ip: String,
}

impl HostOverride {
    /// The fully qualified name this override answers for.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.host, self.domain)
    }
}
