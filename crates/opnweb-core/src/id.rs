// ── Composite resource identifiers ──
//
// The appliance has no durable record IDs, so external reconciliation
// tools address records by natural key, serialized as a slash-separated
// string. Parsing and re-serialization round-trip deterministically;
// malformed input is a specific format error, never a partial parse.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::model::{HostOverride, StaticMapping};

/// `interface/mac` handle for a DHCP static mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingId {
    pub interface: String,
    pub mac: String,
}

impl MappingId {
    pub fn new(interface: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            mac: mac.into(),
        }
    }

    pub fn for_mapping(mapping: &StaticMapping) -> Self {
        Self::new(mapping.interface.clone(), mapping.mac.clone())
    }
}

impl fmt::Display for MappingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.interface, self.mac)
    }
}

impl FromStr for MappingId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some(interface), Some(mac)) if !interface.is_empty() && !mac.is_empty() => {
                Ok(Self::new(interface, mac))
            }
            _ => Err(CoreError::InvalidResourceId {
                given: s.to_owned(),
                expected: "interface/mac",
            }),
        }
    }
}

/// `type/host/domain/ip/row` handle for a DNS host override.
///
/// The trailing row index is the positional ID observed when the handle
/// was built. It is an appliance-internal address, not identity: every
/// use re-verifies it against a fresh table snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideId {
    pub record_type: String,
    pub host: String,
    pub domain: String,
    pub ip: String,
    pub row: usize,
}

impl OverrideId {
    pub fn new(entry: &HostOverride, row: usize) -> Self {
        Self {
            record_type: entry.record_type.clone(),
            host: entry.host.clone(),
            domain: entry.domain.clone(),
            ip: entry.ip.clone(),
            row,
        }
    }

    /// The natural-key tuple carried by this handle.
    pub fn record(&self) -> HostOverride {
        HostOverride {
            record_type: self.record_type.clone(),
            host: self.host.clone(),
            domain: self.domain.clone(),
            ip: self.ip.clone(),
        }
    }
}

impl fmt::Display for OverrideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.record_type, self.host, self.domain, self.ip, self.row
        )
    }
}

impl FromStr for OverrideId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoreError::InvalidResourceId {
            given: s.to_owned(),
            expected: "type/host/domain/ip/row",
        };

        let parts: Vec<&str> = s.split('/').collect();
        let [record_type, host, domain, ip, row] = parts.as_slice() else {
            return Err(malformed());
        };
        if [record_type, host, domain, ip].iter().any(|p| p.is_empty()) {
            return Err(malformed());
        }
        let row: usize = row.parse().map_err(|_| malformed())?;

        Ok(Self {
            record_type: (*record_type).to_owned(),
            host: (*host).to_owned(),
            domain: (*domain).to_owned(),
            ip: (*ip).to_owned(),
            row,
        })
    }
}
