//! DHCP command handlers.

use serde::Serialize;
use tabled::Tabled;

use opnweb_core::{MappingId, Provider, StaticMapping};

use crate::cli::{DhcpCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled, Serialize)]
struct MappingRow {
    #[tabled(rename = "Row")]
    row: usize,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "MAC address")]
    mac: String,
    #[tabled(rename = "IP address")]
    ip: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
}

impl MappingRow {
    fn new(row: usize, mapping: StaticMapping) -> Self {
        Self {
            row,
            interface: mapping.interface,
            mac: mapping.mac,
            ip: mapping.ipaddr,
            hostname: mapping.hostname,
        }
    }
}

fn rows(mappings: Vec<StaticMapping>) -> Vec<MappingRow> {
    mappings
        .into_iter()
        .enumerate()
        .map(|(row, mapping)| MappingRow::new(row, mapping))
        .collect()
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    command: DhcpCommand,
    provider: &Provider,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        DhcpCommand::List { interface } => {
            let maps = provider.list_static_mappings(&interface).await?;
            println!("{}", output::render(global.output, &rows(maps)));
        }
        DhcpCommand::Leases => {
            let leases = provider.dhcp_leases().await?;
            println!("{}", output::render(global.output, &rows(leases)));
        }
        DhcpCommand::Show { id } => {
            let id: MappingId = id.parse()?;
            let (row, mapping) = provider.read_static_mapping(&id).await?;
            println!(
                "{}",
                output::render(global.output, &[MappingRow::new(row, mapping)])
            );
        }
        DhcpCommand::Create {
            interface,
            mac,
            ip,
            hostname,
        } => {
            let mapping = StaticMapping {
                interface,
                mac,
                ipaddr: ip,
                hostname,
            };
            let id = provider.create_static_mapping(&mapping).await?;
            println!("created {id}");
        }
        DhcpCommand::Update { id, ip, hostname } => {
            let id: MappingId = id.parse()?;
            let mapping = StaticMapping {
                interface: id.interface.clone(),
                mac: id.mac.clone(),
                ipaddr: ip,
                hostname,
            };
            provider.update_static_mapping(&id, &mapping).await?;
            println!("updated {id}");
        }
        DhcpCommand::Delete { id } => {
            let id: MappingId = id.parse()?;
            provider.delete_static_mapping(&id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
