//! DNS host-override command handlers.

use serde::Serialize;
use tabled::Tabled;

use opnweb_core::{HostOverride, OverrideId, Provider};

use crate::cli::{DnsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled, Serialize)]
struct OverrideRow {
    #[tabled(rename = "Row")]
    row: usize,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl OverrideRow {
    fn new(row: usize, entry: HostOverride) -> Self {
        Self {
            row,
            record_type: entry.record_type,
            host: entry.host,
            domain: entry.domain,
            value: entry.ip,
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    command: DnsCommand,
    provider: &Provider,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        DnsCommand::List => {
            let overrides = provider.list_host_overrides().await?;
            let rows: Vec<OverrideRow> = overrides
                .into_iter()
                .enumerate()
                .map(|(row, entry)| OverrideRow::new(row, entry))
                .collect();
            println!("{}", output::render(global.output, &rows));
        }
        DnsCommand::Create {
            record_type,
            host,
            domain,
            ip,
        } => {
            let entry = HostOverride {
                record_type,
                host,
                domain,
                ip,
            };
            let id = provider.create_host_override(&entry).await?;
            println!("created {id}");
        }
        DnsCommand::Show { id } => {
            let id: OverrideId = id.parse()?;
            let (row, entry) = provider.read_host_override(&id).await?;
            println!(
                "{}",
                output::render(global.output, &[OverrideRow::new(row, entry)])
            );
        }
        DnsCommand::Update { id, ip } => {
            let id: OverrideId = id.parse()?;
            let entry = HostOverride {
                ip,
                ..id.record()
            };
            provider.update_host_override(&id, &entry).await?;
            println!("updated {}", OverrideId::new(&entry, id.row));
        }
        DnsCommand::Delete { id } => {
            let id: OverrideId = id.parse()?;
            provider.delete_host_override(&id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
