//! The appliance round-trip check carried over from the original test
//! harness: count leases, create a scratch mapping, count again. Leaves
//! the created mapping in place for inspection.

use opnweb_core::{Provider, StaticMapping};

use crate::cli::SmokeArgs;
use crate::error::CliError;

pub async fn handle(args: SmokeArgs, provider: &Provider) -> Result<(), CliError> {
    println!("[R] Reading out DHCP leases ...");
    let before = provider.dhcp_leases().await?.len();
    println!("[R] Found {before} DHCP leases.");

    println!("[C] Creating new static DHCP lease ...");
    let mapping = StaticMapping {
        interface: args.interface,
        mac: args.mac,
        ipaddr: args.ip,
        hostname: args.hostname,
    };
    provider.create_static_mapping(&mapping).await?;

    println!("[R] Reading out DHCP leases ...");
    let after = provider.dhcp_leases().await?.len();
    println!("[R] Found {after} DHCP leases.");

    if after == before + 1 {
        println!("[R] That's one more, we're good to go !");
    } else {
        println!("[R] Something went wrong ;-(");
    }

    Ok(())
}
