//! Command dispatch.

pub mod dhcp;
pub mod dns;
pub mod smoke;

use opnweb_core::Provider;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(
    command: Command,
    provider: &Provider,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Dhcp(args) => dhcp::handle(args.command, provider, global).await,
        Command::Dns(args) => dns::handle(args.command, provider, global).await,
        Command::Smoke(args) => smoke::handle(args, provider).await,
    }
}
