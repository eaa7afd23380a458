//! Command-line definition.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "opnweb",
    version,
    about = "Manage OPNsense DHCP reservations and DNS host overrides through the web UI"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Appliance root URL (e.g. https://192.168.1.1)
    #[arg(long, global = true, env = "OPNWEB_URL")]
    pub url: Option<String>,

    /// Admin user name
    #[arg(long, short = 'u', global = true, env = "OPNWEB_USER")]
    pub user: Option<String>,

    /// Admin password
    #[arg(long, global = true, env = "OPNWEB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Profile from the config file
    #[arg(long, short = 'p', global = true)]
    pub profile: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// DHCP static mappings
    Dhcp(DhcpArgs),
    /// DNS host overrides
    Dns(DnsArgs),
    /// Round-trip check against a scratch interface: count leases,
    /// create a mapping, count again
    Smoke(SmokeArgs),
}

#[derive(Debug, Args)]
pub struct DhcpArgs {
    #[command(subcommand)]
    pub command: DhcpCommand,
}

#[derive(Debug, Subcommand)]
pub enum DhcpCommand {
    /// List static mappings on an interface
    List {
        #[arg(long, short)]
        interface: String,
    },
    /// List every lease the appliance currently reports
    Leases,
    /// Show one mapping addressed as interface/mac
    Show { id: String },
    /// Create a static mapping
    Create {
        #[arg(long, short)]
        interface: String,
        #[arg(long)]
        mac: String,
        #[arg(long)]
        ip: String,
        #[arg(long, default_value = "")]
        hostname: String,
    },
    /// Update the address or hostname of the mapping at interface/mac
    Update {
        id: String,
        #[arg(long)]
        ip: String,
        #[arg(long, default_value = "")]
        hostname: String,
    },
    /// Delete the mapping addressed as interface/mac
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// List all host overrides
    List,
    /// Create a host override
    Create {
        #[arg(long = "type", value_name = "TYPE")]
        record_type: String,
        #[arg(long)]
        host: String,
        #[arg(long)]
        domain: String,
        #[arg(long)]
        ip: String,
    },
    /// Show one override addressed as type/host/domain/ip/row
    Show { id: String },
    /// Point the override at a new address
    Update {
        id: String,
        #[arg(long)]
        ip: String,
    },
    /// Delete the override addressed as type/host/domain/ip/row
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct SmokeArgs {
    #[arg(long, short, default_value = "opt3")]
    pub interface: String,
    #[arg(long, default_value = "aa:bb:cc:dd:ee:ff")]
    pub mac: String,
    #[arg(long, default_value = "10.69.0.99")]
    pub ip: String,
    #[arg(long, default_value = "terraform")]
    pub hostname: String,
}
