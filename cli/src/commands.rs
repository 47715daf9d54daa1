pub mod get;
pub mod inventory;
pub mod traffic;

use std::net::Ipv4Addr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tmd_common::config::{SweepConfig, parse_seconds};
use tmd_common::network::target::Target;
use tmd_common::snmp::Identifier;

#[derive(Parser)]
#[command(name = "tmd")]
#[command(about = "Inventory the SNMP-speaking devices of a LAN.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub query: QueryArgs,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Less output (-q warnings only, -qq no tree)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inventory every reachable host in the targets
    #[command(alias = "i")]
    Inventory {
        /// IP, range (10.0.0.1-20), CIDR (10.0.0.0/24) or a comma list of them
        target: Target,

        /// Liveness check run before querying a host
        #[arg(long, value_enum, default_value_t = Probe::Ping)]
        probe: Probe,

        /// Hosts inventoried concurrently
        #[arg(short, long)]
        workers: Option<usize>,

        /// Queries in flight against a single host
        #[arg(long)]
        fanout: Option<usize>,
    },
    /// Query a single identifier on one host
    #[command(alias = "g")]
    Get { host: Ipv4Addr, oid: Identifier },
    /// Bytes and packets sent and received by the local interfaces
    #[command(alias = "t")]
    Traffic,
}

/// Flags shared by every subcommand. Unset flags fall back to the
/// environment, then to the built-in defaults.
#[derive(Args)]
pub struct QueryArgs {
    /// Community string
    #[arg(short, long, global = true)]
    pub community: Option<String>,

    /// Agent UDP port
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Seconds to wait for each reply
    #[arg(short, long, global = true, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Extra attempts after a timeout
    #[arg(short, long, global = true)]
    pub retries: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Probe {
    /// One ICMP echo through the system ping
    Ping,
    /// TCP connect to port 22
    Tcp,
    /// Query every host without a liveness check
    None,
}

/// How results are rendered.
pub struct Output {
    pub json: bool,
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn output(&self) -> Output {
        Output {
            json: self.json,
            quiet: self.quiet,
        }
    }

    pub fn sweep_config(&self) -> SweepConfig {
        let mut config = SweepConfig::default().with_env_overrides();

        if let Some(community) = &self.query.community {
            config.community = community.clone();
        }
        if let Some(port) = self.query.port {
            config.port = port;
        }
        if let Some(timeout) = self.query.timeout {
            config.timeout = timeout;
        }
        if let Some(retries) = self.query.retries {
            config.retries = retries;
        }
        if let Commands::Inventory { workers, fanout, .. } = &self.command {
            if let Some(workers) = workers {
                config.workers = *workers;
            }
            if let Some(fanout) = fanout {
                config.host_fanout = *fanout;
            }
        }
        config
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    parse_seconds(s).ok_or_else(|| format!("'{s}' is not a number of seconds"))
}
