pub mod inspect;
pub mod ping;
pub mod subnet;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ipkit")]
#[command(about = "IPv4 inspection, subnetting and TCP latency probing.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Take a closer look at an IPv4 address
    #[command(alias = "i")]
    Inspect {
        /// Address with optional mask: 10.0.0.1/24, "10.0.0.1 255.255.255.0",
        /// 0xc0a800fe, "c0800d25 fffffe00"
        #[arg(required = true, num_args = 1..=2)]
        address: Vec<String>,
        /// Also display binary, hexadecimal and decimal notation
        #[arg(short, long)]
        detailed: bool,
    },
    /// Subnetting tools and generators for IPv4 networks
    #[command(alias = "s")]
    Subnet {
        #[command(subcommand)]
        command: SubnetCommands,
    },
    /// Send a stream of TCP pings to a host
    #[command(alias = "p")]
    Ping {
        /// Destination host, optionally as host:port
        host: String,
        /// Destination port (defaults to 443)
        port: Option<u16>,
        /// Number of probes to send (default: until interrupted)
        #[arg(short, long, default_value_t = 0)]
        count: u32,
        /// Time to wait for a response, in milliseconds
        #[arg(short, long, default_value_t = 2000)]
        timeout: u64,
        /// Delay between probes, in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        delay: u64,
        /// Show timestamps and mean round-trip time per probe
        #[arg(short, long)]
        verbose: bool,
        /// Write output to file
        #[arg(short, long)]
        output_file: Option<PathBuf>,
        /// Append when writing to file with --output-file
        #[arg(short, long)]
        append: bool,
    },
}

#[derive(Subcommand)]
pub enum SubnetCommands {
    /// Split a subnet into smaller subnets
    Split {
        /// Subnet to divide: 10.0.0.0/24 or "10.0.0.0 255.255.255.0"
        #[arg(required = true, num_args = 1..=2)]
        subnet: Vec<String>,
        /// Child subnet size in prefix bits
        #[arg(short, long, conflicts_with = "networks")]
        bits: Option<u8>,
        /// Number of subnets to divide the network into
        #[arg(short, long)]
        networks: Option<u32>,
        /// Output in CSV format
        #[arg(short, long)]
        csv: bool,
        /// Write output to file
        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },
    /// Display a comprehensive IPv4 subnet mask list
    #[command(alias = "ls")]
    List {
        /// Prefix lengths to include, 0-32 (default: all)
        #[arg(short, long, value_delimiter = ',')]
        prefix_lengths: Vec<u8>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
