mod commands;
mod config;
mod terminal;

use commands::{CommandLine, Commands, SubnetCommands, inspect, ping, subnet};
use config::Config;
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    match commands.command {
        Commands::Inspect { address, detailed } => {
            inspect::inspect(&address.join(" "), detailed)
        }
        Commands::Subnet { command } => match command {
            SubnetCommands::Split {
                subnet,
                bits,
                networks,
                csv,
                output_file,
            } => {
                let cfg = Config {
                    output_file,
                    append: false,
                    csv,
                };
                subnet::split(&subnet.join(" "), bits, networks, &cfg)
            }
            SubnetCommands::List { prefix_lengths } => subnet::list(&prefix_lengths),
        },
        Commands::Ping {
            host,
            port,
            count,
            timeout,
            delay,
            verbose,
            output_file,
            append,
        } => {
            let cfg = Config {
                output_file,
                append,
                csv: false,
            };
            let opts = ping::PingOptions::new(count, timeout, delay, verbose);
            ping::ping(&host, port, opts, &cfg).await
        }
    }
}
