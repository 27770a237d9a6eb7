use std::net::Ipv4Addr;

use anyhow::bail;
use ipkit_core::{Network, SplitSpec};

use crate::config::Config;
use crate::terminal::format;

/// Splits the given subnet and prints the resulting networks.
pub fn split(
    input: &str,
    bits: Option<u8>,
    networks: Option<u32>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let network = Network::parse(input)?;

    // clap already rejects the combination of both flags.
    let spec = match (bits, networks) {
        (Some(bits), None) => SplitSpec::Bits(bits),
        (None, Some(count)) => SplitSpec::Count(count),
        _ => bail!("either --bits or --networks must be specified, see --help for more information"),
    };

    let target = spec.resolve(&network)?;
    let children = network.split(target)?;

    let mut out = format::output_stream(cfg.output_file.as_deref(), cfg.append)?;
    format::split_table(out.as_mut(), &children, cfg.csv)?;
    Ok(())
}

/// Prints the netmask reference table, optionally filtered to the given
/// prefix lengths.
pub fn list(prefix_lengths: &[u8]) -> anyhow::Result<()> {
    for length in prefix_lengths {
        if *length > 32 {
            bail!("invalid prefix length: {length} (must be between 0 and 32)");
        }
    }

    let prefixes: Vec<u8> = if prefix_lengths.is_empty() {
        (0..=32).rev().collect()
    } else {
        prefix_lengths.to_vec()
    };

    let rows = prefixes
        .into_iter()
        .map(|prefix| Network::new(Ipv4Addr::UNSPECIFIED, prefix))
        .collect::<Result<Vec<_>, _>>()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    format::netmask_list(&mut out, &rows)?;
    Ok(())
}
