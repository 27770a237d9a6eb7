use std::io::Write;

use ipkit_core::Network;

use crate::terminal::format;

/// Parses the given address specification and prints the report.
pub fn inspect(input: &str, detailed: bool) -> anyhow::Result<()> {
    if input.contains(':') {
        anyhow::bail!("support for IPv6 addresses is not implemented yet");
    }

    let network = Network::parse(input)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if detailed {
        format::detailed_report(&mut out, &network)?;
    } else {
        format::simple_report(&mut out, &network)?;
    }
    out.flush()?;
    Ok(())
}
