//! Rendering of address reports and subnet tables.
//!
//! The field widths and separators here are user-facing output and are kept
//! stable so they can be diffed.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::path::Path;

use ipkit_core::{Network, addr};

/// Opens the destination for command output: stdout, or a file when
/// `path` is given. `append` controls whether an existing file is
/// extended or truncated.
pub fn output_stream(path: Option<&Path>, append: bool) -> io::Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdout()));
    };

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    Ok(Box::new(options.open(path)?))
}

fn address_rows(net: &Network) -> [(&'static str, Ipv4Addr); 5] {
    [
        ("IPv4 address", net.addr()),
        ("Network mask", net.netmask()),
        ("Network address", net.network_address()),
        ("Broadcast address", net.broadcast_address()),
        ("Wildcard mask", net.wildcard()),
    ]
}

/// The basic address report: address, netmask and network sections.
pub fn simple_report(out: &mut dyn Write, net: &Network) -> io::Result<()> {
    writeln!(out, "Address Details:")?;
    writeln!(out, " {:<19}: {}", "IPv4 address", net.addr())?;
    writeln!(out, " {:<19}: {}", "Network mask", net.netmask())?;
    writeln!(out)?;
    writeln!(out, "Netmask Details:")?;
    writeln!(out, " {:<19}: {}", "Network mask", net.netmask())?;
    writeln!(out, " {:<19}: {}", "Network bits", net.prefix_len())?;
    writeln!(out, " {:<19}: {}", "Wildcard mask", net.wildcard())?;
    writeln!(out)?;
    writeln!(out, "Network Details:")?;
    writeln!(
        out,
        " {:<19}: {}/{} ({} addresses)",
        "CIDR notation",
        net.network_address(),
        net.prefix_len(),
        net.network_size()
    )?;
    writeln!(out, " {:<19}: {}", "Network address", net.network_address())?;
    writeln!(out, " {:<19}: {}", "Broadcast address", net.broadcast_address())?;
    writeln!(
        out,
        " {:<19}: {} - {} ({} hosts)",
        "Usable hosts",
        net.first_host(),
        net.last_host(),
        net.usable_hosts()
    )?;
    Ok(())
}

/// The full report: the simple sections plus binary, hexadecimal and
/// decimal views of every address field, rendered through the codec.
pub fn detailed_report(out: &mut dyn Write, net: &Network) -> io::Result<()> {
    simple_report(out, net)?;

    writeln!(out)?;
    writeln!(out, "Binary Notation:")?;
    for (label, value) in address_rows(net) {
        writeln!(out, " {:<19}: {} ({})", label, addr::binary_text(value), value)?;
    }

    writeln!(out)?;
    writeln!(out, "Hexadecimal Notation:")?;
    for (label, value) in address_rows(net) {
        writeln!(out, " {:<19}: {} ({})", label, addr::hex_text(value), value)?;
    }

    writeln!(out)?;
    writeln!(out, "Decimal Notation:")?;
    for (label, value) in address_rows(net) {
        writeln!(
            out,
            " {:<19}: {:>10} ({})",
            label,
            addr::decimal_text(value),
            value
        )?;
    }
    Ok(())
}

/// Prints the child networks of a split, either as an aligned table with a
/// header rule or as CSV.
pub fn split_table(out: &mut dyn Write, children: &[Network], csv: bool) -> io::Result<()> {
    if csv {
        writeln!(out, "prefix,network,first,last,broadcast,hosts")?;
        for child in children {
            writeln!(
                out,
                "{},{},{},{},{},{}",
                child,
                child.network_address(),
                child.first_host(),
                child.last_host(),
                child.broadcast_address(),
                child.usable_hosts()
            )?;
        }
        return Ok(());
    }

    // Column width follows the widest broadcast address; the prefix column
    // gets extra room for its /NN suffix.
    let width = children
        .iter()
        .map(|c| c.broadcast_address().to_string().len())
        .max()
        .unwrap_or(0)
        + 1;
    let prefix_width = width + 3;
    let rule = "-".repeat(width * 5 + 13);

    writeln!(
        out,
        "{:<prefix_width$} {:<width$} {:<width$} {:<width$} {:<width$} {}",
        "Prefix", "Network", "First", "Last", "Broadcast", "Hosts"
    )?;
    writeln!(out, "{rule}")?;
    for child in children {
        writeln!(
            out,
            "{:<prefix_width$} {:<width$} {:<width$} {:<width$} {:<width$} {}",
            child.to_string(),
            child.network_address().to_string(),
            child.first_host().to_string(),
            child.last_host().to_string(),
            child.broadcast_address().to_string(),
            child.usable_hosts()
        )?;
    }
    Ok(())
}

/// Prints the netmask reference table for the given rows.
pub fn netmask_list(out: &mut dyn Write, rows: &[Network]) -> io::Result<()> {
    writeln!(out, "CIDR  Subnet Mask      Addresses   Wildcard Mask")?;
    writeln!(out, "--------------------------------------------------")?;
    for net in rows {
        writeln!(
            out,
            "{:>4}  {:<16} {:<11} {:<10}",
            format!("/{}", net.prefix_len()),
            net.netmask().to_string(),
            net.network_size(),
            net.wildcard().to_string()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl Fn(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn simple_report_layout() {
        let net = Network::parse("10.0.0.1/24").unwrap();
        let text = render(|out| simple_report(out, &net));
        assert!(text.contains(" IPv4 address       : 10.0.0.1\n"));
        assert!(text.contains(" CIDR notation      : 10.0.0.0/24 (256 addresses)\n"));
        assert!(text.contains(" Usable hosts       : 10.0.0.1 - 10.0.0.254 (254 hosts)\n"));
    }

    #[test]
    fn detailed_report_alternate_notations() {
        let net = Network::parse("192.168.0.1/24").unwrap();
        let text = render(|out| detailed_report(out, &net));
        assert!(
            text.contains(" IPv4 address       : 11000000.10101000.00000000.00000001 (192.168.0.1)\n")
        );
        assert!(text.contains(" IPv4 address       : c0a80001 (192.168.0.1)\n"));
        assert!(text.contains(" IPv4 address       : 3232235521 (192.168.0.1)\n"));
    }

    #[test]
    fn split_csv_layout() {
        let children = Network::parse("10.0.0.0/23").unwrap().split(24).unwrap();
        let text = render(|out| split_table(out, &children, true));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("prefix,network,first,last,broadcast,hosts"));
        assert_eq!(
            lines.next(),
            Some("10.0.0.0/24,10.0.0.0,10.0.0.1,10.0.0.254,10.0.0.255,254")
        );
    }

    #[test]
    fn split_table_is_aligned() {
        let children = Network::parse("10.0.0.0/23").unwrap().split(24).unwrap();
        let text = render(|out| split_table(out, &children, false));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Prefix"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines.len(), 2 + children.len());
    }

    #[test]
    fn netmask_list_layout() {
        let rows = [Network::new(Ipv4Addr::UNSPECIFIED, 24).unwrap()];
        let text = render(|out| netmask_list(out, &rows));
        assert!(text.contains(" /24  255.255.255.0    256         0.0.0.255"));
    }
}
