use std::io::Write;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::Config;
use crate::terminal::format;

const DEFAULT_PORT: u16 = 443;

pub struct PingOptions {
    /// Number of probes; 0 means run until interrupted.
    pub count: u32,
    pub timeout: Duration,
    pub delay: Duration,
    pub verbose: bool,
}

impl PingOptions {
    pub fn new(count: u32, timeout_ms: u64, delay_ms: u64, verbose: bool) -> Self {
        Self {
            count,
            timeout: Duration::from_millis(timeout_ms),
            delay: Duration::from_millis(delay_ms),
            verbose,
        }
    }
}

/// Running round-trip statistics, updated per completed handshake.
#[derive(Default)]
struct RttStats {
    sent: u32,
    received: u32,
    min: Duration,
    max: Duration,
    mean: Duration,
    total: Duration,
    total_deviation: Duration,
}

impl RttStats {
    fn record(&mut self, rtt: Duration) {
        self.received += 1;
        if self.received == 1 || rtt < self.min {
            self.min = rtt;
        }
        if rtt > self.max {
            self.max = rtt;
        }
        self.total += rtt;
        let mean = self.total / self.received;
        self.total_deviation += if rtt > mean { rtt - mean } else { mean - rtt };
        self.mean = mean;
    }

    /// Mean deviation of the round-trip time across received responses.
    fn mean_deviation(&self) -> Duration {
        if self.received > 1 {
            self.total_deviation / self.received
        } else {
            Duration::ZERO
        }
    }

    fn loss_percent(&self) -> u32 {
        if self.sent == 0 {
            return 0;
        }
        (self.sent - self.received) * 100 / self.sent
    }
}

/// Splits a `host:port` destination; a port given this way wins over the
/// positional one.
fn split_host_port(input: &str, positional: Option<u16>) -> anyhow::Result<(String, u16)> {
    let (host, port) = match input.rsplit_once(':') {
        Some((host, port)) => {
            let port: u16 = port
                .parse()
                .with_context(|| format!("invalid port number: {port}"))?;
            (host.to_string(), port)
        }
        None => (input.to_string(), positional.unwrap_or(DEFAULT_PORT)),
    };
    if port == 0 {
        anyhow::bail!("invalid port number, must be between 1 and 65535");
    }
    Ok((host, port))
}

/// One blocking-style connect-with-timeout round trip. Any failure counts
/// as an unanswered probe.
async fn handshake(addr: SocketAddr, probe_timeout: Duration) -> Option<Duration> {
    let start = Instant::now();
    match timeout(probe_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => Some(start.elapsed()),
        Ok(Err(error)) => {
            debug!(%addr, %error, "connect failed");
            None
        }
        Err(_elapsed) => None,
    }
}

/// Mirrors probe output into the optional `--output-file` stream. A file
/// that stops accepting writes is reported once and dropped, so the
/// remaining probes still reach stdout.
struct OutputSink {
    file: Option<Box<dyn Write>>,
}

impl OutputSink {
    fn new(file: Option<Box<dyn Write>>) -> Self {
        Self { file }
    }

    fn emit(&mut self, line: &str) {
        println!("{line}");
        if let Some(file) = self.file.as_mut() {
            if let Err(error) = writeln!(file, "{line}") {
                warn!(%error, "cannot write to output file, dropping it");
                self.file = None;
            }
        }
    }
}

fn fmt_ms(d: Duration) -> String {
    format!("{:.3}ms", d.as_secs_f64() * 1000.0)
}

/// Success line for one answered probe. The verbose form carries the send
/// timestamp, the running mean and an 8-column time field so consecutive
/// lines stay aligned.
fn reply_line(addr: SocketAddr, seq: u32, rtt: Duration, mean: Duration, verbose: bool) -> String {
    if verbose {
        format!(
            "[{:<27}] Received SYN/ACK from {}: port={} tcp_seq={seq} time={:<8} mrtt={}",
            timestamp(),
            addr.ip(),
            addr.port(),
            fmt_ms(rtt),
            fmt_ms(mean),
        )
    } else {
        format!(
            "Received SYN/ACK from {}: port={} tcp_seq={seq} time={}",
            addr.ip(),
            addr.port(),
            fmt_ms(rtt),
        )
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}

/// Probes `host` repeatedly and reports per-probe round-trip times plus a
/// final summary, on Ctrl-C or once `--count` probes have been sent.
pub async fn ping(
    host: &str,
    port: Option<u16>,
    opts: PingOptions,
    cfg: &Config,
) -> anyhow::Result<()> {
    let (host, port) = split_host_port(host, port)?;

    let addr = tokio::net::lookup_host((host.as_str(), port))
        .await
        .with_context(|| format!("could not resolve {host}"))?
        .find(SocketAddr::is_ipv4)
        .with_context(|| format!("no IPv4 address found for {host}"))?;

    let file = match cfg.output_file.as_deref() {
        Some(path) => Some(format::output_stream(Some(path), cfg.append)?),
        None => None,
    };
    let mut sink = OutputSink::new(file);

    println!(
        "Initiating 3-way handshakes with {host} ({}) on port {port}.",
        addr.ip()
    );

    let mut stats = RttStats::default();
    let started = Instant::now();
    let mut interrupted = false;

    loop {
        stats.sent += 1;
        match handshake(addr, opts.timeout).await {
            Some(rtt) => {
                stats.record(rtt);
                sink.emit(&reply_line(addr, stats.sent, rtt, stats.mean, opts.verbose));
            }
            None => {
                if opts.verbose {
                    sink.emit(&format!(
                        "[{:<27}] Request timeout for {}: port={port} timeout={}",
                        timestamp(),
                        addr.ip(),
                        fmt_ms(opts.timeout),
                    ));
                } else {
                    sink.emit(&format!(
                        "Request timeout for {}: port={port} timeout={}",
                        addr.ip(),
                        fmt_ms(opts.timeout),
                    ));
                }
            }
        }

        if opts.count > 0 && stats.sent >= opts.count {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(opts.delay) => {}
            _ = tokio::signal::ctrl_c() => {
                sink.emit("^C");
                interrupted = true;
                break;
            }
        }
    }

    sink.emit(&format!("--- {host} ping statistics ---"));
    sink.emit(&format!(
        "{} packets transmitted, {} received, {}% packet loss, time {:.2}s",
        stats.sent,
        stats.received,
        stats.loss_percent(),
        started.elapsed().as_secs_f64(),
    ));
    sink.emit(&format!(
        "rtt min/avg/max/mdev = {}/{}/{}/{}",
        fmt_ms(stats.min),
        fmt_ms(stats.mean),
        fmt_ms(stats.max),
        fmt_ms(stats.mean_deviation()),
    ));

    if interrupted {
        debug!("probe loop stopped by interrupt");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_port_forms() {
        assert_eq!(
            split_host_port("1.0.0.1", None).unwrap(),
            ("1.0.0.1".to_string(), 443)
        );
        assert_eq!(
            split_host_port("1.0.0.1", Some(80)).unwrap(),
            ("1.0.0.1".to_string(), 80)
        );
        assert_eq!(
            split_host_port("1.0.0.1:53", Some(80)).unwrap(),
            ("1.0.0.1".to_string(), 53)
        );
        assert!(split_host_port("1.0.0.1:0", None).is_err());
        assert!(split_host_port("1.0.0.1:notaport", None).is_err());
    }

    #[test]
    fn stats_track_min_mean_max() {
        let mut stats = RttStats::default();
        stats.sent = 3;
        stats.record(Duration::from_millis(10));
        stats.record(Duration::from_millis(20));
        stats.record(Duration::from_millis(30));

        assert_eq!(stats.min, Duration::from_millis(10));
        assert_eq!(stats.max, Duration::from_millis(30));
        assert_eq!(stats.mean, Duration::from_millis(20));
        assert_eq!(stats.loss_percent(), 0);
    }

    #[test]
    fn stats_loss_counts_unanswered_probes() {
        let mut stats = RttStats::default();
        stats.sent = 4;
        stats.record(Duration::from_millis(5));
        assert_eq!(stats.loss_percent(), 75);
        assert_eq!(stats.mean_deviation(), Duration::ZERO);
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_drops_a_broken_output_file_after_one_failure() {
        let mut sink = OutputSink::new(Some(Box::new(BrokenWriter)));
        sink.emit("first line");
        assert!(sink.file.is_none());
        // later lines keep flowing to stdout without touching the file
        sink.emit("second line");
    }

    #[test]
    fn verbose_reply_pads_time_to_eight_columns() {
        let addr: SocketAddr = "1.0.0.1:443".parse().unwrap();
        let line = reply_line(
            addr,
            2,
            Duration::from_millis(5),
            Duration::from_millis(5),
            true,
        );
        // "5.000ms" is seven characters, padded to eight before mrtt
        assert!(line.ends_with("port=443 tcp_seq=2 time=5.000ms  mrtt=5.000ms"));

        let plain = reply_line(
            addr,
            2,
            Duration::from_millis(5),
            Duration::from_millis(5),
            false,
        );
        assert_eq!(
            plain,
            "Received SYN/ACK from 1.0.0.1: port=443 tcp_seq=2 time=5.000ms"
        );
    }

    #[tokio::test]
    async fn handshake_times_out_on_unroutable_address() {
        // TEST-NET-3, guaranteed unreachable.
        let addr: SocketAddr = "203.0.113.1:443".parse().unwrap();
        let result = handshake(addr, Duration::from_millis(50)).await;
        assert!(result.is_none());
    }
}
