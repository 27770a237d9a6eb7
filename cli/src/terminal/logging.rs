use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Diagnostic line format: a millisecond wall-clock stamp, a fixed-width
/// level tag and the event target, then the fields.
///
/// `12:34:56.789  warn ipkit_cli::commands::ping cannot write to output file`
pub struct IpkitFormatter;

/// Level tag, pre-padded to 5 columns so the message column lines up
/// regardless of level.
fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::TRACE => "trace".dimmed(),
        Level::DEBUG => "debug".cyan(),
        Level::INFO => " info".green(),
        Level::WARN => " warn".yellow().bold(),
        Level::ERROR => "error".red().bold(),
    }
}

impl<S, N> FormatEvent<S, N> for IpkitFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let stamp = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        write!(writer, "{} ", stamp.dimmed())?;
        write!(writer, "{} ", level_tag(*meta.level()))?;
        write!(writer, "{} ", meta.target().dimmed())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber; verbosity is driven by `RUST_LOG`
/// (diagnostics are off by default so command output stays clean).
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .event_format(IpkitFormatter)
        .init();
}
