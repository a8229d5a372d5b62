use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Log line layout: `<emoji> <LEVEL> [HH:MM:SS]: <fields>`
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let timestamp = Local::now().format("%H:%M:%S");
        let (emoji, level_str) = level_tag(event.metadata().level());

        write!(writer, "{} {} [{}]: ", emoji, level_str, timestamp)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn level_tag(level: &tracing::Level) -> (&'static str, &'static str) {
    match *level {
        tracing::Level::TRACE => ("🔬", "TRACE"),
        tracing::Level::DEBUG => ("🐛", "DEBUG"),
        tracing::Level::INFO => ("ℹ️ ", "INFO"),
        tracing::Level::WARN => ("⚠️ ", "WARN"),
        tracing::Level::ERROR => ("❌", "ERROR"),
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries TAP.
pub fn init(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        "tapreport=debug,warn"
    } else {
        "tapreport=warn"
    };

    let _ = tracing_subscriber::fmt()
        .event_format(CustomFormatter)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .try_init();
}
