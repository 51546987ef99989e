//! Console line format
//!
//! Every record is written as `<timestamp> - <logger> <SEVERITY> <message>`,
//! followed by any extra structured fields as `key=value` pairs.

use chrono::Local;
use kbkit_core_types::schema::{FIELD_LOGGER, FIELD_MESSAGE, FIELD_SEVERITY};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Local-time timestamp layout, millisecond precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Assemble one console line
///
/// Records without a message (structured operation events) end after the
/// severity.
pub fn format_line(timestamp: &str, logger: &str, severity: &str, message: &str) -> String {
    if message.is_empty() {
        format!("{} - {} {}", timestamp, logger, severity)
    } else {
        format!("{} - {} {} {}", timestamp, logger, severity, message)
    }
}

/// Label for a backend level; `WARN` reads `WARNING` on the console
fn level_label(level: &Level) -> &'static str {
    if *level == Level::ERROR {
        "ERROR"
    } else if *level == Level::WARN {
        "WARNING"
    } else if *level == Level::INFO {
        "INFO"
    } else if *level == Level::DEBUG {
        "DEBUG"
    } else {
        "TRACE"
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    logger: Option<String>,
    severity: Option<String>,
    extra: Vec<(String, String)>,
}

impl LineVisitor {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            FIELD_MESSAGE => self.message = value,
            FIELD_LOGGER => self.logger = Some(value),
            FIELD_SEVERITY => self.severity = Some(value),
            name => self.extra.push((name.to_string(), value)),
        }
    }
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }
}

/// `FormatEvent` writing the console line format
pub struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let logger = visitor.logger.as_deref().unwrap_or(metadata.target());
        let severity = visitor
            .severity
            .as_deref()
            .unwrap_or(level_label(metadata.level()));

        write!(
            writer,
            "{}",
            format_line(&timestamp, logger, severity, &visitor.message)
        )?;
        for (key, value) in &visitor.extra {
            write!(writer, " {}={}", key, value)?;
        }
        writeln!(writer)
    }
}
