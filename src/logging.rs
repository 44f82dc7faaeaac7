use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Formatter printing `LEVEL path::to::function [span::stack]: message key=value`.
///
/// The function path comes from the `function` field attached by the `log_*!`
/// macros; events without it fall back to the module path.
#[derive(Debug, Default)]
pub struct CallSiteFormatter;

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    function: Option<String>,
    fields: Vec<(String, String)>,
}

impl EventVisitor {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = Some(value),
            "function" => self.function = Some(value),
            name => self.fields.push((name.to_string(), value)),
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let raw = format!("{value:?}");
        let unquoted = raw
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .map(str::to_string)
            .unwrap_or(raw);
        self.record(field, unquoted);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record(field, value.to_string());
    }
}

impl<S, N> FormatEvent<S, N> for CallSiteFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let module_path = metadata.module_path().unwrap_or_else(|| metadata.target());

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let location = match visitor.function {
            Some(function) if function.starts_with(module_path) => function,
            Some(function) => format!("{module_path}::{function}"),
            None => module_path.to_string(),
        };
        write!(writer, "{} {location}", metadata.level())?;

        if let Some(scope) = ctx.event_scope() {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                write!(writer, " [{}]", spans.join("::"))?;
            }
        }

        write!(writer, ":")?;
        if let Some(message) = visitor.message {
            write!(writer, " {message}")?;
        }
        for (name, value) in visitor.fields {
            write!(writer, " {name}={value}")?;
        }
        writeln!(writer)
    }
}

/// Map `-v` repetitions to a default filter directive.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity level.
pub fn init_logging(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .event_format(CallSiteFormatter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing::subscriber::DefaultGuard;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct BufferWriter {
        buffer: Arc<Mutex<String>>,
    }

    struct BufferGuard {
        buffer: Arc<Mutex<String>>,
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = BufferGuard;

        fn make_writer(&'a self) -> Self::Writer {
            BufferGuard {
                buffer: Arc::clone(&self.buffer),
            }
        }
    }

    impl Write for BufferGuard {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let mut lock = self.buffer.lock().unwrap();
            lock.push_str(&String::from_utf8_lossy(buf));
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl BufferWriter {
        fn contents(&self) -> String {
            self.buffer.lock().unwrap().clone()
        }
    }

    fn install_test_subscriber() -> (BufferWriter, DefaultGuard) {
        let writer = BufferWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .event_format(CallSiteFormatter)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (writer, guard)
    }

    #[test]
    fn function_path_is_not_repeated() {
        let (writer, guard) = install_test_subscriber();
        crate::log_info!("sample message");
        drop(guard);

        let output = writer.contents();
        assert!(
            output.starts_with(
                "INFO compliance_roi::logging::tests::function_path_is_not_repeated: sample message"
            ),
            "output was: {output:?}"
        );
    }

    #[test]
    fn calculator_failure_is_logged_at_debug() {
        let (writer, guard) = install_test_subscriber();
        let _ = crate::calculator::calculate(0.0, 1_000.0, 10.0, 1.0);
        drop(guard);

        let output = writer.contents();
        assert!(
            output.contains("DEBUG compliance_roi::calculator::calculate: Compliance cost is zero"),
            "output was: {output:?}"
        );
    }

    #[test]
    fn sweep_events_carry_span_name() {
        let (writer, guard) = install_test_subscriber();
        let input = crate::calculator::CalculationInput::new(1_000_000.0, 10_000.0, 20.0);
        crate::scenario::risk_sweep(&input).unwrap();
        drop(guard);

        let output = writer.contents();
        assert!(output.contains("[risk_sweep]"), "output was: {output:?}");
    }

    #[test]
    fn structured_fields_follow_message() {
        let (writer, guard) = install_test_subscriber();
        tracing::warn!(path = "profile.toml", "Profile not found");
        drop(guard);

        let output = writer.contents();
        assert!(
            output.contains("WARN compliance_roi::logging::tests: Profile not found path=profile.toml"),
            "output was: {output:?}"
        );
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(4), "debug");
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! __log_function_path {
    () => {{
        fn __type_name_of<T>(_value: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = __type_name_of(|| {});
        match name.find("::{{closure") {
            Some(index) => &name[..index],
            None => name,
        }
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        tracing::debug!(function = %$crate::__log_function_path!(), $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        tracing::info!(function = %$crate::__log_function_path!(), $($arg)*);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        tracing::warn!(function = %$crate::__log_function_path!(), $($arg)*);
    }};
}
