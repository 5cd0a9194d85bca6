//! Browser console logging.
//!
//! A [`tracing`] layer that formats each event as a single line and writes
//! it to the console method matching its level, so DevTools level filtering
//! keeps working.

use std::fmt::Write as FmtWrite;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::{LookupSpan, Registry};
use wasm_bindgen::JsValue;

/// Install the console subscriber, forwarding events at `level` and above.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: Level) {
    let subscriber = Registry::default()
        .with(LevelFilter::from_level(level))
        .with(ConsoleLayer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("logging already initialized");
    }
}

/// Writes events to `console.{error,warn,info,debug}`.
pub struct ConsoleLayer;

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let line = JsValue::from_str(&format_event(event, &ctx));
        match *event.metadata().level() {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// `LEVEL target [span > span]: message key=value ...`
fn format_event<S>(event: &Event<'_>, ctx: &Context<'_, S>) -> String
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let metadata = event.metadata();
    let mut visitor = LineVisitor::default();
    event.record(&mut visitor);

    let mut line = format!("{:>5} {}", metadata.level().as_str(), metadata.target());
    if let Some(scope) = ctx.event_scope(event) {
        let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
        if !spans.is_empty() {
            let _ = write!(line, " [{}]", spans.join(" > "));
        }
    }
    let _ = write!(line, ": {}", visitor.message);
    line.push_str(&visitor.fields);
    line
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Same formatting as [`ConsoleLayer`], captured instead of printed.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<String>>>);

    impl<S> Layer<S> for Capture
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(format_event(event, &ctx));
        }
    }

    fn capture(level: Level, f: impl FnOnce()) -> Vec<String> {
        let sink = Capture::default();
        let subscriber = Registry::default()
            .with(LevelFilter::from_level(level))
            .with(sink.clone());
        tracing::subscriber::with_default(subscriber, f);
        let lines = sink.0.lock().unwrap().clone();
        lines
    }

    #[test]
    fn test_formats_message_and_fields() {
        let lines = capture(Level::DEBUG, || {
            tracing::info!(count = 3, user = "me", "repositories loaded");
        });
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.starts_with(" INFO folio::logging"), "{line}");
        assert!(line.contains(": repositories loaded"), "{line}");
        assert!(line.contains(" count=3"), "{line}");
        assert!(line.contains(" user=me"), "{line}");
    }

    #[test]
    fn test_includes_span_path() {
        let lines = capture(Level::DEBUG, || {
            let _outer = tracing::info_span!("attach").entered();
            let _inner = tracing::info_span!("observers").entered();
            tracing::warn!("observer unavailable");
        });
        assert!(lines[0].contains("[attach > observers]"), "{}", lines[0]);
    }

    #[test]
    fn test_level_filter() {
        let lines = capture(Level::WARN, || {
            tracing::debug!("hidden");
            tracing::info!("hidden");
            tracing::warn!("shown");
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("shown"));
    }
}
