//! Test capture mode for deterministic logging assertions
//!
//! This module provides a subscriber layer that captures log events in memory
//! for assertion in tests.

use crate::output::Severity;
use kbkit_core_types::schema::{
    FIELD_EVENT, FIELD_LOGGER, FIELD_MESSAGE, FIELD_OP, FIELD_SEVERITY, SEVERITY_CRITICAL,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::Visit;
use tracing::subscriber::DefaultGuard;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// A captured log event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub logger: Option<String>,
    pub message: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Console severity of the event, telling CRITICAL apart from ERROR
    pub fn severity(&self) -> Severity {
        if self.fields.get(FIELD_SEVERITY).map(String::as_str) == Some(SEVERITY_CRITICAL) {
            return Severity::Critical;
        }
        if self.level == Level::ERROR {
            Severity::Error
        } else if self.level == Level::WARN {
            Severity::Warning
        } else if self.level == Level::INFO {
            Severity::Info
        } else {
            Severity::Debug
        }
    }
}

struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

/// Test capture layer for collecting log events
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: events.clone(),
        };
        let capture = TestCapture { events };
        (layer, capture)
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            logger: visitor.fields.get(FIELD_LOGGER).cloned(),
            message: visitor.fields.get(FIELD_MESSAGE).cloned(),
            op: visitor.fields.get(FIELD_OP).cloned(),
            event: visitor.fields.get(FIELD_EVENT).cloned(),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle for accessing captured events in tests
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Messages of all captured events, in emission order
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.message)
            .collect()
    }

    /// Assert that an event exists with the given operation and event type
    ///
    /// # Panics
    ///
    /// Panics if the event is not found
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    /// Clear all captured events
    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize the process-wide test capture
///
/// Returns a shared global capture instance. Every test sees every other
/// test's events, so filter on unique operation names.
///
/// # Example
///
/// ```
/// use kbkit_core::logging_facility::test_capture::init_test_capture;
/// use kbkit_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("my_operation");
/// capture.assert_event_exists("my_operation", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}

/// Capture events of the current thread at `min_severity` and above
///
/// The capture stays active until the returned guard is dropped. Events
/// below `min_severity` are filtered out the same way a configured global
/// minimum would filter them.
pub fn scoped_capture(min_severity: Severity) -> (TestCapture, DefaultGuard) {
    let (layer, capture) = TestCaptureLayer::new();
    let subscriber =
        tracing_subscriber::registry().with(layer.with_filter(min_severity.level_filter()));
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_event_clone() {
        let event = CapturedEvent {
            level: Level::INFO,
            target: "test".to_string(),
            logger: Some("test".to_string()),
            message: Some("hello".to_string()),
            op: Some("test_op".to_string()),
            event: Some("start".to_string()),
            fields: HashMap::new(),
        };

        let cloned = event.clone();
        assert_eq!(cloned.level, event.level);
        assert_eq!(cloned.op, event.op);
        assert_eq!(cloned.severity(), Severity::Info);
    }

    #[test]
    fn test_critical_tag_overrides_level() {
        let mut fields = HashMap::new();
        fields.insert(FIELD_SEVERITY.to_string(), SEVERITY_CRITICAL.to_string());
        let event = CapturedEvent {
            level: Level::ERROR,
            target: "test".to_string(),
            logger: None,
            message: None,
            op: None,
            event: None,
            fields,
        };

        assert_eq!(event.severity(), Severity::Critical);
    }

    #[test]
    fn test_scoped_capture_filters_below_minimum() {
        let (capture, _guard) = scoped_capture(Severity::Info);

        tracing::debug!("hidden");
        tracing::info!("shown");

        assert_eq!(capture.messages(), vec!["shown".to_string()]);
    }

    #[test]
    fn test_clear() {
        let (capture, _guard) = scoped_capture(Severity::Debug);
        tracing::info!("one");
        capture.clear();
        assert!(capture.events().is_empty());
    }
}
