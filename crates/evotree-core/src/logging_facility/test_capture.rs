//! In-memory capture of logging events for tests
//!
//! Every event is recorded with its raw fields. The canonical keys from
//! [`schema`](crate::core_types::schema) are lifted into typed slots so tests
//! can assert on a build's lifecycle (`pack_build` start/end, placement
//! counts, error codes) without string parsing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::core_types::schema::{
    EVENT_END, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_EVENT, FIELD_LEAF,
    FIELD_LEAF_COUNT, FIELD_NODE_COUNT, FIELD_OP, FIELD_PLACED, FIELD_ROOT, FIELD_UNPLACED,
};

/// Placement counts reported when a build ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildCounts {
    pub node_count: u64,
    pub placed: u64,
    pub unplaced: u64,
}

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub root: Option<String>,
    pub leaf: Option<String>,
    pub leaf_count: Option<u64>,
    pub duration_ms: Option<u64>,
    pub err_code: Option<String>,
    /// Present only when all three count fields were recorded
    pub counts: Option<BuildCounts>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, fields: HashMap<String, String>) -> Self {
        let text = |key: &str| fields.get(key).cloned();
        let number = |key: &str| fields.get(key).and_then(|v| v.parse::<u64>().ok());

        let counts = match (
            number(FIELD_NODE_COUNT),
            number(FIELD_PLACED),
            number(FIELD_UNPLACED),
        ) {
            (Some(node_count), Some(placed), Some(unplaced)) => Some(BuildCounts {
                node_count,
                placed,
                unplaced,
            }),
            _ => None,
        };

        Self {
            level,
            component: text(FIELD_COMPONENT),
            op: text(FIELD_OP),
            event: text(FIELD_EVENT),
            root: text(FIELD_ROOT),
            leaf: text(FIELD_LEAF),
            leaf_count: number(FIELD_LEAF_COUNT),
            duration_ms: number(FIELD_DURATION_MS),
            err_code: text(FIELD_ERR_CODE),
            counts,
            fields,
        }
    }

    /// Raw field value as recorded, if present
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

/// Layer recording every event into a shared buffer
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: events.clone(),
        };
        (layer, TestCapture { events })
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), visitor.fields);

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Shared handle onto the captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events for one operation, in emission order
    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Counts carried by every `end` event of `op`
    pub fn end_counts(&self, op: &str) -> Vec<BuildCounts> {
        self.events()
            .iter()
            .filter(|e| e.is(op, EVENT_END))
            .filter_map(|e| e.counts)
            .collect()
    }

    /// Leaves named by warning-level events
    pub fn warned_leaves(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.level == Level::WARN)
            .filter_map(|e| e.leaf)
            .collect()
    }

    /// # Panics
    ///
    /// Panics if no event with the given operation and event name was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (first call only)
///
/// Events from every thread land in the same buffer, so tests should filter
/// by operation or by a unique field.
///
/// # Example
///
/// ```
/// use evotree_core::logging_facility::test_capture::init_test_capture;
/// use evotree_core::pack::build;
///
/// let capture = init_test_capture();
/// build("doc_capture_root", ["doc_capture_rootx"]).unwrap();
/// capture.assert_event_exists("pack_build", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}
