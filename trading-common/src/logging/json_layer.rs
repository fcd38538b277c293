//! JSON logging layer for structured session files.
//!
//! Writes one JSON object per line so a session log can be fed to jq or a
//! log aggregator without parsing free text.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Local;
use serde::Serialize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Sequence counter for log ordering
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// JSON log event structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonLogEvent {
    /// Local timestamp with offset
    pub timestamp: String,
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,
    /// Numeric level for filtering (0=TRACE, 1=DEBUG, 2=INFO, 3=WARN, 4=ERROR)
    pub level_num: u8,
    /// Target module path
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    /// Additional structured fields
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub fields: serde_json::Map<String, serde_json::Value>,
    /// Sequence number for ordering
    pub seq: u64,
}

impl JsonLogEvent {
    /// Create a new log event
    pub fn new(level: Level, target: &str, message: String) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string(),
            level: level.to_string(),
            level_num: level_to_num(level),
            target: target.to_string(),
            message,
            file: None,
            line: None,
            app: None,
            fields: serde_json::Map::new(),
            seq: SEQUENCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Set source location
    pub fn with_location(mut self, file: Option<&str>, line: Option<u32>) -> Self {
        self.file = file.map(|s| s.to_string());
        self.line = line;
        self
    }

    pub fn with_app(mut self, app: Option<&str>) -> Self {
        self.app = app.map(|s| s.to_string());
        self
    }

    pub fn add_field(&mut self, key: String, value: serde_json::Value) {
        self.fields.insert(key, value);
    }
}

fn level_to_num(level: Level) -> u8 {
    match level {
        Level::TRACE => 0,
        Level::DEBUG => 1,
        Level::INFO => 2,
        Level::WARN => 3,
        Level::ERROR => 4,
    }
}

/// JSON logging layer writing to a single sink
pub struct JsonLayer {
    writer: Mutex<Box<dyn Write + Send>>,
    app_name: Option<String>,
    include_location: bool,
}

impl JsonLayer {
    pub fn new(
        writer: Box<dyn Write + Send>,
        app_name: Option<String>,
        include_location: bool,
    ) -> Self {
        Self {
            writer: Mutex::new(writer),
            app_name,
            include_location,
        }
    }

    fn build_event(&self, event: &Event<'_>) -> JsonLogEvent {
        let metadata = event.metadata();

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut log_event = JsonLogEvent::new(
            *metadata.level(),
            metadata.target(),
            visitor.message.unwrap_or_default(),
        )
        .with_app(self.app_name.as_deref());

        if self.include_location {
            log_event = log_event.with_location(metadata.file(), metadata.line());
        }

        for (key, value) in visitor.fields {
            log_event.add_field(key, value);
        }

        log_event
    }
}

impl<S> Layer<S> for JsonLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let log_event = self.build_event(event);

        if let Ok(json) = serde_json::to_string(&log_event) {
            if let Ok(mut writer) = self.writer.lock() {
                let _ = writeln!(writer, "{}", json);
                let _ = writer.flush();
            }
        }
    }
}

/// Visitor for extracting fields from tracing events
#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(value_str),
            );
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(
                field.name().to_string(),
                serde_json::Value::String(value.to_string()),
            );
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(
            field.name().to_string(),
            serde_json::Value::Number(value.into()),
        );
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(
            field.name().to_string(),
            serde_json::Value::Number(value.into()),
        );
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::Bool(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tracing_subscriber::layer::SubscriberExt;

    /// Shared buffer so the test can read what the layer wrote.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_log_event_new() {
        let event = JsonLogEvent::new(Level::INFO, "trading_bot::orchestrator", "Sent".to_string());

        assert_eq!(event.level, "INFO");
        assert_eq!(event.level_num, 2);
        assert_eq!(event.target, "trading_bot::orchestrator");
        assert!(event.file.is_none());
    }

    #[test]
    fn test_json_log_event_serialization_skips_empty() {
        let event = JsonLogEvent::new(Level::WARN, "test", "Warning".to_string())
            .with_location(Some("src/main.rs"), Some(42));

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"level\":\"WARN\""));
        assert!(json.contains("\"line\":42"));
        assert!(!json.contains("\"fields\""));
        assert!(!json.contains("\"app\""));
    }

    #[test]
    fn test_layer_writes_one_object_per_event() {
        let buf = SharedBuf::default();
        let layer = JsonLayer::new(Box::new(buf.clone()), Some("trading-bot".to_string()), false);
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(order_id = 42_u64, "Order placed");
            tracing::warn!("Price will be ignored");
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["message"], "Order placed");
        assert_eq!(first["fields"]["order_id"], 42);
        assert_eq!(first["app"], "trading-bot");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level_num"], 3);
        assert!(second["seq"].as_u64().unwrap() > first["seq"].as_u64().unwrap());
    }
}
