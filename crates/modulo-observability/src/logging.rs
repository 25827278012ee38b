//! Structured logging with scope context.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Returned when a level name is not recognised.
#[derive(Debug, Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Component that produced the entry (e.g. "cart-store").
    pub scope: String,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}: {}", self.level, self.scope, self.message);

        if let Some(elapsed) = self.elapsed_us {
            s.push_str(&format!(" ({}us)", elapsed));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }

    /// Look up a structured field.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for log aggregation).
    Json,
    /// Human-readable format (for terminals).
    #[default]
    Human,
}

/// Where emitted entries go.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    /// Write formatted lines to stderr.
    #[default]
    Stderr,
    /// Keep entries in memory; used by tests to assert on what was logged.
    Capture(Arc<Mutex<Vec<LogEntry>>>),
}

impl LogSink {
    /// Create an empty capture sink.
    pub fn capture() -> Self {
        Self::Capture(Arc::new(Mutex::new(Vec::new())))
    }

    /// Entries captured so far. Always empty for `Stderr`.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self {
            Self::Stderr => Vec::new(),
            Self::Capture(buf) => buf.lock().clone(),
        }
    }
}

/// Structured logger with scope context.
///
/// Every entry carries the scope name and the elapsed time since the
/// logger was created.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    scope: String,
    start_time: Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl StructuredLogger {
    /// Create a new logger for a component.
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            start_time: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Human,
            sink: LogSink::Stderr,
        }
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the sink.
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    /// Derive a logger for a sub-component sharing level, format and sink.
    pub fn scoped(&self, scope: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.scope = scope.into();
        child
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    /// Whether entries at `level` would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            scope: self.scope.clone(),
            fields,
            elapsed_us: Some(self.elapsed_us()),
        };

        match &self.sink {
            LogSink::Stderr => {
                let output = match self.format {
                    LogFormat::Json => entry.to_json(),
                    LogFormat::Human => entry.to_human(),
                };
                eprintln!("{}", output);
            }
            LogSink::Capture(buf) => buf.lock().push(entry),
        }
    }

    /// Get elapsed time since logger creation.
    pub fn elapsed_us(&self) -> u64 {
        self.start_time.elapsed().as_micros() as u64
    }

    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }

    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new("modulo")
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add an unsigned integer field.
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" Debug ".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_min_level_filters() {
        let sink = LogSink::capture();
        let logger = StructuredLogger::new("test")
            .with_min_level(LogLevel::Warn)
            .with_sink(sink.clone());

        logger.debug("hidden");
        logger.info("hidden");
        logger.warn("shown");
        logger.error("shown too");

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[1].message, "shown too");
    }

    #[test]
    fn test_builder_fields() {
        let sink = LogSink::capture();
        let logger = StructuredLogger::new("cart-store").with_sink(sink.clone());

        logger
            .info_builder("item added")
            .field("module_id", "A")
            .field_u64("quantity", 3)
            .emit();

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].scope, "cart-store");
        assert_eq!(entries[0].field("module_id"), Some(&serde_json::json!("A")));
        assert_eq!(entries[0].field("quantity"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn test_scoped_shares_sink() {
        let sink = LogSink::capture();
        let root = StructuredLogger::new("root").with_sink(sink.clone());
        let child = root.scoped("child");

        child.info("hello");

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].scope, "child");
    }

    #[test]
    fn test_entry_formats() {
        let mut fields = BTreeMap::new();
        fields.insert("key".to_string(), serde_json::json!("cart.v1"));
        let entry = LogEntry {
            level: LogLevel::Warn,
            message: "snapshot unreadable".to_string(),
            scope: "cart-store".to_string(),
            fields,
            elapsed_us: None,
        };

        assert_eq!(
            entry.to_human(),
            "[WARN] cart-store: snapshot unreadable | key=\"cart.v1\""
        );

        let json: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
        assert_eq!(json["level"], "warn");
        assert_eq!(json["key"], "cart.v1");
        assert!(json.get("elapsed_us").is_none());
    }
}
