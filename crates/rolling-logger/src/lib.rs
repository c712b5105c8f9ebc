//! Rolling Logger
//!
//! A `tracing` layer that keeps the most recent log lines in a circular
//! buffer and forwards every line to a pluggable sink. The browser app
//! installs a console sink; native builds default to stderr.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

/// Receives every formatted line
pub type Sink = Box<dyn Fn(Level, &str) + Send + Sync>;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

static GLOBAL_BUFFER: OnceLock<LogBuffer> = OnceLock::new();

/// Shared circular buffer of formatted lines (oldest first)
#[derive(Clone, Debug)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        let mut lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Snapshot of buffered lines, newest last
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

/// Layer writing each event into a [`LogBuffer`] and a [`Sink`]
pub struct RollingLayer {
    app_name: String,
    buffer: LogBuffer,
    sink: Sink,
}

impl RollingLayer {
    pub fn new(app_name: impl Into<String>, buffer: LogBuffer, sink: Sink) -> Self {
        Self {
            app_name: app_name.into(),
            buffer,
            sink,
        }
    }

    fn format_line(&self, event: &Event<'_>) -> String {
        let meta = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        format!(
            "{} [{}] {:<5} {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            self.app_name,
            meta.level(),
            meta.target(),
            visitor.finish()
        )
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = self.format_line(event);
        (self.sink)(*event.metadata().level(), &line);
        self.buffer.push(line);
    }
}

/// Collects the message and `key=value` fields of an event
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Sink writing to stderr
pub fn stderr_sink() -> Sink {
    Box::new(|_level: Level, line: &str| eprintln!("{}", line))
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_logger(app_name: &str, capacity: usize, sink: Sink) -> Result<LogBuffer, LoggerError> {
    let buffer = LogBuffer::new(capacity);
    tracing_subscriber::registry()
        .with(RollingLayer::new(app_name, buffer.clone(), sink))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;
    let _ = GLOBAL_BUFFER.set(buffer.clone());
    Ok(buffer)
}

/// Lines captured by the global logger (empty before `init_logger`)
pub fn recent_lines() -> Vec<String> {
    GLOBAL_BUFFER.get().map(LogBuffer::lines).unwrap_or_default()
}
