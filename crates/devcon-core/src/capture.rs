//! Log capture: a `log::Log` implementation that feeds the console.
//!
//! Records may be emitted from any thread. They are formatted where they
//! are emitted and queued on a channel; the console drains the queue on its
//! own thread at the start of every tick.

use std::backtrace::Backtrace;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::{ConsoleError, Result};

/// Records from these targets are the console's own diagnostics and are not
/// captured back into it.
const INTERNAL_TARGETS: [&str; 2] = ["devcon_core", "devcon_terminal"];

/// Producer half of the capture queue. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct LogSender {
    tx: Sender<String>,
}

impl LogSender {
    /// Queue a preformatted line. Lines sent after the receiver is dropped
    /// are discarded.
    pub fn send(&self, line: impl Into<String>) {
        let _ = self.tx.send(line.into());
    }
}

/// Consumer half of the capture queue, owned by the console.
#[derive(Debug)]
pub struct LogReceiver {
    rx: Receiver<String>,
}

impl LogReceiver {
    /// Every line queued so far, without blocking.
    pub fn drain(&self) -> impl Iterator<Item = String> + '_ {
        self.rx.try_iter()
    }
}

/// Create a connected capture queue.
pub fn log_channel() -> (LogSender, LogReceiver) {
    let (tx, rx) = mpsc::channel();
    (LogSender { tx }, LogReceiver { rx })
}

/// Severity tag shown in captured lines.
pub fn severity_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "Error",
        Level::Warn => "Warning",
        Level::Info => "Info",
        Level::Debug => "Debug",
        Level::Trace => "Trace",
    }
}

/// Format one captured line: `[17-Oct-2026 09:30:00] [Warning] message`.
pub fn format_line(timestamp: &DateTime<Local>, level: Level, message: &str) -> String {
    format!(
        "[{}] [{}] {message}",
        timestamp.format("%d-%b-%Y %H:%M:%S"),
        severity_tag(level)
    )
}

/// `log` backend that queues formatted records for the console.
///
/// Every captured error-level record is followed by a `Stack Trace: ...`
/// line, regardless of `RUST_BACKTRACE`. An optional inner logger sees every
/// record as well.
pub struct ConsoleLogger {
    sender: LogSender,
    level: LevelFilter,
    inner: Option<Box<dyn Log>>,
}

impl ConsoleLogger {
    pub fn new(sender: LogSender, level: LevelFilter) -> Self {
        Self {
            sender,
            level,
            inner: None,
        }
    }

    /// Forward every record to `inner` too (e.g. an `env_logger` logger).
    pub fn with_inner(mut self, inner: Box<dyn Log>) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Install as the global logger with the given global max level.
    pub fn install(self, max_level: LevelFilter) -> Result<()> {
        log::set_boxed_logger(Box::new(self))
            .map_err(|e| ConsoleError::Config(format!("logger already installed: {e}")))?;
        log::set_max_level(max_level);
        Ok(())
    }

    fn captures(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
            && !INTERNAL_TARGETS
                .iter()
                .any(|prefix| metadata.target().starts_with(prefix))
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.captures(metadata) || self.inner.as_ref().is_some_and(|l| l.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        if let Some(inner) = &self.inner {
            inner.log(record);
        }
        if !self.captures(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        self.sender
            .send(format_line(&Local::now(), record.level(), &message));
        if record.level() == Level::Error {
            self.sender
                .send(format!("Stack Trace: {}", Backtrace::force_capture()));
        }
    }

    fn flush(&self) {
        if let Some(inner) = &self.inner {
            inner.flush();
        }
    }
}
