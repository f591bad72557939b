//! Console orchestrator.
//!
//! Owns the command registry, the scrollback, and the persistent log, and
//! exposes the entry points a host calls: `tick`, `submit`, and
//! `ingest_external_log`. Every call is synchronous and non-blocking.

use std::collections::vec_deque;

use crate::capture::LogReceiver;
use crate::config::ConsoleConfig;
use crate::error::Result;
use crate::export::{FileExporter, LogExporter};
use crate::history::BoundedHistoryBuffer;
use crate::persistent::PersistentLog;
use crate::terminal::{CommandEntry, CommandOutput, CommandRegistry, register_builtins};


/// An embeddable developer console.
pub struct Console {
    config: ConsoleConfig,
    registry: CommandRegistry,
    history: BoundedHistoryBuffer,
    persistent: PersistentLog,
    exporter: Box<dyn LogExporter>,
    log_receiver: Option<LogReceiver>,
    scroll_requested: bool,
}

impl Console {
    /// Build the registry (built-ins first, then `commands` in order) and
    /// seed both buffers with the default line.
    ///
    /// Fails on an invalid config or a command with an empty name.
    pub fn start<I>(config: ConsoleConfig, commands: I) -> Result<Self>
    where
        I: IntoIterator<Item = CommandEntry>,
    {
        config.validate()?;

        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry)?;
        for entry in commands {
            registry.register(entry)?;
        }

        let mut console = Self {
            history: BoundedHistoryBuffer::from_config(&config),
            exporter: Box::new(FileExporter::new(config.export.clone())),
            persistent: PersistentLog::new(),
            registry,
            log_receiver: None,
            scroll_requested: false,
            config,
        };
        let seed = console.config.default_line.clone();
        console.push_line(seed);

        log::info!(
            "Console started with {} commands",
            console.registry.len()
        );
        Ok(console)
    }

    /// Replace the persistence collaborator used by `save_logs`.
    pub fn with_exporter(mut self, exporter: impl LogExporter + 'static) -> Self {
        self.exporter = Box::new(exporter);
        self
    }

    /// Drain `receiver` into the console on every tick.
    pub fn attach_log_receiver(&mut self, receiver: LogReceiver) {
        self.log_receiver = Some(receiver);
    }

    /// Register a command after start. Appended after every existing entry.
    pub fn register(&mut self, entry: CommandEntry) -> Result<()> {
        self.registry.register(entry)
    }

    /// Per-frame maintenance: ingest queued log lines, then run one
    /// scrollback maintenance step.
    pub fn tick(&mut self) {
        let queued: Vec<String> = match &self.log_receiver {
            Some(rx) => rx.drain().collect(),
            None => Vec::new(),
        };
        for line in queued {
            self.ingest_external_log(line);
        }
        self.history.maintain();
    }

    /// Echo and dispatch one line of operator input.
    ///
    /// Empty or whitespace-only input is ignored entirely.
    pub fn submit(&mut self, raw_input: &str) {
        if raw_input.trim().is_empty() {
            return;
        }
        let echo = format!("{}{raw_input}", self.config.echo_prefix);
        self.push_line(echo);

        let dispatch = self.registry.dispatch(raw_input);
        if dispatch.is_unmatched() {
            log::debug!("No command matches '{}'", dispatch.token());
            if self.config.report_unknown_commands {
                self.push_line(format!("Unknown command: {}", dispatch.token()));
            }
        }
        for result in dispatch.into_results() {
            match result {
                Ok(output) => self.apply_output(output),
                Err(e) => {
                    log::warn!("Command '{raw_input}' failed: {e}");
                    self.push_line(format!("error: {e}"));
                },
            }
        }
        self.scroll_requested = true;
    }

    /// Append a line produced by the logging collaborator. The line is
    /// expected to be fully formatted already.
    pub fn ingest_external_log(&mut self, line: impl Into<String>) {
        self.push_line(line.into());
    }

    /// Hand the persistent log to the exporter. Failures become a warning
    /// line; they never propagate.
    pub fn export_logs(&mut self, args: &str) {
        let lines = self.persistent.snapshot();
        let count = lines.len();
        match self.exporter.export(lines, args) {
            Ok(path) => {
                log::info!("Saved {count} lines to {}", path.display());
                self.push_line(format!("Saved {count} lines to {}", path.display()));
            },
            Err(e) => {
                log::warn!("Failed to save logs: {e}");
                self.push_line(format!("[Warning] Failed to save logs: {e}"));
            },
        }
    }

    fn apply_output(&mut self, output: CommandOutput) {
        match output {
            CommandOutput::Clear => self.history.clear(),
            CommandOutput::Export { args } => self.export_logs(&args),
            other => {
                for line in other.into_lines() {
                    self.push_line(line);
                }
            },
        }
    }

    fn push_line(&mut self, line: String) {
        self.persistent.append(line.clone());
        self.history.append(line);
    }

    // -- Render accessors --

    /// Current scrollback, oldest first.
    pub fn history_lines(&self) -> vec_deque::Iter<'_, String> {
        self.history.iter()
    }

    /// The oldest scrollback line, if any.
    pub fn oldest_line(&self) -> Option<&str> {
        self.history.oldest()
    }

    /// Every line surfaced this session.
    pub fn persistent_lines(&self) -> &[String] {
        self.persistent.snapshot()
    }

    /// Whether the renderer should scroll to the newest line. Resets on read.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    pub fn history(&self) -> &BoundedHistoryBuffer {
        &self.history
    }

    pub fn persistent_log(&self) -> &PersistentLog {
        &self.persistent
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}
