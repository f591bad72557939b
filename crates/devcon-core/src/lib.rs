//! devcon core.
//!
//! An embeddable in-application developer console: a command registry and
//! dispatcher, a bounded scrollback buffer, and a persistent session log.
//! The host drives it through `Console::tick`, `Console::submit`, and
//! `Console::ingest_external_log`; rendering is left to the host.

// Re-exports from devcon-types (foundation types).
pub use devcon_types::config;
pub use devcon_types::error;

pub mod capture;
pub mod console;
pub mod export;
pub mod history;
pub mod persistent;
pub use devcon_terminal as terminal;

pub use capture::{ConsoleLogger, LogReceiver, LogSender, log_channel};
pub use console::Console;
pub use export::{FileExporter, LogExporter};
pub use history::BoundedHistoryBuffer;
pub use persistent::PersistentLog;
