//! Command registry and dispatch subsystem.
//!
//! The terminal is a registry-based dispatch system. Commands are registered
//! as immutable entries in insertion order. The dispatcher takes the first
//! space-delimited token of an input line and invokes every entry whose name
//! matches it, in registration order.

mod commands;
mod interpreter;

/// Register the built-in commands (`help`, `clear`, `save_logs`).
pub use commands::register_builtins;
/// Shape of the payload a handler receives.
pub use interpreter::ArgumentKind;
/// Read-only view handed to every handler invocation.
pub use interpreter::CommandContext;
/// An immutable named, described, registered action.
pub use interpreter::CommandEntry;
/// Output produced by a command (text, clear/export signals).
pub use interpreter::CommandOutput;
/// Insertion-ordered registry of command entries with dispatch.
pub use interpreter::CommandRegistry;
/// Result of a single dispatch call.
pub use interpreter::Dispatch;
/// Callable bound to a command entry.
pub use interpreter::Handler;
/// Tokenizer helpers.
pub use interpreter::{arguments, command_token};
