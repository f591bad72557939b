//! Command entries, registry, and dispatch logic.
//!
//! Input lines are split on single ASCII spaces. Consecutive spaces are not
//! collapsed and other whitespace is not trimmed, so `" help"` has an empty
//! first token and matches nothing.

use std::fmt;
use std::rc::Rc;

use devcon_types::error::{ConsoleError, Result};

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Command produced no visible output.
    None,
    /// Text; each `\n`-separated line is surfaced separately.
    Text(String),
    /// Pre-split output lines.
    Lines(Vec<String>),
    /// Signal to clear the scrollback (the persistent log is kept).
    Clear,
    /// Signal to export the persistent log.
    Export {
        /// The raw input line, command token included.
        args: String,
    },
}

impl CommandOutput {
    /// Lines this output contributes to the console buffers.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::Text(text) => text.lines().map(str::to_string).collect(),
            Self::Lines(lines) => lines,
            Self::None | Self::Clear | Self::Export { .. } => Vec::new(),
        }
    }
}

/// Shape of the payload a handler receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Invoked with no payload.
    NoArgument,
    /// Invoked with the entire original input line.
    RawString,
}

/// Signature of a handler that takes no payload.
pub type NoArgumentFn = dyn Fn(&CommandContext<'_>) -> Result<CommandOutput>;

/// Signature of a handler that takes the raw input line.
pub type RawStringFn = dyn Fn(&str, &CommandContext<'_>) -> Result<CommandOutput>;

/// Callable bound to a command entry, tagged by argument shape.
///
/// Handlers are shared: cloning an entry or a handler never clones the
/// underlying closure.
#[derive(Clone)]
pub enum Handler {
    NoArgument(Rc<NoArgumentFn>),
    RawString(Rc<RawStringFn>),
}

impl Handler {
    /// Wrap a closure that takes no payload.
    pub fn no_argument<F>(f: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> Result<CommandOutput> + 'static,
    {
        Self::NoArgument(Rc::new(f))
    }

    /// Wrap a closure that receives the raw input line.
    pub fn raw_string<F>(f: F) -> Self
    where
        F: Fn(&str, &CommandContext<'_>) -> Result<CommandOutput> + 'static,
    {
        Self::RawString(Rc::new(f))
    }

    /// The argument shape of this handler.
    pub fn kind(&self) -> ArgumentKind {
        match self {
            Self::NoArgument(_) => ArgumentKind::NoArgument,
            Self::RawString(_) => ArgumentKind::RawString,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoArgument(_) => f.write_str("Handler::NoArgument(..)"),
            Self::RawString(_) => f.write_str("Handler::RawString(..)"),
        }
    }
}

/// An immutable registration record.
#[derive(Debug, Clone)]
pub struct CommandEntry {
    name: String,
    description: String,
    handler: Handler,
}

impl CommandEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>, handler: Handler) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler,
        }
    }

    /// Entry whose handler takes no payload.
    pub fn no_argument<F>(name: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> Result<CommandOutput> + 'static,
    {
        Self::new(name, description, Handler::no_argument(f))
    }

    /// Entry whose handler receives the raw input line.
    pub fn raw_string<F>(name: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &CommandContext<'_>) -> Result<CommandOutput> + 'static,
    {
        Self::new(name, description, Handler::raw_string(f))
    }

    /// The command name (what the user types).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description for `help`.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn argument_kind(&self) -> ArgumentKind {
        self.handler.kind()
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Run the handler. `raw_input` is only forwarded to raw-string handlers.
    pub fn invoke(&self, raw_input: &str, ctx: &CommandContext<'_>) -> Result<CommandOutput> {
        match &self.handler {
            Handler::NoArgument(f) => f(ctx),
            Handler::RawString(f) => f(raw_input, ctx),
        }
    }
}

/// Read-only view handed to every handler invocation.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> CommandContext<'a> {
    /// Every registered entry, in registration order.
    pub fn entries(&self) -> std::slice::Iter<'a, CommandEntry> {
        self.registry.entries()
    }
}

/// Result of a single dispatch call.
#[derive(Debug, Default)]
pub struct Dispatch {
    token: String,
    results: Vec<Result<CommandOutput>>,
}

impl Dispatch {
    /// The first token of the dispatched line.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Number of entries that were invoked.
    pub fn matched(&self) -> usize {
        self.results.len()
    }

    pub fn is_unmatched(&self) -> bool {
        self.results.is_empty()
    }

    /// Handler results in invocation order.
    pub fn into_results(self) -> Vec<Result<CommandOutput>> {
        self.results
    }
}

/// Insertion-ordered collection of command entries.
///
/// Duplicate names are permitted. Registration order is the order used for
/// `help` listings and for dispatch.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Rejects empty names; duplicates are accepted.
    pub fn register(&mut self, entry: CommandEntry) -> Result<()> {
        if entry.name.is_empty() {
            return Err(ConsoleError::Registration(
                "command name must not be empty".to_string(),
            ));
        }
        if entry.name.contains(' ') {
            log::warn!(
                "Command '{}' contains a space and can never be dispatched",
                entry.name
            );
        }
        log::debug!(
            "Registered command '{}' ({:?})",
            entry.name,
            entry.argument_kind()
        );
        self.entries.push(entry);
        Ok(())
    }

    /// Every entry in registration order. The iterator is `Clone`, so it
    /// can be restarted.
    pub fn entries(&self) -> std::slice::Iter<'_, CommandEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether at least one entry is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Entries registered under exactly `name` (case-sensitive).
    pub fn matching<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CommandEntry> + 'a {
        self.entries.iter().filter(move |e| e.name == name)
    }

    /// Invoke every entry whose name equals the first token of `raw_input`.
    ///
    /// Empty or whitespace-only input is a no-op. Unmatched input invokes
    /// nothing. Handler errors are collected; they never stop the remaining
    /// matches from running.
    pub fn dispatch(&self, raw_input: &str) -> Dispatch {
        if raw_input.trim().is_empty() {
            return Dispatch::default();
        }
        let token = command_token(raw_input);
        let ctx = CommandContext { registry: self };
        let results = self
            .matching(token)
            .map(|entry| {
                log::debug!("Dispatching '{}'", entry.name);
                entry.invoke(raw_input, &ctx)
            })
            .collect();
        Dispatch {
            token: token.to_string(),
            results,
        }
    }
}

/// The candidate command name: everything before the first space.
pub fn command_token(raw_input: &str) -> &str {
    raw_input.split(' ').next().unwrap_or_default()
}

/// The tokens after the command token, split on single spaces.
pub fn arguments(raw_input: &str) -> impl Iterator<Item = &str> {
    raw_input.split(' ').skip(1)
}
