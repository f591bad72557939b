//! Built-in commands for the devcon terminal.

use devcon_types::error::Result;

use crate::interpreter::{CommandContext, CommandEntry, CommandOutput, CommandRegistry};

/// Register the built-in commands into a registry.
///
/// Built-ins are registered in a fixed order (`help`, `clear`, `save_logs`)
/// and must come before any externally supplied commands.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(CommandEntry::no_argument(
        "help",
        "Shows all available commands",
        help,
    ))?;
    reg.register(CommandEntry::no_argument(
        "clear",
        "Clears the console history",
        clear,
    ))?;
    reg.register(CommandEntry::raw_string(
        "save_logs",
        "Saves all logs to a file: save_logs [file_name]",
        save_logs,
    ))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

fn help(ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let lines = ctx
        .entries()
        .map(|e| format!("{} - {}", e.name(), e.description()))
        .collect();
    Ok(CommandOutput::Lines(lines))
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

fn clear(_ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    Ok(CommandOutput::Clear)
}

// ---------------------------------------------------------------------------
// save_logs
// ---------------------------------------------------------------------------

// The target name is parsed by the exporter, not here.
fn save_logs(raw_input: &str, _ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    Ok(CommandOutput::Export {
        args: raw_input.to_string(),
    })
}
