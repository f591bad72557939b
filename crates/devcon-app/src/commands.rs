//! Demo commands registered by the terminal host.

use std::cell::Cell;
use std::rc::Rc;

use devcon_core::error::Result;
use devcon_core::terminal::{CommandContext, CommandEntry, CommandOutput, arguments};

/// Commands the host adds after the built-ins. `quit` sets the flag.
pub fn demo_commands(quit: Rc<Cell<bool>>) -> Vec<CommandEntry> {
    vec![
        CommandEntry::raw_string("print", "Logs its arguments: print [text...]", print),
        CommandEntry::no_argument("ping", "Logs a message without arguments", ping),
        CommandEntry::no_argument("quit", "Exits the console host", move |_| {
            quit.set(true);
            Ok(CommandOutput::None)
        }),
    ]
}

// Output goes through the log facade and comes back via capture.
fn print(raw_input: &str, _ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    let args: Vec<&str> = arguments(raw_input).collect();
    log::info!("Printing with args: {}", args.join(" "));
    Ok(CommandOutput::None)
}

fn ping(_ctx: &CommandContext<'_>) -> Result<CommandOutput> {
    log::info!("Printing with no args");
    Ok(CommandOutput::Text("pong".to_string()))
}

#[cfg(test)]
mod tests {
    use devcon_core::Console;
    use devcon_core::config::ConsoleConfig;

    use super::*;

    #[test]
    fn demo_commands_follow_builtins() {
        let console = Console::start(
            ConsoleConfig::default(),
            demo_commands(Rc::new(Cell::new(false))),
        )
        .unwrap();
        let names: Vec<&str> = console
            .registry()
            .entries()
            .map(CommandEntry::name)
            .collect();
        assert_eq!(names, ["help", "clear", "save_logs", "print", "ping", "quit"]);
    }

    #[test]
    fn quit_sets_flag() {
        let quit = Rc::new(Cell::new(false));
        let mut console =
            Console::start(ConsoleConfig::default(), demo_commands(Rc::clone(&quit))).unwrap();
        console.submit("quit now");
        assert!(quit.get());
    }

    #[test]
    fn ping_replies() {
        let mut console =
            Console::start(ConsoleConfig::default(), demo_commands(Rc::new(Cell::new(false))))
                .unwrap();
        console.submit("ping");
        assert_eq!(
            console.history_lines().last().map(String::as_str),
            Some("pong")
        );
    }
}
