//! Minimal ANSI renderer for the scrollback.

use std::io::{self, Write};

use devcon_core::Console;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const PROMPT: &str = "] ";

/// Redraws the whole scrollback whenever it differs from the last frame.
///
/// The oldest visible line is dimmed.
#[derive(Debug, Default)]
pub struct ScrollbackRenderer {
    drawn: Vec<String>,
}

impl ScrollbackRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether anything was written.
    pub fn draw(&mut self, console: &mut Console, out: &mut impl Write) -> io::Result<bool> {
        let scroll = console.take_scroll_request();
        if !scroll && console.history_lines().eq(self.drawn.iter()) {
            return Ok(false);
        }
        self.drawn = console.history_lines().cloned().collect();

        write!(out, "{CLEAR_SCREEN}")?;
        for (i, line) in self.drawn.iter().enumerate() {
            if i == 0 {
                writeln!(out, "{DIM}{line}{RESET}")?;
            } else {
                writeln!(out, "{line}")?;
            }
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use devcon_core::config::ConsoleConfig;

    use super::*;

    fn console() -> Console {
        Console::start(ConsoleConfig::default(), Vec::new()).unwrap()
    }

    #[test]
    fn first_frame_draws_default_line_dimmed() {
        let mut c = console();
        let mut r = ScrollbackRenderer::new();
        let mut out: Vec<u8> = Vec::new();
        assert!(r.draw(&mut c, &mut out).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("{DIM}Type 'help' to see all commands.{RESET}")));
        assert!(text.ends_with(PROMPT));
    }

    #[test]
    fn unchanged_scrollback_is_not_redrawn() {
        let mut c = console();
        let mut r = ScrollbackRenderer::new();
        r.draw(&mut c, &mut io::sink()).unwrap();
        c.tick();
        assert!(!r.draw(&mut c, &mut io::sink()).unwrap());
    }

    #[test]
    fn submit_triggers_redraw() {
        let mut c = console();
        let mut r = ScrollbackRenderer::new();
        r.draw(&mut c, &mut io::sink()).unwrap();
        c.submit("help");
        let mut out: Vec<u8> = Vec::new();
        assert!(r.draw(&mut c, &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().contains("> help\n"));
    }
}
