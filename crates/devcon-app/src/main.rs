//! devcon terminal host.
//!
//! Drives a console from stdin at a fixed frame rate: each frame submits at
//! most one input line, runs one `tick()`, and redraws the scrollback when
//! it changed. Log records from anywhere in the process are captured into
//! the console and also written to stderr through env_logger.
//!
//! Usage: `devcon-app [config.toml]` (or set `DEVCON_CONFIG`).

mod commands;
mod render;

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use anyhow::Result;

use devcon_core::config::ConsoleConfig;
use devcon_core::{Console, ConsoleLogger, log_channel};

const FRAME: Duration = Duration::from_millis(16);
const STDERR_FILTER: &str = "info";

fn main() -> Result<()> {
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DEVCON_CONFIG").ok())
    {
        Some(path) => ConsoleConfig::load(Path::new(&path))?,
        None => ConsoleConfig::default(),
    };

    let capture_level = config.capture_level_filter()?;
    let (log_tx, log_rx) = log_channel();
    let stderr_logger = stderr_logger(env_logger::Env::default());
    let max_level = stderr_logger.filter().max(capture_level);
    ConsoleLogger::new(log_tx, capture_level)
        .with_inner(Box::new(stderr_logger))
        .install(max_level)?;

    let quit = Rc::new(Cell::new(false));
    let mut console = Console::start(config, commands::demo_commands(Rc::clone(&quit)))?;
    console.attach_log_receiver(log_rx);
    log::info!("devcon host ready");

    let input = spawn_stdin_reader();
    let mut renderer = render::ScrollbackRenderer::new();
    let mut stdout = std::io::stdout();

    loop {
        let disconnected = match input.recv_timeout(FRAME) {
            Ok(line) => {
                console.submit(&line);
                false
            },
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => true,
        };
        console.tick();
        renderer.draw(&mut console, &mut stdout)?;
        if disconnected || quit.get() {
            break;
        }
    }

    log::debug!("devcon host shut down cleanly");
    Ok(())
}

/// stderr logger; `env` names the filter variable (`RUST_LOG` by default).
fn stderr_logger(env: env_logger::Env<'static>) -> env_logger::Logger {
    env_logger::Builder::from_env(env.default_filter_or(STDERR_FILTER)).build()
}

/// Read stdin lines on a worker thread so the frame loop never blocks.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
