//! Live "now playing" view.
//!
//! Subscribes to the server's push channel and keeps the queue listing and a
//! once-a-second playback clock on screen. Keys: q (or Ctrl-C) quits.

mod channel;
mod clock;
mod view;

use std::io;
use std::io::Write;

use anyhow::{Context, Result};
use crossbeam_channel::{Sender, bounded};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{Event as CEvent, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::config::Config;

/// Connect the push channel and run the view until quit or failure.
pub(crate) fn run_live(cfg: &Config) -> Result<()> {
    // Connect before touching the terminal so a refused connection prints
    // like any other command error.
    let events = channel::subscribe(cfg)?;

    let _guard = TerminalGuard::enter()?;

    let (quit_tx, quit_rx) = bounded::<()>(2);
    spawn_input_thread(quit_tx.clone());
    ctrlc::set_handler(move || {
        quit_tx.send(()).ok();
    })
    .context("install interrupt handler")?;

    let mut out = io::stdout();
    view::run(&mut out, events, quit_rx)
}

fn spawn_input_thread(quit_tx: Sender<()>) {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::read() {
                Ok(CEvent::Key(key)) => {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if key.code == KeyCode::Char('q') || ctrl_c {
                        quit_tx.send(()).ok();
                        return;
                    }
                }
                Ok(_) => {}
                Err(_) => return,
            }
        }
    });
}

/// Raw mode with a hidden cursor for the session. `Drop` restores both
/// exactly once, on every path out of the view.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        execute!(io::stdout(), Hide).context("hide cursor")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        execute!(out, Show).ok();
        disable_raw_mode().ok();
        // leave the shell prompt on its own line below the clock
        let _ = out.write_all(b"\r\n");
        let _ = out.flush();
    }
}
