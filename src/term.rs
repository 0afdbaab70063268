use std::io::{self, Stdout, Write, stdout};
use std::{panic, process, sync::Once, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::ClearType;
use crossterm::event::{Event, KeyEvent, read, poll};
use log::{error, warn};

static PANIC_HOOK: Once = Once::new();
static SIGNAL_HANDLER: Once = Once::new();

// Exit status after SIGINT/SIGTERM/SIGHUP
const SIGNAL_EXIT_CODE: i32 = 130;

/// Owns the terminal while the game runs: raw mode, no echo, hidden cursor.
/// Whatever happens, the terminal is put back when this is dropped.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        install_panic_hook();
        install_signal_handler()?;

        // Set first so a partial setup is still undone on drop
        self.active = true;
        set_raw_mode(true)?;
        set_cursor_visibility(&mut self.stdout, false)?;
        set_cursor_blink(&mut self.stdout, false)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        reset_terminal(&mut self.stdout)
    }

    /// Takes at most one pending key press without waiting for one.
    pub fn poll_key(&self) -> io::Result<Option<KeyEvent>> {
        if poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }

    /// Clears the screen and paints `frame` from the top-left corner.
    pub fn draw_frame(&mut self, frame: &str) -> io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::Print(frame)
        )?;
        self.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!("Could not restore the terminal: {}", e);
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            // Otherwise the panic message lands in a raw, cursorless terminal
            let _ = reset_terminal(&mut stdout());
            default_hook(info);
        }));
    });
}

/// Restores the terminal and exits when the process is interrupted, terminated
/// or hung up on, since none of those unwind through `Drop`.
fn install_signal_handler() -> io::Result<()> {
    let mut result = Ok(());

    SIGNAL_HANDLER.call_once(|| {
        result = ctrlc::set_handler(|| {
            if let Err(e) = reset_terminal(&mut stdout()) {
                error!("Could not restore the terminal after a signal: {}", e);
            }
            warn!("Terminated by signal");
            process::exit(SIGNAL_EXIT_CODE);
        })
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
    });

    result
}

fn reset_terminal(out: &mut Stdout) -> io::Result<()> {
    // Try every step even if an earlier one fails
    let raw = set_raw_mode(false);
    let visible = set_cursor_visibility(out, true);
    let blink = set_cursor_blink(out, true);
    raw.and(visible).and(blink)
}

fn set_raw_mode(option: bool) -> io::Result<()> {
    if option {
        terminal::enable_raw_mode()
    } else {
        terminal::disable_raw_mode()
    }
}

fn set_cursor_blink(out: &mut Stdout, option: bool) -> io::Result<()> {
    if option {
        execute!(out, cursor::EnableBlinking)
    } else {
        execute!(out, cursor::DisableBlinking)
    }
}

fn set_cursor_visibility(out: &mut Stdout, option: bool) -> io::Result<()> {
    if option {
        execute!(out, cursor::Show)
    } else {
        execute!(out, cursor::Hide)
    }
}
