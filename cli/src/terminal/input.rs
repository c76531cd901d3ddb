use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use darkly_core::stop::StopSignal;
use tokio::task::JoinHandle;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Listens for `q`, space, Esc or Ctrl-C in raw mode and raises the stop
/// signal. Dropping the handle restores the terminal.
pub struct InputHandle {
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl InputHandle {
    /// `None` when stdin is not a terminal or raw mode is unavailable.
    pub fn start(stop: StopSignal) -> Option<Self> {
        if !io::stdin().is_terminal() {
            return None;
        }
        if let Err(e) = enable_raw_mode() {
            debug!("Raw mode unavailable, stop keys disabled: {e}");
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let thread = thread::spawn(move || {
            while flag.load(Ordering::Relaxed) {
                if !event::poll(POLL_INTERVAL).unwrap_or(false) {
                    continue;
                }
                if let Ok(Event::Key(key_event)) = event::read() {
                    if is_stop_key(&key_event) {
                        stop.raise();
                        break;
                    }
                }
            }
        });

        Some(Self {
            running,
            thread: Some(thread),
        })
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        let _ = disable_raw_mode();
    }
}

fn is_stop_key(key_event: &KeyEvent) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }
    let is_ctrl_c = key_event.code == KeyCode::Char('c')
        && key_event.modifiers.contains(KeyModifiers::CONTROL);
    is_ctrl_c || matches!(key_event.code, KeyCode::Char('q') | KeyCode::Char(' ') | KeyCode::Esc)
}

/// Raises `stop` on SIGINT. Abort the returned task once the run is over.
pub fn stop_on_ctrl_c(stop: StopSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.raise();
        }
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
