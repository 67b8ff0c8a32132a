#![deny(missing_docs)]
//! Shared logging utilities for the Navi workspace.
//!
//! Every crate logs through the `navi_*` macros below instead of calling
//! `log::` directly. Each line is tagged with the conversation turn currently
//! being processed on the calling thread, so a log file can be lined up with
//! the chat transcript.

use std::cell::Cell;

thread_local! {
    /// Conversation turn being handled on this thread.
    static TURN: Cell<u64> = const { Cell::new(0) };
}

/// Records the conversation turn the current thread is handling.
///
/// The app loop calls this once per dispatched message.
pub fn set_turn(turn: u64) {
    TURN.with(|v| v.set(turn));
}

/// Returns the turn recorded for the current thread, or 0 outside the loop.
pub fn current_turn() -> u64 {
    TURN.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current turn.
#[macro_export]
macro_rules! navi_trace {
    ($($arg:tt)*) => {{
        log::trace!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current turn.
#[macro_export]
macro_rules! navi_debug {
    ($($arg:tt)*) => {{
        log::debug!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current turn.
#[macro_export]
macro_rules! navi_info {
    ($($arg:tt)*) => {{
        log::info!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current turn.
#[macro_export]
macro_rules! navi_warn {
    ($($arg:tt)*) => {{
        log::warn!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current turn.
#[macro_export]
macro_rules! navi_error {
    ($($arg:tt)*) => {{
        log::error!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test: it no-ops once a logger is installed.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_is_thread_local() {
        set_turn(7);
        assert_eq!(current_turn(), 7);

        let other = std::thread::spawn(current_turn).join().unwrap();
        assert_eq!(other, 0);
    }

    #[test]
    fn macros_accept_format_arguments() {
        initialize_for_tests();
        navi_info!("turn {} handled {}", 1, "ok");
        navi_debug!("plain");
    }
}
