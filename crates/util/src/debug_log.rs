//! Contains tools for debug-mode logging.
//!
//! Logging cannot be enabled when `cfg!(debug_assertions)` is false, otherwise
//! it's enabled by default. Info goes to stdout, warnings and errors go to
//! stderr.

pub mod panic_on_errors;

use std::io::{IsTerminal, Write};
use std::panic::Location;
#[cfg(debug_assertions)]
use std::sync::atomic::{AtomicBool, Ordering};

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Log some info to stdout if both `cfg!(debug_assertions)` and [enabled] are
/// true.
#[macro_export]
macro_rules! debug_log_info {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        if $crate::debug_log::enabled() {
            $crate::debug_log::emit($crate::debug_log::Level::Info, &format!($($arg)*));
        }
    }};
}

/// Log a warning to stderr if both `cfg!(debug_assertions)` and [enabled] are
/// true.
#[macro_export]
macro_rules! debug_log_warning {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        if $crate::debug_log::enabled() {
            $crate::debug_log::emit($crate::debug_log::Level::Warning, &format!($($arg)*));
        }
    }};
}

/// Log an error to stderr if both `cfg!(debug_assertions)` and [enabled] are
/// true. Panics afterwards if [panic_on_errors::enabled] is true.
#[macro_export]
macro_rules! debug_log_error {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        if $crate::debug_log::enabled() {
            $crate::debug_log::emit($crate::debug_log::Level::Error, &format!($($arg)*));

            if $crate::debug_log::panic_on_errors::enabled() {
                panic!("Panicking on error logging enabled.");
            }
        }
    }};
}

/// The severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Level::Info => "\x1b[35m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }
}

/// Whether logging is enabled or not.
///
/// Logging cannot be enabled when `cfg!(debug_assertions)` is false, otherwise
/// it's enabled by default.
#[inline(always)]
pub fn enabled() -> bool {
    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn enabled_impl() -> bool {
        false
    }

    #[cfg(debug_assertions)]
    #[inline(always)]
    fn enabled_impl() -> bool {
        ENABLED.load(Ordering::Relaxed)
    }

    enabled_impl()
}

/// Disable logging.
#[inline(always)]
pub fn disable() {
    #[cfg(debug_assertions)]
    ENABLED.store(false, Ordering::Relaxed);
}

/// Enable logging.
///
/// Trying to manually enable logging when `cfg!(debug_assertions)` is false
/// will result in the program panicking.
#[inline(always)]
pub fn enable() {
    #[cfg(not(debug_assertions))]
    panic!("Debug logging cannot be enabled.");

    #[cfg(debug_assertions)]
    ENABLED.store(true, Ordering::Relaxed);
}

/// Write one log line (plus where and when it came from).
///
/// This function gets called by the debug log macros (e.g. [debug_log_info])
/// and generally shouldn't be called directly.
#[track_caller]
pub fn emit(level: Level, message: &str) {
    let where_ = Location::caller();

    let line = |is_terminal: bool| {
        let (blue, color, reset) = if is_terminal {
            ("\x1b[34m", level.color(), "\x1b[0m")
        } else {
            ("", "", "")
        };
        format!(
            "{blue}DEBUG LOG{reset} [{color}{}{reset}]: {message}\n{}",
            level.label(),
            where_and_when(where_, blue, reset),
        )
    };

    // A failed write to stdout/stderr isn't worth reporting anywhere.
    match level {
        Level::Info => {
            let stdout = std::io::stdout();
            let _ = writeln!(stdout.lock(), "{}", line(stdout.is_terminal()));
        }
        Level::Warning | Level::Error => {
            let stderr = std::io::stderr();
            let _ = writeln!(stderr.lock(), "{}", line(stderr.is_terminal()));
        }
    }
}

/// The location of the caller and the time this was called, as a string.
fn where_and_when(loc: &Location<'_>, color: &str, reset_color: &str) -> String {
    let when = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|e| format!("Unknown time: {e}"));

    format!(
        "\tWhere: {color}{}:{}:{}{reset_color}\n\tTime:  {color}{when}{reset_color}",
        loc.file(),
        loc.line(),
        loc.column(),
    )
}

#[cfg(debug_assertions)]
static ENABLED: AtomicBool = AtomicBool::new(true);
