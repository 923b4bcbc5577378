//! Defines [eprintln_and_exit], which the `retro-engine` CLI uses to bail out
//! when its settings file or a prompt record can't be used.

/// The equivalent to calling [eprintln], then calling [std::process::exit] with
/// with an exit code of `1`.
///
/// Useful for exiting gracefully with an error message.
#[macro_export]
macro_rules! eprintln_and_exit {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        ::std::process::exit(1);
    }};
}
