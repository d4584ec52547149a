//! Macros for generating log messages. Each macro takes an optional leading verbosity threshold.
//!
//! The macros route through `$crate::tracing` so that downstream crates need not depend on `tracing` themselves.

/// Shared expansion of the level macros. Not part of the public interface.
///
/// The public macros match the threshold as a literal followed by a format-string literal, so a call without a
/// threshold whose first argument after the format string is an identifier or expression falls through to the
/// threshold-free arm.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:ident, critical, $threshold:expr, $($arg:tt)+) => {
        {
            $crate::log::init_logger();
            $crate::tracing::event!(
                $crate::tracing::Level::$level,
                critical = true,
                threshold = $threshold,
                message = format_args!($($arg)+)
            );
        }
    };
    ($level:ident, plain, $threshold:expr, $($arg:tt)+) => {
        {
            $crate::log::init_logger();
            $crate::tracing::event!(
                $crate::tracing::Level::$level,
                threshold = $threshold,
                message = format_args!($($arg)+)
            );
        }
    };
}

/// Logs a contract violation. Always followed by a panic at the call sites in this crate.
#[macro_export]
macro_rules! critical {
    ($threshold:literal, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(ERROR, critical, $threshold, $fmt $(, $arg)*)
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(ERROR, critical, 0, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($threshold:literal, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(ERROR, plain, $threshold, $fmt $(, $arg)*)
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(ERROR, plain, 0, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! warning {
    ($threshold:literal, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(WARN, plain, $threshold, $fmt $(, $arg)*)
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(WARN, plain, 0, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($threshold:literal, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(INFO, plain, $threshold, $fmt $(, $arg)*)
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(INFO, plain, 0, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($threshold:literal, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(DEBUG, plain, $threshold, $fmt $(, $arg)*)
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(DEBUG, plain, 0, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! trace {
    ($threshold:literal, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(TRACE, plain, $threshold, $fmt $(, $arg)*)
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log_event!(TRACE, plain, 0, $fmt $(, $arg)*)
    };
}


// The following makes the macros importable directly from the `log` module.
pub use crate::{critical, error, warning, info, debug, trace};
