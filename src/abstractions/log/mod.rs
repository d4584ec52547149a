/*!

# Overview

The `log` module provides logging with customizable thresholds and log levels. The log level describes what _kind_ of
message is logged, and the numeric threshold is a verbosity level, which describes the _verbosity_ of the logger.

The symbol table logs at these levels:

 - `trace!`: scope entry/exit and every declaration (thresholds 4 and up),
 - `debug!`: every record read during an import,
 - `warning!`/`error!`: every diagnostic recorded against user input,
 - `critical!`: contract violations by the caller, immediately before the process panics.

```
use lclsymtab::log::*;

fn main() {
    // Set the global threshold to 1. Any messages logged with greater threshold
    // will not be emitted.
    set_global_logging_threshold(1);

    critical!(3, "A critical error occurred!"); // Not emitted
    warning!(2, "Check your import file.");     // Not emitted
    info!(1, "Import started.");                // Emitted
    trace!(0, "Entered a quantifier scope.");   // Emitted
}
```

## Threshold

The global logging threshold is a numerical value, with higher values meaning more verbose logging. This global value
is the same for all levels. Individual log entries are logged "at" a given threshold and are only emitted if their
threshold is _at most_ the global threshold. A message with threshold 0 is always emitted.

The threshold is set programmatically with `set_global_logging_threshold`. When the logger is first initialized, the
environment variable `LCLSYMTAB_LOG_THRESHOLD`, if it holds a number in `0..=255`, overrides the current value.

```
use lclsymtab::log::{set_global_logging_threshold, get_global_logging_threshold};

set_global_logging_threshold(3);
assert_eq!(get_global_logging_threshold(), 3);
```

# Macros

 - `critical!`
 - `error!`
 - `warning!`
 - `info!`
 - `debug!`
 - `trace!`

syntax:

```ignore
// With threshold
level!(threshold, "format string", args...);

// Without threshold (indicates threshold of 0, always emitted)
level!("format string", args...);
```

The macros initialize the logger on first use; no explicit initialization is required.

*/
mod formatter;
mod threshold_filter;
mod macros;

use std::sync::{
    atomic::{AtomicU8, Ordering},
    LazyLock
  };

use tracing_subscriber::{
  fmt,
  layer::SubscriberExt,
  Registry
};

use threshold_filter::ThresholdFilterLayer;
use formatter::CustomFieldFormatter;
pub use macros::*;

/// Name of the environment variable consulted once, at logger initialization.
pub const THRESHOLD_ENV_VAR: &str = "LCLSYMTAB_LOG_THRESHOLD";

/// Used for implicit initialization.
static INIT_LOGGER: LazyLock<()> = LazyLock::new(|| {
  if let Some(threshold) = threshold_from_env() {
    set_global_logging_threshold(threshold);
  }

  let subscriber = Registry::default()
      .with(ThresholdFilterLayer)
      .with(
        fmt::layer()
            .fmt_fields(CustomFieldFormatter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr),
      );

  // Another subscriber may already be installed by the embedding application. Theirs wins.
  let _ = tracing::subscriber::set_global_default(subscriber);
});

/// This does not need to be called directly. Initializes the logging system.
pub fn init_logger() {
  LazyLock::force(&INIT_LOGGER);
}

static GLOBAL_LOGGING_THRESHOLD: AtomicU8 = AtomicU8::new(2); // Default threshold

/// Sets the global threshold.
pub fn set_global_logging_threshold(new_threshold: u8) {
  GLOBAL_LOGGING_THRESHOLD.store(new_threshold, Ordering::SeqCst);
}

/// Retrieves the global threshold.
pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::SeqCst)
}

fn threshold_from_env() -> Option<u8> {
  parse_threshold(std::env::var(THRESHOLD_ENV_VAR).ok()?.as_str())
}

fn parse_threshold(text: &str) -> Option<u8> {
  text.trim().parse::<u8>().ok()
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_parsing() {
    assert_eq!(parse_threshold(" 4 "), Some(4));
    assert_eq!(parse_threshold("256"), None);
    assert_eq!(parse_threshold("verbose"), None);
  }

  #[test]
  fn test_logging() {
    let name = "x";

    set_global_logging_threshold(3);

    info!(2, "declared variable {}", name);
    // This should be logged

    debug!(4, "NOT logged: declared variable {}", name);
    // This should NOT be logged

    warning!("redeclaration of {}", name);
    // This should be logged

    critical!(1, "scope underflow while exiting {}", name);
    // This should be logged

    set_global_logging_threshold(5);
    trace!(5, "entered quantifier scope for {}", name);
    // This should be logged

    set_global_logging_threshold(2);
  }
}
