//! Conditional logging macros that check a module-level `ENABLE_LOGS` flag.
//!
//! The update path runs on every selection change, so its logging is gated
//! per module rather than per call site. Define the flag first:
//!
//! ```rust
//! const ENABLE_LOGS: bool = true;
//!
//! // The macros are exported at the crate root:
//! use keydiary::{log_info, log_warn};
//!
//! log_info!("This will log if ENABLE_LOGS is true");
//! ```

/// Macro for conditional info logging.
/// Checks the `ENABLE_LOGS` const in the calling module.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Macro for conditional warn logging.
/// Checks the `ENABLE_LOGS` const in the calling module.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}
