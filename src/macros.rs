//! Macros to reduce boilerplate around threshold-gated logging
//!
//! Log emission goes through the `log` facade but is additionally gated by
//! the widget's configured [`crate::core::config::LogLevel`], so a host can
//! quiet a single widget without touching its global logger.

/// Emit a log record iff the configured threshold permits the level.
///
/// Usage:
/// ```ignore
/// gated_log!(self.config.log_level, Level::Warn, "invalid coordinates");
/// ```
macro_rules! gated_log {
    ($threshold:expr, $level:expr, $($arg:tt)+) => {
        if $threshold.permits($level) {
            log::log!($level, $($arg)+);
        }
    };
}

pub(crate) use gated_log;
