// Level-checked logging shims over certkey_common::logging::Logger.
// Only the global max level is checked here; the per-component target filter
// is applied by the Logger itself.

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {{
        if ::log::Level::Debug <= ::log::max_level() {
            ($logger).debug_args(format_args!($($arg)*));
        }
    }}
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {{
        if ::log::Level::Info <= ::log::max_level() {
            ($logger).info_args(format_args!($($arg)*));
        }
    }}
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {{
        if ::log::Level::Warn <= ::log::max_level() {
            ($logger).warn_args(format_args!($($arg)*));
        }
    }}
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {{
        if ::log::Level::Error <= ::log::max_level() {
            ($logger).error_args(format_args!($($arg)*));
        }
    }}
}
