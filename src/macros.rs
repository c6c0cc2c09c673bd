//! Logging macros for the process-wide façade.
//!
//! Each macro collects its arguments as `Display` trait objects and
//! forwards to the matching façade function, so interpolation happens in
//! the layout, not at the call site.
//!
//! # Examples
//!
//! ```
//! logshed::info!("server listening on port {}", 8080);
//! logshed::warn!("retry {} of {}", 3, 5);
//! ```

/// Log with a format template at an explicit severity.
///
/// ```
/// use logshed::Level;
/// logshed::log!(Level::Info, "loaded {} rules", 12);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::facade::logf(
            $level,
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Log an extra-verbose debug message.
#[macro_export]
macro_rules! debugx2 {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::facade::debugx2(
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::facade::debug(
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::facade::info(
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::facade::warn(
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::facade::error(
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Log a fatal message, then terminate the process with a non-zero
/// status.
#[macro_export]
macro_rules! fatal {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::core::facade::fatal(
            $format,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}
