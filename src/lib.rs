//! # logshed
//!
//! A leveled, structured logging core: one synchronous pipeline from call
//! site to sink, built around pooled entries, a pluggable layout, and
//! fan-out to category-matched appenders.
//!
//! ## Features
//!
//! - **Leveled façade**: process-wide free functions and macros, gated by
//!   a single threshold; print-style calls bypass the gate entirely
//! - **Entry pooling**: log records are recycled through a typed,
//!   lock-free pool instead of being allocated per call
//! - **Caller resolution**: each line carries the resolved function (and
//!   optionally file:line) of its call site
//! - **Pluggable rendering**: colorized text by default, JSON lines or a
//!   custom [`Layout`] without touching the logger
//! - **Thread safe**: concurrent calls never interleave their output
//!
//! ## Example
//!
//! ```
//! use logshed::{Level, LogOption};
//!
//! logshed::init(vec![LogOption::Threshold(Level::Debug)]);
//! logshed::info!("server listening on port {}", 8080);
//! logshed::facade::with_fields([("user", "alice")])
//!     .logln(Level::Info, &[&"login accepted"]);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        Appender, Args, BacktraceResolver, CallerSite, ColorTheme, EntryGuard, EntryPool, Field,
        FieldValue, Flags, JsonLayout, Layout, Level, LogEntry, LogOption, Logger, LoggerError,
        LoggerMetrics, RenderOptions, ResolveCaller, Result, TextLayout, TimestampFormat,
        DEFAULT_CALLER_DEPTH,
    };
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use core::facade;
pub use core::facade::{init, logger, modify};
pub use core::{
    Appender, Args, BacktraceResolver, CallerSite, ColorTheme, EntryGuard, EntryPool, Field,
    FieldValue, Flags, JsonLayout, Layout, Level, LogEntry, LogOption, Logger, LoggerError,
    LoggerMetrics, RenderOptions, ResolveCaller, Result, TextLayout, TimestampFormat,
    DEFAULT_CALLER_DEPTH,
};
