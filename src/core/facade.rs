//! Process-wide convenience surface
//!
//! One logger per process, constructed exactly once and reachable through
//! free functions. The instance lives in a `OnceLock`: the first
//! constructor call wins, later calls get the same logger back and their
//! options are ignored. A live instance is still reconfigurable through
//! [`modify`].
//!
//! The leveled functions here are real frames, not aliases: the caller
//! depth constant assumes each call passes through exactly one severity
//! function and one gate function before reaching the logger.

use super::log_level::Level;
use super::logger::{Args, LogOption, Logger};
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Construct the process-wide logger from `options`, or return the
/// existing instance (options ignored) if one was already built.
pub fn init(options: Vec<LogOption>) -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::new(options))
}

/// The process-wide logger, default-constructed on first use.
pub fn logger() -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::new(Vec::new()))
}

/// Reconfigure the live process-wide logger.
pub fn modify(options: Vec<LogOption>) {
    logger().modify(options);
}

/// Format-style call at an explicit severity; the gate lives here so a
/// suppressed call never reaches the logger.
#[inline(never)]
pub fn logf(level: Level, format: &str, args: Args<'_>) {
    let lg = logger();
    if lg.level().permits(level) {
        lg.logf(level, format, args);
    }
}

/// Space-joined call at an explicit severity.
#[inline(never)]
pub fn logln(level: Level, args: Args<'_>) {
    let lg = logger();
    if lg.level().permits(level) {
        lg.logln(level, args);
    }
}

#[inline(never)]
pub fn debugx2(format: &str, args: Args<'_>) {
    logf(Level::DebugX2, format, args);
}

#[inline(never)]
pub fn debugx2_ln(args: Args<'_>) {
    logln(Level::DebugX2, args);
}

#[inline(never)]
pub fn debug(format: &str, args: Args<'_>) {
    logf(Level::Debug, format, args);
}

#[inline(never)]
pub fn debug_ln(args: Args<'_>) {
    logln(Level::Debug, args);
}

#[inline(never)]
pub fn info(format: &str, args: Args<'_>) {
    logf(Level::Info, format, args);
}

#[inline(never)]
pub fn info_ln(args: Args<'_>) {
    logln(Level::Info, args);
}

#[inline(never)]
pub fn warn(format: &str, args: Args<'_>) {
    logf(Level::Warn, format, args);
}

#[inline(never)]
pub fn warn_ln(args: Args<'_>) {
    logln(Level::Warn, args);
}

#[inline(never)]
pub fn error(format: &str, args: Args<'_>) {
    logf(Level::Error, format, args);
}

#[inline(never)]
pub fn error_ln(args: Args<'_>) {
    logln(Level::Error, args);
}

/// Emit, then terminate the process with a non-zero status.
#[inline(never)]
pub fn fatal(format: &str, args: Args<'_>) {
    logf(Level::Fatal, format, args);
}

/// Emit, then terminate the process with a non-zero status.
#[inline(never)]
pub fn fatal_ln(args: Args<'_>) {
    logln(Level::Fatal, args);
}

/// Unconditional space-joined output, no trailing newline.
#[inline(never)]
pub fn print(args: Args<'_>) {
    logger().print(args);
}

/// Unconditional format-style output.
#[inline(never)]
pub fn printf(format: &str, args: Args<'_>) {
    logger().printf(format, args);
}

/// Unconditional space-joined output with a trailing newline.
#[inline(never)]
pub fn println(args: Args<'_>) {
    logger().println(args);
}

pub fn level() -> Level {
    logger().level()
}

pub fn set_level(level: Level) {
    logger().set_level(level);
}

pub fn flags() -> super::flags::Flags {
    logger().flags()
}

pub fn set_flags(flags: super::flags::Flags) {
    logger().set_flags(flags);
}

pub fn set_formatter(layout: Box<dyn super::layout::Layout>) {
    logger().set_formatter(layout);
}

pub fn enable_timestamp() {
    logger().enable_timestamp();
}

pub fn disable_timestamp() {
    logger().disable_timestamp();
}

/// Attach fields to a pooled entry of the process-wide logger.
pub fn with_fields<I, K, V>(fields: I) -> super::logger::EntryGuard<'static>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<super::log_entry::FieldValue>,
{
    logger().with_fields(fields)
}

/// Emit the diagnostic configuration summary.
pub fn show_config() {
    logger().show_options();
}

pub fn is_none() -> bool {
    level() == Level::None
}

pub fn is_fatal() -> bool {
    level() == Level::Fatal
}

pub fn is_error() -> bool {
    level() == Level::Error
}

pub fn is_warn() -> bool {
    level() == Level::Warn
}

pub fn is_info() -> bool {
    level() == Level::Info
}

pub fn is_debug() -> bool {
    level() == Level::Debug
}

pub fn is_debugx2() -> bool {
    level() == Level::DebugX2
}
