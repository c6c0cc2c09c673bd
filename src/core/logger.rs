//! Logger orchestration and dispatch
//!
//! The logger owns the shared configuration (threshold, flags, layout,
//! theme, appender set, caller depth), the entry pool, and the guard that
//! keeps concurrent writes from interleaving. Every call runs the same
//! pipeline: gate on the threshold, acquire a pooled entry, resolve the
//! caller, render through the layout, fan out to matching appenders,
//! release the entry.
//!
//! Several functions on the call path are marked `#[inline(never)]`: the
//! number of wrapping frames between the caller-resolver boundary and the
//! user's call site is a configured constant (`DEFAULT_CALLER_DEPTH`), and
//! inlining would change it.

use super::appender::Appender;
use super::caller::{BacktraceResolver, ResolveCaller};
use super::entry_pool::EntryPool;
use super::error::{LoggerError, Result};
use super::flags::Flags;
use super::layout::{Layout, RenderOptions, TextLayout};
use super::log_entry::{FieldValue, LogEntry};
use super::log_level::Level;
use super::metrics::LoggerMetrics;
use super::theme::ColorTheme;
use crate::appenders::ConsoleAppender;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// Opaque argument list for one call; values are rendered through their
/// `Display` impl at emission time.
pub type Args<'a> = &'a [&'a dyn fmt::Display];

/// Wrapping frames between the resolver boundary and a call site going
/// through the crate-level façade. Calls driving a `Logger` directly have
/// two fewer wrappers; see [`LogOption::CallerDepth`].
pub const DEFAULT_CALLER_DEPTH: usize = 5;

/// Named configuration mutators, applied in order at construction or to a
/// live logger via `modify`. Later options win over earlier ones.
pub enum LogOption {
    /// Active severity threshold.
    Threshold(Level),
    /// Ambient formatting flags.
    AmbientFlags(Flags),
    /// Replace the layout.
    Formatter(Box<dyn Layout>),
    /// Replace the whole appender set.
    Appenders(Vec<Box<dyn Appender>>),
    /// Append one appender to the current set.
    AddAppender(Box<dyn Appender>),
    /// Route output to a custom writer through a fresh catch-all console
    /// appender, replacing the current set.
    Output(Box<dyn std::io::Write + Send>),
    /// Per-severity color palette.
    Theme(ColorTheme),
    /// Frame depth for caller resolution.
    CallerDepth(usize),
    /// Replace the stack-walking implementation.
    Resolver(Box<dyn ResolveCaller>),
}

impl LogOption {
    pub(crate) fn apply(self, logger: &Logger) {
        match self {
            LogOption::Threshold(level) => logger.set_level(level),
            LogOption::AmbientFlags(flags) => logger.set_flags(flags),
            LogOption::Formatter(layout) => logger.set_formatter(layout),
            LogOption::Appenders(appenders) => logger.set_appenders(appenders),
            LogOption::AddAppender(appender) => logger.add_appender(appender),
            LogOption::Output(writer) => {
                logger.set_appenders(vec![Box::new(ConsoleAppender::with_writer(writer, "*"))]);
            }
            LogOption::Theme(theme) => logger.set_theme(theme),
            LogOption::CallerDepth(depth) => logger.set_depth(depth),
            LogOption::Resolver(resolver) => logger.set_resolver(resolver),
        }
    }
}

pub struct Logger {
    level: RwLock<Level>,
    flags: RwLock<Flags>,
    layout: RwLock<Box<dyn Layout>>,
    theme: RwLock<ColorTheme>,
    depth: RwLock<usize>,
    resolver: RwLock<Box<dyn ResolveCaller>>,
    /// Appender set; its lock doubles as the render+write guard, so two
    /// concurrent calls cannot interleave their bytes.
    appenders: Mutex<Vec<Box<dyn Appender>>>,
    pool: EntryPool,
    metrics: Arc<LoggerMetrics>,
    created_at: DateTime<Utc>,
}

impl Logger {
    /// Build a logger from an ordered option list, then fill defaults for
    /// whatever the options left unset: threshold `Info`, a single
    /// catch-all console appender on stdout, colorized text layout.
    ///
    /// A `Threshold(Level::None)` passed here is indistinguishable from
    /// "unset" and becomes `Info`; set it after construction if a logger
    /// really should suppress all leveled output.
    pub fn new(options: Vec<LogOption>) -> Self {
        let metrics = Arc::new(LoggerMetrics::new());
        let logger = Self {
            level: RwLock::new(Level::None),
            flags: RwLock::new(Flags::NONE),
            layout: RwLock::new(Box::new(TextLayout::new())),
            theme: RwLock::new(ColorTheme::default()),
            depth: RwLock::new(DEFAULT_CALLER_DEPTH),
            resolver: RwLock::new(Box::new(BacktraceResolver)),
            appenders: Mutex::new(Vec::new()),
            pool: EntryPool::new(Arc::clone(&metrics)),
            metrics,
            created_at: Utc::now(),
        };

        for option in options {
            option.apply(&logger);
        }

        if logger.level() == Level::None {
            logger.set_level(Level::Info);
        }
        if logger.appenders.lock().is_empty() {
            logger.add_appender(Box::new(ConsoleAppender::new()));
        }

        logger
    }

    pub fn level(&self) -> Level {
        *self.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    pub fn flags(&self) -> Flags {
        *self.flags.read()
    }

    pub fn set_flags(&self, flags: Flags) {
        *self.flags.write() = flags;
    }

    pub fn theme(&self) -> ColorTheme {
        *self.theme.read()
    }

    pub fn set_theme(&self, theme: ColorTheme) {
        *self.theme.write() = theme;
    }

    pub fn depth(&self) -> usize {
        *self.depth.read()
    }

    pub fn set_depth(&self, depth: usize) {
        *self.depth.write() = depth;
    }

    pub fn set_formatter(&self, layout: Box<dyn Layout>) {
        *self.layout.write() = layout;
    }

    pub fn set_resolver(&self, resolver: Box<dyn ResolveCaller>) {
        *self.resolver.write() = resolver;
    }

    pub fn timestamp_enabled(&self) -> bool {
        self.layout.read().timestamp_enabled()
    }

    pub fn enable_timestamp(&self) {
        self.layout.write().set_timestamp_enabled(true);
    }

    pub fn disable_timestamp(&self) {
        self.layout.write().set_timestamp_enabled(false);
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.lock().push(appender);
    }

    pub fn set_appenders(&self, appenders: Vec<Box<dyn Appender>>) {
        *self.appenders.lock() = appenders;
    }

    /// Apply configuration options to this live logger, in order.
    pub fn modify(&self, options: Vec<LogOption>) {
        for option in options {
            option.apply(self);
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Format-template call at an explicit severity. Below-threshold calls
    /// return before an entry is acquired.
    #[inline(never)]
    pub fn logf(&self, level: Level, format: &str, args: Args<'_>) {
        if !self.level().permits(level) {
            return;
        }
        self.dispatch_call(level, format, false, args);
    }

    /// Space-joined call at an explicit severity, with a trailing newline.
    #[inline(never)]
    pub fn logln(&self, level: Level, args: Args<'_>) {
        if !self.level().permits(level) {
            return;
        }
        self.dispatch_call(level, "", true, args);
    }

    /// Unconditional output, never filtered by the threshold.
    #[inline(never)]
    pub fn print(&self, args: Args<'_>) {
        self.unconditional(Level::None, "", false, args);
    }

    #[inline(never)]
    pub fn printf(&self, format: &str, args: Args<'_>) {
        self.unconditional(Level::None, format, false, args);
    }

    #[inline(never)]
    pub fn println(&self, args: Args<'_>) {
        self.unconditional(Level::None, "", true, args);
    }

    /// Acquire an entry with its fields preserved, attach the supplied
    /// pairs in order (an existing key is overwritten), and hand ownership
    /// to the caller. The returned guard emits at most once; dropping it
    /// un-emitted returns the entry to the pool without output.
    pub fn with_fields<I, K, V>(&self, fields: I) -> EntryGuard<'_>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut entry = self.pool.acquire(true);
        for (key, value) in fields {
            entry.set_field(key, value);
        }
        EntryGuard {
            logger: self,
            entry: Some(entry),
        }
    }

    /// Emit a summary of the current layout and palette at `Debug`
    /// severity, bypassing the threshold. Diagnostic, not a hot path; its
    /// resolved caller names the frame above the direct call site.
    #[inline(never)]
    pub fn show_options(&self) {
        let summary = format!("{} {}", self.layout.read().description(), self.theme().describe());
        self.unconditional(Level::Debug, "", true, &[&summary]);
    }

    /// Flush every appender. The first failure is returned.
    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    // Ungated dispatch wrapper; one frame, shared by the print-style entry
    // points and the diagnostic self-report.
    #[inline(never)]
    fn unconditional(&self, level: Level, format: &str, newline: bool, args: Args<'_>) {
        self.dispatch_call(level, format, newline, args);
    }

    // The per-call pipeline: resolve caller, acquire, populate, emit,
    // release. Every exit path releases the entry; Fatal then terminates
    // the process after a final flush.
    #[inline(never)]
    fn dispatch_call(&self, level: Level, format: &str, newline: bool, args: Args<'_>) {
        let caller = self.caller_at(self.depth());
        let mut entry = self.pool.acquire(false);
        entry.populate(level, format, caller, newline, render_args(args));
        self.emit(&entry);
        self.pool.release(entry);
        if level == Level::Fatal {
            self.terminate();
        }
    }

    // Guard emission path: two fewer wrapping frames than the façade path.
    #[inline(never)]
    fn dispatch_guard(
        &self,
        mut entry: LogEntry,
        level: Level,
        format: &str,
        newline: bool,
        args: Args<'_>,
    ) {
        if !self.level().permits(level) {
            self.pool.release(entry);
            return;
        }
        let caller = self.caller_at(self.depth().saturating_sub(2));
        entry.populate(level, format, caller, newline, render_args(args));
        self.emit(&entry);
        self.pool.release(entry);
        if level == Level::Fatal {
            self.terminate();
        }
    }

    // Resolve and format the caller for the current flags. Best-effort:
    // resolution failure yields an empty string and the line still goes
    // out.
    #[inline(never)]
    fn caller_at(&self, skip: usize) -> String {
        let site = match self.resolver.read().resolve(skip) {
            Some(site) => site,
            None => return String::new(),
        };
        let flags = self.flags();
        if flags.contains(Flags::SHORT_FILE) {
            let file = site.file.rsplit('/').next().unwrap_or(site.file.as_str());
            format!("{} {}:{}", site.function, file, site.line)
        } else if flags.contains(Flags::LONG_FILE) {
            format!("{} {}:{}", site.function, site.file, site.line)
        } else {
            site.function
        }
    }

    // Render and fan out under the write guard. All matching appenders are
    // attempted; failures are aggregated, reported once, and counted.
    fn emit(&self, entry: &LogEntry) {
        let mut appenders = self.appenders.lock();
        let rendered = {
            let layout = self.layout.read();
            let theme = self.theme.read();
            let opts = RenderOptions {
                flags: self.flags(),
                theme: &theme,
            };
            layout.render(entry, opts)
        };

        let mut attempted = 0;
        let mut failures: Vec<(String, LoggerError)> = Vec::new();
        for appender in appenders
            .iter_mut()
            .filter(|a| a.matches(&entry.category))
        {
            attempted += 1;
            if let Err(err) = appender.write(&rendered) {
                failures.push((appender.name().to_string(), err));
            }
        }

        if failures.is_empty() {
            self.metrics.record_written();
        } else {
            self.metrics.record_write_failures(failures.len() as u64);
            eprintln!("[logshed] {}", LoggerError::dispatch(attempted, &failures));
        }
    }

    fn terminate(&self) -> ! {
        let _ = self.flush();
        std::process::exit(1);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn render_args(args: Args<'_>) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

/// A pooled entry whose ownership has crossed to the caller for field
/// attachment. Emitting consumes the guard; dropping it un-emitted quietly
/// returns the entry to the pool.
pub struct EntryGuard<'a> {
    logger: &'a Logger,
    entry: Option<LogEntry>,
}

impl EntryGuard<'_> {
    /// Set the appender match key for this emission.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        if let Some(entry) = self.entry.as_mut() {
            entry.category = category.into();
        }
        self
    }

    /// Attach one more field; an existing key is overwritten.
    #[must_use]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        if let Some(entry) = self.entry.as_mut() {
            entry.set_field(key, value);
        }
        self
    }

    /// Emit with a format template at the given severity.
    #[inline(never)]
    pub fn logf(mut self, level: Level, format: &str, args: Args<'_>) {
        if let Some(entry) = self.entry.take() {
            self.logger.dispatch_guard(entry, level, format, false, args);
        }
    }

    /// Emit space-joined arguments at the given severity, with newline.
    #[inline(never)]
    pub fn logln(mut self, level: Level, args: Args<'_>) {
        if let Some(entry) = self.entry.take() {
            self.logger.dispatch_guard(entry, level, "", true, args);
        }
    }

    /// Emit unconditionally, bypassing the threshold.
    #[inline(never)]
    pub fn print(mut self, args: Args<'_>) {
        if let Some(entry) = self.entry.take() {
            self.logger.dispatch_guard(entry, Level::None, "", false, args);
        }
    }
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.logger.pool.release(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct CaptureAppender {
        pattern: String,
        writes: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl CaptureAppender {
        fn pair(pattern: &str) -> (Self, Arc<Mutex<Vec<Vec<u8>>>>) {
            let writes = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    pattern: pattern.to_string(),
                    writes: Arc::clone(&writes),
                },
                writes,
            )
        }
    }

    impl Appender for CaptureAppender {
        fn name(&self) -> &str {
            "capture"
        }

        fn matches(&self, category: &str) -> bool {
            crate::core::appender::pattern_matches(&self.pattern, category)
        }

        fn write(&mut self, rendered: &[u8]) -> Result<()> {
            self.writes.lock().push(rendered.to_vec());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn quiet_logger(threshold: Level, appender: CaptureAppender) -> Logger {
        let mut layout = TextLayout::new().with_colors(false);
        layout.set_timestamp_enabled(false);
        Logger::new(vec![
            LogOption::Threshold(threshold),
            LogOption::Formatter(Box::new(layout)),
            LogOption::Appenders(vec![Box::new(appender)]),
            LogOption::CallerDepth(3),
        ])
    }

    fn lines(writes: &Arc<Mutex<Vec<Vec<u8>>>>) -> Vec<String> {
        writes
            .lock()
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    #[test]
    fn test_defaults_fill_in() {
        let logger = Logger::new(Vec::new());
        assert_eq!(logger.level(), Level::Info);
        assert_eq!(logger.depth(), DEFAULT_CALLER_DEPTH);
        assert_eq!(logger.appenders.lock().len(), 1);
    }

    #[test]
    fn test_options_override_defaults() {
        let logger = Logger::new(vec![
            LogOption::Threshold(Level::DebugX2),
            LogOption::CallerDepth(7),
            LogOption::AmbientFlags(Flags::STD),
        ]);
        assert_eq!(logger.level(), Level::DebugX2);
        assert_eq!(logger.depth(), 7);
        assert_eq!(logger.flags(), Flags::STD);
    }

    #[test]
    fn test_suppressed_call_acquires_nothing() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Warn, appender);

        logger.logf(Level::Info, "invisible {}", &[&1]);
        assert_eq!(logger.metrics().entries_acquired(), 0);
        assert!(writes.lock().is_empty());
    }

    #[test]
    fn test_permitted_call_reaches_appender() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Warn, appender);

        logger.logln(Level::Error, &[&"boom"]);
        let lines = lines(&writes);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("boom"));
        assert!(lines[0].ends_with('\n'));
        assert_eq!(logger.metrics().entries_acquired(), 1);
    }

    #[test]
    fn test_print_bypasses_threshold() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Warn, appender);
        logger.set_level(Level::None);

        logger.logf(Level::Error, "filtered", &[]);
        logger.println(&[&"always"]);

        let lines = lines(&writes);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("always"));
    }

    #[test]
    fn test_printf_newline_only_when_supplied() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Info, appender);

        logger.printf("bare {}", &[&1]);
        logger.printf("terminated {}\n", &[&2]);

        let lines = lines(&writes);
        assert!(!lines[0].ends_with('\n'));
        assert!(lines[1].ends_with('\n'));
    }

    #[test]
    fn test_with_fields_renders_attached_pairs() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Info, appender);

        logger
            .with_fields([("user", "a"), ("user", "b")])
            .logln(Level::Info, &[&"login"]);

        let lines = lines(&writes);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("user=b"));
        assert!(!lines[0].contains("user=a"));
    }

    #[test]
    fn test_dropped_guard_emits_nothing() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Info, appender);

        {
            let _guard = logger.with_fields([("user", "a")]);
        }
        assert!(writes.lock().is_empty());

        // The pooled entry kept its fields; a plain call must not see them.
        logger.logln(Level::Info, &[&"clean"]);
        assert!(!lines(&writes)[0].contains("user=a"));
    }

    #[test]
    fn test_guard_respects_threshold() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Warn, appender);

        logger
            .with_fields([("k", "v")])
            .logln(Level::Debug, &[&"quiet"]);
        assert!(writes.lock().is_empty());
    }

    #[test]
    fn test_category_selects_appenders() {
        let (db_appender, db_writes) = CaptureAppender::pair("db");
        let (all_appender, all_writes) = CaptureAppender::pair("*");
        let mut layout = TextLayout::new().with_colors(false);
        layout.set_timestamp_enabled(false);
        let logger = Logger::new(vec![
            LogOption::Threshold(Level::Info),
            LogOption::Formatter(Box::new(layout)),
            LogOption::Appenders(vec![Box::new(db_appender), Box::new(all_appender)]),
        ]);

        logger
            .with_fields([("table", "users")])
            .category("db")
            .logln(Level::Info, &[&"query"]);
        logger.logln(Level::Info, &[&"uncategorized"]);

        assert_eq!(db_writes.lock().len(), 1);
        assert_eq!(all_writes.lock().len(), 2);
    }

    #[test]
    fn test_appender_failure_does_not_short_circuit() {
        struct FailingAppender;

        impl Appender for FailingAppender {
            fn name(&self) -> &str {
                "failing"
            }
            fn matches(&self, _category: &str) -> bool {
                true
            }
            fn write(&mut self, _rendered: &[u8]) -> Result<()> {
                Err(LoggerError::writer("simulated failure"))
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
        }

        let (capture, writes) = CaptureAppender::pair("*");
        let mut layout = TextLayout::new().with_colors(false);
        layout.set_timestamp_enabled(false);
        let logger = Logger::new(vec![
            LogOption::Threshold(Level::Info),
            LogOption::Formatter(Box::new(layout)),
            LogOption::Appenders(vec![Box::new(FailingAppender), Box::new(capture)]),
        ]);

        logger.logln(Level::Info, &[&"still delivered"]);

        assert_eq!(writes.lock().len(), 1);
        assert_eq!(logger.metrics().write_failures(), 1);
        assert_eq!(logger.metrics().lines_written(), 0);
    }

    #[test]
    fn test_entries_recycle_across_calls() {
        let (appender, _writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Info, appender);

        logger.logln(Level::Info, &[&"one"]);
        logger.logln(Level::Info, &[&"two"]);

        assert_eq!(logger.metrics().entries_created(), 1);
        assert_eq!(logger.metrics().entries_recycled(), 1);
    }

    #[test]
    fn test_show_options_bypasses_threshold() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Warn, appender);

        logger.show_options();

        let lines = lines(&writes);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("TextLayout"));
        assert!(lines[0].contains("ErrorColor:Red"));
    }

    #[test]
    fn test_modify_reconfigures_live_logger() {
        let (appender, writes) = CaptureAppender::pair("*");
        let logger = quiet_logger(Level::Info, appender);

        logger.modify(vec![LogOption::Threshold(Level::Error)]);
        logger.logln(Level::Info, &[&"now filtered"]);
        logger.logln(Level::Error, &[&"passes"]);

        let lines = lines(&writes);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("passes"));
    }
}
