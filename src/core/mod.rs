//! Core logger types and traits

pub mod appender;
pub mod caller;
pub mod entry_pool;
pub mod error;
pub mod facade;
pub mod flags;
pub mod layout;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod theme;
pub mod timestamp;

pub use appender::{pattern_matches, Appender};
pub use caller::{BacktraceResolver, CallerSite, ResolveCaller};
pub use entry_pool::EntryPool;
pub use error::{LoggerError, Result};
pub use flags::Flags;
pub use layout::{JsonLayout, Layout, RenderOptions, TextLayout};
pub use log_entry::{Field, FieldValue, LogEntry};
pub use log_level::Level;
pub use logger::{Args, EntryGuard, LogOption, Logger, DEFAULT_CALLER_DEPTH};
pub use metrics::LoggerMetrics;
pub use theme::ColorTheme;
pub use timestamp::TimestampFormat;
