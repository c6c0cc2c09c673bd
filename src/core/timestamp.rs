//! Timestamp formatting utilities
//!
//! Configurable timestamp formats for rendered lines. RFC 3339 (calendar
//! date, time, and offset) is the default.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with offset: `2025-01-08T10:30:45+00:00`
    #[default]
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123+00:00`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456+00:00`
    Iso8601Micros,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a datetime in any zone according to this format.
    #[must_use]
    pub fn format<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Iso8601Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
            }
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Get a description of this format
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            TimestampFormat::Rfc3339 => "RFC 3339 with offset (2025-01-08T10:30:45+00:00)",
            TimestampFormat::Iso8601 => "ISO 8601 with milliseconds",
            TimestampFormat::Iso8601Micros => "ISO 8601 with microseconds",
            TimestampFormat::Custom(_) => "Custom strftime format",
        }
    }
}
