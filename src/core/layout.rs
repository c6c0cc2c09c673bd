//! Layout rendering
//!
//! A layout turns one entry into the bytes handed to appenders. Rendering
//! never fails: missing arguments leave their placeholder literal, surplus
//! arguments are appended, and serialization problems degrade to an empty
//! object rather than an error.

use super::flags::Flags;
use super::log_entry::LogEntry;
use super::log_level::Level;
use super::theme::ColorTheme;
use super::timestamp::TimestampFormat;
use chrono::Local;
use colored::Colorize;

/// Ambient state a layout needs beyond the entry itself.
pub struct RenderOptions<'a> {
    pub flags: Flags,
    pub theme: &'a ColorTheme,
}

pub trait Layout: Send + Sync {
    fn render(&self, entry: &LogEntry, opts: RenderOptions<'_>) -> Vec<u8>;
    /// Human-readable summary of current settings, for the diagnostic
    /// self-report.
    fn description(&self) -> String;
    fn set_timestamp_enabled(&mut self, enabled: bool);
    fn timestamp_enabled(&self) -> bool;
}

/// Compose the message body: interpolate `{}` placeholders when a format
/// template is present, otherwise join the arguments with single spaces.
/// Surplus arguments are appended space-separated; missing ones leave the
/// placeholder in place.
pub(crate) fn compose_message(format: &str, args: &[String]) -> String {
    if format.is_empty() {
        return args.join(" ");
    }

    let mut out = String::with_capacity(format.len() + 16);
    let mut supplied = args.iter();
    let mut rest = format;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match supplied.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);

    let extra: Vec<&str> = supplied.map(|s| s.as_str()).collect();
    if !extra.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&extra.join(" "));
    }
    out
}

/// Escape line breaks and tabs so one call always renders as one line.
fn sanitize(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Default layout: colorized single-line text.
pub struct TextLayout {
    use_colors: bool,
    timestamp: bool,
    timestamp_format: TimestampFormat,
}

impl TextLayout {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible string
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    /// Timestamp text for one entry. Date/time flags override the layout's
    /// own format; the UTC flag picks the zone either way.
    fn timestamp_string(&self, entry: &LogEntry, flags: Flags) -> String {
        let flag_driven = flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS);
        if flag_driven {
            let mut fmt = String::new();
            if flags.contains(Flags::DATE) {
                fmt.push_str("%Y/%m/%d");
            }
            if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
                if !fmt.is_empty() {
                    fmt.push(' ');
                }
                fmt.push_str("%H:%M:%S");
                if flags.contains(Flags::MICROSECONDS) {
                    fmt.push_str("%.6f");
                }
            }
            let custom = TimestampFormat::Custom(fmt);
            if flags.contains(Flags::UTC) {
                custom.format(&entry.timestamp)
            } else {
                custom.format(&entry.timestamp.with_timezone(&Local))
            }
        } else if flags.contains(Flags::UTC) {
            self.timestamp_format.format(&entry.timestamp)
        } else {
            self.timestamp_format
                .format(&entry.timestamp.with_timezone(&Local))
        }
    }
}

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for TextLayout {
    fn render(&self, entry: &LogEntry, opts: RenderOptions<'_>) -> Vec<u8> {
        let mut parts: Vec<String> = Vec::with_capacity(5);

        if self.timestamp {
            parts.push(self.timestamp_string(entry, opts.flags));
        }

        if entry.level != Level::None {
            let tag = format!("[{:7}]", entry.level.to_str());
            if self.use_colors {
                parts.push(tag.color(opts.theme.color_for(entry.level)).to_string());
            } else {
                parts.push(tag);
            }
        }

        if !entry.caller.is_empty() {
            parts.push(entry.caller.clone());
        }

        let message = sanitize(&compose_message(&entry.format, &entry.args));
        if !message.is_empty() {
            if self.use_colors {
                parts.push(message.color(opts.theme.color_for(entry.level)).to_string());
            } else {
                parts.push(message);
            }
        }

        for field in &entry.fields {
            parts.push(format!("{}={}", field.key, field.value));
        }

        let mut line = parts.join(" ");
        if entry.newline {
            line.push('\n');
        }
        line.into_bytes()
    }

    fn description(&self) -> String {
        format!(
            "TextLayout colors:{} timestamp:{} format:{}",
            self.use_colors,
            self.timestamp,
            self.timestamp_format.description()
        )
    }

    fn set_timestamp_enabled(&mut self, enabled: bool) {
        self.timestamp = enabled;
    }

    fn timestamp_enabled(&self) -> bool {
        self.timestamp
    }
}

/// One JSON object per line; colors do not apply.
pub struct JsonLayout {
    timestamp: bool,
    timestamp_format: TimestampFormat,
}

impl JsonLayout {
    pub fn new() -> Self {
        Self {
            timestamp: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Default for JsonLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for JsonLayout {
    fn render(&self, entry: &LogEntry, opts: RenderOptions<'_>) -> Vec<u8> {
        let mut obj = serde_json::Map::new();

        if self.timestamp {
            let ts = if opts.flags.contains(Flags::UTC) {
                self.timestamp_format.format(&entry.timestamp)
            } else {
                self.timestamp_format
                    .format(&entry.timestamp.with_timezone(&Local))
            };
            obj.insert("timestamp".to_string(), serde_json::Value::String(ts));
        }

        if entry.level != Level::None {
            obj.insert(
                "level".to_string(),
                serde_json::Value::String(entry.level.to_str().to_string()),
            );
        }

        if !entry.caller.is_empty() {
            obj.insert(
                "caller".to_string(),
                serde_json::Value::String(entry.caller.clone()),
            );
        }

        obj.insert(
            "message".to_string(),
            serde_json::Value::String(compose_message(&entry.format, &entry.args)),
        );

        for field in &entry.fields {
            obj.insert(field.key.clone(), field.value.to_json_value());
        }

        let mut line =
            serde_json::to_string(&serde_json::Value::Object(obj)).unwrap_or_default();
        if entry.newline {
            line.push('\n');
        }
        line.into_bytes()
    }

    fn description(&self) -> String {
        format!(
            "JsonLayout timestamp:{} format:{}",
            self.timestamp,
            self.timestamp_format.description()
        )
    }

    fn set_timestamp_enabled(&mut self, enabled: bool) {
        self.timestamp = enabled;
    }

    fn timestamp_enabled(&self) -> bool {
        self.timestamp
    }
}
