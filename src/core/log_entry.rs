//! Log entry structure
//!
//! The pooled unit of work for one call. An entry is exclusively owned by
//! its caller between pool acquire and release; every field here is
//! per-call state that `reset` clears before reuse.

use super::log_level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type for structured fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON rendering
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// One key/value pair attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    /// Format template; empty means space-joined argument concatenation.
    pub format: String,
    /// Resolved source location, empty when resolution failed or is off.
    pub caller: String,
    /// Whether a trailing line terminator is appended.
    pub newline: bool,
    /// Pre-rendered argument values, in call order.
    pub args: Vec<String>,
    /// Structured fields; keys are unique, last write wins.
    pub fields: Vec<Field>,
    /// Appender match key; empty matches only the `"*"` rule.
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            level: Level::None,
            format: String::new(),
            caller: String::new(),
            newline: false,
            args: Vec::new(),
            fields: Vec::new(),
            category: String::new(),
            timestamp: Utc::now(),
        }
    }
}

impl LogEntry {
    /// Clear per-call state before reuse. Fields survive when
    /// `reuse_fields` is set; everything else always resets.
    pub fn reset(&mut self, reuse_fields: bool) {
        self.level = Level::None;
        self.format.clear();
        self.caller.clear();
        self.newline = false;
        self.args.clear();
        self.category.clear();
        if !reuse_fields {
            self.fields.clear();
        }
    }

    /// Fill in the state of one call and stamp the emission time.
    pub fn populate(
        &mut self,
        level: Level,
        format: &str,
        caller: String,
        newline: bool,
        args: Vec<String>,
    ) {
        self.level = level;
        self.format.clear();
        self.format.push_str(format);
        self.caller = caller;
        self.newline = newline;
        self.args = args;
        self.timestamp = Utc::now();
    }

    /// Attach a field; an existing key is overwritten in place.
    pub fn set_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.fields.iter_mut().find(|f| f.key == key) {
            existing.value = value;
        } else {
            self.fields.push(Field { key, value });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_call_state() {
        let mut entry = LogEntry::default();
        entry.populate(
            Level::Warn,
            "x {}",
            "somewhere".to_string(),
            true,
            vec!["1".to_string()],
        );
        entry.set_field("user", "a");
        entry.category = "db".to_string();

        entry.reset(false);
        assert_eq!(entry.level, Level::None);
        assert!(entry.format.is_empty());
        assert!(entry.caller.is_empty());
        assert!(!entry.newline);
        assert!(entry.args.is_empty());
        assert!(entry.fields.is_empty());
        assert!(entry.category.is_empty());
    }

    #[test]
    fn test_reset_can_preserve_fields() {
        let mut entry = LogEntry::default();
        entry.set_field("request_id", "abc-123");
        entry.reset(true);
        assert_eq!(entry.fields.len(), 1);
        entry.reset(false);
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_set_field_last_write_wins() {
        let mut entry = LogEntry::default();
        entry.set_field("user", "a");
        entry.set_field("attempt", 1);
        entry.set_field("user", "b");

        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.fields[0].key, "user");
        assert_eq!(entry.fields[0].value, FieldValue::String("b".to_string()));
        assert_eq!(entry.fields[1].key, "attempt");
    }

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::from(5_i32), FieldValue::Int(5));
        assert_eq!(FieldValue::from(true), FieldValue::Bool(true));
        assert_eq!(FieldValue::from(1.5), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from("x").to_string(), "x");
        assert_eq!(FieldValue::Null.to_json_value(), serde_json::Value::Null);
    }
}
