//! Appender trait for rendered-line destinations
//!
//! An appender receives fully rendered bytes; it never sees the entry.
//! Each appender carries a category-match rule deciding which writes it
//! participates in.

use super::error::Result;

pub trait Appender: Send + Sync {
    fn name(&self) -> &str;
    /// Does this appender accept a write for `category`?
    fn matches(&self, category: &str) -> bool;
    fn write(&mut self, rendered: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// The standard match rule: `"*"` accepts every category, anything else is
/// an exact match.
pub fn pattern_matches(pattern: &str, category: &str) -> bool {
    pattern == "*" || pattern == category
}
