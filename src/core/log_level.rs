//! Severity level definitions
//!
//! Levels are ordered by verbosity: a threshold permits every level whose
//! numeric value is at or below its own. `None` sits at the bottom so that
//! print-style calls pass every threshold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Level {
    /// Unconditional output; never filtered.
    #[default]
    None = 0,
    /// Emitted, then the process terminates with a non-zero status.
    Fatal = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
    /// Extra-verbose debug, one notch past `Debug`.
    DebugX2 = 6,
}

impl Level {
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::None => "NONE",
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::DebugX2 => "DEBUGX2",
        }
    }

    /// Treating `self` as the active threshold, does it allow a call at
    /// `level` to be emitted?
    #[inline]
    pub fn permits(&self, level: Level) -> bool {
        level <= *self
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(Level::None),
            "FATAL" => Ok(Level::Fatal),
            "ERROR" => Ok(Level::Error),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "DEBUGX2" => Ok(Level::DebugX2),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
