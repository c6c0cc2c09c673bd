//! Per-severity color palette
//!
//! Colors live on a theme object injected at construction rather than as
//! loose per-severity settings, so an entire palette can be swapped in one
//! option.

use super::log_level::Level;
use colored::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTheme {
    pub default_color: Color,
    pub error: Color,
    pub warn: Color,
    pub info: Color,
    pub debug: Color,
    pub debugx2: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            default_color: Color::White,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Blue,
            debug: Color::White,
            debugx2: Color::White,
        }
    }
}

impl ColorTheme {
    /// Color for a given severity. `Fatal` shares the error color;
    /// unconditional output uses the default.
    pub fn color_for(&self, level: Level) -> Color {
        match level {
            Level::None => self.default_color,
            Level::Fatal | Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::DebugX2 => self.debugx2,
        }
    }

    /// One-line palette summary for the diagnostic self-report.
    pub fn describe(&self) -> String {
        format!(
            "DefaultColor:{:?} ErrorColor:{:?} WarnColor:{:?} InfoColor:{:?} DebugColor:{:?} DebugX2Color:{:?}",
            self.default_color, self.error, self.warn, self.info, self.debug, self.debugx2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let theme = ColorTheme::default();
        assert_eq!(theme.color_for(Level::Error), Color::Red);
        assert_eq!(theme.color_for(Level::Fatal), Color::Red);
        assert_eq!(theme.color_for(Level::Warn), Color::Yellow);
        assert_eq!(theme.color_for(Level::Info), Color::Blue);
        assert_eq!(theme.color_for(Level::Debug), Color::White);
        assert_eq!(theme.color_for(Level::None), Color::White);
    }

    #[test]
    fn test_describe_names_all_severities() {
        let summary = ColorTheme::default().describe();
        for part in [
            "DefaultColor:",
            "ErrorColor:Red",
            "WarnColor:Yellow",
            "InfoColor:Blue",
            "DebugColor:",
            "DebugX2Color:",
        ] {
            assert!(summary.contains(part), "missing {} in {}", part, summary);
        }
    }
}
