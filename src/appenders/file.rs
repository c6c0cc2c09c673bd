//! File appender implementation

use crate::core::{pattern_matches, Appender, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct FileAppender {
    pattern: String,
    writer: Option<BufWriter<File>>,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_pattern(path, "*")
    }

    pub fn with_pattern(path: impl Into<PathBuf>, pattern: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            pattern: pattern.into(),
            writer: Some(BufWriter::new(file)),
        })
    }
}

impl Appender for FileAppender {
    fn name(&self) -> &str {
        "file"
    }

    fn matches(&self, category: &str) -> bool {
        pattern_matches(&self.pattern, category)
    }

    fn write(&mut self, rendered: &[u8]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writer.write_all(rendered)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data reaches disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_appends_lines() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("app.log");

        let mut appender = FileAppender::new(&path).expect("create appender");
        appender.write(b"first\n").expect("write");
        appender.write(b"second\n").expect("write");
        appender.flush().expect("flush");

        let content = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_open_failure_is_reported() {
        let err = FileAppender::new("/nonexistent-dir/deeper/app.log");
        assert!(err.is_err());
    }

    #[test]
    fn test_category_pattern() {
        let dir = TempDir::new().expect("temp dir");
        let appender =
            FileAppender::with_pattern(dir.path().join("db.log"), "db").expect("create");
        assert!(appender.matches("db"));
        assert!(!appender.matches("net"));
    }
}
