//! Console appender implementation

use crate::core::{pattern_matches, Appender, Result};
use parking_lot::Mutex;
use std::io::Write;

enum Target {
    Stdout,
    Stderr,
    Writer(Mutex<Box<dyn Write + Send>>),
}

pub struct ConsoleAppender {
    pattern: String,
    target: Target,
}

impl ConsoleAppender {
    /// Standard-output appender matching every category.
    pub fn new() -> Self {
        Self::with_pattern("*")
    }

    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: Target::Stdout,
        }
    }

    pub fn stderr(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: Target::Stderr,
        }
    }

    /// Send output to an arbitrary writer instead of the process streams.
    pub fn with_writer(writer: Box<dyn Write + Send>, pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: Target::Writer(Mutex::new(writer)),
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn name(&self) -> &str {
        "console"
    }

    fn matches(&self, category: &str) -> bool {
        pattern_matches(&self.pattern, category)
    }

    fn write(&mut self, rendered: &[u8]) -> Result<()> {
        match &mut self.target {
            Target::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(rendered)?;
            }
            Target::Stderr => {
                let mut out = std::io::stderr().lock();
                out.write_all(rendered)?;
            }
            Target::Writer(writer) => {
                writer.lock().write_all(rendered)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match &mut self.target {
            Target::Stdout => std::io::stdout().flush()?,
            Target::Stderr => std::io::stderr().flush()?,
            Target::Writer(writer) => writer.lock().flush()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_target_receives_bytes() {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let mut appender =
            ConsoleAppender::with_writer(Box::new(SharedBuf(Arc::clone(&buf))), "*");
        appender.write(b"one line\n").expect("write");
        appender.flush().expect("flush");
        assert_eq!(buf.lock().as_slice(), b"one line\n");
    }

    #[test]
    fn test_match_rule() {
        let appender = ConsoleAppender::with_pattern("db");
        assert!(appender.matches("db"));
        assert!(!appender.matches("net"));

        let all = ConsoleAppender::new();
        assert!(all.matches(""));
        assert!(all.matches("anything"));
    }
}
