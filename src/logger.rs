//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! in a bounded in-memory buffer for display in the log pane. The terminal
//! belongs to the interface, so nothing is written to stdout or stderr.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum number of lines kept by default.
pub const DEFAULT_CAPACITY: usize = 500;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Shared ring of formatted log lines.
///
/// Cloning yields another handle to the same lines.
#[derive(Clone, Debug)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        LogBuffer::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LogBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        LogBuffer {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Append a line, evicting the oldest when full.
    ///
    pub fn push(&self, line: String) {
        // A poisoned buffer only loses log lines
        if let Ok(mut lines) = self.lines.lock() {
            while lines.len() >= self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Return up to `count` of the most recent lines, oldest first.
    ///
    pub fn recent(&self, count: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => {
                let skip = lines.len().saturating_sub(count);
                lines.iter().skip(skip).cloned().collect()
            }
            Err(_) => vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Custom logger that captures logs to a buffer
///
pub struct CustomLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl CustomLogger {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        CustomLogger { buffer, level }
    }

    /// Install the logger globally and return the buffer it writes to.
    ///
    pub fn init(level: LevelFilter) -> Result<LogBuffer, AppError> {
        let buffer = LogBuffer::default();
        let logger = CustomLogger::new(buffer.clone(), level);
        log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(buffer)
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(logger: &CustomLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_logger_respects_level() {
        let buffer = LogBuffer::default();
        let logger = CustomLogger::new(buffer.clone(), LevelFilter::Info);

        record_at(&logger, Level::Debug, "hidden");
        record_at(&logger, Level::Warn, "shown");

        let lines = buffer.recent(10);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("WARN shown"));
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::with_capacity(3);
        for i in 0..5 {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.recent(10), vec!["line 2", "line 3", "line 4"]);
        assert_eq!(buffer.recent(1), vec!["line 4"]);
    }

    #[test]
    fn test_clones_share_lines() {
        let buffer = LogBuffer::default();
        let other = buffer.clone();
        assert!(other.is_empty());
        buffer.push("hello".to_string());
        assert_eq!(other.recent(1), vec!["hello"]);
    }
}
