//! Console Logger
//!
//! `tracing` subscriber for the browser. Each formatted line goes to the
//! matching `console.*` method (stderr when not on wasm32) and into a
//! circular history buffer the UI can read back.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// trace | debug | info | warn | error
    pub level: String,
    /// Number of lines kept in the history buffer
    pub history: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), history: 200 }
    }
}

/// Bounded buffer of the most recent log lines (oldest dropped first)
#[derive(Debug, Clone)]
pub struct LogHistory {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        let mut lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Snapshot, oldest first
    pub fn lines(&self) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-event writer; the buffered line is emitted on flush or drop
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
    history: LogHistory,
}

impl ConsoleWriter {
    pub fn new(level: Level, history: LogHistory) -> Self {
        Self { level, buffer: Vec::new(), history }
    }

    fn emit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
        self.buffer.clear();
        write_console(self.level, &line);
        self.history.push(line);
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit();
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    if level == Level::ERROR {
        web_sys::console::error_1(&value);
    } else if level == Level::WARN {
        web_sys::console::warn_1(&value);
    } else if level == Level::INFO {
        web_sys::console::info_1(&value);
    } else {
        web_sys::console::debug_1(&value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// `MakeWriter` handing out level-aware console writers
#[derive(Debug, Clone)]
pub struct MakeConsoleWriter {
    history: LogHistory,
}

impl MakeConsoleWriter {
    pub fn new(history: LogHistory) -> Self {
        Self { history }
    }
}

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO, self.history.clone())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level(), self.history.clone())
    }
}

pub fn parse_level(level: &str) -> Result<Level, LoggerError> {
    level
        .parse::<Level>()
        .map_err(|_| LoggerError::UnknownLevel(level.to_string()))
}

/// Install the global subscriber and return its history handle
pub fn init(config: &LoggerConfig) -> Result<LogHistory, LoggerError> {
    let level = parse_level(&config.level)?;
    let history = LogHistory::new(config.history);

    tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter::new(history.clone()))
        .with_max_level(level)
        .without_time()
        .with_target(true)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInstalled)?;

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_history_drops_oldest() {
        let history = LogHistory::new(2);
        history.push("one".into());
        history.push("two".into());
        history.push("three".into());
        assert_eq!(history.lines(), vec!["two".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let history = LogHistory::new(0);
        history.push("a".into());
        history.push("b".into());
        assert_eq!(history.lines(), vec!["b".to_string()]);
    }

    #[test]
    fn test_writer_emits_on_drop() {
        let history = LogHistory::new(4);
        {
            let mut writer = ConsoleWriter::new(Level::WARN, history.clone());
            write!(writer, " WARN tree: load dropped\n").unwrap();
        }
        assert_eq!(history.lines(), vec![" WARN tree: load dropped".to_string()]);
    }

    #[test]
    fn test_empty_writer_emits_nothing() {
        let history = LogHistory::new(4);
        drop(ConsoleWriter::new(Level::INFO, history.clone()));
        assert!(history.is_empty());
    }

    #[test]
    fn test_flush_then_drop_emits_once() {
        let history = LogHistory::new(4);
        {
            let mut writer = ConsoleWriter::new(Level::INFO, history.clone());
            writer.write_all(b"hello").unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert!(matches!(parse_level("chatty"), Err(LoggerError::UnknownLevel(_))));
    }

    #[test]
    fn test_init_records_events() {
        let history = init(&LoggerConfig { level: "debug".into(), history: 16 }).unwrap();
        tracing::info!(card = "card-1", "card added");
        assert!(history.lines().iter().any(|line| line.contains("card added")));
        assert!(matches!(init(&LoggerConfig::default()), Err(LoggerError::AlreadyInstalled)));
    }
}
