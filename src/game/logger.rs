//! Per-game event logger
//!
//! Each game owns one logger. Messages are filtered by verbosity and either
//! printed, captured in memory, or both. Capture mode is what tests use to
//! assert that a rejected action was reported.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Log a formatted game event through one of the `GameLogger` level methods
///
/// Compiles to nothing without the `verbose-logging` feature, which removes
/// the `format!` allocation from hot loops in benchmarks.
macro_rules! game_event {
    ($logger:expr, $level:ident, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.$level(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

pub(crate) use game_event;

/// Verbosity level for game output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - turns and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - every action, including rejected ones
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log line
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g. "rejected", "turn")
    pub category: Option<&'static str>,
}

/// Read-only view over captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    /// Prefix printed before every stdout line (e.g. "[game 3]")
    prefix: Option<String>,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            prefix: None,
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = Some(prefix.into());
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    /// Capture to memory only
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Access captured entries without cloning them
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Print buffered logs allowed by the current verbosity, then clear them
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                self.write_stdout(entry);
            }
        }
        self.clear_logs();
    }

    fn write_stdout(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text => {
                let indent = if entry.level == VerbosityLevel::Minimal { "" } else { "  " };
                match &self.prefix {
                    Some(prefix) => println!("{prefix} {indent}{}", entry.message),
                    None => println!("{indent}{}", entry.message),
                }
            }
            OutputFormat::Json => {
                if let Ok(line) = serde_json::to_string(entry) {
                    println!("{line}");
                }
            }
        }
    }

    fn log(&self, level: VerbosityLevel, category: Option<&'static str>, message: &str) {
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
            && level <= self.verbosity;

        if !should_capture && !should_output {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category,
        };
        if should_output {
            self.write_stdout(&entry);
        }
        if should_capture {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, None, message);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, None, message);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, None, message);
    }

    /// Record an action the rules refused
    #[inline]
    pub fn rejected(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, Some("rejected"), message);
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

impl Clone for GameLogger {
    /// Clones the configuration; the capture buffer starts empty
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            prefix: self.prefix.clone(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();

        logger.normal("turn 2");
        logger.rejected("board full");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "turn 2");
        assert_eq!(logs[1].category, Some("rejected"));
        assert_eq!(logs[1].level, VerbosityLevel::Verbose);
    }

    #[test]
    fn test_uncaptured_messages_are_dropped() {
        let logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.normal("nobody hears this");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_flush_buffer() {
        let mut logger = GameLogger::new();
        logger.set_output_mode(OutputMode::Memory);
        logger.set_output_format(OutputFormat::Json);
        logger.normal("message 1");
        logger.verbose("message 2");
        assert_eq!(logger.logs().len(), 2);

        logger.flush_buffer();
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_clone_drops_buffer() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.minimal("winner");
        let copy = logger.clone();
        assert!(copy.is_capturing());
        assert!(copy.logs().is_empty());
    }
}
