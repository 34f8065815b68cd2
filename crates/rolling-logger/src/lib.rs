//! Rolling Logger
//!
//! A `log` backend that writes every record to the console and keeps the most
//! recent formatted lines in a circular buffer, so the UI can show or dump them
//! after something went wrong.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Console logger with a bounded history
pub struct RollingLogger {
    app_name: String,
    level: LevelFilter,
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl RollingLogger {
    pub fn new(app_name: &str, level: LevelFilter, capacity: usize) -> Self {
        Self {
            app_name: app_name.to_string(),
            level,
            capacity: capacity.max(1),
            lines: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Format one line: `HH:MM:SS.mmm LEVEL [app] target: message`
    pub fn format_line(&self, level: Level, target: &str, message: &str) -> String {
        format!(
            "{} {:<5} [{}] {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            level,
            self.app_name,
            target,
            message
        )
    }

    /// Push a line, evicting the oldest one when full
    pub fn push_line(&self, line: String) {
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().cloned().collect()
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_line(record.level(), record.target(), &record.args().to_string());
        write_console(record.level(), &line);
        self.push_line(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    match level {
        Level::Error => web_sys::console::error_1(&line.into()),
        Level::Warn => web_sys::console::warn_1(&line.into()),
        Level::Info => web_sys::console::info_1(&line.into()),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger. Calling it twice returns the `log` error.
pub fn init_logger(app_name: &str, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(app_name, level, DEFAULT_CAPACITY));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Buffered lines of the global logger (empty before `init_logger`)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|l| l.lines()).unwrap_or_default()
}

pub fn info(message: &str) {
    log::info!(target: "app", "{}", message);
}
