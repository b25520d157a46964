//! Timestamped console logger for the `log` facade.
//!
//! Lines look like `[2024-01-01 12:00:00.000] -- [mos_6502::cpu] message`
//! and go to stderr so they never mix with the runner's report on stdout.

use chrono::{DateTime, Local};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct ConsoleLogger {
    level: LevelFilter,
}

/// Render one log line.
#[must_use]
pub fn format_line(time: &DateTime<Local>, target: &str, message: &str) -> String {
    format!(
        "[{}] -- [{target}] {message}",
        time.format("%Y-%m-%d %H:%M:%S%.3f")
    )
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = record.args().to_string();
            eprintln!("{}", format_line(&Local::now(), record.target(), &message));
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
