//! A `log` backend writing to standard error.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

#[derive(Debug)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> StderrLogger {
        StderrLogger { level }
    }

    /// `-q` wins over any number of `-v`; with neither, warnings and errors
    /// are shown.
    pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::Error;
        }
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install as the global logger.  Only the first call has any effect.
    pub fn init(self) {
        let level = self.level;
        if log::set_boxed_logger(Box::new(self)).is_ok() {
            log::set_max_level(level);
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let stderr = std::io::stderr();
        let mut writer = stderr.lock();
        _ = writeln!(
            writer,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        _ = std::io::stderr().flush();
    }
}

#[test]
fn verbosity_levels() {
    assert_eq!(StderrLogger::level_for(0, false), LevelFilter::Warn);
    assert_eq!(StderrLogger::level_for(1, false), LevelFilter::Info);
    assert_eq!(StderrLogger::level_for(2, false), LevelFilter::Debug);
    assert_eq!(StderrLogger::level_for(7, false), LevelFilter::Trace);
    assert_eq!(StderrLogger::level_for(3, true), LevelFilter::Error);
}

#[test]
fn enabled_respects_level() {
    let logger = StderrLogger::new(LevelFilter::Info);
    let info = Metadata::builder().level(log::Level::Info).build();
    let debug = Metadata::builder().level(log::Level::Debug).build();
    assert!(logger.enabled(&info));
    assert!(!logger.enabled(&debug));
}
