// Tue Jan 13 2026 - Alex

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct LoggingUtils;

impl LoggingUtils {
    /// Colored stderr logger; `RUST_LOG` hands control to env_logger instead.
    pub fn init(level: LevelFilter) {
        if std::env::var_os("RUST_LOG").is_some() {
            let _ = env_logger::Builder::from_default_env()
                .format_timestamp(None)
                .try_init();
            return;
        }
        if log::set_boxed_logger(Box::new(ColoredLogger { level })).is_ok() {
            log::set_max_level(level);
        }
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    /// `-v` count to level, starting from the configured one.
    pub fn level_from_verbosity(base: LevelFilter, verbosity: u8) -> LevelFilter {
        let levels = [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ];
        let start = levels.iter().position(|l| *l == base).unwrap_or(3);
        levels[(start + verbosity as usize).min(levels.len() - 1)]
    }
}

struct ColoredLogger {
    level: LevelFilter,
}

impl ColoredLogger {
    fn format_level(level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }
}

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let target = format!("[{}]", record.target());
            eprintln!("{} {} {}", Self::format_level(record.level()), target.dimmed(), record.args());
        }
    }

    fn flush(&self) {}
}

pub struct ScopedTimer {
    name: String,
    start: std::time::Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::debug!("[TIMER] {} took {:.2}ms", self.name, elapsed.as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("WARNING"), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_str("bogus"), LevelFilter::Info);
    }

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(LoggingUtils::level_from_verbosity(LevelFilter::Info, 0), LevelFilter::Info);
        assert_eq!(LoggingUtils::level_from_verbosity(LevelFilter::Info, 1), LevelFilter::Debug);
        assert_eq!(LoggingUtils::level_from_verbosity(LevelFilter::Warn, 9), LevelFilter::Trace);
    }
}
