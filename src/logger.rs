use chrono::{DateTime, Local};
use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

static SKILLS_LOGGER: Lazy<SkillsLogger> = Lazy::new(SkillsLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::from_env())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    SKILLS_LOGGER.update_config(config.clone());

    if let Err(e) = log::set_logger(&*SKILLS_LOGGER) {
        return Err(format!("Failed to set logger: {:?}", e));
    }

    log::set_max_level(config.min_level.to_log_level_filter());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_log_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }

    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        self.to_log_level().to_level_filter()
    }

    pub fn from_log_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Logger settings. Records always go to stderr; stdout belongs to the tools.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_module: bool,
    pub include_timestamp: bool,
    pub timestamp_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Warn,
            show_colors: true,
            show_module: false,
            include_timestamp: true,
            timestamp_format: "%H:%M:%S%.3f".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config, with the level taken from `SKILLS_LOG_LEVEL` when it parses.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var("SKILLS_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse::<LogLevel>().ok())
        {
            Some(level) => config.with_level(level),
            None => config,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_module: true,
            ..Default::default()
        }
    }

    pub fn quiet() -> Self {
        Self {
            min_level: LogLevel::Error,
            show_colors: false,
            ..Default::default()
        }
    }
}

pub struct SkillsLogger {
    config: Mutex<LoggerConfig>,
}

impl SkillsLogger {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
        }
    }

    pub fn update_config(&self, new_config: LoggerConfig) {
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
    }

    fn format_line(
        &self,
        level: LogLevel,
        module: &str,
        message: &str,
        timestamp: DateTime<Local>,
        config: &LoggerConfig,
    ) -> String {
        let mut output = String::new();

        if config.include_timestamp {
            let ts = timestamp.format(&config.timestamp_format).to_string();
            if config.show_colors {
                output.push_str(&format!("{} ", ts.bright_black()));
            } else {
                output.push_str(&format!("{} ", ts));
            }
        }

        if config.show_colors {
            output.push_str(&format!(
                "[{}] ",
                level.as_str().color(level.color()).bold()
            ));
        } else {
            output.push_str(&format!("[{}] ", level.as_str()));
        }

        if config.show_module && !module.is_empty() {
            if config.show_colors {
                output.push_str(&format!("{}: ", module.bright_blue()));
            } else {
                output.push_str(&format!("{}: ", module));
            }
        }

        output.push_str(message);
        output
    }
}

impl Default for SkillsLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for SkillsLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match self.config.lock() {
            Ok(config) => metadata.level() <= config.min_level.to_log_level(),
            Err(_) => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(config) = self.config.lock() {
            let line = self.format_line(
                LogLevel::from_log_level(record.level()),
                record.module_path().unwrap_or(""),
                &record.args().to_string(),
                Local::now(),
                &config,
            );
            let _ = writeln!(io::stderr(), "{}", line);
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Measures a vendor call; logs the elapsed time at debug level on drop.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::debug!(
            "'{}' completed in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Debug.color(), Color::Blue);
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(
            LogLevel::Trace.to_log_level_filter(),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_logger_config() {
        let config = LoggerConfig::development();
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.show_module);

        let quiet = LoggerConfig::quiet();
        assert_eq!(quiet.min_level, LogLevel::Error);
        assert!(!quiet.show_colors);
    }

    #[test]
    fn test_format_line_plain() {
        let logger = SkillsLogger::new();
        let config = LoggerConfig::new().with_colors(false);
        let config = LoggerConfig {
            include_timestamp: false,
            show_module: true,
            ..config
        };
        let line = logger.format_line(
            LogLevel::Warn,
            "opc_skills::batch",
            "slot 3 failed",
            Local::now(),
            &config,
        );
        assert_eq!(line, "[WARN] opc_skills::batch: slot 3 failed");
    }

    #[test]
    fn test_logger_initialization() {
        assert!(init_with_config(LoggerConfig::quiet()).is_ok());
    }
}
