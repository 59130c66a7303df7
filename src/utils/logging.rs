use log::info;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::io;

/// Console and optional file logging setup for embedding applications.
#[derive(Debug)]
pub struct LogConfig {
    console_level: LevelFilter,
    file_level: LevelFilter,
    log_path: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Info,
            file_level: LevelFilter::Debug,
            log_path: None,
        }
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

impl LogConfig {
    pub fn new(console_level: &str, file_level: &str, log_path: Option<&str>) -> Self {
        Self {
            console_level: parse_level(console_level),
            file_level: parse_level(file_level),
            log_path: log_path.map(str::to_string),
        }
    }
}

pub fn init_logging_with_config(config: LogConfig) -> io::Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.console_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &config.log_path {
        loggers.push(WriteLogger::new(
            config.file_level,
            Config::default(),
            File::create(path)?,
        ));
    }

    CombinedLogger::init(loggers).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    info!(
        "Logging initialized with level console:{:?} file:{:?}",
        config.console_level, config.file_level
    );
    Ok(())
}

pub fn init_logging() -> io::Result<()> {
    init_logging_with_config(LogConfig::default())
}
