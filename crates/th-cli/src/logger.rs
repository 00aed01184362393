use clap::ValueEnum;
use log::LevelFilter;

/// Log verbosity accepted by `--log-level`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Install `env_logger`. `RUST_LOG` is read first and `level` overrides it.
pub fn init_logger(level: LogLevel) -> Result<(), String> {
    let level = LevelFilter::from(level);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", level.min(LevelFilter::Info));
    builder.filter_module("hyper", level.min(LevelFilter::Info));
    builder.format_timestamp(None);

    builder
        .try_init()
        .map_err(|e| format!("Failed to initialize logger: {}", e))
}
