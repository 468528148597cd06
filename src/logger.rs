use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::config::{ConfigError, LoggingConfig};

/// Sets up `env_logger` from the `[logging]` section.
///
/// `RUST_LOG` still wins over the configured level when it is set.
pub fn init_logger(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level()?;

    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    builder.format_timestamp(None);

    if logging.log_enabled {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&logging.log_file)
            .map_err(|source| ConfigError::LogFileOpen {
                path: logging.log_file.display().to_string(),
                source,
            })?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // Only fails when a logger is already installed
    let _ = builder.try_init();
    Ok(())
}

/// Plain stderr logger for errors raised before the config could be read.
pub fn init_fallback_logger() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
}
