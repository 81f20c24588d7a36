use log::{error, info, LevelFilter};
use std::path::Path;

use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::error::{Error, Result};

/// Environment variable overriding the configured log level
pub const LOG_ENV_VAR: &str = "STORESHOT_LOG";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] [{M}:{L}] - {m}{n}";

/// Initialize the logger with timestamp, log level, and module path.
/// Records go to stderr, and also to `log_file` when one is given.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let level = effective_level(level, std::env::var(LOG_ENV_VAR).ok().as_deref());

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut builder =
        Config::builder().appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(path)
            .map_err(|e| Error::Configuration(format!("Failed to create log appender: {}", e)))?;

        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = builder
        .build(root.build(level))
        .map_err(|e| Error::Configuration(format!("Failed to build log config: {}", e)))?;

    log4rs::init_config(config)
        .map_err(|e| Error::Configuration(format!("Failed to initialize log4rs: {}", e)))?;

    if let Some(path) = log_file {
        info!("Logging to file: {}", path.display());
    }
    Ok(())
}

/// Level to use given the configured one and an optional override value
fn effective_level(configured: LevelFilter, env_value: Option<&str>) -> LevelFilter {
    env_value
        .and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(configured)
}

/// Log file operation that failed
pub fn log_file_error(path: &Path, operation: &str, error: &dyn std::error::Error) {
    error!(
        "File operation failed - Operation: {}, Path: {}, Error: {}",
        operation,
        path.display(),
        error
    );
}

/// Log file system modification
pub fn log_fs_modification(operation: &str, path: &Path, details: Option<&str>) {
    let details_str = details.unwrap_or("");
    info!(
        "FS CHANGE - Operation: {}, Path: {}{}",
        operation,
        path.display(),
        if details_str.is_empty() {
            "".to_string()
        } else {
            format!(", Details: {}", details_str)
        }
    );
}
