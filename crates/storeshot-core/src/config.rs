use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{BackgroundColor, ResizeMode};

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

/// Configuration for a capture-and-resize run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where screenshots are captured, discovered and written
    pub output_dir: PathBuf,

    /// Resize modes to generate for every target size
    pub modes: Vec<ResizeMode>,

    /// Padding colour for fit mode
    pub background: BackgroundColor,

    /// Whether fit mode may enlarge sources smaller than the target
    pub allow_upscale: bool,

    /// Countdown before each capture, in seconds
    pub capture_delay_secs: u64,

    /// Capture a single window chosen interactively instead of the whole screen
    pub window_only: bool,

    /// Screenshot command to invoke
    pub capture_command: String,

    /// Copy the largest outputs under a `marketing_` prefix
    pub marketing_copies: bool,

    /// Run the device frame step
    pub device_frames: bool,

    /// Draw a progress bar while resizing
    pub show_progress: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Optional log file in addition to the console
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("macos_screenshots"),
            modes: vec![ResizeMode::Fit, ResizeMode::Fill],
            background: BackgroundColor::WHITE,
            allow_upscale: true,
            capture_delay_secs: 3,
            window_only: false,
            capture_command: "screencapture".to_string(),
            marketing_copies: true,
            device_frames: false,
            show_progress: true,
            log_level: LogLevel::Info,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.modes.is_empty() {
            return Err(Error::Configuration(
                "At least one resize mode is required".to_string(),
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Configuration(
                "Output directory must not be empty".to_string(),
            ));
        }

        if self.capture_command.trim().is_empty() {
            return Err(Error::Configuration(
                "Capture command must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Requested modes with duplicates removed, in first-seen order
    pub fn unique_modes(&self) -> Vec<ResizeMode> {
        let mut modes = Vec::with_capacity(self.modes.len());
        for mode in &self.modes {
            if !modes.contains(mode) {
                modes.push(*mode);
            }
        }
        modes
    }
}
