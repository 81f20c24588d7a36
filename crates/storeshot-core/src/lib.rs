//! Capture macOS screenshots and resize them for Mac App Store submission.
//!
//! This library provides the building blocks of a run:
//! - Screenshot capture through the system `screencapture` command
//! - Fit, fill and stretch resizing into the four App Store sizes
//! - Batch processing with per-output failure isolation
//! - Post-processing steps such as marketing copies

// -- External Dependencies --

use log::{info, warn};
use std::path::PathBuf;

// -- Public Re-exports --
pub use batch::{BatchFailure, BatchOutcome};
pub use config::*;
pub use error::{Error, Result};
pub use types::*;

// -- Public Modules --
pub mod batch;
pub mod capture;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod postprocess;
pub mod resize;
pub mod types;

/// Where the source images of a run come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelection {
    /// Capture this many new screenshots
    Capture { count: u32 },

    /// Process the given files
    Explicit(Vec<PathBuf>),

    /// Look for earlier screenshots in the output directory
    Discover,
}

impl InputSelection {
    /// Pick the selection from command-line style options.
    ///
    /// A non-zero capture count wins over explicit paths, which win over
    /// discovery.
    pub fn from_options(capture: Option<u32>, process: Vec<PathBuf>) -> Self {
        match capture {
            Some(count) if count > 0 => {
                if !process.is_empty() {
                    warn!("Ignoring {} explicit paths while capturing", process.len());
                }
                Self::Capture { count }
            }
            _ if !process.is_empty() => Self::Explicit(process),
            _ => Self::Discover,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Directory the outputs were written to
    pub output_dir: PathBuf,

    /// Resized outputs
    pub artifacts: Vec<Artifact>,

    /// Outputs created by post-processing steps
    pub marketing: Vec<Artifact>,

    /// Combinations that failed and were skipped
    pub failures: Vec<BatchFailure>,
}

/// Main entry point for a capture-and-resize run
pub struct ScreenshotGenerator {
    config: Config,
}

impl ScreenshotGenerator {
    /// Validate `config` and create the output directory if needed
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        std::fs::create_dir_all(&config.output_dir)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Turn a selection into the list of source images.
    ///
    /// Explicit and discovery selections fail with `Error::NoInputs` when
    /// nothing usable is found.
    pub fn resolve_inputs(&self, selection: &InputSelection) -> Result<Vec<PathBuf>> {
        match selection {
            InputSelection::Capture { count } => Ok(capture::capture_series(*count, &self.config)),
            InputSelection::Explicit(paths) => {
                let existing = discovery::existing_paths(paths.as_slice());
                if existing.is_empty() {
                    return Err(Error::NoInputs(
                        "No valid image files provided".to_string(),
                    ));
                }
                Ok(existing)
            }
            InputSelection::Discover => {
                let found = discovery::discover_sources(&self.config.output_dir)?;
                if found.is_empty() {
                    return Err(Error::NoInputs(format!(
                        "No screenshots found in {}. Use --capture or --process options.",
                        self.config.output_dir.display()
                    )));
                }
                Ok(found)
            }
        }
    }

    /// Resize every input into all sizes and configured modes
    pub fn process(&self, inputs: &[PathBuf]) -> BatchOutcome {
        batch::process_all(inputs, &self.config)
    }

    /// Run the configured post-processing steps over `artifacts`
    pub fn post_process(&self, artifacts: &[Artifact]) -> Vec<Artifact> {
        let mut produced = Vec::new();
        for step in postprocess::pipeline(&self.config) {
            match step.apply(artifacts) {
                Ok(created) => produced.extend(created),
                Err(e) => warn!("Post-processing step '{}' failed: {}", step.name(), e),
            }
        }
        produced
    }

    /// Run the full pipeline
    pub fn run(&self, selection: &InputSelection) -> Result<RunSummary> {
        let inputs = self.resolve_inputs(selection)?;
        info!("Processing {} source images", inputs.len());

        let outcome = self.process(&inputs);
        let marketing = self.post_process(&outcome.artifacts);

        Ok(RunSummary {
            output_dir: self.config.output_dir.clone(),
            artifacts: outcome.artifacts,
            marketing,
            failures: outcome.failures,
        })
    }
}
