//! Steps that run over the batch output once resizing is done.
//!
//! Each step receives every artifact the batch wrote and returns the
//! artifacts it created itself.

use log::info;
use std::fs;

use crate::config::Config;
use crate::error::Result;
use crate::logging::{log_file_error, log_fs_modification};
use crate::types::{Artifact, TargetSize};

/// File name prefix of marketing copies
pub const MARKETING_PREFIX: &str = "marketing_";

/// A step applied to the list of generated artifacts
pub trait PostProcessor {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Run the step, returning the artifacts it produced
    fn apply(&self, artifacts: &[Artifact]) -> Result<Vec<Artifact>>;
}

/// Copies the largest-size outputs under a `marketing_` prefix.
///
/// The copy is byte-for-byte; no overlay or branding is applied yet.
#[derive(Debug, Clone)]
pub struct MarketingCopier {
    size: TargetSize,
}

impl MarketingCopier {
    pub fn new(size: TargetSize) -> Self {
        Self { size }
    }

    /// Whether the artifact's file name encodes the copier's size
    pub fn selects(&self, artifact: &Artifact) -> bool {
        artifact
            .file_name()
            .contains(&format!("_{}_", self.size.tag()))
    }
}

impl Default for MarketingCopier {
    fn default() -> Self {
        Self::new(TargetSize::largest())
    }
}

impl PostProcessor for MarketingCopier {
    fn name(&self) -> &'static str {
        "marketing"
    }

    fn apply(&self, artifacts: &[Artifact]) -> Result<Vec<Artifact>> {
        info!("Generating marketing versions...");

        let mut copies = Vec::new();
        for artifact in artifacts.iter().filter(|a| self.selects(a)) {
            let marketing_name = format!("{}{}", MARKETING_PREFIX, artifact.file_name());
            let marketing_path = artifact.path.with_file_name(&marketing_name);

            match fs::copy(&artifact.path, &marketing_path) {
                Ok(_) => {
                    log_fs_modification(
                        "copy",
                        &marketing_path,
                        Some(&format!("from {}", artifact.path.display())),
                    );
                    copies.push(Artifact {
                        path: marketing_path,
                        ..artifact.clone()
                    });
                }
                Err(e) => log_file_error(&marketing_path, "copy", &e),
            }
        }

        Ok(copies)
    }
}

/// Placeholder for wrapping screenshots in a device frame
#[derive(Debug, Clone, Default)]
pub struct DeviceFramer;

impl PostProcessor for DeviceFramer {
    fn name(&self) -> &'static str {
        "device-frame"
    }

    fn apply(&self, _artifacts: &[Artifact]) -> Result<Vec<Artifact>> {
        info!("Device frames require additional setup.");
        info!("Consider using Fastlane frameit for professional device frames.");
        Ok(Vec::new())
    }
}

/// The post-processing steps enabled by `config`, in run order
pub fn pipeline(config: &Config) -> Vec<Box<dyn PostProcessor>> {
    let mut steps: Vec<Box<dyn PostProcessor>> = Vec::new();
    if config.device_frames {
        steps.push(Box::new(DeviceFramer));
    }
    if config.marketing_copies {
        steps.push(Box::new(MarketingCopier::default()));
    }
    steps
}
