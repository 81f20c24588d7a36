use log::{info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::APPLE_SIZES;

/// Keep only the paths that exist, warning about the rest
pub fn existing_paths<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|p| p.as_ref())
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                warn!("Skipping missing file: {}", path.display());
            }
            exists
        })
        .map(Path::to_path_buf)
        .collect()
}

/// Whether a file name already carries one of the target-size tags
pub fn is_generated_name(name: &str) -> bool {
    APPLE_SIZES.iter().any(|size| name.contains(&size.tag()))
}

/// Returns if the given path has a png extension
pub fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Find source screenshots at the top level of `directory`.
///
/// Hidden files and previously generated outputs are skipped. Results are sorted by path.
pub fn discover_sources(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.exists() {
        return Err(Error::FileNotFound(directory.to_path_buf()));
    }

    info!("Looking for images in {}...", directory.display());

    let mut sources: Vec<PathBuf> = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .filter(|e| has_png_extension(e.path()))
        .filter(|e| !is_generated_name(&e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
        .collect();

    sources.sort();
    Ok(sources)
}

// -- Tests --
