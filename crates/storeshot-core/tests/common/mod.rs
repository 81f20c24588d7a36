#![allow(dead_code)]

use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use storeshot_core::{Config, ResizeMode};

/// Write a gradient PNG so resized outputs are not trivially uniform
pub fn create_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let file_path = dir.join(name);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    img.save(&file_path).unwrap();
    file_path
}

/// Write a file with a png name that cannot be decoded
pub fn create_corrupt_image(dir: &Path, name: &str) -> PathBuf {
    let file_path = dir.join(name);
    std::fs::write(&file_path, b"DUMMY IMAGE DATA").unwrap();
    file_path
}

/// Config writing into `output_dir` with no progress bar and no delays
pub fn test_config(output_dir: &Path, modes: &[ResizeMode]) -> Config {
    Config {
        output_dir: output_dir.to_path_buf(),
        modes: modes.to_vec(),
        capture_delay_secs: 0,
        show_progress: false,
        ..Default::default()
    }
}

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
