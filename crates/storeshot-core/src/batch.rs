use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{ColorType, DynamicImage, GenericImageView, ImageEncoder};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::logging::{log_file_error, log_fs_modification};
use crate::resize::{resize, ResizeOptions};
use crate::types::{
    output_file_name, source_base_name, Artifact, ResizeMode, TargetSize, APPLE_SIZES,
};

/// One (size, mode) combination that could not be produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Output file name that was not written
    pub output_name: String,

    /// Source image the output would have come from
    pub source: PathBuf,

    /// Error description
    pub error: String,
}

/// Result of resizing a set of sources
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Outputs that were written
    pub artifacts: Vec<Artifact>,

    /// Outputs that were skipped after an error
    pub failures: Vec<BatchFailure>,
}

/// Resize every input into every App Store size for each requested mode.
///
/// Failures are isolated per combination: they are logged, recorded in
/// the outcome, and the batch moves on.
pub fn process_all<P: AsRef<Path>>(inputs: &[P], config: &Config) -> BatchOutcome {
    let modes = config.unique_modes();
    let options = ResizeOptions::from(config);

    let total = inputs.len() * APPLE_SIZES.len() * modes.len();
    let progress = progress_bar(total as u64, config.show_progress);

    let mut outcome = BatchOutcome::default();
    for input in inputs {
        process_screenshot(
            input.as_ref(),
            &modes,
            &options,
            &config.output_dir,
            &progress,
            &mut outcome,
        );
    }

    progress.finish_with_message(format!(
        "Created {} images ({} failed)",
        outcome.artifacts.len(),
        outcome.failures.len()
    ));
    outcome
}

/// Resize a single source into all sizes and modes
fn process_screenshot(
    input: &Path,
    modes: &[ResizeMode],
    options: &ResizeOptions,
    output_dir: &Path,
    progress: &ProgressBar,
    outcome: &mut BatchOutcome,
) {
    let base_name = source_base_name(input);
    info!("Processing: {}", input.display());

    let source = match image::open(input) {
        Ok(img) => img,
        Err(e) => {
            log_file_error(input, "decode", &e);
            for size in APPLE_SIZES {
                for mode in modes {
                    outcome.failures.push(BatchFailure {
                        output_name: output_file_name(&base_name, size, *mode),
                        source: input.to_path_buf(),
                        error: e.to_string(),
                    });
                }
            }
            progress.inc((APPLE_SIZES.len() * modes.len()) as u64);
            return;
        }
    };

    let (width, height) = source.dimensions();
    info!("Original dimensions: {}x{}", width, height);

    for size in APPLE_SIZES {
        for mode in modes {
            let output_name = output_file_name(&base_name, size, *mode);
            let output_path = output_dir.join(&output_name);
            progress.set_message(output_name.clone());

            match render(&source, size, *mode, options, &output_path) {
                Ok(()) => {
                    log_fs_modification("write", &output_path, Some(&format!("{} {}", size, mode)));
                    outcome.artifacts.push(Artifact {
                        path: output_path,
                        source: input.to_path_buf(),
                        size,
                        mode: *mode,
                    });
                }
                Err(e) => {
                    log_file_error(&output_path, "resize", &e);
                    outcome.failures.push(BatchFailure {
                        output_name,
                        source: input.to_path_buf(),
                        error: e.to_string(),
                    });
                }
            }
            progress.inc(1);
        }
    }
}

fn render(
    source: &DynamicImage,
    size: TargetSize,
    mode: ResizeMode,
    options: &ResizeOptions,
    output_path: &Path,
) -> Result<()> {
    let resized = resize(source, size, mode, options)?;
    write_png(&resized, output_path)
}

/// Encode `image` as a maximally compressed PNG at `path`
pub fn write_png(image: &DynamicImage, path: &Path) -> Result<()> {
    let image = png_compatible(image);
    let (width, height) = image.dimensions();

    let mut writer = BufWriter::new(File::create(path)?);
    let encoder =
        PngEncoder::new_with_quality(&mut writer, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_bytes(), width, height, image.color())?;
    writer.flush()?;

    Ok(())
}

/// PNG has no float formats; those are narrowed to 8-bit RGBA
fn png_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::L8
        | ColorType::La8
        | ColorType::Rgb8
        | ColorType::Rgba8
        | ColorType::L16
        | ColorType::La16
        | ColorType::Rgb16
        | ColorType::Rgba16 => Cow::Borrowed(image),
        _ => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
    }
}

fn progress_bar(total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress_bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
    {
        progress_bar.set_style(style.progress_chars("##-"));
    }
    progress_bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb32FImage, RgbImage};
    use tempfile::tempdir;

    fn quiet_config(output_dir: &Path, modes: Vec<ResizeMode>) -> Config {
        Config {
            output_dir: output_dir.to_path_buf(),
            modes,
            show_progress: false,
            ..Default::default()
        }
    }

    fn write_source(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_write_png_roundtrip_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = DynamicImage::ImageRgb8(RgbImage::new(12, 7));

        write_png(&img, &path).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (12, 7));
    }

    #[test]
    fn test_write_png_float_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("float.png");
        let img = DynamicImage::ImageRgb32F(Rgb32FImage::new(5, 5));

        write_png(&img, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgba8);
    }

    #[test]
    fn test_write_png_missing_directory() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        let result = write_png(&img, Path::new("/nonexistent/dir/out.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_corrupt_source_is_isolated() {
        let dir = tempdir().unwrap();
        let good = write_source(dir.path(), "good.png", 160, 100);
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"NOT AN IMAGE").unwrap();

        let config = quiet_config(dir.path(), vec![ResizeMode::Stretch]);
        let outcome = process_all(&[bad.clone(), good.clone()], &config);

        assert_eq!(outcome.artifacts.len(), APPLE_SIZES.len());
        assert!(outcome.artifacts.iter().all(|a| a.source == good));
        assert_eq!(outcome.failures.len(), APPLE_SIZES.len());
        assert!(outcome.failures.iter().all(|f| f.source == bad));
        assert!(outcome
            .failures
            .iter()
            .any(|f| f.output_name == "bad_2880x1800_stretch.png"));
    }

    #[test]
    fn test_missing_source_is_isolated() {
        let dir = tempdir().unwrap();
        let config = quiet_config(dir.path(), vec![ResizeMode::Fit, ResizeMode::Fill]);

        let outcome = process_all(&[dir.path().join("screenshot_01.png")], &config);

        assert!(outcome.artifacts.is_empty());
        assert_eq!(outcome.failures.len(), APPLE_SIZES.len() * 2);
    }

    #[test]
    fn test_extreme_aspect_ratio_fill_completes_batch() {
        let dir = tempdir().unwrap();
        let tall = write_source(dir.path(), "tall.png", 1, 20000);
        let good = write_source(dir.path(), "good.png", 160, 100);

        let config = quiet_config(dir.path(), vec![ResizeMode::Fill]);
        let outcome = process_all(&[tall.clone(), good.clone()], &config);

        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.artifacts.len(), APPLE_SIZES.len() * 2);
        assert!(outcome.artifacts.iter().any(|a| a.source == good));
        let tall_largest = dir.path().join("tall_2880x1800_fill.png");
        assert_eq!(image::image_dimensions(&tall_largest).unwrap(), (2880, 1800));
    }

    #[test]
    fn test_duplicate_modes_processed_once() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "home.png", 64, 40);
        let config = quiet_config(
            dir.path(),
            vec![ResizeMode::Stretch, ResizeMode::Stretch],
        );

        let outcome = process_all(&[source], &config);

        assert_eq!(outcome.artifacts.len(), APPLE_SIZES.len());
        let first = &outcome.artifacts[0];
        assert_eq!(first.size, TargetSize::new(1280, 800));
        assert_eq!(first.file_name(), "home_1280x800_stretch.png");
    }
}
