//! Geometry of the three resize modes.
//!
//! Every function here is pure: sources are borrowed and a new image of
//! exactly the requested size is returned.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbImage};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{BackgroundColor, ResizeMode, TargetSize};

/// Resampling filter used for every scale operation
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Knobs that affect resize output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Padding colour for fit mode
    pub background: BackgroundColor,

    /// Whether fit mode may enlarge the source
    pub allow_upscale: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            background: BackgroundColor::WHITE,
            allow_upscale: true,
        }
    }
}

impl From<&Config> for ResizeOptions {
    fn from(config: &Config) -> Self {
        Self {
            background: config.background,
            allow_upscale: config.allow_upscale,
        }
    }
}

/// Resize `image` to exactly `target` using `mode`
pub fn resize(
    image: &DynamicImage,
    target: TargetSize,
    mode: ResizeMode,
    options: &ResizeOptions,
) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidImage(format!(
            "source has zero dimension ({}x{})",
            width, height
        )));
    }
    if target.width == 0 || target.height == 0 {
        return Err(Error::InvalidImage(format!(
            "target has zero dimension ({})",
            target
        )));
    }

    let resized = match mode {
        ResizeMode::Fit => fit(image, target, options),
        ResizeMode::Fill => fill(image, target),
        ResizeMode::Stretch => image.resize_exact(target.width, target.height, RESAMPLE_FILTER),
    };

    debug_assert_eq!(resized.dimensions(), (target.width, target.height));
    Ok(resized)
}

/// Scale to fit inside `target` and centre on a background canvas
fn fit(image: &DynamicImage, target: TargetSize, options: &ResizeOptions) -> DynamicImage {
    let (scaled_w, scaled_h) = fit_dimensions(image.dimensions(), target, options.allow_upscale);
    let scaled = scale_to(image, scaled_w, scaled_h);

    let mut canvas = RgbImage::from_pixel(target.width, target.height, options.background.to_rgb());
    let (x, y) = centered_offset((target.width, target.height), (scaled_w, scaled_h));

    // Plain copy, alpha is dropped rather than blended
    imageops::replace(&mut canvas, &scaled.to_rgb8(), i64::from(x), i64::from(y));
    DynamicImage::ImageRgb8(canvas)
}

/// Crop the centred region with the target's aspect ratio, then scale it.
///
/// Cropping in source coordinates first keeps memory bounded by the source
/// and target sizes, however extreme the source aspect ratio is.
fn fill(image: &DynamicImage, target: TargetSize) -> DynamicImage {
    let (left, top, width, height) = fill_crop(image.dimensions(), target);
    let cropped = image.crop_imm(left, top, width, height);
    scale_to(&cropped, target.width, target.height)
}

fn scale_to(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.dimensions() == (width, height) {
        image.clone()
    } else {
        image.resize_exact(width, height, RESAMPLE_FILTER)
    }
}

/// Size of the content rectangle for fit mode.
///
/// The scale factor is `min(tw / sw, th / sh)`, capped at 1.0 when
/// upscaling is disabled. Results are rounded and clamped to `[1, target]`.
pub fn fit_dimensions(source: (u32, u32), target: TargetSize, allow_upscale: bool) -> (u32, u32) {
    let (sw, sh) = (f64::from(source.0), f64::from(source.1));
    let mut scale = f64::min(f64::from(target.width) / sw, f64::from(target.height) / sh);
    if !allow_upscale {
        scale = scale.min(1.0);
    }

    let width = ((sw * scale).round() as u32).clamp(1, target.width);
    let height = ((sh * scale).round() as u32).clamp(1, target.height);
    (width, height)
}

/// Source rectangle `(left, top, width, height)` kept by fill mode.
///
/// A source relatively wider than the target keeps its full height and
/// loses equal margins left and right; otherwise it keeps its full width
/// and loses equal margins top and bottom. Offsets are floor-centred.
pub fn fill_crop(source: (u32, u32), target: TargetSize) -> (u32, u32, u32, u32) {
    let (sw, sh) = source;
    let source_ratio = f64::from(sw) / f64::from(sh);
    let target_ratio = f64::from(target.width) / f64::from(target.height);

    if source_ratio > target_ratio {
        let width = ((f64::from(sh) * target_ratio).round() as u32).clamp(1, sw);
        ((sw - width) / 2, 0, width, sh)
    } else {
        let height = ((f64::from(sw) / target_ratio).round() as u32).clamp(1, sh);
        (0, (sh - height) / 2, sw, height)
    }
}

/// Floor-centred offset of `inner` inside `outer`
pub fn centered_offset(outer: (u32, u32), inner: (u32, u32)) -> (u32, u32) {
    (
        outer.0.saturating_sub(inner.0) / 2,
        outer.1.saturating_sub(inner.1) / 2,
    )
}
