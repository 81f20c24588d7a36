use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Pixel dimensions accepted by Mac App Store Connect
pub const APPLE_SIZES: [TargetSize; 4] = [
    TargetSize::new(1280, 800),
    TargetSize::new(1440, 900),
    TargetSize::new(2560, 1600),
    TargetSize::new(2880, 1800),
];

/// Output dimensions of a resized screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The `WxH` tag embedded in output file names
    pub fn tag(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Pixel count, used to pick the largest size
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// The largest of the App Store sizes
    pub fn largest() -> Self {
        APPLE_SIZES
            .iter()
            .copied()
            .max_by_key(TargetSize::area)
            .unwrap_or(APPLE_SIZES[APPLE_SIZES.len() - 1])
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// How a source image is brought to an exact target size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Keep aspect ratio, pad with the background colour
    Fit,

    /// Keep aspect ratio, cover the target and crop the overflow
    Fill,

    /// Scale each axis independently
    Stretch,
}

impl ResizeMode {
    pub const ALL: [ResizeMode; 3] = [ResizeMode::Fit, ResizeMode::Fill, ResizeMode::Stretch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::Stretch => "stretch",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fit" => Ok(Self::Fit),
            "fill" => Ok(Self::Fill),
            "stretch" => Ok(Self::Stretch),
            other => Err(Error::Configuration(format!(
                "Unknown resize mode '{}' (expected fit, fill or stretch)",
                other
            ))),
        }
    }
}

/// Solid RGB colour used for fit padding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BackgroundColor(pub [u8; 3]);

impl BackgroundColor {
    pub const WHITE: Self = Self([255, 255, 255]);
    pub const BLACK: Self = Self([0, 0, 0]);

    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb(self.0)
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for BackgroundColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }

        let invalid = || Error::Configuration(format!("Invalid background colour: {}", s));
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::WHITE => f.write_str("white"),
            Self::BLACK => f.write_str("black"),
            Self([r, g, b]) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

impl TryFrom<String> for BackgroundColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BackgroundColor> for String {
    fn from(color: BackgroundColor) -> Self {
        color.to_string()
    }
}

/// A generated output image file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Full path of the written file
    pub path: PathBuf,

    /// Source image it was generated from
    pub source: PathBuf,

    /// Dimensions of the written image
    pub size: TargetSize,

    /// Resize mode used
    pub mode: ResizeMode,
}

impl Artifact {
    /// File name component of the artifact path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Deterministic output file name: `{base}_{W}x{H}_{mode}.png`
pub fn output_file_name(base: &str, size: TargetSize, mode: ResizeMode) -> String {
    format!("{}_{}_{}.png", base, size.tag(), mode)
}

/// File stem of a source image, used as the base of its output names
pub fn source_base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_string())
}
