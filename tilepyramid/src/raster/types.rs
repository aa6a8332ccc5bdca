//! Raster buffer and encoding parameter types.

use std::fmt;
use std::str::FromStr;

use image::DynamicImage;
use thiserror::Error;

/// A decoded raster buffer.
///
/// Engines hand these out and take them back; operations produce new buffers
/// instead of mutating in place, so a buffer is released exactly when it is
/// dropped, on every exit path.
#[derive(Debug, Clone)]
pub struct Raster {
    image: DynamicImage,
}

impl Raster {
    /// Wrap a decoded image buffer.
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying image buffer.
    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    /// Unwrap into the underlying image buffer.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

/// Output format for base images and tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileFormat {
    /// JPEG output, lossy, quality-controlled. File extension `jpg`.
    #[default]
    Jpeg,
    /// PNG output, lossless, supports transparency. File extension `png`.
    Png,
}

impl TileFormat {
    /// File extension used for outputs in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            TileFormat::Jpeg => "jpg",
            TileFormat::Png => "png",
        }
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileFormat::Jpeg => write!(f, "jpeg"),
            TileFormat::Png => write!(f, "png"),
        }
    }
}

/// Error for unrecognized tile format names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tile format '{0}', expected a jpeg or png family name")]
pub struct ParseFormatError(pub String);

impl FromStr for TileFormat {
    type Err = ParseFormatError;

    /// Accepts the common spellings of each format family.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" | "jp2" | "jpc" | "jxr" => Ok(TileFormat::Jpeg),
            "png" | "png8" | "png24" | "png32" | "png64" => Ok(TileFormat::Png),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// Fill color for padded tile regions.
///
/// `Transparent` is only meaningful for PNG output; JPEG has no alpha channel
/// and encodes transparent fills as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillColor {
    /// Fully transparent fill.
    Transparent,
    /// Opaque RGB fill.
    Rgb([u8; 3]),
}

impl FillColor {
    /// Opaque white, the default fill.
    pub const WHITE: FillColor = FillColor::Rgb([255, 255, 255]);

    /// Opaque black.
    pub const BLACK: FillColor = FillColor::Rgb([0, 0, 0]);

    /// The fill as an RGBA pixel.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        match self {
            FillColor::Transparent => image::Rgba([0, 0, 0, 0]),
            FillColor::Rgb([r, g, b]) => image::Rgba([r, g, b, 255]),
        }
    }
}

impl Default for FillColor {
    fn default() -> Self {
        FillColor::WHITE
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillColor::Transparent => write!(f, "transparent"),
            FillColor::Rgb([255, 255, 255]) => write!(f, "white"),
            FillColor::Rgb([0, 0, 0]) => write!(f, "black"),
            FillColor::Rgb([r, g, b]) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// Error for unrecognized fill color specs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid fill color '{0}', expected white, black, transparent or #rrggbb")]
pub struct ParseFillColorError(pub String);

impl FromStr for FillColor {
    type Err = ParseFillColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transparent" => Ok(FillColor::Transparent),
            "white" => Ok(FillColor::WHITE),
            "black" => Ok(FillColor::BLACK),
            hex => {
                let digits = hex.strip_prefix('#').ok_or_else(|| ParseFillColorError(s.to_string()))?;
                if digits.len() != 6 {
                    return Err(ParseFillColorError(s.to_string()));
                }
                let value =
                    u32::from_str_radix(digits, 16).map_err(|_| ParseFillColorError(s.to_string()))?;
                Ok(FillColor::Rgb([
                    (value >> 16) as u8,
                    (value >> 8) as u8,
                    value as u8,
                ]))
            }
        }
    }
}

/// Compression parameters applied when persisting a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEncoding {
    /// Output format.
    pub format: TileFormat,
    /// JPEG quality, 0 to 100. Ignored for PNG.
    pub jpeg_quality: u8,
}

impl TileEncoding {
    /// Encoding with the given format and quality.
    pub fn new(format: TileFormat, jpeg_quality: u8) -> Self {
        Self {
            format,
            jpeg_quality,
        }
    }
}

/// Where the existing pixel content sits when a canvas is extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Content at the top-left, padding added below and to the right.
    TopLeft,
    /// Content at the bottom-left, padding added above and to the right.
    BottomLeft,
}
