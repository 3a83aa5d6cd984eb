//! Core types for source image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;

/// Error types for source decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No image source was supplied.
    #[error("Empty image source")]
    EmptySource,

    /// The source string is not a well-formed data URI.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// The MIME type or detected format is not one the widget accepts.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The image bytes are corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Source formats accepted by the avatar field: PNG, JPEG/JPG, WEBP and GIF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl SourceFormat {
    /// All accepted formats, in the order the file picker lists them.
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Png,
        SourceFormat::Jpeg,
        SourceFormat::Webp,
        SourceFormat::Gif,
    ];

    /// Look up a format by MIME type. `image/jpg` is accepted as an alias.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim();
        if mime.eq_ignore_ascii_case("image/png") {
            Some(SourceFormat::Png)
        } else if mime.eq_ignore_ascii_case("image/jpeg") || mime.eq_ignore_ascii_case("image/jpg")
        {
            Some(SourceFormat::Jpeg)
        } else if mime.eq_ignore_ascii_case("image/webp") {
            Some(SourceFormat::Webp)
        } else if mime.eq_ignore_ascii_case("image/gif") {
            Some(SourceFormat::Gif)
        } else {
            None
        }
    }

    /// Canonical MIME type.
    pub fn mime(self) -> &'static str {
        match self {
            SourceFormat::Png => "image/png",
            SourceFormat::Jpeg => "image/jpeg",
            SourceFormat::Webp => "image/webp",
            SourceFormat::Gif => "image/gif",
        }
    }

    /// The `accept` attribute value for a file input.
    pub fn accept_attribute() -> String {
        let mut mimes: Vec<&str> = Self::ALL.iter().map(|f| f.mime()).collect();
        mimes.insert(2, "image/jpg");
        mimes.join(", ")
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            SourceFormat::Png => image::ImageFormat::Png,
            SourceFormat::Jpeg => image::ImageFormat::Jpeg,
            SourceFormat::Webp => image::ImageFormat::WebP,
            SourceFormat::Gif => image::ImageFormat::Gif,
        }
    }

    pub(crate) fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(SourceFormat::Png),
            image::ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            image::ImageFormat::WebP => Some(SourceFormat::Webp),
            image::ImageFormat::Gif => Some(SourceFormat::Gif),
            _ => None,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded source image at natural resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Intrinsic size, the `naturalWidth`/`naturalHeight` of the source.
    pub fn natural_size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// `true` when there is nothing to sample: a zero dimension, or a
    /// buffer that does not hold exactly `width * height` RGBA pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0
            || self.height == 0
            || self.pixels.len() != self.width as usize * self.height as usize * 4
    }

    /// RGBA of the pixel at `(x, y)`. Caller guarantees bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.width as usize + x) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}
