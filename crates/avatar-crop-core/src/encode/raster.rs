//! Raster encoding of exported crops.
//!
//! Uses the `image` crate's GIF, PNG and JPEG encoders. Input is always RGBA;
//! formats without an alpha channel flatten it over white first.

use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// NeuQuant sampling speed for GIF palettes (1 = slowest/best, 30 = fastest).
const GIF_QUANTIZER_SPEED: i32 = 10;

/// Errors that can occur during raster encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format:?} encoding failed: {message}")]
    EncodingFailed { format: ExportFormat, message: String },
}

/// Output encoding of the exported avatar.
///
/// `Gif` is the default: the widget has always asked for a GIF, a
/// palette-limited format that is unusual for photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Gif,
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Gif => "image/gif",
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Encode RGBA pixel data in the given format.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `format` - Output format
/// * `quality` - JPEG quality (1-100); ignored by GIF and PNG
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero dimension,
/// `EncodeError::InvalidPixelData` when the buffer length does not match,
/// and `EncodeError::EncodingFailed` if the encoder rejects the image (GIF
/// frames are limited to 65535 px per side).
pub fn encode_raster(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: ExportFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let failed = |e: image::ImageError| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    };

    let mut buffer = Vec::new();
    match format {
        ExportFormat::Gif => {
            // The trailer is written when the encoder is dropped
            let mut encoder = GifEncoder::new_with_speed(&mut buffer, GIF_QUANTIZER_SPEED);
            encoder
                .encode(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(failed)?;
        }
        ExportFormat::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(failed)?;
        }
        ExportFormat::Jpeg => {
            let rgb = flatten_over_white(pixels);
            JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(failed)?;
        }
    }

    Ok(buffer)
}

/// Composite RGBA over an opaque white background, dropping alpha.
fn flatten_over_white(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    for px in pixels.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255]);
            }
        }
        pixels
    }

    #[test]
    fn test_encode_gif() {
        let gif = encode_raster(&opaque(16, 16), 16, 16, ExportFormat::Gif, 90).unwrap();
        assert_eq!(&gif[0..6], b"GIF89a");
        // Trailer byte
        assert_eq!(gif[gif.len() - 1], 0x3B);
    }

    #[test]
    fn test_encode_png() {
        let png = encode_raster(&opaque(16, 16), 16, 16, ExportFormat::Png, 90).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_jpeg() {
        let jpeg = encode_raster(&opaque(16, 16), 16, 16, ExportFormat::Jpeg, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_transparent_pixels() {
        let pixels = vec![0u8; 8 * 8 * 4];
        for format in [ExportFormat::Gif, ExportFormat::Png, ExportFormat::Jpeg] {
            assert!(encode_raster(&pixels, 8, 8, format, 90).is_ok());
        }
    }

    #[test]
    fn test_jpeg_quality_clamping() {
        let pixels = opaque(10, 10);
        assert!(encode_raster(&pixels, 10, 10, ExportFormat::Jpeg, 0).is_ok());
        assert!(encode_raster(&pixels, 10, 10, ExportFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_zero_dimensions() {
        let result = encode_raster(&[], 0, 10, ExportFormat::Gif, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));

        let result = encode_raster(&[], 10, 0, ExportFormat::Png, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_pixel_length_mismatch() {
        let pixels = vec![0u8; 10 * 10 * 3];
        let result = encode_raster(&pixels, 10, 10, ExportFormat::Png, 90);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 300
            })
        ));
    }

    #[test]
    fn test_flatten_over_white() {
        let rgb = flatten_over_white(&[10, 20, 30, 255, 10, 20, 30, 0, 0, 0, 0, 128]);
        assert_eq!(&rgb[0..3], &[10, 20, 30]);
        assert_eq!(&rgb[3..6], &[255, 255, 255]);
        // Half-transparent black over white is mid gray
        assert_eq!(&rgb[6..9], &[127, 127, 127]);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ExportFormat::Gif.mime(), "image/gif");
        assert_eq!(ExportFormat::Png.mime(), "image/png");
        assert_eq!(ExportFormat::Jpeg.mime(), "image/jpeg");
        assert_eq!(ExportFormat::default(), ExportFormat::Gif);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
