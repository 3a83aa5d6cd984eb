//! Rasterizing the crop box against the panned source image.
//!
//! The crop box and the pan offset live in displayed space. The source
//! bitmap has its own, usually larger, natural resolution. Exporting maps
//! the box back into source space per axis:
//!
//! ```text
//! src_x = (crop.x - pan.x) * natural.width  / displayed.width
//! src_y = (crop.y - pan.y) * natural.height / displayed.height
//! ```
//!
//! The output canvas is sized to the crop box in displayed units, not to the
//! source resolution, so a large photo cropped on a small screen exports at
//! the on-screen size.

use crate::decode::DecodedImage;
use crate::geometry::{CropRegion, Size};
use crate::pan::PanOffset;

use super::sample::sample_bilinear;

/// Largest canvas side the exporter will allocate.
pub const MAX_EXPORT_SIDE: u32 = 8_192;

/// An axis-aligned rectangle in source (natural) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// RGBA raster of an exported crop.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

/// Map a pixel crop box and pan offset into source space.
///
/// `crop` must already be in pixel units. A degenerate `displayed` size
/// gives a zero scale.
pub fn source_rect(crop: &CropRegion, pan: PanOffset, natural: Size, displayed: Size) -> Rect {
    let (scale_x, scale_y) = if displayed.is_degenerate() {
        (0.0, 0.0)
    } else {
        (
            natural.width / displayed.width,
            natural.height / displayed.height,
        )
    };

    Rect {
        x: (crop.x - pan.x) * scale_x,
        y: (crop.y - pan.y) * scale_y,
        width: crop.width * scale_x,
        height: crop.height * scale_y,
    }
}

/// Draw the crop box onto a canvas sized to the box.
///
/// Each output pixel samples the matching source point bilinearly; parts of
/// the box that fall outside the source image stay transparent.
///
/// Returns `None` when there is nothing to export: an empty crop, a box that
/// truncates to a zero-sized canvas, a degenerate displayed size, an empty
/// image, a canvas beyond [`MAX_EXPORT_SIDE`], or a canvas buffer the
/// allocator refuses.
pub fn rasterize(
    image: &DecodedImage,
    crop: &CropRegion,
    pan: PanOffset,
    displayed: Size,
) -> Option<ExportedImage> {
    if image.is_empty() || displayed.is_degenerate() {
        return None;
    }

    let crop = crop.to_pixels(displayed);
    if crop.is_empty() {
        return None;
    }

    // Canvas dimensions are integers; fractional box sizes truncate
    let out_w = crop.width.trunc();
    let out_h = crop.height.trunc();
    if !(out_w >= 1.0 && out_h >= 1.0) || out_w > MAX_EXPORT_SIDE as f64 || out_h > MAX_EXPORT_SIDE as f64 {
        return None;
    }
    let (out_w, out_h) = (out_w as u32, out_h as u32);

    let natural = image.natural_size();
    let src = source_rect(&crop, pan, natural, displayed);
    let scale_x = natural.width / displayed.width;
    let scale_y = natural.height / displayed.height;

    let len = out_w as usize * out_h as usize * 4;
    let mut pixels = Vec::new();
    if let Err(error) = pixels.try_reserve_exact(len) {
        tracing::warn!(%error, out_w, out_h, "export canvas allocation failed");
        return None;
    }
    pixels.resize(len, 0u8);

    for dst_y in 0..out_h {
        let src_y = src.y + (dst_y as f64 + 0.5) * scale_y;
        let row = dst_y as usize * out_w as usize * 4;

        for dst_x in 0..out_w {
            let src_x = src.x + (dst_x as f64 + 0.5) * scale_x;
            let idx = row + dst_x as usize * 4;
            pixels[idx..idx + 4].copy_from_slice(&sample_bilinear(image, src_x, src_y));
        }
    }

    Some(ExportedImage {
        width: out_w,
        height: out_h,
        pixels,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{centered_square_crop, Point};
    use proptest::prelude::*;

    fn gray_image(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![128u8; (width * height * 4) as usize])
    }

    proptest! {
        /// Property: output dimensions are the truncated crop box.
        #[test]
        fn prop_output_matches_crop_box(
            (nat_w, nat_h) in (1u32..=64, 1u32..=64),
            (disp_w, disp_h) in (1.0f64..=64.0, 1.0f64..=64.0),
            pan in (-32.0f64..=32.0, -32.0f64..=32.0),
        ) {
            let img = gray_image(nat_w, nat_h);
            let display = Size::new(disp_w, disp_h);
            let crop = centered_square_crop(disp_w, disp_h);

            let out = rasterize(&img, &crop, Point::new(pan.0, pan.1), display);
            if crop.width >= 1.0 {
                let out = out.expect("non-empty crop must export");
                prop_assert_eq!(out.width, crop.width.trunc() as u32);
                prop_assert_eq!(out.height, crop.height.trunc() as u32);
                prop_assert_eq!(out.pixels.len(), (out.width * out.height * 4) as usize);
            } else {
                prop_assert!(out.is_none());
            }
        }

        /// Property: source rect scales linearly with the natural/displayed ratio.
        #[test]
        fn prop_source_rect_scaling(
            x in -100.0f64..=100.0,
            y in -100.0f64..=100.0,
            side in 0.0f64..=100.0,
            factor in 0.25f64..=8.0,
        ) {
            let crop = CropRegion::pixels(x, y, side, side);
            let displayed = Size::new(100.0, 100.0);
            let natural = Size::new(100.0 * factor, 100.0 * factor);

            let rect = source_rect(&crop, Point::ORIGIN, natural, displayed);
            prop_assert!((rect.x - x * factor).abs() < 1e-9);
            prop_assert!((rect.y - y * factor).abs() < 1e-9);
            prop_assert!((rect.width - side * factor).abs() < 1e-9);
        }
    }
}
