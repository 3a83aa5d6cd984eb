//! Pixel sampling in source space.
//!
//! Coordinates are continuous: pixel `(i, j)` covers `[i, i+1) x [j, j+1)`
//! and its center sits at `(i + 0.5, j + 0.5)`. Points outside the image
//! sample as fully transparent, the way a canvas leaves undrawn areas.

use crate::decode::DecodedImage;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Sample a pixel using bilinear interpolation.
///
/// Interpolates the 4 pixel centers around `(x, y)`, clamping the
/// neighborhood at the image border so edge pixels are not darkened.
pub(crate) fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as f64, image.height as f64);

    if !(x >= 0.0 && x < w && y >= 0.0 && y < h) {
        return TRANSPARENT;
    }

    // Shift to pixel-center grid and clamp to the outermost centers
    let gx = (x - 0.5).clamp(0.0, w - 1.0);
    let gy = (y - 0.5).clamp(0.0, h - 1.0);

    let x0 = gx.floor() as usize;
    let y0 = gy.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    let fx = gx - x0 as f64;
    let fy = gy - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x1 image: black on the left, white on the right.
    fn two_pixels() -> DecodedImage {
        DecodedImage::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255])
    }

    #[test]
    fn test_pixel_center_is_exact() {
        let img = two_pixels();
        assert_eq!(sample_bilinear(&img, 0.5, 0.5), [0, 0, 0, 255]);
        assert_eq!(sample_bilinear(&img, 1.5, 0.5), [255, 255, 255, 255]);
    }

    #[test]
    fn test_midpoint_blends() {
        let img = two_pixels();
        let px = sample_bilinear(&img, 1.0, 0.5);
        assert_eq!(px, [128, 128, 128, 255]);
    }

    #[test]
    fn test_edges_clamp() {
        let img = two_pixels();
        assert_eq!(sample_bilinear(&img, 0.0, 0.0), [0, 0, 0, 255]);
        assert_eq!(sample_bilinear(&img, 1.99, 0.99), [255, 255, 255, 255]);
    }

    #[test]
    fn test_outside_is_transparent() {
        let img = two_pixels();
        assert_eq!(sample_bilinear(&img, -0.1, 0.5), TRANSPARENT);
        assert_eq!(sample_bilinear(&img, 2.0, 0.5), TRANSPARENT);
        assert_eq!(sample_bilinear(&img, 0.5, 1.0), TRANSPARENT);
        assert_eq!(sample_bilinear(&img, f64::NAN, 0.5), TRANSPARENT);
    }

    #[test]
    fn test_single_pixel_image() {
        let img = DecodedImage::new(1, 1, vec![10, 20, 30, 40]);
        assert_eq!(sample_bilinear(&img, 0.2, 0.9), [10, 20, 30, 40]);
    }
}
