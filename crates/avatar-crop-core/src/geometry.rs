//! Crop geometry in displayed-image space.
//!
//! All coordinates here are relative to the image as rendered on screen
//! (the "displayed" space), with the origin at the top-left corner.
//! Mapping into the source bitmap happens later, in [`crate::export`].
//!
//! # Units
//!
//! A [`CropRegion`] is either in pixels or in percent of the displayed size
//! (0 to 100). The widget itself always produces pixel regions; percent
//! regions come from hosts that persist a crop independently of the layout.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A 2D position or translation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin, also the neutral pan offset.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of an image, either as displayed or at natural resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True unless both dimensions are finite and strictly positive.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Unit of a [`CropRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropUnit {
    /// Absolute pixels in displayed space.
    #[default]
    #[serde(rename = "px")]
    Pixels,
    /// Percent (0-100) of the displayed width/height.
    #[serde(rename = "%")]
    Percent,
}

/// The rectangle of the displayed image the user wants to keep.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub unit: CropUnit,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    /// A region in pixel units.
    pub fn pixels(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: CropUnit::Pixels,
            x,
            y,
            width,
            height,
        }
    }

    /// A region in percent units.
    pub fn percent(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit: CropUnit::Percent,
            x,
            y,
            width,
            height,
        }
    }

    /// The zero-sized pixel region at the origin.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there is nothing to export: width or height not strictly positive.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Express this region in pixels of the given displayed size.
    pub fn to_pixels(&self, display: Size) -> CropRegion {
        match self.unit {
            CropUnit::Pixels => *self,
            CropUnit::Percent => CropRegion::pixels(
                self.x / 100.0 * display.width,
                self.y / 100.0 * display.height,
                self.width / 100.0 * display.width,
                self.height / 100.0 * display.height,
            ),
        }
    }

    /// Express this region in percent of the given displayed size.
    ///
    /// A degenerate display size yields an all-zero percent region.
    pub fn to_percent(&self, display: Size) -> CropRegion {
        match self.unit {
            CropUnit::Percent => *self,
            CropUnit::Pixels if display.is_degenerate() => CropRegion::percent(0.0, 0.0, 0.0, 0.0),
            CropUnit::Pixels => CropRegion::percent(
                self.x / display.width * 100.0,
                self.y / display.height * 100.0,
                self.width / display.width * 100.0,
                self.height / display.height * 100.0,
            ),
        }
    }

    /// Apply the 1:1 aspect lock and keep the region inside the displayed bounds.
    ///
    /// The side becomes the smaller of width and height (never larger than
    /// the display allows) and the top-left corner is clamped so the whole
    /// square stays visible. The result is always in pixel units.
    pub fn constrain_square(&self, display: Size) -> CropRegion {
        let bounds = sanitized(display);
        let px = self.to_pixels(display);

        let side = finite_or_zero(px.width)
            .min(finite_or_zero(px.height))
            .max(0.0)
            .min(bounds.width)
            .min(bounds.height);

        let x = finite_or_zero(px.x).clamp(0.0, bounds.width - side);
        let y = finite_or_zero(px.y).clamp(0.0, bounds.height - side);

        CropRegion::pixels(x, y, side, side)
    }
}

/// Largest square that fits the displayed image, centered on both axes.
///
/// Side is `min(width, height)`; the longer axis gets an offset of
/// `(dimension - side) / 2`. Zero, negative or non-finite dimensions give
/// [`CropRegion::empty`].
pub fn centered_square_crop(width: f64, height: f64) -> CropRegion {
    let bounds = sanitized(Size::new(width, height));
    let side = bounds.width.min(bounds.height);
    if side <= 0.0 {
        return CropRegion::empty();
    }

    CropRegion::pixels(
        (bounds.width - side) / 2.0,
        (bounds.height - side) / 2.0,
        side,
        side,
    )
}

/// Rendered size of an image laid out `object-contain` in a box, never upscaled.
///
/// Pass `f64::INFINITY` for an unconstrained axis.
pub fn fit_within(natural: Size, max_width: f64, max_height: f64) -> Size {
    if natural.is_degenerate() {
        return Size::default();
    }

    let scale = (max_width / natural.width)
        .min(max_height / natural.height)
        .min(1.0);
    if !(scale > 0.0) {
        return Size::default();
    }

    Size::new(natural.width * scale, natural.height * scale)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn sanitized(size: Size) -> Size {
    Size::new(
        finite_or_zero(size.width).max(0.0),
        finite_or_zero(size.height).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_square_landscape() {
        let crop = centered_square_crop(400.0, 300.0);
        assert_eq!(crop, CropRegion::pixels(50.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn test_centered_square_portrait() {
        let crop = centered_square_crop(200.0, 500.0);
        assert_eq!(crop, CropRegion::pixels(0.0, 150.0, 200.0, 200.0));
    }

    #[test]
    fn test_centered_square_already_square() {
        let crop = centered_square_crop(256.0, 256.0);
        assert_eq!(crop, CropRegion::pixels(0.0, 0.0, 256.0, 256.0));
    }

    #[test]
    fn test_centered_square_degenerate() {
        assert!(centered_square_crop(0.0, 300.0).is_empty());
        assert!(centered_square_crop(0.0, 0.0).is_empty());
        assert!(centered_square_crop(-10.0, 300.0).is_empty());
        assert!(centered_square_crop(f64::NAN, 300.0).is_empty());
        assert!(centered_square_crop(f64::INFINITY, 300.0).is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(CropRegion::empty().is_empty());
        assert!(CropRegion::pixels(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(CropRegion::pixels(0.0, 0.0, f64::NAN, 10.0).is_empty());
        assert!(!CropRegion::pixels(0.0, 0.0, 10.0, 10.0).is_empty());
    }

    #[test]
    fn test_percent_to_pixels() {
        let display = Size::new(400.0, 200.0);
        let crop = CropRegion::percent(25.0, 10.0, 50.0, 100.0);
        assert_eq!(
            crop.to_pixels(display),
            CropRegion::pixels(100.0, 20.0, 200.0, 200.0)
        );
    }

    #[test]
    fn test_pixels_to_percent() {
        let display = Size::new(400.0, 200.0);
        let crop = CropRegion::pixels(100.0, 20.0, 200.0, 200.0);
        assert_eq!(
            crop.to_percent(display),
            CropRegion::percent(25.0, 10.0, 50.0, 100.0)
        );
    }

    #[test]
    fn test_to_percent_degenerate_display() {
        let crop = CropRegion::pixels(10.0, 10.0, 20.0, 20.0);
        let pct = crop.to_percent(Size::new(0.0, 100.0));
        assert_eq!(pct.unit, CropUnit::Percent);
        assert!(pct.is_empty());
    }

    #[test]
    fn test_constrain_square_takes_shorter_side() {
        let display = Size::new(400.0, 300.0);
        let crop = CropRegion::pixels(10.0, 10.0, 120.0, 80.0).constrain_square(display);
        assert_eq!(crop, CropRegion::pixels(10.0, 10.0, 80.0, 80.0));
    }

    #[test]
    fn test_constrain_square_clamps_position() {
        let display = Size::new(400.0, 300.0);
        let crop = CropRegion::pixels(380.0, -20.0, 100.0, 100.0).constrain_square(display);
        assert_eq!(crop, CropRegion::pixels(300.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_constrain_square_oversized() {
        let display = Size::new(400.0, 300.0);
        let crop = CropRegion::pixels(0.0, 0.0, 1000.0, 1000.0).constrain_square(display);
        assert_eq!(crop, CropRegion::pixels(0.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn test_constrain_square_from_percent() {
        let display = Size::new(400.0, 200.0);
        let crop = CropRegion::percent(0.0, 0.0, 50.0, 50.0).constrain_square(display);
        assert_eq!(crop, CropRegion::pixels(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_fit_within_downscales() {
        let size = fit_within(Size::new(2000.0, 1000.0), 800.0, 512.0);
        assert_eq!(size, Size::new(800.0, 400.0));

        let size = fit_within(Size::new(1000.0, 2000.0), 800.0, 512.0);
        assert_eq!(size, Size::new(256.0, 512.0));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let size = fit_within(Size::new(100.0, 50.0), 800.0, 512.0);
        assert_eq!(size, Size::new(100.0, 50.0));
    }

    #[test]
    fn test_fit_within_unbounded_width() {
        let size = fit_within(Size::new(1024.0, 1024.0), f64::INFINITY, 512.0);
        assert_eq!(size, Size::new(512.0, 512.0));
    }

    #[test]
    fn test_fit_within_degenerate() {
        assert_eq!(fit_within(Size::new(0.0, 10.0), 100.0, 100.0), Size::default());
        assert_eq!(fit_within(Size::new(10.0, 10.0), 0.0, 100.0), Size::default());
    }

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(3.0, 4.0) + Point::new(1.0, -2.0);
        assert_eq!(p, Point::new(4.0, 2.0));
        assert_eq!(p - Point::new(4.0, 2.0), Point::ORIGIN);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
