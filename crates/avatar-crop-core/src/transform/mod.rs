//! Mapping the on-screen crop onto the source bitmap.
//!
//! # Coordinate Systems
//!
//! - Displayed space: the image as rendered, where the crop box and pan
//!   offset live
//! - Source space: the image at natural resolution, where pixels are read
//!
//! The two are related by a per-axis scale factor,
//! `natural / displayed`. Origin is the top-left corner in both.

mod crop;
mod sample;

pub use crop::{rasterize, source_rect, ExportedImage, Rect, MAX_EXPORT_SIDE};
