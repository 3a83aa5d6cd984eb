//! Avatar Crop Core - profile image cropping
//!
//! This crate provides the logic behind the avatar cropper: square crop
//! geometry, drag-to-pan tracking, source decoding and raster export to a
//! `data:` URI. It has no browser dependencies; the WASM bindings live in
//! `avatar-crop-wasm`.

pub mod config;
pub mod cropper;
pub mod decode;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod pan;
pub mod transform;

pub use config::CropperConfig;
pub use cropper::AvatarCropper;
pub use encode::ExportFormat;
pub use geometry::{centered_square_crop, CropRegion, CropUnit, Point, Size};
pub use pan::{DragTracker, InteractionMode, PanOffset, PointerButton};
pub use transform::{rasterize, source_rect};
