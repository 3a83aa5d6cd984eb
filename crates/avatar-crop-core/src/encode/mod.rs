//! Encoding of exported avatars.
//!
//! This module provides functionality for:
//! - Encoding RGBA rasters as GIF, PNG or JPEG
//! - Wrapping the encoded bytes in a `data:` URI for the hosting form
//!
//! All operations are synchronous and run on the caller's thread.
//!
//! # Examples
//!
//! ```ignore
//! use avatar_crop_core::encode::{encode_raster, to_data_uri, ExportFormat};
//!
//! let pixels = vec![128u8; 64 * 64 * 4];
//! let bytes = encode_raster(&pixels, 64, 64, ExportFormat::Png, 90).unwrap();
//! let uri = to_data_uri(ExportFormat::Png.mime(), &bytes);
//! ```

mod data_uri;
mod raster;

pub use data_uri::to_data_uri;
pub use raster::{encode_raster, EncodeError, ExportFormat};
