//! Source image decoding for the avatar cropper.
//!
//! This module provides functionality for:
//! - Parsing `data:` URIs produced by the hosting form's file input
//! - Gating sources to the accepted formats (PNG, JPEG, WEBP, GIF)
//! - Decoding to RGBA at natural resolution, with EXIF orientation applied
//!
//! # Examples
//!
//! ```ignore
//! use avatar_crop_core::decode::{decode_source, read_file_as_data_uri};
//!
//! let bytes = std::fs::read("avatar.png").unwrap();
//! let src = read_file_as_data_uri(&bytes, "image/png").unwrap();
//! let image = decode_source(&src).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod data_uri;
mod source;
mod types;

pub use data_uri::{parse_data_uri, DataUri};
pub use source::{decode_bytes, decode_source, read_file_as_data_uri};
pub use types::{DecodeError, DecodedImage, Orientation, SourceFormat};
