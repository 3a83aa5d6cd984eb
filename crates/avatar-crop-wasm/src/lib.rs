//! Avatar Crop WASM - WebAssembly bindings for the avatar cropper
//!
//! This crate exposes avatar-crop-core to the browser.
//!
//! # Module Structure
//!
//! - `cropper` - The cropping session (`JsAvatarCropper`)
//! - `decode` - Turning a picked file into a source `data:` URI
//! - `listeners` - Window pointer listeners scoped to a pan drag
//! - `logging` - Forwarding core `tracing` events to the browser console
//! - `types` - WASM-compatible wrapper types and config conversion
//!
//! # Usage
//!
//! ```typescript
//! import init, { read_file_as_data_uri, JsAvatarCropper } from '@avatar-crop/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const cropper = JsAvatarCropper.from_src(read_file_as_data_uri(bytes, file.type));
//! cropper.on_image_load(img.width, img.height);
//! cropper.confirm((uri) => form.avatar.value = uri);
//! ```

use wasm_bindgen::prelude::*;

mod cropper;
mod decode;
mod listeners;
mod logging;
mod types;

pub use cropper::JsAvatarCropper;
pub use decode::{accepted_formats, read_file_as_data_uri};
pub use types::JsCropRegion;

/// Initialize the WASM module (called automatically on load)
///
/// Routes the core's log events to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    logging::init();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
