//! Source loading WASM bindings.
//!
//! The hosting form reads the picked file into bytes and turns it into the
//! `data:` URI the cropper takes as its source.
//!
//! ```typescript
//! import { accepted_formats, read_file_as_data_uri, JsAvatarCropper } from '@avatar-crop/wasm';
//!
//! input.accept = accepted_formats();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const src = read_file_as_data_uri(bytes, file.type);
//! const cropper = JsAvatarCropper.from_src(src);
//! ```

use avatar_crop_core::decode::{self, SourceFormat};
use wasm_bindgen::prelude::*;

/// Encode picked file bytes as a base64 `data:` URI.
///
/// # Errors
///
/// Returns an error if `mime` is not PNG, JPEG, WEBP or GIF, or the file is
/// empty.
#[wasm_bindgen]
pub fn read_file_as_data_uri(bytes: &[u8], mime: &str) -> Result<String, JsValue> {
    decode::read_file_as_data_uri(bytes, mime).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The `accept` attribute value for the file input.
#[wasm_bindgen]
pub fn accepted_formats() -> String {
    SourceFormat::accept_attribute()
}
