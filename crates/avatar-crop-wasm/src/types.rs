//! WASM-compatible wrapper types.
//!
//! This module provides JavaScript-friendly views of the core cropper types
//! and the conversion of the JS config object.

use avatar_crop_core::{CropRegion, CropUnit, CropperConfig, InteractionMode};
use wasm_bindgen::prelude::*;

/// A crop region as seen from JavaScript.
///
/// Coordinates are in displayed-image pixels unless `unit` is `"%"`.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsCropRegion {
    inner: CropRegion,
}

#[wasm_bindgen]
impl JsCropRegion {
    /// Create a pixel-unit crop region.
    #[wasm_bindgen(constructor)]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> JsCropRegion {
        JsCropRegion {
            inner: CropRegion::pixels(x, y, width, height),
        }
    }

    /// `"px"` or `"%"`, matching the crop box editor's convention.
    #[wasm_bindgen(getter)]
    pub fn unit(&self) -> String {
        match self.inner.unit {
            CropUnit::Pixels => "px".to_string(),
            CropUnit::Percent => "%".to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height
    }
}

impl JsCropRegion {
    pub(crate) fn from_core(inner: CropRegion) -> Self {
        Self { inner }
    }
}

/// Name of an interaction mode for JavaScript.
pub(crate) fn mode_name(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Crop => "crop",
        InteractionMode::Pan => "pan",
    }
}

/// Deserialize a cropper config from a JS object.
///
/// `undefined` and `null` mean all defaults; missing fields take their
/// default values.
pub(crate) fn config_from_js(value: JsValue) -> Result<CropperConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropperConfig::default());
    }

    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid cropper config: {}", e)))
}
