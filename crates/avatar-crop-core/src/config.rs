//! Cropper configuration.
//!
//! Deserialized from the host (a plain JS object in the browser), with every
//! field optional.

use serde::{Deserialize, Serialize};

use crate::encode::ExportFormat;

/// Tallest the source image is rendered inside the dialog, in CSS pixels.
pub const DEFAULT_MAX_DISPLAY_HEIGHT: f64 = 512.0;

/// Default JPEG quality when exporting as JPEG.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Settings for one cropper instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropperConfig {
    /// Encoding of the exported avatar.
    pub export_format: ExportFormat,
    /// JPEG quality (1-100), only used with [`ExportFormat::Jpeg`].
    pub jpeg_quality: u8,
    /// Height cap used when the host lets the cropper compute the displayed size.
    pub max_display_height: f64,
    /// Render hint: draw the crop box as a circle.
    pub circular_crop: bool,
    /// Render hint: draw rule-of-thirds guides inside the crop box.
    pub rule_of_thirds: bool,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            export_format: ExportFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_display_height: DEFAULT_MAX_DISPLAY_HEIGHT,
            circular_crop: true,
            rule_of_thirds: true,
        }
    }
}

impl CropperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CropperConfig::new();
        assert!(config.is_default());
        assert_eq!(config.export_format, ExportFormat::Gif);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.max_display_height, 512.0);
        assert!(config.circular_crop);
        assert!(config.rule_of_thirds);
    }

    #[test]
    fn test_not_default() {
        let mut config = CropperConfig::new();
        config.export_format = ExportFormat::Png;
        assert!(!config.is_default());
    }

    #[test]
    fn test_deserialize_partial_camel_case() {
        use serde::de::value::{Error as ValueError, MapDeserializer};

        let entries = vec![("exportFormat", "png"), ("unknownField", "ignored")];
        let deserializer = MapDeserializer::<_, ValueError>::new(entries.into_iter());
        let config = CropperConfig::deserialize(deserializer).unwrap();

        assert_eq!(config.export_format, ExportFormat::Png);
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
        assert!(config.circular_crop);
    }
}
