//! Export of the current crop as a `data:` URI.
//!
//! Exporting never fails loudly. An empty crop, a degenerate layout or an
//! encoder error all produce `None`, which callers skip silently.

use crate::config::CropperConfig;
use crate::decode::DecodedImage;
use crate::encode::{encode_raster, to_data_uri};
use crate::geometry::{CropRegion, Size};
use crate::pan::PanOffset;
use crate::transform::rasterize;

/// Rasterize the crop and encode it as a data URI in the configured format.
pub fn export_data_uri(
    image: &DecodedImage,
    crop: &CropRegion,
    pan: PanOffset,
    displayed: Size,
    config: &CropperConfig,
) -> Option<String> {
    let Some(raster) = rasterize(image, crop, pan, displayed) else {
        tracing::debug!(?crop, ?displayed, "nothing to export");
        return None;
    };

    let format = config.export_format;
    match encode_raster(
        &raster.pixels,
        raster.width,
        raster.height,
        format,
        config.jpeg_quality,
    ) {
        Ok(bytes) => {
            tracing::debug!(
                width = raster.width,
                height = raster.height,
                bytes = bytes.len(),
                ?format,
                "exported avatar"
            );
            Some(to_data_uri(format.mime(), &bytes))
        }
        Err(error) => {
            tracing::warn!(%error, "avatar export encoding failed");
            None
        }
    }
}
