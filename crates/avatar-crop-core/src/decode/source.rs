//! Source image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{parse_data_uri, DecodeError, DecodedImage, Orientation, SourceFormat};
use crate::encode::to_data_uri;

/// Decode an image source string (a data URI) into RGBA pixels.
///
/// The declared MIME type must be one of the accepted avatar formats.
///
/// # Errors
///
/// - `DecodeError::EmptySource` for an empty or blank source
/// - `DecodeError::InvalidDataUri` if the source is not a data URI
/// - `DecodeError::UnsupportedFormat` for MIME types outside PNG/JPEG/WEBP/GIF
/// - `DecodeError::CorruptedFile` if the payload does not decode
pub fn decode_source(src: &str) -> Result<DecodedImage, DecodeError> {
    if src.trim().is_empty() {
        return Err(DecodeError::EmptySource);
    }

    let uri = parse_data_uri(src)?;
    let format = SourceFormat::from_mime(&uri.mime)
        .ok_or_else(|| DecodeError::UnsupportedFormat(uri.mime.clone()))?;

    decode_bytes(&uri.data, Some(format))
}

/// Decode image bytes into RGBA pixels, applying EXIF orientation.
///
/// The format is sniffed from the content first, like a browser does; the
/// declared format is only used when sniffing fails.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the content is a known image
/// format outside the accepted set, `DecodeError::CorruptedFile` otherwise.
pub fn decode_bytes(bytes: &[u8], declared: Option<SourceFormat>) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptySource);
    }

    let format = match image::guess_format(bytes) {
        Ok(sniffed) => SourceFormat::from_image_format(sniffed)
            .ok_or_else(|| DecodeError::UnsupportedFormat(format!("{:?}", sniffed)))?,
        Err(_) => declared.ok_or_else(|| {
            DecodeError::CorruptedFile("unrecognized image content".to_string())
        })?,
    };

    let orientation = extract_orientation(bytes);

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.to_image_format());

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

/// Encode a picked file as a data URI, the way the avatar field stores it.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if `mime` is not an accepted
/// avatar type and `DecodeError::EmptySource` for an empty file.
pub fn read_file_as_data_uri(bytes: &[u8], mime: &str) -> Result<String, DecodeError> {
    let format =
        SourceFormat::from_mime(mime).ok_or_else(|| DecodeError::UnsupportedFormat(mime.to_string()))?;

    if bytes.is_empty() {
        return Err(DecodeError::EmptySource);
    }

    Ok(to_data_uri(format.mime(), bytes))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if the container has no EXIF data.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
