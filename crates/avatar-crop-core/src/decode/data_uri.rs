//! `data:` URI parsing for image sources.
//!
//! The hosting form reads picked files with a `FileReader` and stores the
//! result as a data URI, so that is the common shape of an image source:
//!
//! ```text
//! data:<mime>[;<param>]*[;base64],<payload>
//! ```

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use super::DecodeError;

/// Lenient base64: padding is optional on input.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A parsed data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type, lowercased. Empty when the URI omits it.
    pub mime: String,
    /// Decoded payload bytes.
    pub data: Vec<u8>,
}

/// Parse a `data:` URI into its media type and payload.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDataUri` if the scheme or the comma
/// separator is missing, or the payload is not valid base64 / percent
/// encoding.
pub fn parse_data_uri(src: &str) -> Result<DataUri, DecodeError> {
    let src = src.trim();

    let rest = src
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &src[5..])
        .ok_or_else(|| DecodeError::InvalidDataUri("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUri("missing ',' separator".to_string()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let data = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        LENIENT_BASE64
            .decode(compact)
            .map_err(|e| DecodeError::InvalidDataUri(format!("bad base64 payload: {}", e)))?
    } else {
        percent_decode(payload)?
    };

    Ok(DataUri { mime, data })
}

fn percent_decode(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = payload.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| {
                    DecodeError::InvalidDataUri(format!("bad percent escape at byte {}", i))
                })?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    Ok(out)
}
