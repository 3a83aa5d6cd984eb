//! `data:` URI serialization.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Wrap encoded bytes in a base64 `data:` URI.
///
/// This is the string the hosting form stores in its profile image field.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
