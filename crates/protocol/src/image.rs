//! Encoded still images and their data-URL preview form.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// MIME type of every capture the client produces.
pub const JPEG_MIME: &str = "image/jpeg";

/// Encodes `bytes` as a `data:` URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
	format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
