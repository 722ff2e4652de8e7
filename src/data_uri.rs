//! Recognition and decoding of base64 `data:` URIs.

use crate::base64;

/// A decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone)]
pub struct DataUri {
    /// MIME type between `data:` and the first `;`, if non-empty.
    pub mime: Option<String>,
    /// Decoded payload bytes.
    pub data: Vec<u8>,
}

/// Parse a base64 data URI.
///
/// Returns `None` if the string is not a `data:` URI, has no comma, lacks a
/// `;base64` marker (non-base64 data URIs are unsupported), or the payload
/// decodes to no bytes — an empty payload is not a usable resource.
pub fn parse_data_uri(uri: &str) -> Option<DataUri> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.contains(";base64") {
        return None;
    }
    let mime = match meta.split(';').next() {
        Some("") | None => None,
        Some(m) => Some(m.to_string()),
    };
    let data = base64::decode(payload).filter(|d| !d.is_empty())?;
    Some(DataUri { mime, data })
}
