//! Base64 encoding and decoding for data URIs.
//!
//! Only used for `data:` URI payloads, so the decoder follows the permissive
//! convention of common glTF tooling: trailing whitespace is trimmed and
//! characters outside the alphabet decode as zero rather than failing.

const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encode bytes with the standard base64 alphabet and `=` padding.
///
/// Empty input encodes to an empty string; output length is always
/// `4 * ceil(n / 3)`.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;
        out.push(TABLE[(triple >> 18) as usize & 0x3F] as char);
        out.push(TABLE[(triple >> 12) as usize & 0x3F] as char);
        out.push(if chunk.len() > 1 {
            TABLE[(triple >> 6) as usize & 0x3F] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            TABLE[triple as usize & 0x3F] as char
        } else {
            '='
        });
    }
    out
}

/// Decode base64 text to bytes.
///
/// Trailing ASCII whitespace is ignored. Characters outside the alphabet
/// decode as zero. Empty (or whitespace-only) input decodes to no bytes,
/// so `decode(&encode(b)) == Some(b)` holds for every byte sequence.
pub fn decode(input: &str) -> Option<Vec<u8>> {
    let trimmed = input.trim_end();
    let bytes = trimmed.as_bytes();
    if bytes.is_empty() {
        return Some(Vec::new());
    }

    let mut padding = 0;
    if bytes.last() == Some(&b'=') {
        padding += 1;
    }
    if bytes.len() >= 2 && bytes[bytes.len() - 2] == b'=' {
        padding += 1;
    }
    let out_len = ((bytes.len() / 4) * 3).saturating_sub(padding);

    let mut out = Vec::with_capacity(out_len);
    for quad in bytes.chunks(4) {
        let mut val: u32 = 0;
        for i in 0..4 {
            let v = quad.get(i).map_or(0, |&c| sextet(c));
            val = (val << 6) | v as u32;
        }
        for shift in [16u32, 8, 0] {
            if out.len() < out_len {
                out.push((val >> shift) as u8);
            }
        }
    }
    Some(out)
}

fn sextet(c: u8) -> u8 {
    match c {
        b'A'..=b'Z' => c - b'A',
        b'a'..=b'z' => c - b'a' + 26,
        b'0'..=b'9' => c - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        // '=' and anything else decode as zero.
        _ => 0,
    }
}
