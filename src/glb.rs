//! Binary glTF (GLB) container codec.
//!
//! A GLB file is a 12-byte header (`magic`, `version`, total `length`)
//! followed by a sequence of chunks, each `(length: u32, type: u32, payload)`
//! with the payload padded to a 4-byte boundary. The JSON chunk is required;
//! the BIN chunk is optional. All integers are little-endian.

use crate::error::GltfError;

pub const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
pub const GLB_VERSION: u32 = 2;
pub const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
pub const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

/// The two payloads of a GLB container.
#[derive(Debug)]
pub struct Glb {
    /// The glTF JSON document text.
    pub json: Vec<u8>,
    /// The binary chunk, if present.
    pub bin: Option<Vec<u8>>,
}

fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

impl Glb {
    /// Parse a GLB container from raw file bytes.
    ///
    /// Unknown chunk types are skipped by length. A truncated chunk header
    /// or payload, a bad magic/version, or a missing JSON chunk all fail
    /// with an error rather than yielding a partial container.
    pub fn from_bytes(data: &[u8]) -> Result<Glb, GltfError> {
        if data.len() < 12 {
            return Err(GltfError::io("GLB file shorter than its 12-byte header"));
        }
        let magic = read_u32(data, 0).unwrap_or(0);
        let version = read_u32(data, 4).unwrap_or(0);
        let length = read_u32(data, 8).unwrap_or(0) as usize;
        if magic != GLB_MAGIC {
            return Err(GltfError::io(format!("bad GLB magic 0x{magic:08X}")));
        }
        if version != GLB_VERSION {
            return Err(GltfError::io(format!("unsupported GLB version {version}")));
        }
        if length > data.len() {
            return Err(GltfError::io(format!(
                "GLB declares {length} bytes but the file has {}",
                data.len()
            )));
        }

        // Chunks live inside the declared length; bytes past it are ignored.
        let data = &data[..length];

        let mut json = None;
        let mut bin = None;
        let mut offset = 12;
        while offset < data.len() {
            let (Some(chunk_length), Some(chunk_type)) =
                (read_u32(data, offset), read_u32(data, offset + 4))
            else {
                return Err(GltfError::io("truncated GLB chunk header"));
            };
            offset += 8;
            let chunk_length = chunk_length as usize;
            let Some(payload) = data.get(offset..offset + chunk_length) else {
                return Err(GltfError::io("GLB chunk payload past the declared length"));
            };
            match chunk_type {
                CHUNK_JSON => json = Some(payload.to_vec()),
                CHUNK_BIN => bin = Some(payload.to_vec()),
                _ => {} // skip unknown chunks
            }
            offset += chunk_length;
        }

        match json {
            Some(json) => Ok(Glb { json, bin }),
            None => Err(GltfError::io("GLB container has no JSON chunk")),
        }
    }

    /// Serialize a JSON document and optional binary blob into GLB bytes.
    ///
    /// The JSON chunk is padded to 4 bytes with ASCII spaces, the BIN chunk
    /// with zeros; the header `length` is the exact total emitted.
    pub fn to_bytes(json: &[u8], bin: Option<&[u8]>) -> Vec<u8> {
        let json_padded = json.len().next_multiple_of(4);
        let bin_len = bin.map_or(0, <[u8]>::len);
        let bin_padded = bin_len.next_multiple_of(4);
        let total = 12 + 8 + json_padded + if bin_len > 0 { 8 + bin_padded } else { 0 };

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
        out.extend_from_slice(&GLB_VERSION.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());

        out.extend_from_slice(&(json_padded as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
        out.extend_from_slice(json);
        out.resize(out.len() + (json_padded - json.len()), b' ');

        if let Some(bin) = bin {
            if !bin.is_empty() {
                out.extend_from_slice(&(bin_padded as u32).to_le_bytes());
                out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
                out.extend_from_slice(bin);
                out.resize(out.len() + (bin_padded - bin.len()), 0);
            }
        }
        out
    }
}
