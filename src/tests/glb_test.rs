//! GLB container codec tests.

use crate::error::GltfError;
use crate::glb::{Glb, CHUNK_BIN, CHUNK_JSON, GLB_MAGIC, GLB_VERSION};

#[test]
fn test_header_layout() {
    let json = br#"{"asset":{"version":"2.0"}}"#;
    let bytes = Glb::to_bytes(json, None);

    assert_eq!(&bytes[0..4], &GLB_MAGIC.to_le_bytes(), "bad magic");
    assert_eq!(&bytes[4..8], &GLB_VERSION.to_le_bytes(), "bad version");
    let declared = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    assert_eq!(
        declared as usize,
        bytes.len(),
        "header length must match the emitted byte count"
    );
    assert_eq!(&bytes[16..20], &CHUNK_JSON.to_le_bytes(), "first chunk must be JSON");
}

#[test]
fn test_json_padded_with_spaces() {
    // 27 bytes of JSON, so one padding byte.
    let json = br#"{"asset":{"version":"2.0"}}"#;
    let bytes = Glb::to_bytes(json, None);
    let glb = Glb::from_bytes(&bytes).expect("parse failed");

    assert_eq!(glb.json.len() % 4, 0, "JSON chunk must be 4-byte aligned");
    assert_eq!(&glb.json[..json.len()], json);
    assert!(
        glb.json[json.len()..].iter().all(|&b| b == b' '),
        "JSON padding must be ASCII spaces"
    );
    assert!(glb.bin.is_none(), "no BIN chunk was written");
}

#[test]
fn test_bin_padded_with_zeros() {
    let json = br#"{"asset":{"version":"2.0"}}"#;
    let bin = [1u8, 2, 3, 4, 5];
    let bytes = Glb::to_bytes(json, Some(&bin));
    let glb = Glb::from_bytes(&bytes).expect("parse failed");

    let parsed_bin = glb.bin.expect("BIN chunk missing");
    assert_eq!(parsed_bin.len(), 8, "5 payload bytes pad to 8");
    assert_eq!(&parsed_bin[..5], &bin);
    assert!(parsed_bin[5..].iter().all(|&b| b == 0), "BIN padding must be zeros");
}

#[test]
fn test_empty_bin_chunk_is_omitted() {
    let json = br#"{}"#;
    let with_empty = Glb::to_bytes(json, Some(&[]));
    let without = Glb::to_bytes(json, None);
    assert_eq!(with_empty, without, "an empty BIN slice must not emit a chunk");
}

#[test]
fn test_unknown_chunks_are_skipped() {
    let json = br#"{"a":1}_"#; // 8 bytes, already aligned
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&GLB_VERSION.to_le_bytes());
    let total = 12 + (8 + 4) + (8 + json.len()) as u32;
    bytes.extend_from_slice(&total.to_le_bytes());
    // Unknown chunk before the JSON chunk.
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(&0x1234_5678u32.to_le_bytes());
    bytes.extend_from_slice(&[0xAA; 4]);
    bytes.extend_from_slice(&(json.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    bytes.extend_from_slice(json);

    let glb = Glb::from_bytes(&bytes).expect("unknown chunk must be skipped");
    assert_eq!(glb.json, json);
}

#[test]
fn test_bad_magic_fails() {
    let mut bytes = Glb::to_bytes(br#"{}"#, None);
    bytes[0] = b'X';
    let err = Glb::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}

#[test]
fn test_bad_version_fails() {
    let mut bytes = Glb::to_bytes(br#"{}"#, None);
    bytes[4] = 3;
    let err = Glb::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}

#[test]
fn test_short_file_fails() {
    let err = Glb::from_bytes(&[0u8; 7]).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}

#[test]
fn test_declared_length_beyond_file_fails() {
    let mut bytes = Glb::to_bytes(br#"{}"#, None);
    let truncated = &bytes[..bytes.len() - 2];
    assert!(Glb::from_bytes(truncated).is_err(), "truncated file must fail");

    // Also reject a header that overstates the length.
    let len = bytes.len() as u32 + 100;
    bytes[8..12].copy_from_slice(&len.to_le_bytes());
    assert!(Glb::from_bytes(&bytes).is_err(), "overlong header must fail");
}

#[test]
fn test_truncated_chunk_payload_fails() {
    let json = br#"{"a":1}_"#;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&GLB_VERSION.to_le_bytes());
    let total = 12 + 8 + json.len() as u32;
    bytes.extend_from_slice(&total.to_le_bytes());
    // Chunk declares more payload than the file holds.
    bytes.extend_from_slice(&64u32.to_le_bytes());
    bytes.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    bytes.extend_from_slice(json);

    let err = Glb::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}

#[test]
fn test_chunk_past_declared_length_fails() {
    let json = br#"{"a":1}_"#;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&GLB_VERSION.to_le_bytes());
    // Declared total covers the chunk header but only half its payload;
    // the rest of the payload is in the file, past the declared length.
    let total = 12 + 8 + json.len() as u32 / 2;
    bytes.extend_from_slice(&total.to_le_bytes());
    bytes.extend_from_slice(&(json.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    bytes.extend_from_slice(json);

    let err = Glb::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}

#[test]
fn test_trailing_bytes_past_declared_length_ignored() {
    let json = br#"{"asset":{"version":"2.0"}}"#;
    let mut bytes = Glb::to_bytes(json, None);
    bytes.extend_from_slice(b"garbage!");

    let glb = Glb::from_bytes(&bytes).expect("trailing bytes must be ignored");
    assert_eq!(&glb.json[..json.len()], json);
}

#[test]
fn test_missing_json_chunk_fails() {
    let bin = [0u8; 4];
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&GLB_VERSION.to_le_bytes());
    let total = 12 + 8 + bin.len() as u32;
    bytes.extend_from_slice(&total.to_le_bytes());
    bytes.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    bytes.extend_from_slice(&bin);

    let err = Glb::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}
