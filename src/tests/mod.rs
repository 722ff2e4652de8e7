//! Test support: programmatic fixtures shared across the codec tests.

mod glb_test;
mod mesh_test;

use std::path::PathBuf;

use crate::types::*;

/// Little-endian bytes of three VEC3 f32 positions forming a unit triangle.
fn triangle_position_bytes() -> Vec<u8> {
    let positions: [f32; 9] = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0,
    ];
    positions.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// A complete in-memory asset: one buffer, one POSITION accessor, one
/// single-primitive mesh, one node, one scene.
fn triangle_asset() -> GltfAsset {
    let data = triangle_position_bytes();
    let mut asset = GltfAsset::default();
    asset.asset.version = "2.0".to_string();
    asset.asset.generator = Some("fixture".to_string());

    asset.buffers.push(Buffer {
        byte_length: data.len() as u64,
        data: Some(data.clone()),
        ..Default::default()
    });
    asset.buffer_views.push(BufferView {
        buffer: 0,
        byte_length: data.len() as u64,
        ..Default::default()
    });
    asset.accessors.push(Accessor {
        buffer_view: Some(0),
        count: 3,
        component_type: COMPONENT_FLOAT,
        accessor_type: AccessorType::Vec3,
        min: Some(vec![0.0, 0.0, 0.0]),
        max: Some(vec![1.0, 1.0, 0.0]),
        ..Default::default()
    });

    let mut attributes = AttributeSet::default();
    attributes.attributes.push(Attribute {
        name: "POSITION".to_string(),
        accessor: 0,
    });
    asset.meshes.push(Mesh {
        name: Some("triangle".to_string()),
        primitives: vec![Primitive {
            attributes,
            ..Default::default()
        }],
        ..Default::default()
    });

    asset.nodes.push(Node {
        name: Some("root".to_string()),
        mesh: Some(0),
        ..Default::default()
    });
    asset.scenes.push(Scene {
        nodes: vec![0],
        ..Default::default()
    });
    asset.scene = Some(0);
    asset
}

/// Write `bytes` under `name` in `dir` and return the full path.
fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("failed to write test file");
    path
}
