//! Mesh extraction tests.

use super::triangle_asset;
use crate::types::*;
use crate::{to_renderable_mesh, GltfError};

/// Fixture with interleaved POSITION/NORMAL/TEXCOORD_0 data and u16 indices.
fn quad_asset() -> GltfAsset {
    // 4 vertices, 8 floats each: position, normal, uv.
    let vertices: [[f32; 8]; 4] = [
        [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0],
        [1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0],
    ];
    let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

    let mut data: Vec<u8> = vertices
        .iter()
        .flatten()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    let vertex_bytes = data.len() as u64;
    data.extend(indices.iter().flat_map(|i| i.to_le_bytes()));

    let mut asset = GltfAsset::default();
    asset.asset.version = "2.0".to_string();
    asset.buffers.push(Buffer {
        byte_length: data.len() as u64,
        data: Some(data),
        ..Default::default()
    });
    // One interleaved view for vertices, one tight view for indices.
    asset.buffer_views.push(BufferView {
        buffer: 0,
        byte_length: vertex_bytes,
        byte_stride: Some(32),
        ..Default::default()
    });
    asset.buffer_views.push(BufferView {
        buffer: 0,
        byte_offset: vertex_bytes,
        byte_length: 12,
        ..Default::default()
    });

    let float_accessor = |offset: u64, ty: AccessorType| Accessor {
        buffer_view: Some(0),
        byte_offset: Some(offset),
        count: 4,
        component_type: COMPONENT_FLOAT,
        accessor_type: ty,
        ..Default::default()
    };
    asset.accessors.push(float_accessor(0, AccessorType::Vec3)); // POSITION
    asset.accessors.push(float_accessor(12, AccessorType::Vec3)); // NORMAL
    asset.accessors.push(float_accessor(24, AccessorType::Vec2)); // TEXCOORD_0
    asset.accessors.push(Accessor {
        buffer_view: Some(1),
        count: 6,
        component_type: COMPONENT_UNSIGNED_SHORT,
        accessor_type: AccessorType::Scalar,
        ..Default::default()
    });

    let attributes = AttributeSet {
        attributes: vec![
            Attribute {
                name: "POSITION".to_string(),
                accessor: 0,
            },
            Attribute {
                name: "NORMAL".to_string(),
                accessor: 1,
            },
            Attribute {
                name: "TEXCOORD_0".to_string(),
                accessor: 2,
            },
        ],
    };
    asset.meshes.push(Mesh {
        primitives: vec![Primitive {
            attributes,
            indices: Some(3),
            mode: Some(MODE_TRIANGLES),
            ..Default::default()
        }],
        ..Default::default()
    });
    asset
}

#[test]
fn test_extract_triangle_defaults() {
    let asset = triangle_asset();
    let meshes = to_renderable_mesh(&asset, 0).expect("extraction failed");
    assert_eq!(meshes.len(), 1, "one primitive, one render mesh");

    let mesh = &meshes[0];
    assert_eq!(mesh.vertices.len(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2], "indices synthesized without an accessor");
    assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
    for (i, vertex) in mesh.vertices.iter().enumerate() {
        assert_eq!(vertex.normal, [0.0, 0.0, 1.0], "vertex {i}: default normal");
        assert_eq!(vertex.uv, [0.0, 0.0], "vertex {i}: default uv");
    }
}

#[test]
fn test_extract_interleaved_quad() {
    let asset = quad_asset();
    let meshes = to_renderable_mesh(&asset, 0).expect("extraction failed");
    let mesh = &meshes[0];

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(mesh.vertices[2].position, [1.0, 1.0, 0.0]);
    assert_eq!(mesh.vertices[2].normal, [0.0, 0.0, 1.0]);
    assert_eq!(mesh.vertices[2].uv, [1.0, 1.0]);
    assert_eq!(mesh.vertices[3].uv, [0.0, 1.0]);
}

#[test]
fn test_u8_and_u32_indices() {
    for (component_type, bytes) in [
        (COMPONENT_UNSIGNED_BYTE, vec![0u8, 1, 2]),
        (
            COMPONENT_UNSIGNED_INT,
            [0u32, 1, 2].iter().flat_map(|i| i.to_le_bytes()).collect(),
        ),
    ] {
        let mut asset = triangle_asset();
        let offset = asset.buffers[0].data.as_ref().unwrap().len() as u64;
        asset.buffers[0].data.as_mut().unwrap().extend(&bytes);
        asset.buffers[0].byte_length += bytes.len() as u64;
        asset.buffer_views.push(BufferView {
            buffer: 0,
            byte_offset: offset,
            byte_length: bytes.len() as u64,
            ..Default::default()
        });
        asset.accessors.push(Accessor {
            buffer_view: Some(1),
            count: 3,
            component_type,
            accessor_type: AccessorType::Scalar,
            ..Default::default()
        });
        asset.meshes[0].primitives[0].indices = Some(1);

        let meshes = to_renderable_mesh(&asset, 0).expect("extraction failed");
        assert_eq!(
            meshes[0].indices,
            vec![0, 1, 2],
            "component type {component_type}"
        );
    }
}

#[test]
fn test_mesh_index_out_of_range() {
    let asset = triangle_asset();
    let err = to_renderable_mesh(&asset, 5).unwrap_err();
    assert!(matches!(err, GltfError::InvalidArgument(_)), "got {err:?}");
}

#[test]
fn test_non_triangle_mode_is_unsupported() {
    for mode in [0, 1] {
        // POINTS, LINES
        let mut asset = triangle_asset();
        asset.meshes[0].primitives[0].mode = Some(mode);
        let err = to_renderable_mesh(&asset, 0).unwrap_err();
        assert!(
            matches!(err, GltfError::Unsupported(_)),
            "mode {mode}: got {err:?}"
        );
    }
}

#[test]
fn test_position_layout_is_validated() {
    let mut asset = triangle_asset();
    asset.accessors[0].accessor_type = AccessorType::Vec2;
    let err = to_renderable_mesh(&asset, 0).unwrap_err();
    assert!(matches!(err, GltfError::Unsupported(_)), "got {err:?}");

    let mut asset = triangle_asset();
    asset.accessors[0].component_type = COMPONENT_UNSIGNED_SHORT;
    let err = to_renderable_mesh(&asset, 0).unwrap_err();
    assert!(matches!(err, GltfError::Unsupported(_)), "got {err:?}");
}

#[test]
fn test_missing_position_fails() {
    let mut asset = triangle_asset();
    asset.meshes[0].primitives[0].attributes.attributes.clear();
    let err = to_renderable_mesh(&asset, 0).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}

#[test]
fn test_unsupported_index_component_type() {
    let mut asset = quad_asset();
    asset.accessors[3].component_type = COMPONENT_FLOAT;
    let err = to_renderable_mesh(&asset, 0).unwrap_err();
    assert!(matches!(err, GltfError::Unsupported(_)), "got {err:?}");
}

#[test]
fn test_huge_byte_offsets_are_an_error() {
    // Offsets that overflow the address computation must fail, not panic.
    let mut asset = triangle_asset();
    asset.buffer_views[0].byte_offset = u64::MAX - 8;
    asset.accessors[0].byte_offset = Some(16);
    let err = to_renderable_mesh(&asset, 0).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");

    let mut asset = triangle_asset();
    asset.buffer_views[0].byte_stride = Some(u64::MAX / 2);
    let err = to_renderable_mesh(&asset, 0).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}

#[test]
fn test_read_past_buffer_end_fails() {
    let mut asset = triangle_asset();
    asset.accessors[0].count = 1000;
    let err = to_renderable_mesh(&asset, 0).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}

#[test]
fn test_unloaded_buffer_fails() {
    let mut asset = triangle_asset();
    asset.buffers[0].data = None;
    let err = to_renderable_mesh(&asset, 0).unwrap_err();
    assert!(matches!(err, GltfError::Io(_)), "got {err:?}");
}
