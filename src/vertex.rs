//! Decoding accessor data into renderable vertex and index streams.
//!
//! Only triangle-list geometry is handled. POSITION must be a VEC3 of f32;
//! NORMAL and TEXCOORD_0 are optional and fall back to `(0, 0, 1)` and
//! `(0, 0)`. All buffer reads are range checked against the owning buffer.

use bytemuck::{Pod, Zeroable};

use crate::error::GltfError;
use crate::types::*;

/// One interleaved vertex of an extracted mesh, laid out for GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Flat geometry decoded from one mesh primitive.
#[derive(Debug, Clone, Default)]
pub struct RenderMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// An accessor resolved down to the bytes it reads from.
struct Stream<'a> {
    data: &'a [u8],
    /// View offset plus accessor offset.
    base: usize,
    stride: Option<usize>,
    count: usize,
}

fn resolve_stream<'a>(
    asset: &'a GltfAsset,
    accessor_index: usize,
    semantic: &str,
) -> Result<(Stream<'a>, &'a Accessor), GltfError> {
    let accessor = asset.accessors.get(accessor_index).ok_or_else(|| {
        GltfError::malformed(format!("{semantic} accessor index {accessor_index}"))
    })?;
    let view_index = accessor.buffer_view.ok_or_else(|| {
        GltfError::malformed(format!("{semantic} accessor has no bufferView"))
    })?;
    let view = asset.buffer_views.get(view_index).ok_or_else(|| {
        GltfError::malformed(format!("{semantic} bufferView index {view_index}"))
    })?;
    let buffer = asset.buffers.get(view.buffer).ok_or_else(|| {
        GltfError::malformed(format!("{semantic} buffer index {}", view.buffer))
    })?;
    let data = buffer.data.as_deref().ok_or_else(|| {
        GltfError::Io(format!("buffer {} has no loaded data", view.buffer))
    })?;
    // Offsets, strides, and counts come straight from the document; all
    // arithmetic on them is overflow checked.
    let base = view
        .byte_offset
        .checked_add(accessor.byte_offset.unwrap_or(0))
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| GltfError::Io(format!("{semantic} accessor offset out of range")))?;
    let stride = match view.byte_stride {
        Some(s) => Some(usize::try_from(s).map_err(|_| {
            GltfError::Io(format!("{semantic} bufferView stride out of range"))
        })?),
        None => None,
    };
    let count = usize::try_from(accessor.count)
        .map_err(|_| GltfError::Io(format!("{semantic} accessor count out of range")))?;
    let stream = Stream {
        data,
        base,
        stride,
        count,
    };
    Ok((stream, accessor))
}

fn require_float_layout(
    accessor: &Accessor,
    accessor_type: AccessorType,
    semantic: &str,
) -> Result<(), GltfError> {
    if accessor.component_type != COMPONENT_FLOAT || accessor.accessor_type != accessor_type {
        return Err(GltfError::Unsupported(format!(
            "{semantic} must be {} of float, got {} of component type {}",
            accessor_type.as_str(),
            accessor.accessor_type.as_str(),
            accessor.component_type
        )));
    }
    Ok(())
}

/// Read `N` little-endian f32 values at `stream.base + element * stride`.
fn read_floats<const N: usize>(stream: &Stream, element: usize) -> Result<[f32; N], GltfError> {
    let stride = stream.stride.unwrap_or(N * 4);
    let bytes = element
        .checked_mul(stride)
        .and_then(|offset| stream.base.checked_add(offset))
        .and_then(|start| Some(start..start.checked_add(N * 4)?))
        .and_then(|range| stream.data.get(range))
        .ok_or_else(|| GltfError::Io("vertex attribute read past end of buffer".into()))?;
    let mut out = [0.0f32; N];
    for (i, chunk) in bytes.chunks_exact(4).enumerate() {
        out[i] = f32::from_le_bytes(chunk.try_into().unwrap_or([0; 4]));
    }
    Ok(out)
}

fn decode_indices(stream: &Stream, accessor: &Accessor) -> Result<Vec<u32>, GltfError> {
    let component_size = match accessor.component_type {
        COMPONENT_UNSIGNED_BYTE => 1,
        COMPONENT_UNSIGNED_SHORT => 2,
        COMPONENT_UNSIGNED_INT => 4,
        other => {
            return Err(GltfError::Unsupported(format!(
                "index component type {other}"
            )))
        }
    };
    let stride = stream.stride.unwrap_or(component_size);
    // Capacity is a hint only; the count is bounded by the reads below.
    let mut indices = Vec::with_capacity(stream.count.min(stream.data.len()));
    for i in 0..stream.count {
        let bytes = i
            .checked_mul(stride)
            .and_then(|offset| stream.base.checked_add(offset))
            .and_then(|start| Some(start..start.checked_add(component_size)?))
            .and_then(|range| stream.data.get(range))
            .ok_or_else(|| GltfError::Io("index read past end of buffer".into()))?;
        let value = match component_size {
            1 => u32::from(bytes[0]),
            2 => u32::from(u16::from_le_bytes([bytes[0], bytes[1]])),
            _ => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        };
        indices.push(value);
    }
    Ok(indices)
}

fn extract_primitive(asset: &GltfAsset, prim: &Primitive) -> Result<RenderMesh, GltfError> {
    if let Some(mode) = prim.mode {
        if mode != MODE_TRIANGLES {
            return Err(GltfError::Unsupported(format!("primitive mode {mode}")));
        }
    }

    let pos_index = prim
        .attributes
        .get("POSITION")
        .ok_or_else(|| GltfError::malformed("primitive without POSITION attribute"))?;
    let (pos, pos_acc) = resolve_stream(asset, pos_index, "POSITION")?;
    require_float_layout(pos_acc, AccessorType::Vec3, "POSITION")?;

    let mut vertices = Vec::with_capacity(pos.count.min(pos.data.len()));
    for v in 0..pos.count {
        vertices.push(Vertex {
            position: read_floats::<3>(&pos, v)?,
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
        });
    }

    if let Some(index) = prim.attributes.get("NORMAL") {
        let (stream, accessor) = resolve_stream(asset, index, "NORMAL")?;
        require_float_layout(accessor, AccessorType::Vec3, "NORMAL")?;
        for (v, vertex) in vertices.iter_mut().enumerate().take(stream.count) {
            vertex.normal = read_floats::<3>(&stream, v)?;
        }
    }
    if let Some(index) = prim.attributes.get("TEXCOORD_0") {
        let (stream, accessor) = resolve_stream(asset, index, "TEXCOORD_0")?;
        require_float_layout(accessor, AccessorType::Vec2, "TEXCOORD_0")?;
        for (v, vertex) in vertices.iter_mut().enumerate().take(stream.count) {
            vertex.uv = read_floats::<2>(&stream, v)?;
        }
    }

    let indices = match prim.indices {
        Some(accessor_index) => {
            let (stream, accessor) = resolve_stream(asset, accessor_index, "indices")?;
            decode_indices(&stream, accessor)?
        }
        None => (0..vertices.len() as u32).collect(),
    };

    Ok(RenderMesh { vertices, indices })
}

/// Decode every primitive of `asset.meshes[mesh_index]` into flat geometry.
pub(crate) fn extract_mesh(
    asset: &GltfAsset,
    mesh_index: usize,
) -> Result<Vec<RenderMesh>, GltfError> {
    let mesh = asset.meshes.get(mesh_index).ok_or_else(|| {
        GltfError::InvalidArgument(format!(
            "mesh index {mesh_index} out of range ({} meshes)",
            asset.meshes.len()
        ))
    })?;
    mesh.primitives
        .iter()
        .map(|prim| extract_primitive(asset, prim))
        .collect()
}
