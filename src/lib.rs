//! glTF 2.0 asset codec.
//!
//! Loads `.gltf`/`.glb` files into a CPU-side asset graph covering buffers,
//! buffer views, accessors, images, samplers, textures, materials, meshes,
//! nodes, scenes, skins, animations, and cameras, and writes an asset graph
//! back to textual glTF (with external or embedded resources) or to a single
//! binary GLB file. Unknown `extras`/`extensions` subtrees are carried
//! through a load/save round trip unmodified.
//!
//! # Resource resolution
//!
//! Buffer and image payloads come from three places: files next to the
//! document (relative URIs resolved against its directory), base64
//! `data:` URIs, and the GLB binary chunk. [`LoadOptions`] controls which of
//! them are materialized; entities whose payload is skipped keep their
//! metadata so the document can still be rewritten.
//!
//! # Example
//!
//! ```ignore
//! use redlilium_gltf::{load, LoadOptions};
//!
//! let asset = load("model.glb".as_ref(), &LoadOptions::default()).unwrap();
//! println!("meshes: {}", asset.meshes.len());
//! for mesh in redlilium_gltf::to_renderable_mesh(&asset, 0).unwrap() {
//!     println!("{} vertices, {} indices", mesh.vertices.len(), mesh.indices.len());
//! }
//! ```

pub mod base64;
mod data_uri;
mod error;
mod exporter;
mod glb;
mod loader;
#[cfg(test)]
mod tests;
pub mod types;
mod vertex;

pub use data_uri::{parse_data_uri, DataUri};
pub use error::GltfError;
pub use glb::Glb;
pub use types::*;
pub use vertex::{RenderMesh, Vertex};

use std::fs;
use std::path::Path;

use log::debug;

use crate::exporter::ExportContext;
use crate::loader::LoadContext;

/// Controls which binary payloads a load materializes.
///
/// The default loads everything. Turning a flag off keeps the affected
/// entities as metadata with `data: None`.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Resolve buffer payloads (external files, data URIs, GLB chunk).
    pub load_buffers: bool,
    /// Resolve image payloads (external files, data URIs, buffer views).
    pub load_images: bool,
    /// Decode base64 `data:` URIs. When off, a data-URI payload is treated
    /// like an (unresolvable) file path.
    pub decode_data_uris: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            load_buffers: true,
            load_images: true,
            decode_data_uris: true,
        }
    }
}

/// Controls the output container and resource-embedding strategy of a write.
///
/// The default writes a textual `.gltf` document with external payload
/// files. `write_glb` overrides the embed flags: every buffer lands in the
/// GLB binary chunk and no sibling files are produced.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Emit a single binary GLB container instead of a JSON document.
    pub write_glb: bool,
    /// Inline buffer payloads as base64 data URIs.
    pub embed_buffers: bool,
    /// Inline image payloads as base64 data URIs.
    pub embed_images: bool,
}

/// Load a glTF or GLB file from disk.
///
/// The container is picked by file extension: `.glb` (case-insensitive)
/// parses the binary container first, anything else is treated as a JSON
/// document. The document's directory becomes the base for relative URIs
/// and is recorded on the returned asset.
pub fn load(path: &Path, options: &LoadOptions) -> Result<GltfAsset, GltfError> {
    if path.as_os_str().is_empty() {
        return Err(GltfError::InvalidArgument("empty input path".into()));
    }
    let data = fs::read(path)
        .map_err(|e| GltfError::Io(format!("failed to read {}: {e}", path.display())))?;
    debug!("loading {} ({} bytes)", path.display(), data.len());

    let is_glb = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("glb"));

    let base_dir = path.parent().map(Path::to_path_buf);
    let glb = if is_glb {
        Some(Glb::from_bytes(&data)?)
    } else {
        None
    };
    let json = glb.as_ref().map_or(data.as_slice(), |g| g.json.as_slice());
    let root: serde_json::Value = serde_json::from_slice(json)?;

    let context = LoadContext {
        options,
        base_dir: base_dir.as_deref(),
        glb_bin: glb.as_ref().and_then(|g| g.bin.as_deref()),
    };
    let mut asset = context.parse(&root)?;
    asset.source_path = Some(path.to_path_buf());
    asset.base_dir = base_dir;
    Ok(asset)
}

/// Write an asset graph to disk.
///
/// Depending on `options` this produces a JSON document plus external
/// payload files, a JSON document with embedded data URIs, or a single GLB
/// file. Sibling files already written when a later step fails are left in
/// place.
pub fn write(asset: &GltfAsset, path: &Path, options: &WriteOptions) -> Result<(), GltfError> {
    let context = ExportContext::new(asset, path, options)?;
    context.write(path)
}

/// Decode the primitives of `asset.meshes[mesh_index]` into flat vertex and
/// index streams, one [`RenderMesh`] per primitive.
///
/// Only triangle-list primitives with float POSITION data are supported;
/// the relevant buffers must have been loaded.
pub fn to_renderable_mesh(
    asset: &GltfAsset,
    mesh_index: usize,
) -> Result<Vec<RenderMesh>, GltfError> {
    vertex::extract_mesh(asset, mesh_index)
}

/// Look up the decoded payload of `asset.images[image_index]`.
///
/// Fails with [`GltfError::NotFound`] when the image carries no loaded
/// data, e.g. after a load with `load_images = false`.
pub fn image_payload(asset: &GltfAsset, image_index: usize) -> Result<&[u8], GltfError> {
    let image = asset.images.get(image_index).ok_or_else(|| {
        GltfError::InvalidArgument(format!(
            "image index {image_index} out of range ({} images)",
            asset.images.len()
        ))
    })?;
    image
        .data
        .as_deref()
        .ok_or_else(|| GltfError::NotFound(format!("image {image_index} has no loaded payload")))
}

/// Resolve a texture to its source image's decoded payload.
pub fn texture_payload(asset: &GltfAsset, texture_index: usize) -> Result<&[u8], GltfError> {
    let texture = asset.textures.get(texture_index).ok_or_else(|| {
        GltfError::InvalidArgument(format!(
            "texture index {texture_index} out of range ({} textures)",
            asset.textures.len()
        ))
    })?;
    let source = texture.source.ok_or_else(|| {
        GltfError::NotFound(format!("texture {texture_index} has no source image"))
    })?;
    image_payload(asset, source)
}
