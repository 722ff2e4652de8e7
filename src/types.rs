//! The in-memory glTF 2.0 asset graph.
//!
//! Entities reference each other by plain index into the owning sequences on
//! [`GltfAsset`] (the graph can contain cycles-by-index, and indices survive
//! serialization unchanged). Optional fields are `Option<T>`; a `None` field
//! is omitted entirely when the asset is written back out. Every entity
//! carries opaque `extras`/`extensions` JSON subtrees so unknown and
//! forward-compatible fields survive a load → save round trip.
//!
//! The whole graph is built by one load call (or by hand for writing) and
//! released by dropping the asset; byte payloads and JSON subtrees are
//! single-owner.

use std::path::PathBuf;

use serde_json::Value;

/// glTF component type enums (GL constants).
pub const COMPONENT_BYTE: i64 = 5120;
pub const COMPONENT_UNSIGNED_BYTE: i64 = 5121;
pub const COMPONENT_SHORT: i64 = 5122;
pub const COMPONENT_UNSIGNED_SHORT: i64 = 5123;
pub const COMPONENT_UNSIGNED_INT: i64 = 5125;
pub const COMPONENT_FLOAT: i64 = 5126;

/// Primitive draw mode for triangle lists (the only mode mesh extraction
/// supports).
pub const MODE_TRIANGLES: i64 = 4;

/// Element shape of an accessor (`SCALAR` .. `MAT4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    /// Number of components per element (1..16).
    pub fn component_count(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SCALAR" => Some(Self::Scalar),
            "VEC2" => Some(Self::Vec2),
            "VEC3" => Some(Self::Vec3),
            "VEC4" => Some(Self::Vec4),
            "MAT2" => Some(Self::Mat2),
            "MAT3" => Some(Self::Mat3),
            "MAT4" => Some(Self::Mat4),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Mat2 => "MAT2",
            Self::Mat3 => "MAT3",
            Self::Mat4 => "MAT4",
        }
    }
}

/// The `asset` header object. `version` is the only mandatory field in a
/// glTF document.
#[derive(Debug, Clone, Default)]
pub struct AssetInfo {
    pub version: String,
    pub generator: Option<String>,
    pub min_version: Option<String>,
    pub copyright: Option<String>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// A byte blob. `uri` is absent for the GLB binary chunk; `data` is absent
/// when the asset was loaded with `load_buffers = false`.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    pub uri: Option<String>,
    pub byte_length: u64,
    pub name: Option<String>,
    pub data: Option<Vec<u8>>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// A `(buffer, offset, length)` window into a buffer's bytes.
#[derive(Debug, Clone, Default)]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: u64,
    pub byte_length: u64,
    pub byte_stride: Option<u64>,
    pub target: Option<i64>,
    pub name: Option<String>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// One half of a sparse accessor override: where the overridden element
/// indices live.
#[derive(Debug, Clone, Default)]
pub struct SparseIndices {
    pub buffer_view: usize,
    pub byte_offset: Option<u64>,
    pub component_type: i64,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// The other half: where the replacement values live.
#[derive(Debug, Clone, Default)]
pub struct SparseValues {
    pub buffer_view: usize,
    pub byte_offset: Option<u64>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct AccessorSparse {
    pub count: u64,
    pub indices: SparseIndices,
    pub values: SparseValues,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// Describes how to reinterpret a buffer-view window as typed elements.
#[derive(Debug, Clone)]
pub struct Accessor {
    pub buffer_view: Option<usize>,
    pub byte_offset: Option<u64>,
    pub count: u64,
    pub component_type: i64,
    pub normalized: Option<bool>,
    pub accessor_type: AccessorType,
    /// Per-component minimum, up to 16 values.
    pub min: Option<Vec<f32>>,
    /// Per-component maximum, up to 16 values.
    pub max: Option<Vec<f32>>,
    pub sparse: Option<AccessorSparse>,
    pub name: Option<String>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

impl Default for Accessor {
    fn default() -> Self {
        Self {
            buffer_view: None,
            byte_offset: None,
            count: 0,
            component_type: 0,
            normalized: None,
            accessor_type: AccessorType::Scalar,
            min: None,
            max: None,
            sparse: None,
            name: None,
            extras: None,
            extensions: None,
        }
    }
}

/// An image sourced from a URI or a buffer view. `data` is populated only
/// when loading with `load_images = true`.
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
    pub name: Option<String>,
    pub data: Option<Vec<u8>>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// Texture sampling state, kept as raw GL enum values.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    pub mag_filter: Option<i64>,
    pub min_filter: Option<i64>,
    pub wrap_s: Option<i64>,
    pub wrap_t: Option<i64>,
    pub name: Option<String>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Texture {
    pub sampler: Option<usize>,
    pub source: Option<usize>,
    pub name: Option<String>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// A texture reference inside a material.
#[derive(Debug, Clone, Default)]
pub struct TextureInfo {
    pub index: usize,
    pub tex_coord: Option<i64>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct NormalTextureInfo {
    pub info: TextureInfo,
    pub scale: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct OcclusionTextureInfo {
    pub info: TextureInfo,
    pub strength: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct PbrMetallicRoughness {
    pub base_color_factor: Option<[f32; 4]>,
    pub metallic_factor: Option<f32>,
    pub roughness_factor: Option<f32>,
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_roughness_texture: Option<TextureInfo>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// Standard glTF PBR metallic-roughness material. Every sub-block is
/// independently optional.
#[derive(Debug, Clone, Default)]
pub struct Material {
    pub name: Option<String>,
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    pub normal_texture: Option<NormalTextureInfo>,
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    pub emissive_texture: Option<TextureInfo>,
    pub emissive_factor: Option<[f32; 3]>,
    pub alpha_mode: Option<String>,
    pub alpha_cutoff: Option<f32>,
    pub double_sided: Option<bool>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// One named attribute → accessor index mapping.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub accessor: usize,
}

/// An ordered attribute map, used both for primitive `attributes` and for
/// morph `targets` entries.
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    pub attributes: Vec<Attribute>,
}

impl AttributeSet {
    /// Look up an attribute's accessor index by semantic name.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.accessor)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Primitive {
    pub attributes: AttributeSet,
    pub indices: Option<usize>,
    pub material: Option<usize>,
    /// Draw mode; absent means triangles.
    pub mode: Option<i64>,
    pub targets: Vec<AttributeSet>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
    pub weights: Option<Vec<f32>>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// A scene-graph node: TRS or matrix transform, children by index, optional
/// mesh/skin/camera references.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: Option<String>,
    pub children: Vec<usize>,
    pub mesh: Option<usize>,
    pub skin: Option<usize>,
    pub camera: Option<usize>,
    pub matrix: Option<[f32; 16]>,
    pub translation: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    pub weights: Option<Vec<f32>>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub name: Option<String>,
    pub nodes: Vec<usize>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Skin {
    pub name: Option<String>,
    pub inverse_bind_matrices: Option<usize>,
    pub skeleton: Option<usize>,
    pub joints: Vec<usize>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct AnimationSampler {
    pub input: usize,
    pub output: usize,
    pub interpolation: Option<String>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct AnimationTarget {
    pub node: Option<usize>,
    pub path: String,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct AnimationChannel {
    pub sampler: usize,
    pub target: AnimationTarget,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Animation {
    pub name: Option<String>,
    pub samplers: Vec<AnimationSampler>,
    pub channels: Vec<AnimationChannel>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct CameraPerspective {
    pub yfov: f32,
    pub znear: f32,
    pub zfar: Option<f32>,
    pub aspect_ratio: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct CameraOrthographic {
    pub xmag: f32,
    pub ymag: f32,
    pub znear: f32,
    pub zfar: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Camera {
    pub name: Option<String>,
    pub camera_type: Option<String>,
    pub perspective: Option<CameraPerspective>,
    pub orthographic: Option<CameraOrthographic>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}

/// A fully loaded glTF asset graph.
///
/// All cross-entity references are indices into the `Vec`s below. Indices
/// are not validated on write; consumption paths (mesh extraction) validate
/// what they touch.
#[derive(Debug, Clone, Default)]
pub struct GltfAsset {
    pub asset: AssetInfo,
    pub extensions_used: Vec<String>,
    pub extensions_required: Vec<String>,
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub images: Vec<Image>,
    pub samplers: Vec<Sampler>,
    pub textures: Vec<Texture>,
    pub materials: Vec<Material>,
    pub meshes: Vec<Mesh>,
    pub nodes: Vec<Node>,
    pub scenes: Vec<Scene>,
    pub skins: Vec<Skin>,
    pub animations: Vec<Animation>,
    pub cameras: Vec<Camera>,
    /// Default scene index (`scene` in the document).
    pub scene: Option<usize>,
    /// Path the asset was loaded from, if any.
    pub source_path: Option<PathBuf>,
    /// Directory relative URIs resolve against.
    pub base_dir: Option<PathBuf>,
    pub extras: Option<Value>,
    pub extensions: Option<Value>,
}
