//! Internal glTF loading logic.
//!
//! The [`LoadContext`] maps a parsed JSON tree onto the typed asset graph
//! and resolves buffer/image payloads (GLB binary chunk, data URIs, external
//! files) according to the caller's [`LoadOptions`].
//!
//! The getter contract throughout: a key that is absent or holds the wrong
//! JSON type reads as absent. Callers decide whether absence is fatal, so a
//! wrong type under a required key fails the whole load while an optional
//! key silently stays `None`. Numeric getters accept any JSON number and
//! cast, matching common glTF tooling.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use crate::data_uri::parse_data_uri;
use crate::error::GltfError;
use crate::types::*;
use crate::LoadOptions;

type JsonObject = Map<String, Value>;

// ---------------------------------------------------------------------------
// Typed getters over the JSON tree
// ---------------------------------------------------------------------------

fn get_string(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key)?.as_str().map(str::to_owned)
}

fn get_f64(obj: &JsonObject, key: &str) -> Option<f64> {
    obj.get(key)?.as_f64()
}

fn get_f32(obj: &JsonObject, key: &str) -> Option<f32> {
    get_f64(obj, key).map(|v| v as f32)
}

fn get_u64(obj: &JsonObject, key: &str) -> Option<u64> {
    get_f64(obj, key).map(|v| v as u64)
}

fn get_i64(obj: &JsonObject, key: &str) -> Option<i64> {
    get_f64(obj, key).map(|v| v as i64)
}

fn get_index(obj: &JsonObject, key: &str) -> Option<usize> {
    get_f64(obj, key).filter(|v| *v >= 0.0).map(|v| v as usize)
}

fn get_bool(obj: &JsonObject, key: &str) -> Option<bool> {
    obj.get(key)?.as_bool()
}

/// Deep-clone an opaque subtree (`extras` or `extensions`). The clone is
/// never aliased to the source tree, keeping asset ownership a strict tree.
fn clone_tree(obj: &JsonObject, key: &str) -> Option<Value> {
    obj.get(key).cloned()
}

fn required<T>(value: Option<T>, what: &str) -> Result<T, GltfError> {
    value.ok_or_else(|| GltfError::malformed(what))
}

/// Read up to `max` floats from a JSON array. `None` if the value is not an
/// array or any element (within `max`) is not a number.
fn read_float_vec(value: &Value, max: usize) -> Option<Vec<f32>> {
    let items = value.as_array()?;
    let mut out = Vec::with_capacity(items.len().min(max));
    for item in items.iter().take(max) {
        out.push(item.as_f64()? as f32);
    }
    Some(out)
}

/// Read a fixed-size float array, zero-filling missing trailing components.
fn read_float_array<const N: usize>(value: &Value) -> Option<[f32; N]> {
    let values = read_float_vec(value, N)?;
    let mut out = [0.0; N];
    out[..values.len()].copy_from_slice(&values);
    Some(out)
}

fn read_index_array(value: &Value, what: &str) -> Result<Vec<usize>, GltfError> {
    let items = required(value.as_array(), what)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let n = required(item.as_f64().filter(|v| *v >= 0.0), what)?;
        out.push(n as usize);
    }
    Ok(out)
}

fn read_string_array(value: &Value, what: &str) -> Result<Vec<String>, GltfError> {
    let items = required(value.as_array(), what)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(required(item.as_str(), what)?.to_owned());
    }
    Ok(out)
}

fn read_float_vec_required(value: &Value, what: &str) -> Result<Vec<f32>, GltfError> {
    required(read_float_vec(value, usize::MAX), what)
}

/// Iterate a top-level entity array. Absence of the key is fine (the
/// corresponding sequence stays empty); a present key must be an array of
/// objects.
fn entity_array<'a>(
    root: &'a JsonObject,
    key: &str,
) -> Result<Vec<&'a JsonObject>, GltfError> {
    let Some(value) = root.get(key) else {
        return Ok(Vec::new());
    };
    let items = required(value.as_array(), key)?;
    items
        .iter()
        .map(|item| required(item.as_object(), key))
        .collect()
}

// ---------------------------------------------------------------------------
// Load context
// ---------------------------------------------------------------------------

/// State needed while mapping the JSON tree to an asset graph.
pub(crate) struct LoadContext<'a> {
    pub options: &'a LoadOptions,
    /// Directory relative URIs resolve against.
    pub base_dir: Option<&'a Path>,
    /// The GLB binary chunk, when loading from a `.glb` container.
    pub glb_bin: Option<&'a [u8]>,
}

impl LoadContext<'_> {
    /// Map the document root onto a fully populated asset graph.
    ///
    /// Parsing is all-or-nothing: any structural failure drops the
    /// partially built asset and returns the error.
    pub fn parse(&self, root: &Value) -> Result<GltfAsset, GltfError> {
        let root = required(root.as_object(), "document root is not an object")?;
        let mut asset = GltfAsset::default();

        self.parse_asset_info(root, &mut asset)?;
        self.parse_top_level(root, &mut asset)?;
        self.parse_buffers(root, &mut asset)?;
        self.parse_buffer_views(root, &mut asset)?;
        self.parse_accessors(root, &mut asset)?;
        self.parse_images(root, &mut asset)?;
        self.parse_samplers(root, &mut asset)?;
        self.parse_textures(root, &mut asset)?;
        self.parse_materials(root, &mut asset)?;
        self.parse_meshes(root, &mut asset)?;
        self.parse_nodes(root, &mut asset)?;
        self.parse_scenes(root, &mut asset)?;
        self.parse_skins(root, &mut asset)?;
        self.parse_animations(root, &mut asset)?;
        self.parse_cameras(root, &mut asset)?;

        debug!(
            "parsed glTF document: {} buffers, {} accessors, {} meshes, {} nodes, {} scenes",
            asset.buffers.len(),
            asset.accessors.len(),
            asset.meshes.len(),
            asset.nodes.len(),
            asset.scenes.len(),
        );
        Ok(asset)
    }

    fn parse_asset_info(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        let obj = required(
            root.get("asset").and_then(Value::as_object),
            "missing asset object",
        )?;
        asset.asset = AssetInfo {
            version: required(get_string(obj, "version"), "asset.version missing")?,
            generator: get_string(obj, "generator"),
            min_version: get_string(obj, "minVersion"),
            copyright: get_string(obj, "copyright"),
            extras: clone_tree(obj, "extras"),
            extensions: clone_tree(obj, "extensions"),
        };
        Ok(())
    }

    fn parse_top_level(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        asset.extras = clone_tree(root, "extras");
        asset.extensions = clone_tree(root, "extensions");
        if let Some(value) = root.get("extensionsUsed") {
            asset.extensions_used = read_string_array(value, "extensionsUsed")?;
        }
        if let Some(value) = root.get("extensionsRequired") {
            asset.extensions_required = read_string_array(value, "extensionsRequired")?;
        }
        asset.scene = get_index(root, "scene");
        Ok(())
    }

    // -- Buffers and resource resolution ------------------------------------

    fn parse_buffers(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for (i, obj) in entity_array(root, "buffers")?.into_iter().enumerate() {
            let mut buffer = Buffer {
                uri: get_string(obj, "uri"),
                name: get_string(obj, "name"),
                byte_length: required(get_u64(obj, "byteLength"), "buffer missing byteLength")?,
                data: None,
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            };
            if self.options.load_buffers {
                buffer.data = self.resolve_buffer_payload(&buffer, i)?;
            }
            asset.buffers.push(buffer);
        }
        Ok(())
    }

    /// Three-way payload resolution: GLB binary chunk, data URI, external
    /// file — in that priority order.
    fn resolve_buffer_payload(
        &self,
        buffer: &Buffer,
        index: usize,
    ) -> Result<Option<Vec<u8>>, GltfError> {
        let Some(uri) = &buffer.uri else {
            // No URI: the buffer refers to the GLB binary chunk.
            return Ok(self.glb_bin.map(<[u8]>::to_vec));
        };
        if self.options.decode_data_uris {
            if let Some(parsed) = parse_data_uri(uri) {
                return Ok(Some(parsed.data));
            }
        }
        let path = self.resolve_uri(uri);
        let data = fs::read(&path).map_err(|e| {
            GltfError::Io(format!(
                "failed to read buffer {index} from {}: {e}",
                path.display()
            ))
        })?;
        Ok(Some(data))
    }

    fn resolve_uri(&self, uri: &str) -> PathBuf {
        match self.base_dir {
            Some(dir) => dir.join(uri),
            None => PathBuf::from(uri),
        }
    }

    fn parse_buffer_views(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "bufferViews")? {
            asset.buffer_views.push(BufferView {
                buffer: required(get_index(obj, "buffer"), "bufferView missing buffer")?,
                byte_offset: get_u64(obj, "byteOffset").unwrap_or(0),
                byte_length: required(
                    get_u64(obj, "byteLength"),
                    "bufferView missing byteLength",
                )?,
                byte_stride: get_u64(obj, "byteStride"),
                target: get_i64(obj, "target"),
                name: get_string(obj, "name"),
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    // -- Accessors -----------------------------------------------------------

    fn parse_accessors(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "accessors")? {
            let type_name = required(get_string(obj, "type"), "accessor missing type")?;
            let accessor_type = required(
                AccessorType::parse(&type_name),
                "accessor type outside SCALAR..MAT4",
            )?;
            let sparse = match obj.get("sparse") {
                Some(value) => Some(parse_sparse(value)?),
                None => None,
            };
            asset.accessors.push(Accessor {
                buffer_view: get_index(obj, "bufferView"),
                byte_offset: get_u64(obj, "byteOffset"),
                count: required(get_u64(obj, "count"), "accessor missing count")?,
                component_type: required(
                    get_i64(obj, "componentType"),
                    "accessor missing componentType",
                )?,
                normalized: get_bool(obj, "normalized"),
                accessor_type,
                min: obj.get("min").and_then(|v| read_float_vec(v, 16)),
                max: obj.get("max").and_then(|v| read_float_vec(v, 16)),
                sparse,
                name: get_string(obj, "name"),
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    // -- Images --------------------------------------------------------------

    fn parse_images(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for (i, obj) in entity_array(root, "images")?.into_iter().enumerate() {
            let mut image = Image {
                uri: get_string(obj, "uri"),
                mime_type: get_string(obj, "mimeType"),
                buffer_view: get_index(obj, "bufferView"),
                name: get_string(obj, "name"),
                data: None,
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            };
            if self.options.load_images {
                self.resolve_image_payload(&mut image, i, asset)?;
            }
            asset.images.push(image);
        }
        Ok(())
    }

    fn resolve_image_payload(
        &self,
        image: &mut Image,
        index: usize,
        asset: &GltfAsset,
    ) -> Result<(), GltfError> {
        if let Some(uri) = &image.uri {
            if self.options.decode_data_uris {
                if let Some(parsed) = parse_data_uri(uri) {
                    if image.mime_type.is_none() {
                        image.mime_type = parsed.mime;
                    }
                    image.data = Some(parsed.data);
                    return Ok(());
                }
            }
            let path = self.resolve_uri(uri);
            let data = fs::read(&path).map_err(|e| {
                GltfError::Io(format!(
                    "failed to read image {index} from {}: {e}",
                    path.display()
                ))
            })?;
            image.data = Some(data);
        } else if let Some(view_index) = image.buffer_view {
            let view = required(
                asset.buffer_views.get(view_index),
                "image bufferView out of range",
            )?;
            let buffer = required(
                asset.buffers.get(view.buffer),
                "image buffer index out of range",
            )?;
            // Unloaded buffer: metadata-only image.
            let Some(data) = &buffer.data else {
                return Ok(());
            };
            let start = usize::try_from(view.byte_offset).ok();
            let end = view
                .byte_offset
                .checked_add(view.byte_length)
                .and_then(|e| usize::try_from(e).ok());
            let slice = start
                .zip(end)
                .and_then(|(s, e)| data.get(s..e))
                .ok_or_else(|| GltfError::malformed("image bufferView outside buffer data"))?;
            image.data = Some(slice.to_vec());
        }
        Ok(())
    }

    // -- Samplers, textures, materials ---------------------------------------

    fn parse_samplers(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "samplers")? {
            asset.samplers.push(Sampler {
                mag_filter: get_i64(obj, "magFilter"),
                min_filter: get_i64(obj, "minFilter"),
                wrap_s: get_i64(obj, "wrapS"),
                wrap_t: get_i64(obj, "wrapT"),
                name: get_string(obj, "name"),
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    fn parse_textures(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "textures")? {
            asset.textures.push(Texture {
                sampler: get_index(obj, "sampler"),
                source: get_index(obj, "source"),
                name: get_string(obj, "name"),
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    fn parse_materials(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "materials")? {
            let pbr_metallic_roughness = match obj.get("pbrMetallicRoughness") {
                Some(value) => {
                    let pbr = required(value.as_object(), "pbrMetallicRoughness")?;
                    Some(PbrMetallicRoughness {
                        base_color_factor: pbr
                            .get("baseColorFactor")
                            .and_then(read_float_array),
                        metallic_factor: get_f32(pbr, "metallicFactor"),
                        roughness_factor: get_f32(pbr, "roughnessFactor"),
                        base_color_texture: parse_texture_info_opt(pbr, "baseColorTexture")?,
                        metallic_roughness_texture: parse_texture_info_opt(
                            pbr,
                            "metallicRoughnessTexture",
                        )?,
                        extras: clone_tree(pbr, "extras"),
                        extensions: clone_tree(pbr, "extensions"),
                    })
                }
                None => None,
            };
            let normal_texture = match obj.get("normalTexture") {
                Some(value) => {
                    let tex = required(value.as_object(), "normalTexture")?;
                    Some(NormalTextureInfo {
                        info: parse_texture_info(tex, "normalTexture")?,
                        scale: get_f32(tex, "scale"),
                    })
                }
                None => None,
            };
            let occlusion_texture = match obj.get("occlusionTexture") {
                Some(value) => {
                    let tex = required(value.as_object(), "occlusionTexture")?;
                    Some(OcclusionTextureInfo {
                        info: parse_texture_info(tex, "occlusionTexture")?,
                        strength: get_f32(tex, "strength"),
                    })
                }
                None => None,
            };
            asset.materials.push(Material {
                name: get_string(obj, "name"),
                pbr_metallic_roughness,
                normal_texture,
                occlusion_texture,
                emissive_texture: parse_texture_info_opt(obj, "emissiveTexture")?,
                emissive_factor: obj.get("emissiveFactor").and_then(read_float_array),
                alpha_mode: get_string(obj, "alphaMode"),
                alpha_cutoff: get_f32(obj, "alphaCutoff"),
                double_sided: get_bool(obj, "doubleSided"),
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    // -- Meshes --------------------------------------------------------------

    fn parse_meshes(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "meshes")? {
            let prims = required(
                obj.get("primitives").and_then(Value::as_array),
                "mesh missing primitives",
            )?;
            let mut primitives = Vec::with_capacity(prims.len());
            for prim_value in prims {
                let prim = required(prim_value.as_object(), "mesh primitive")?;
                let attributes = parse_attribute_set(
                    required(prim.get("attributes"), "primitive missing attributes")?,
                )?;
                let mut targets = Vec::new();
                if let Some(list) = prim.get("targets").and_then(Value::as_array) {
                    for target in list {
                        targets.push(parse_attribute_set(target)?);
                    }
                }
                primitives.push(Primitive {
                    attributes,
                    indices: get_index(prim, "indices"),
                    material: get_index(prim, "material"),
                    mode: get_i64(prim, "mode"),
                    targets,
                    extras: clone_tree(prim, "extras"),
                    extensions: clone_tree(prim, "extensions"),
                });
            }
            asset.meshes.push(Mesh {
                name: get_string(obj, "name"),
                primitives,
                weights: parse_weights(obj)?,
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    // -- Graph entities ------------------------------------------------------

    fn parse_nodes(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "nodes")? {
            let children = match obj.get("children").filter(|v| v.is_array()) {
                Some(value) => read_index_array(value, "node children")?,
                None => Vec::new(),
            };
            asset.nodes.push(Node {
                name: get_string(obj, "name"),
                children,
                mesh: get_index(obj, "mesh"),
                skin: get_index(obj, "skin"),
                camera: get_index(obj, "camera"),
                matrix: obj.get("matrix").and_then(read_float_array),
                translation: obj.get("translation").and_then(read_float_array),
                rotation: obj.get("rotation").and_then(read_float_array),
                scale: obj.get("scale").and_then(read_float_array),
                weights: parse_weights(obj)?,
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    fn parse_scenes(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "scenes")? {
            let nodes = match obj.get("nodes").filter(|v| v.is_array()) {
                Some(value) => read_index_array(value, "scene nodes")?,
                None => Vec::new(),
            };
            asset.scenes.push(Scene {
                name: get_string(obj, "name"),
                nodes,
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    fn parse_skins(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "skins")? {
            asset.skins.push(Skin {
                name: get_string(obj, "name"),
                inverse_bind_matrices: get_index(obj, "inverseBindMatrices"),
                skeleton: get_index(obj, "skeleton"),
                joints: read_index_array(
                    required(obj.get("joints"), "skin missing joints")?,
                    "skin joints",
                )?,
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    fn parse_animations(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "animations")? {
            let sampler_objs = required(
                obj.get("samplers").and_then(Value::as_array),
                "animation missing samplers",
            )?;
            let mut samplers = Vec::with_capacity(sampler_objs.len());
            for value in sampler_objs {
                let sampler = required(value.as_object(), "animation sampler")?;
                samplers.push(AnimationSampler {
                    input: required(get_index(sampler, "input"), "animation sampler input")?,
                    output: required(get_index(sampler, "output"), "animation sampler output")?,
                    interpolation: get_string(sampler, "interpolation"),
                    extras: clone_tree(sampler, "extras"),
                    extensions: clone_tree(sampler, "extensions"),
                });
            }
            let channel_objs = required(
                obj.get("channels").and_then(Value::as_array),
                "animation missing channels",
            )?;
            let mut channels = Vec::with_capacity(channel_objs.len());
            for value in channel_objs {
                let channel = required(value.as_object(), "animation channel")?;
                let target = required(
                    channel.get("target").and_then(Value::as_object),
                    "animation channel target",
                )?;
                channels.push(AnimationChannel {
                    sampler: required(
                        get_index(channel, "sampler"),
                        "animation channel sampler",
                    )?,
                    target: AnimationTarget {
                        node: get_index(target, "node"),
                        path: required(
                            get_string(target, "path"),
                            "animation target missing path",
                        )?,
                        extras: clone_tree(target, "extras"),
                        extensions: clone_tree(target, "extensions"),
                    },
                    extras: clone_tree(channel, "extras"),
                    extensions: clone_tree(channel, "extensions"),
                });
            }
            asset.animations.push(Animation {
                name: get_string(obj, "name"),
                samplers,
                channels,
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }

    fn parse_cameras(&self, root: &JsonObject, asset: &mut GltfAsset) -> Result<(), GltfError> {
        for obj in entity_array(root, "cameras")? {
            let perspective = match obj.get("perspective").and_then(Value::as_object) {
                Some(p) => Some(CameraPerspective {
                    yfov: required(get_f32(p, "yfov"), "camera perspective yfov")?,
                    znear: required(get_f32(p, "znear"), "camera perspective znear")?,
                    zfar: get_f32(p, "zfar"),
                    aspect_ratio: get_f32(p, "aspectRatio"),
                }),
                None => None,
            };
            let orthographic = match obj.get("orthographic").and_then(Value::as_object) {
                Some(o) => Some(CameraOrthographic {
                    xmag: required(get_f32(o, "xmag"), "camera orthographic xmag")?,
                    ymag: required(get_f32(o, "ymag"), "camera orthographic ymag")?,
                    znear: required(get_f32(o, "znear"), "camera orthographic znear")?,
                    zfar: required(get_f32(o, "zfar"), "camera orthographic zfar")?,
                }),
                None => None,
            };
            asset.cameras.push(Camera {
                name: get_string(obj, "name"),
                camera_type: get_string(obj, "type"),
                perspective,
                orthographic,
                extras: clone_tree(obj, "extras"),
                extensions: clone_tree(obj, "extensions"),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shared sub-object parsers
// ---------------------------------------------------------------------------

/// Parse an attribute map (`attributes` or one morph target): every value
/// must be a non-negative accessor index.
fn parse_attribute_set(value: &Value) -> Result<AttributeSet, GltfError> {
    let obj = required(value.as_object(), "attribute set is not an object")?;
    let mut attributes = Vec::with_capacity(obj.len());
    for (name, accessor) in obj {
        let index = required(
            accessor.as_f64().filter(|v| *v >= 0.0),
            "attribute accessor index",
        )?;
        attributes.push(Attribute {
            name: name.clone(),
            accessor: index as usize,
        });
    }
    Ok(AttributeSet { attributes })
}

/// Sparse accessor override block. A present `sparse` key must carry valid
/// `count`, `indices`, and `values` sub-objects.
fn parse_sparse(value: &Value) -> Result<AccessorSparse, GltfError> {
    let obj = required(value.as_object(), "accessor sparse")?;
    let indices = required(
        obj.get("indices").and_then(Value::as_object),
        "sparse indices",
    )?;
    let values = required(
        obj.get("values").and_then(Value::as_object),
        "sparse values",
    )?;
    Ok(AccessorSparse {
        count: required(get_u64(obj, "count"), "sparse count")?,
        indices: SparseIndices {
            buffer_view: required(get_index(indices, "bufferView"), "sparse indices bufferView")?,
            byte_offset: get_u64(indices, "byteOffset"),
            component_type: required(
                get_i64(indices, "componentType"),
                "sparse indices componentType",
            )?,
            extras: clone_tree(indices, "extras"),
            extensions: clone_tree(indices, "extensions"),
        },
        values: SparseValues {
            buffer_view: required(get_index(values, "bufferView"), "sparse values bufferView")?,
            byte_offset: get_u64(values, "byteOffset"),
            extras: clone_tree(values, "extras"),
            extensions: clone_tree(values, "extensions"),
        },
        extras: clone_tree(obj, "extras"),
        extensions: clone_tree(obj, "extensions"),
    })
}

fn parse_texture_info(obj: &JsonObject, what: &str) -> Result<TextureInfo, GltfError> {
    Ok(TextureInfo {
        index: required(get_index(obj, "index"), what)?,
        tex_coord: get_i64(obj, "texCoord"),
        extras: clone_tree(obj, "extras"),
        extensions: clone_tree(obj, "extensions"),
    })
}

fn parse_texture_info_opt(
    obj: &JsonObject,
    key: &str,
) -> Result<Option<TextureInfo>, GltfError> {
    match obj.get(key) {
        Some(value) => {
            let tex = required(value.as_object(), key)?;
            Ok(Some(parse_texture_info(tex, key)?))
        }
        None => Ok(None),
    }
}

/// Morph-target weights on meshes and nodes: a present array with a
/// non-number element fails the load.
fn parse_weights(obj: &JsonObject) -> Result<Option<Vec<f32>>, GltfError> {
    match obj.get("weights").filter(|v| v.is_array()) {
        Some(value) => Ok(Some(read_float_vec_required(value, "weights")?)),
        None => Ok(None),
    }
}
