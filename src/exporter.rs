//! Internal glTF writing logic.
//!
//! The [`ExportContext`] mirrors the loader: it maps the asset graph back to
//! a JSON tree, omitting every key whose field is `None` (glTF favors absent
//! over null), and applies one of three resource strategies per
//! buffer/image: keep the caller's URI, embed as a base64 data URI, or emit
//! a generated sibling file. `write_glb` instead packs every buffer payload
//! into the single GLB binary chunk and remaps buffer views onto buffer 0.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use crate::base64;
use crate::error::GltfError;
use crate::glb::Glb;
use crate::types::*;
use crate::WriteOptions;

type JsonObject = Map<String, Value>;

// ---------------------------------------------------------------------------
// JSON emit helpers
// ---------------------------------------------------------------------------

fn json_f32(v: f32) -> Value {
    serde_json::Number::from_f64(f64::from(v))
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

fn float_array(values: &[f32]) -> Value {
    Value::Array(values.iter().copied().map(json_f32).collect())
}

fn index_array(values: &[usize]) -> Value {
    Value::Array(values.iter().map(|&v| Value::from(v as u64)).collect())
}

fn put(obj: &mut JsonObject, key: &str, value: Value) {
    obj.insert(key.to_owned(), value);
}

fn put_string(obj: &mut JsonObject, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        put(obj, key, Value::from(v.as_str()));
    }
}

fn put_f32(obj: &mut JsonObject, key: &str, value: Option<f32>) {
    if let Some(v) = value {
        put(obj, key, json_f32(v));
    }
}

fn put_i64(obj: &mut JsonObject, key: &str, value: Option<i64>) {
    if let Some(v) = value {
        put(obj, key, Value::from(v));
    }
}

fn put_index(obj: &mut JsonObject, key: &str, value: Option<usize>) {
    if let Some(v) = value {
        put(obj, key, Value::from(v as u64));
    }
}

fn put_bool(obj: &mut JsonObject, key: &str, value: Option<bool>) {
    if let Some(v) = value {
        put(obj, key, Value::Bool(v));
    }
}

/// Re-emit opaque subtrees as deep clones so the document tree never
/// aliases the asset graph.
fn put_opaque(obj: &mut JsonObject, extras: &Option<Value>, extensions: &Option<Value>) {
    if let Some(v) = extras {
        put(obj, "extras", v.clone());
    }
    if let Some(v) = extensions {
        put(obj, "extensions", v.clone());
    }
}

fn data_uri_for(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", base64::encode(data))
}

// ---------------------------------------------------------------------------
// Export context
// ---------------------------------------------------------------------------

/// A sibling payload file to emit next to the output document.
struct PendingFile {
    uri: String,
    /// Index into `buffers` or `images`.
    index: usize,
}

pub(crate) struct ExportContext<'a> {
    asset: &'a GltfAsset,
    options: &'a WriteOptions,
    /// Output document filename without extension, used for generated URIs.
    base_name: String,
    out_dir: PathBuf,
    pending_buffers: Vec<PendingFile>,
    pending_images: Vec<PendingFile>,
}

impl<'a> ExportContext<'a> {
    pub fn new(
        asset: &'a GltfAsset,
        path: &Path,
        options: &'a WriteOptions,
    ) -> Result<Self, GltfError> {
        if path.as_os_str().is_empty() {
            return Err(GltfError::InvalidArgument("empty output path".into()));
        }
        let base_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| GltfError::InvalidArgument("output path has no filename".into()))?
            .to_owned();
        let out_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self {
            asset,
            options,
            base_name,
            out_dir,
            pending_buffers: Vec::new(),
            pending_images: Vec::new(),
        })
    }

    /// Serialize the asset to `path`, plus any sibling payload files.
    ///
    /// Sibling files written before a later failure are not cleaned up.
    pub fn write(mut self, path: &Path) -> Result<(), GltfError> {
        if self.options.write_glb {
            let (bin, offsets) = self.collect_buffer_data()?;
            let root = self.build_document(Some((&bin, &offsets)))?;
            let json = serde_json::to_vec(&Value::Object(root))?;
            let bytes = Glb::to_bytes(&json, if bin.is_empty() { None } else { Some(&bin) });
            fs::write(path, &bytes).map_err(|e| {
                GltfError::Io(format!("failed to write {}: {e}", path.display()))
            })?;
            debug!("wrote GLB {} ({} bytes)", path.display(), bytes.len());
        } else {
            let root = self.build_document(None)?;
            let json = serde_json::to_vec(&Value::Object(root))?;
            fs::write(path, &json).map_err(|e| {
                GltfError::Io(format!("failed to write {}: {e}", path.display()))
            })?;
            if !self.options.embed_buffers {
                self.write_pending(&self.pending_buffers, |i| {
                    self.asset.buffers[i].data.as_deref()
                })?;
            }
            if !self.options.embed_images {
                self.write_pending(&self.pending_images, |i| {
                    self.asset.images[i].data.as_deref()
                })?;
            }
            debug!(
                "wrote glTF {} (+{} buffer files, +{} image files)",
                path.display(),
                self.pending_buffers.len(),
                self.pending_images.len()
            );
        }
        Ok(())
    }

    fn write_pending(
        &self,
        files: &[PendingFile],
        data_of: impl Fn(usize) -> Option<&'a [u8]>,
    ) -> Result<(), GltfError> {
        for file in files {
            let data = data_of(file.index).ok_or_else(|| {
                GltfError::Io(format!("no payload loaded for external file {}", file.uri))
            })?;
            let full = self.out_dir.join(&file.uri);
            fs::write(&full, data).map_err(|e| {
                GltfError::Io(format!("failed to write {}: {e}", full.display()))
            })?;
        }
        Ok(())
    }

    // -- Document assembly ---------------------------------------------------

    /// Build the JSON root. `glb` carries the synthesized binary blob and
    /// per-buffer offsets when writing a GLB container.
    fn build_document(
        &mut self,
        glb: Option<(&[u8], &[u64])>,
    ) -> Result<JsonObject, GltfError> {
        let mut root = JsonObject::new();
        self.build_asset_info(&mut root);
        self.build_top_level(&mut root);
        match glb {
            Some((bin, offsets)) => {
                self.build_glb_buffer(&mut root, bin.len());
                self.build_buffer_views(&mut root, Some(offsets))?;
            }
            None => {
                self.build_buffers(&mut root)?;
                self.build_buffer_views(&mut root, None)?;
            }
        }
        self.build_accessors(&mut root);
        self.build_images(&mut root)?;
        self.build_samplers(&mut root);
        self.build_textures(&mut root);
        self.build_materials(&mut root);
        self.build_meshes(&mut root);
        self.build_nodes(&mut root);
        self.build_scenes(&mut root);
        self.build_skins(&mut root);
        self.build_animations(&mut root);
        self.build_cameras(&mut root);
        Ok(root)
    }

    fn build_asset_info(&self, root: &mut JsonObject) {
        let info = &self.asset.asset;
        let mut obj = JsonObject::new();
        let version = if info.version.is_empty() {
            "2.0"
        } else {
            info.version.as_str()
        };
        put(&mut obj, "version", Value::from(version));
        put_string(&mut obj, "generator", &info.generator);
        put_string(&mut obj, "minVersion", &info.min_version);
        put_string(&mut obj, "copyright", &info.copyright);
        put_opaque(&mut obj, &info.extras, &info.extensions);
        put(root, "asset", Value::Object(obj));
    }

    fn build_top_level(&self, root: &mut JsonObject) {
        if !self.asset.extensions_used.is_empty() {
            put(
                root,
                "extensionsUsed",
                Value::from(self.asset.extensions_used.clone()),
            );
        }
        if !self.asset.extensions_required.is_empty() {
            put(
                root,
                "extensionsRequired",
                Value::from(self.asset.extensions_required.clone()),
            );
        }
        put_opaque(root, &self.asset.extras, &self.asset.extensions);
    }

    // -- Buffers -------------------------------------------------------------

    /// Concatenate every buffer payload (each padded to 4 bytes) into the
    /// GLB binary blob, recording per-buffer offsets for view remapping.
    fn collect_buffer_data(&self) -> Result<(Vec<u8>, Vec<u64>), GltfError> {
        let mut offsets = Vec::with_capacity(self.asset.buffers.len());
        let mut blob = Vec::new();
        for (i, buffer) in self.asset.buffers.iter().enumerate() {
            let data = buffer.data.as_deref().ok_or_else(|| {
                GltfError::Io(format!("buffer {i} has no data to embed in GLB"))
            })?;
            offsets.push(blob.len() as u64);
            blob.extend_from_slice(data);
            blob.resize(blob.len().next_multiple_of(4), 0);
        }
        Ok((blob, offsets))
    }

    /// The single synthesized buffer entry of a GLB document. Name and
    /// opaque trees of the first source buffer are carried over.
    fn build_glb_buffer(&self, root: &mut JsonObject, bin_size: usize) {
        if self.asset.buffers.is_empty() {
            return;
        }
        let mut obj = JsonObject::new();
        put(&mut obj, "byteLength", Value::from(bin_size as u64));
        let first = &self.asset.buffers[0];
        put_string(&mut obj, "name", &first.name);
        put_opaque(&mut obj, &first.extras, &first.extensions);
        put(root, "buffers", Value::Array(vec![Value::Object(obj)]));
    }

    fn build_buffers(&mut self, root: &mut JsonObject) -> Result<(), GltfError> {
        if self.asset.buffers.is_empty() {
            return Ok(());
        }
        let asset = self.asset;
        let mut arr = Vec::with_capacity(asset.buffers.len());
        for (i, buffer) in asset.buffers.iter().enumerate() {
            let mut obj = JsonObject::new();
            let byte_length = if buffer.byte_length != 0 {
                buffer.byte_length
            } else {
                buffer.data.as_ref().map_or(0, |d| d.len() as u64)
            };
            put(&mut obj, "byteLength", Value::from(byte_length));
            let uri = self.buffer_uri(buffer, i);
            put(&mut obj, "uri", Value::from(uri));
            put_string(&mut obj, "name", &buffer.name);
            put_opaque(&mut obj, &buffer.extras, &buffer.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "buffers", Value::Array(arr));
        Ok(())
    }

    /// Decide the output URI for one buffer: embedded data URI, the
    /// caller's literal URI, or a generated sibling filename.
    fn buffer_uri(&mut self, buffer: &Buffer, index: usize) -> String {
        if self.options.embed_buffers {
            if let Some(data) = &buffer.data {
                return data_uri_for("application/octet-stream", data);
            }
        }
        if let Some(uri) = &buffer.uri {
            // Keep the caller's URI; refresh the sibling file when we hold
            // the bytes and the URI is a plain relative path.
            if buffer.data.is_some() && !uri.starts_with("data:") {
                self.pending_buffers.push(PendingFile {
                    uri: uri.clone(),
                    index,
                });
            }
            return uri.clone();
        }
        let uri = if self.asset.buffers.len() == 1 {
            format!("{}.bin", self.base_name)
        } else {
            format!("{}_buffer{index}.bin", self.base_name)
        };
        self.pending_buffers.push(PendingFile {
            uri: uri.clone(),
            index,
        });
        uri
    }

    fn build_buffer_views(
        &self,
        root: &mut JsonObject,
        remap: Option<&[u64]>,
    ) -> Result<(), GltfError> {
        if self.asset.buffer_views.is_empty() {
            return Ok(());
        }
        let mut arr = Vec::with_capacity(self.asset.buffer_views.len());
        for view in &self.asset.buffer_views {
            let (buffer, byte_offset) = match remap {
                Some(offsets) => {
                    let base = offsets.get(view.buffer).ok_or_else(|| {
                        GltfError::malformed("bufferView references a missing buffer")
                    })?;
                    (0, view.byte_offset + base)
                }
                None => (view.buffer, view.byte_offset),
            };
            let mut obj = JsonObject::new();
            put(&mut obj, "buffer", Value::from(buffer as u64));
            if byte_offset != 0 {
                put(&mut obj, "byteOffset", Value::from(byte_offset));
            }
            put(&mut obj, "byteLength", Value::from(view.byte_length));
            if let Some(stride) = view.byte_stride {
                put(&mut obj, "byteStride", Value::from(stride));
            }
            put_i64(&mut obj, "target", view.target);
            put_string(&mut obj, "name", &view.name);
            put_opaque(&mut obj, &view.extras, &view.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "bufferViews", Value::Array(arr));
        Ok(())
    }

    // -- Accessors -----------------------------------------------------------

    fn build_accessors(&self, root: &mut JsonObject) {
        if self.asset.accessors.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.accessors.len());
        for acc in &self.asset.accessors {
            let mut obj = JsonObject::new();
            put_index(&mut obj, "bufferView", acc.buffer_view);
            if let Some(offset) = acc.byte_offset {
                if offset != 0 {
                    put(&mut obj, "byteOffset", Value::from(offset));
                }
            }
            put(&mut obj, "count", Value::from(acc.count));
            put(&mut obj, "componentType", Value::from(acc.component_type));
            put_bool(&mut obj, "normalized", acc.normalized);
            put(&mut obj, "type", Value::from(acc.accessor_type.as_str()));
            if let Some(min) = &acc.min {
                put(&mut obj, "min", float_array(min));
            }
            if let Some(max) = &acc.max {
                put(&mut obj, "max", float_array(max));
            }
            if let Some(sparse) = &acc.sparse {
                put(&mut obj, "sparse", build_sparse(sparse));
            }
            put_string(&mut obj, "name", &acc.name);
            put_opaque(&mut obj, &acc.extras, &acc.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "accessors", Value::Array(arr));
    }

    // -- Images --------------------------------------------------------------

    fn build_images(&mut self, root: &mut JsonObject) -> Result<(), GltfError> {
        if self.asset.images.is_empty() {
            return Ok(());
        }
        let asset = self.asset;
        let mut arr = Vec::with_capacity(asset.images.len());
        for (i, image) in asset.images.iter().enumerate() {
            let mut obj = JsonObject::new();
            if let Some(uri) = self.image_uri(image, i) {
                put(&mut obj, "uri", Value::from(uri));
            }
            put_index(&mut obj, "bufferView", image.buffer_view);
            put_string(&mut obj, "mimeType", &image.mime_type);
            put_string(&mut obj, "name", &image.name);
            put_opaque(&mut obj, &image.extras, &image.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "images", Value::Array(arr));
        Ok(())
    }

    /// Output URI for one image, or `None` when it rides a buffer view.
    /// In GLB mode embed flags are ignored and no sibling files are queued.
    fn image_uri(&mut self, image: &Image, index: usize) -> Option<String> {
        let embed = self.options.embed_images && !self.options.write_glb;
        if let Some(uri) = &image.uri {
            if !embed {
                return Some(uri.clone());
            }
        }
        if embed {
            if let Some(data) = &image.data {
                let mime = image.mime_type.as_deref().unwrap_or("application/octet-stream");
                return Some(data_uri_for(mime, data));
            }
            // Fall back to the literal URI when there is nothing to embed.
            return image.uri.clone();
        }
        if image.data.is_some() && image.buffer_view.is_none() && !self.options.write_glb {
            let ext = match image.mime_type.as_deref() {
                Some("image/png") => ".png",
                Some("image/jpeg") => ".jpg",
                _ => ".bin",
            };
            let uri = format!("{}_image{index}{ext}", self.base_name);
            self.pending_images.push(PendingFile {
                uri: uri.clone(),
                index,
            });
            return Some(uri);
        }
        None
    }

    // -- Samplers, textures, materials ---------------------------------------

    fn build_samplers(&self, root: &mut JsonObject) {
        if self.asset.samplers.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.samplers.len());
        for sampler in &self.asset.samplers {
            let mut obj = JsonObject::new();
            put_i64(&mut obj, "magFilter", sampler.mag_filter);
            put_i64(&mut obj, "minFilter", sampler.min_filter);
            put_i64(&mut obj, "wrapS", sampler.wrap_s);
            put_i64(&mut obj, "wrapT", sampler.wrap_t);
            put_string(&mut obj, "name", &sampler.name);
            put_opaque(&mut obj, &sampler.extras, &sampler.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "samplers", Value::Array(arr));
    }

    fn build_textures(&self, root: &mut JsonObject) {
        if self.asset.textures.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.textures.len());
        for texture in &self.asset.textures {
            let mut obj = JsonObject::new();
            put_index(&mut obj, "sampler", texture.sampler);
            put_index(&mut obj, "source", texture.source);
            put_string(&mut obj, "name", &texture.name);
            put_opaque(&mut obj, &texture.extras, &texture.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "textures", Value::Array(arr));
    }

    fn build_materials(&self, root: &mut JsonObject) {
        if self.asset.materials.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.materials.len());
        for material in &self.asset.materials {
            let mut obj = JsonObject::new();
            put_string(&mut obj, "name", &material.name);
            if let Some(pbr) = &material.pbr_metallic_roughness {
                let mut p = JsonObject::new();
                if let Some(factor) = &pbr.base_color_factor {
                    put(&mut p, "baseColorFactor", float_array(factor));
                }
                put_f32(&mut p, "metallicFactor", pbr.metallic_factor);
                put_f32(&mut p, "roughnessFactor", pbr.roughness_factor);
                if let Some(info) = &pbr.base_color_texture {
                    put(&mut p, "baseColorTexture", build_texture_info(info));
                }
                if let Some(info) = &pbr.metallic_roughness_texture {
                    put(&mut p, "metallicRoughnessTexture", build_texture_info(info));
                }
                put_opaque(&mut p, &pbr.extras, &pbr.extensions);
                put(&mut obj, "pbrMetallicRoughness", Value::Object(p));
            }
            if let Some(normal) = &material.normal_texture {
                let mut n = texture_info_object(&normal.info);
                put_f32(&mut n, "scale", normal.scale);
                put(&mut obj, "normalTexture", Value::Object(n));
            }
            if let Some(occlusion) = &material.occlusion_texture {
                let mut o = texture_info_object(&occlusion.info);
                put_f32(&mut o, "strength", occlusion.strength);
                put(&mut obj, "occlusionTexture", Value::Object(o));
            }
            if let Some(info) = &material.emissive_texture {
                put(&mut obj, "emissiveTexture", build_texture_info(info));
            }
            if let Some(factor) = &material.emissive_factor {
                put(&mut obj, "emissiveFactor", float_array(factor));
            }
            put_string(&mut obj, "alphaMode", &material.alpha_mode);
            put_f32(&mut obj, "alphaCutoff", material.alpha_cutoff);
            put_bool(&mut obj, "doubleSided", material.double_sided);
            put_opaque(&mut obj, &material.extras, &material.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "materials", Value::Array(arr));
    }

    // -- Meshes --------------------------------------------------------------

    fn build_meshes(&self, root: &mut JsonObject) {
        if self.asset.meshes.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.meshes.len());
        for mesh in &self.asset.meshes {
            let mut obj = JsonObject::new();
            put_string(&mut obj, "name", &mesh.name);
            let mut prims = Vec::with_capacity(mesh.primitives.len());
            for prim in &mesh.primitives {
                let mut p = JsonObject::new();
                put(&mut p, "attributes", build_attribute_set(&prim.attributes));
                put_index(&mut p, "indices", prim.indices);
                put_index(&mut p, "material", prim.material);
                put_i64(&mut p, "mode", prim.mode);
                if !prim.targets.is_empty() {
                    let targets: Vec<Value> =
                        prim.targets.iter().map(build_attribute_set).collect();
                    put(&mut p, "targets", Value::Array(targets));
                }
                put_opaque(&mut p, &prim.extras, &prim.extensions);
                prims.push(Value::Object(p));
            }
            put(&mut obj, "primitives", Value::Array(prims));
            if let Some(weights) = &mesh.weights {
                if !weights.is_empty() {
                    put(&mut obj, "weights", float_array(weights));
                }
            }
            put_opaque(&mut obj, &mesh.extras, &mesh.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "meshes", Value::Array(arr));
    }

    // -- Graph entities ------------------------------------------------------

    fn build_nodes(&self, root: &mut JsonObject) {
        if self.asset.nodes.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.nodes.len());
        for node in &self.asset.nodes {
            let mut obj = JsonObject::new();
            put_string(&mut obj, "name", &node.name);
            if !node.children.is_empty() {
                put(&mut obj, "children", index_array(&node.children));
            }
            put_index(&mut obj, "mesh", node.mesh);
            put_index(&mut obj, "skin", node.skin);
            put_index(&mut obj, "camera", node.camera);
            if let Some(matrix) = &node.matrix {
                put(&mut obj, "matrix", float_array(matrix));
            }
            if let Some(translation) = &node.translation {
                put(&mut obj, "translation", float_array(translation));
            }
            if let Some(rotation) = &node.rotation {
                put(&mut obj, "rotation", float_array(rotation));
            }
            if let Some(scale) = &node.scale {
                put(&mut obj, "scale", float_array(scale));
            }
            if let Some(weights) = &node.weights {
                if !weights.is_empty() {
                    put(&mut obj, "weights", float_array(weights));
                }
            }
            put_opaque(&mut obj, &node.extras, &node.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "nodes", Value::Array(arr));
    }

    fn build_scenes(&self, root: &mut JsonObject) {
        if !self.asset.scenes.is_empty() {
            let mut arr = Vec::with_capacity(self.asset.scenes.len());
            for scene in &self.asset.scenes {
                let mut obj = JsonObject::new();
                put_string(&mut obj, "name", &scene.name);
                if !scene.nodes.is_empty() {
                    put(&mut obj, "nodes", index_array(&scene.nodes));
                }
                put_opaque(&mut obj, &scene.extras, &scene.extensions);
                arr.push(Value::Object(obj));
            }
            put(root, "scenes", Value::Array(arr));
        }
        put_index(root, "scene", self.asset.scene);
    }

    fn build_skins(&self, root: &mut JsonObject) {
        if self.asset.skins.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.skins.len());
        for skin in &self.asset.skins {
            let mut obj = JsonObject::new();
            put_string(&mut obj, "name", &skin.name);
            put_index(&mut obj, "inverseBindMatrices", skin.inverse_bind_matrices);
            put_index(&mut obj, "skeleton", skin.skeleton);
            put(&mut obj, "joints", index_array(&skin.joints));
            put_opaque(&mut obj, &skin.extras, &skin.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "skins", Value::Array(arr));
    }

    fn build_animations(&self, root: &mut JsonObject) {
        if self.asset.animations.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.animations.len());
        for animation in &self.asset.animations {
            let mut obj = JsonObject::new();
            put_string(&mut obj, "name", &animation.name);
            let mut samplers = Vec::with_capacity(animation.samplers.len());
            for sampler in &animation.samplers {
                let mut s = JsonObject::new();
                put(&mut s, "input", Value::from(sampler.input as u64));
                put(&mut s, "output", Value::from(sampler.output as u64));
                put_string(&mut s, "interpolation", &sampler.interpolation);
                put_opaque(&mut s, &sampler.extras, &sampler.extensions);
                samplers.push(Value::Object(s));
            }
            put(&mut obj, "samplers", Value::Array(samplers));
            let mut channels = Vec::with_capacity(animation.channels.len());
            for channel in &animation.channels {
                let mut c = JsonObject::new();
                put(&mut c, "sampler", Value::from(channel.sampler as u64));
                let mut target = JsonObject::new();
                put_index(&mut target, "node", channel.target.node);
                put(&mut target, "path", Value::from(channel.target.path.as_str()));
                put_opaque(&mut target, &channel.target.extras, &channel.target.extensions);
                put(&mut c, "target", Value::Object(target));
                put_opaque(&mut c, &channel.extras, &channel.extensions);
                channels.push(Value::Object(c));
            }
            put(&mut obj, "channels", Value::Array(channels));
            put_opaque(&mut obj, &animation.extras, &animation.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "animations", Value::Array(arr));
    }

    fn build_cameras(&self, root: &mut JsonObject) {
        if self.asset.cameras.is_empty() {
            return;
        }
        let mut arr = Vec::with_capacity(self.asset.cameras.len());
        for camera in &self.asset.cameras {
            let mut obj = JsonObject::new();
            put_string(&mut obj, "name", &camera.name);
            put_string(&mut obj, "type", &camera.camera_type);
            if let Some(p) = &camera.perspective {
                let mut persp = JsonObject::new();
                put(&mut persp, "yfov", json_f32(p.yfov));
                put(&mut persp, "znear", json_f32(p.znear));
                put_f32(&mut persp, "zfar", p.zfar);
                put_f32(&mut persp, "aspectRatio", p.aspect_ratio);
                put(&mut obj, "perspective", Value::Object(persp));
            }
            if let Some(o) = &camera.orthographic {
                let mut ortho = JsonObject::new();
                put(&mut ortho, "xmag", json_f32(o.xmag));
                put(&mut ortho, "ymag", json_f32(o.ymag));
                put(&mut ortho, "znear", json_f32(o.znear));
                put(&mut ortho, "zfar", json_f32(o.zfar));
                put(&mut obj, "orthographic", Value::Object(ortho));
            }
            put_opaque(&mut obj, &camera.extras, &camera.extensions);
            arr.push(Value::Object(obj));
        }
        put(root, "cameras", Value::Array(arr));
    }
}

// ---------------------------------------------------------------------------
// Shared sub-object builders
// ---------------------------------------------------------------------------

fn build_attribute_set(set: &AttributeSet) -> Value {
    let mut obj = JsonObject::new();
    for attr in &set.attributes {
        put(&mut obj, &attr.name, Value::from(attr.accessor as u64));
    }
    Value::Object(obj)
}

fn texture_info_object(info: &TextureInfo) -> JsonObject {
    let mut obj = JsonObject::new();
    put(&mut obj, "index", Value::from(info.index as u64));
    put_i64(&mut obj, "texCoord", info.tex_coord);
    put_opaque(&mut obj, &info.extras, &info.extensions);
    obj
}

fn build_texture_info(info: &TextureInfo) -> Value {
    Value::Object(texture_info_object(info))
}

fn build_sparse(sparse: &AccessorSparse) -> Value {
    let mut obj = JsonObject::new();
    put(&mut obj, "count", Value::from(sparse.count));
    let mut indices = JsonObject::new();
    put(
        &mut indices,
        "bufferView",
        Value::from(sparse.indices.buffer_view as u64),
    );
    if let Some(offset) = sparse.indices.byte_offset {
        if offset != 0 {
            put(&mut indices, "byteOffset", Value::from(offset));
        }
    }
    put(
        &mut indices,
        "componentType",
        Value::from(sparse.indices.component_type),
    );
    put_opaque(&mut indices, &sparse.indices.extras, &sparse.indices.extensions);
    put(&mut obj, "indices", Value::Object(indices));
    let mut values = JsonObject::new();
    put(
        &mut values,
        "bufferView",
        Value::from(sparse.values.buffer_view as u64),
    );
    if let Some(offset) = sparse.values.byte_offset {
        if offset != 0 {
            put(&mut values, "byteOffset", Value::from(offset));
        }
    }
    put_opaque(&mut values, &sparse.values.extras, &sparse.values.extensions);
    put(&mut obj, "values", Value::Object(values));
    put_opaque(&mut obj, &sparse.extras, &sparse.extensions);
    Value::Object(obj)
}
