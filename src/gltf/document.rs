use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::gltf::{
	AccessorType, Animation, Asset, Camera, ComponentType, EncodeOptions, Extras, GltfError, Material, Mesh, Node, Result, Sampler, Scene,
	Skin, StorageMode, Texture, decode, encode, identify, is_container,
};

/// In-memory glTF document plus the container blob it was loaded with.
///
/// The blob is owned exclusively by the document; buffer views only record
/// offsets into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
	/// Asset metadata.
	#[serde(default = "unstamped_asset")]
	pub asset: Asset,
	/// Default scene index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scene: Option<u32>,
	/// Scenes.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub scenes: Vec<Scene>,
	/// Nodes.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub nodes: Vec<Node>,
	/// Meshes.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub meshes: Vec<Mesh>,
	/// Materials.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub materials: Vec<Material>,
	/// Textures.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub textures: Vec<Texture>,
	/// Texture samplers.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub samplers: Vec<Sampler>,
	/// Images.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub images: Vec<Image>,
	/// Cameras.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub cameras: Vec<Camera>,
	/// Skins.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub skins: Vec<Skin>,
	/// Animations.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub animations: Vec<Animation>,
	/// Accessors.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub accessors: Vec<Accessor>,
	/// Buffer views.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub buffer_views: Vec<BufferView>,
	/// Buffers.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub buffers: Vec<Buffer>,
	/// Extension names used anywhere in the document.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub extensions_used: Vec<String>,
	/// Extension names required to load the document.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub extensions_required: Vec<String>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
	/// Directory that relative external locators resolve against.
	#[serde(skip)]
	pub base_dir: PathBuf,
	#[serde(skip)]
	blob: Option<Vec<u8>>,
}

/// Logical byte store backing one or more buffer views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Buffer {
	/// External path or data URI. Absent means the container blob.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uri: Option<String>,
	/// Length in bytes.
	pub byte_length: u64,
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl Buffer {
	/// Current storage mode of this buffer's bytes.
	pub fn storage_mode(&self) -> StorageMode {
		identify(self.uri.as_deref())
	}
}

/// Byte range within a buffer (a "buffer view").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BufferView {
	/// Parent buffer index.
	pub buffer: u32,
	/// Offset in bytes; absent means 0.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub byte_offset: Option<u64>,
	/// Length in bytes.
	pub byte_length: u64,
	/// Stride between vertex elements in bytes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub byte_stride: Option<u32>,
	/// Usage hint, see [`BufferTarget`](crate::gltf::BufferTarget).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub target: Option<u32>,
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl BufferView {
	/// Byte offset with the default (0) applied.
	pub fn offset(&self) -> u64 {
		self.byte_offset.unwrap_or(0)
	}
}

/// Typed view over a buffer view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Accessor {
	/// Absent means all-zero data (possibly overridden by `sparse`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub buffer_view: Option<u32>,
	/// Offset in bytes; absent means 0.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub byte_offset: Option<u64>,
	/// Raw component type; see [`Accessor::component_type`].
	pub component_type: u32,
	/// Whether integer components map to [0, 1] or [-1, 1].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub normalized: Option<bool>,
	/// Number of elements.
	pub count: u64,
	/// Element shape name (`SCALAR`, `VEC3`, ...).
	#[serde(rename = "type")]
	pub kind: String,
	/// Per-component maximum.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub max: Vec<f64>,
	/// Per-component minimum.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub min: Vec<f64>,
	/// Sparse overrides.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sparse: Option<AccessorSparse>,
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl Accessor {
	/// Validate and return the component type.
	pub fn component_type(&self) -> Result<ComponentType> {
		ComponentType::from_raw(self.component_type)
	}

	/// Validate and return the element shape.
	pub fn accessor_type(&self) -> Result<AccessorType> {
		AccessorType::from_name(&self.kind)
	}
}

/// Sparse override storage for an accessor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessorSparse {
	/// Number of elements.
	pub count: u64,
	/// Sparse element indices.
	pub indices: SparseIndices,
	/// Sparse replacement values.
	pub values: SparseValues,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Location of sparse element indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparseIndices {
	/// Cleared to `None` when the referenced view is removed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub buffer_view: Option<u32>,
	/// Offset in bytes; absent means 0.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub byte_offset: Option<u64>,
	/// Raw component type.
	pub component_type: u32,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Location of sparse replacement values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparseValues {
	/// Cleared to `None` when the referenced view is removed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub buffer_view: Option<u32>,
	/// Offset in bytes; absent means 0.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub byte_offset: Option<u64>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Image referenced by textures: either a URI or a buffer view plus MIME type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Image {
	/// External path or data URI.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uri: Option<String>,
	/// Image MIME type; required with `buffer_view`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mime_type: Option<String>,
	/// Buffer view holding the data.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub buffer_view: Option<u32>,
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl Image {
	/// Image stored at an external path or data URI.
	pub fn from_uri(uri: impl Into<String>) -> Self {
		Self {
			uri: Some(uri.into()),
			..Self::default()
		}
	}

	/// Image stored in a buffer view.
	pub fn from_buffer_view(view: u32, mime_type: impl Into<String>) -> Self {
		Self {
			buffer_view: Some(view),
			mime_type: Some(mime_type.into()),
			..Self::default()
		}
	}

	/// Current storage mode; buffer-view images report [`StorageMode::ContainerBlob`].
	///
	/// Returns `None` when neither `uri` nor `bufferView` is set.
	pub fn storage_mode(&self) -> Option<StorageMode> {
		if self.buffer_view.is_some() {
			return Some(StorageMode::ContainerBlob);
		}
		match self.uri.as_deref() {
			None | Some("") => None,
			Some(uri) => Some(identify(Some(uri))),
		}
	}
}

impl Document {
	/// Fresh document with default asset metadata.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse plain glTF JSON text.
	pub fn from_json_str(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Parse a binary container.
	pub fn from_glb_bytes(bytes: &[u8]) -> Result<Self> {
		let parts = decode(bytes)?;
		let mut doc = Self::from_json_str(&parts.json)?;
		doc.blob = parts.blob;
		Ok(doc)
	}

	/// Parse either representation, sniffing the container magic.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		if is_container(bytes) {
			return Self::from_glb_bytes(bytes);
		}
		Ok(serde_json::from_slice(bytes)?)
	}

	/// Compact JSON with no incidental whitespace.
	pub fn to_json_string(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}

	/// Two-space indented JSON.
	pub fn to_json_pretty(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// Plain `.gltf` file contents. Fails if any bytes live only in the container blob.
	pub fn to_gltf_bytes(&self) -> Result<Vec<u8>> {
		self.check_plain_json()?;
		Ok(self.to_json_pretty()?.into_bytes())
	}

	/// Binary `.glb` file contents.
	pub fn to_glb_bytes(&self, options: &EncodeOptions) -> Result<Vec<u8>> {
		self.check_container()?;
		encode(&self.to_json_string()?, self.blob.as_deref(), options)
	}

	/// Load a `.glb` container or plain JSON file, choosing by extension.
	///
	/// The base directory becomes the file's parent directory.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let bytes = fs::read(path).map_err(|source| {
			if source.kind() == ErrorKind::NotFound {
				GltfError::NotFound { path: path.to_path_buf() }
			} else {
				GltfError::Io {
					path: path.to_path_buf(),
					source,
				}
			}
		})?;

		let mut doc = if is_glb_path(path) {
			Self::from_glb_bytes(&bytes)?
		} else {
			Self::from_slice(&bytes)?
		};
		doc.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

		tracing::info!(
			path = %path.display(),
			buffers = doc.buffers.len(),
			images = doc.images.len(),
			blob = doc.blob.as_ref().map_or(0, Vec::len),
			"loaded document"
		);
		Ok(doc)
	}

	/// Save as `.glb` container or plain JSON, choosing by extension.
	pub fn save(&self, path: impl AsRef<Path>, options: &EncodeOptions) -> Result<()> {
		let path = path.as_ref();
		let bytes = if is_glb_path(path) { self.to_glb_bytes(options)? } else { self.to_gltf_bytes()? };
		fs::write(path, &bytes).map_err(GltfError::io(path))?;
		tracing::info!(path = %path.display(), bytes = bytes.len(), "saved document");
		Ok(())
	}

	/// Container blob, when one is loaded.
	pub fn blob(&self) -> Option<&[u8]> {
		self.blob.as_deref()
	}

	/// Mutable access to the container blob slot.
	pub fn blob_mut(&mut self) -> &mut Option<Vec<u8>> {
		&mut self.blob
	}

	/// Replace the container blob.
	pub fn set_blob(&mut self, blob: Option<Vec<u8>>) {
		self.blob = blob;
	}

	/// Remove and return the container blob.
	pub fn take_blob(&mut self) -> Option<Vec<u8>> {
		self.blob.take()
	}

	/// Buffer by index.
	pub fn buffer(&self, index: usize) -> Result<&Buffer> {
		self.buffers.get(index).ok_or(GltfError::BufferIndexOutOfRange {
			index,
			len: self.buffers.len(),
		})
	}

	/// Buffer view by index.
	pub fn buffer_view(&self, index: usize) -> Result<&BufferView> {
		self.buffer_views.get(index).ok_or(GltfError::BufferViewIndexOutOfRange {
			index,
			len: self.buffer_views.len(),
		})
	}

	/// Image by index.
	pub fn image(&self, index: usize) -> Result<&Image> {
		self.images.get(index).ok_or(GltfError::ImageIndexOutOfRange {
			index,
			len: self.images.len(),
		})
	}

	/// Indices of buffers whose bytes live in the container blob.
	pub fn blob_backed_buffers(&self) -> impl Iterator<Item = usize> + '_ {
		self.buffers
			.iter()
			.enumerate()
			.filter(|(_, buffer)| buffer.storage_mode() == StorageMode::ContainerBlob)
			.map(|(index, _)| index)
	}

	fn check_plain_json(&self) -> Result<()> {
		if let Some(index) = self.blob_backed_buffers().next() {
			return Err(GltfError::IncompatibleStorageMode {
				entity: "buffer",
				index,
				from: StorageMode::ContainerBlob,
				to: "plain JSON",
			});
		}
		if self.blob.as_ref().is_some_and(|blob| !blob.is_empty()) {
			return Err(GltfError::IncompatibleStorageMode {
				entity: "document",
				index: 0,
				from: StorageMode::ContainerBlob,
				to: "plain JSON",
			});
		}
		Ok(())
	}

	fn check_container(&self) -> Result<()> {
		for index in self.blob_backed_buffers() {
			if index != 0 {
				return Err(GltfError::IncompatibleStorageMode {
					entity: "buffer",
					index,
					from: StorageMode::ContainerBlob,
					to: "GLB (only buffer 0 may use the BIN chunk)",
				});
			}

			let declared = self.buffers[index].byte_length;
			let actual = self.blob.as_ref().map_or(0, Vec::len);
			if declared > 0 && self.blob.is_none() {
				return Err(GltfError::BlobMissing { index });
			}
			if (actual as u64) < declared {
				return Err(GltfError::BufferLengthMismatch { index, declared, actual });
			}
		}
		Ok(())
	}
}

/// Asset used when parsed JSON has no `asset` object; carries no generator.
fn unstamped_asset() -> Asset {
	Asset {
		generator: None,
		..Asset::default()
	}
}

/// Return `true` when the path has a `.glb` extension (case-insensitive).
pub fn is_glb_path(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| ext.eq_ignore_ascii_case("glb"))
}

#[cfg(test)]
mod tests;
