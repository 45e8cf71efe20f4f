//! Scene-graph records carried by a [`Document`](crate::gltf::Document).
//!
//! These are plain data: the crate never interprets them beyond serde
//! defaulting. Optional glTF defaults are exposed through accessor methods so
//! absent fields stay absent on round trip.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::gltf::{PrimitiveMode, WrapMode};

/// Free-form, order-preserving extension or extras payload.
pub type Extras = Map<String, Value>;

/// Attribute semantic (`POSITION`, `TEXCOORD_0`, `_CUSTOM`) to accessor index.
pub type Attributes = BTreeMap<String, u32>;

/// Generator string written into new documents.
pub const GENERATOR: &str = concat!("gltfkit@v", env!("CARGO_PKG_VERSION"));

/// Asset metadata. `version` is the only required field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
	/// Copyright notice.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub copyright: Option<String>,
	/// Tool that produced the asset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub generator: Option<String>,
	/// glTF version the document targets.
	#[serde(default = "default_asset_version")]
	pub version: String,
	/// Minimum glTF version a loader must support.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_version: Option<String>,
	/// Extension objects keyed by extension name.
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl Default for Asset {
	fn default() -> Self {
		Self {
			copyright: None,
			generator: Some(GENERATOR.to_owned()),
			version: default_asset_version(),
			min_version: None,
			extensions: Extras::new(),
			extras: Extras::new(),
		}
	}
}

fn default_asset_version() -> String {
	"2.0".to_owned()
}

/// Root node set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scene {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Root node indices.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub nodes: Vec<u32>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Node in the transform hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Node {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Camera index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub camera: Option<u32>,
	/// Child node indices.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<u32>,
	/// Skin index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub skin: Option<u32>,
	/// Mesh index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mesh: Option<u32>,
	/// Column-major 4x4 local transform.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub matrix: Option<Vec<f64>>,
	/// Unit quaternion `(x, y, z, w)`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rotation: Option<Vec<f64>>,
	/// Non-uniform scale `[x, y, z]`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scale: Option<Vec<f64>>,
	/// Translation `[x, y, z]`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub translation: Option<Vec<f64>>,
	/// Morph target weights.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub weights: Vec<f64>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Mesh made of one or more primitives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mesh {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Primitives to render.
	pub primitives: Vec<Primitive>,
	/// Default morph target weights.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub weights: Vec<f64>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Geometry to be rendered with a material.
///
/// Each primitive owns its own attribute map; nothing is shared between siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Primitive {
	/// Attribute semantic to accessor index.
	pub attributes: Attributes,
	/// Accessor holding vertex indices.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub indices: Option<u32>,
	/// Material index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub material: Option<u32>,
	/// Raw topology; see [`Primitive::mode`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mode: Option<u32>,
	/// Morph targets, each an attribute map of displacements.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub targets: Vec<Attributes>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl Primitive {
	/// Topology with the glTF default (`TRIANGLES`) applied.
	pub fn mode(&self) -> u32 {
		self.mode.unwrap_or(PrimitiveMode::TRIANGLES.raw())
	}
}

/// Texture reference used by material slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextureInfo {
	/// Texture index.
	pub index: u32,
	/// Texture coordinate set (`TEXCOORD_n`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tex_coord: Option<u32>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Normal map reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalTextureInfo {
	/// Texture index.
	pub index: u32,
	/// Texture coordinate set (`TEXCOORD_n`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tex_coord: Option<u32>,
	/// Normal vector scale.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scale: Option<f64>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Occlusion map reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OcclusionTextureInfo {
	/// Texture index.
	pub index: u32,
	/// Texture coordinate set (`TEXCOORD_n`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tex_coord: Option<u32>,
	/// Occlusion strength.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub strength: Option<f64>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Metallic-roughness material parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
	/// Linear RGBA base color.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base_color_factor: Option<[f64; 4]>,
	/// Base color texture.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base_color_texture: Option<TextureInfo>,
	/// Metalness factor.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub metallic_factor: Option<f64>,
	/// Roughness factor.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub roughness_factor: Option<f64>,
	/// Metallic-roughness texture.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub metallic_roughness_texture: Option<TextureInfo>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl PbrMetallicRoughness {
	/// Base color with the default (opaque white) applied.
	pub fn base_color_factor(&self) -> [f64; 4] {
		self.base_color_factor.unwrap_or([1.0; 4])
	}

	/// Metalness with the default (1.0) applied.
	pub fn metallic_factor(&self) -> f64 {
		self.metallic_factor.unwrap_or(1.0)
	}

	/// Roughness with the default (1.0) applied.
	pub fn roughness_factor(&self) -> f64 {
		self.roughness_factor.unwrap_or(1.0)
	}
}

/// Surface appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Material {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Metallic-roughness parameters.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
	/// Tangent-space normal map.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub normal_texture: Option<NormalTextureInfo>,
	/// Occlusion map.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub occlusion_texture: Option<OcclusionTextureInfo>,
	/// Emissive map.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emissive_texture: Option<TextureInfo>,
	/// Linear RGB emissive color.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emissive_factor: Option<[f64; 3]>,
	/// `OPAQUE`, `MASK`, or `BLEND`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub alpha_mode: Option<String>,
	/// Alpha cutoff for `MASK` mode.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub alpha_cutoff: Option<f64>,
	/// Whether back faces are rendered.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub double_sided: Option<bool>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl Material {
	/// Alpha mode with the default (`OPAQUE`) applied.
	pub fn alpha_mode(&self) -> &str {
		self.alpha_mode.as_deref().unwrap_or("OPAQUE")
	}

	/// Alpha cutoff with the default (0.5) applied.
	pub fn alpha_cutoff(&self) -> f64 {
		self.alpha_cutoff.unwrap_or(0.5)
	}

	/// Emissive color with the default (black) applied.
	pub fn emissive_factor(&self) -> [f64; 3] {
		self.emissive_factor.unwrap_or([0.0; 3])
	}

	/// Double-sided flag with the default (`false`) applied.
	pub fn double_sided(&self) -> bool {
		self.double_sided.unwrap_or(false)
	}
}

/// Image plus sampler pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Texture {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Sampler index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sampler: Option<u32>,
	/// Image index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<u32>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Texture filtering and wrapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sampler {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Raw magnification filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mag_filter: Option<u32>,
	/// Raw minification filter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_filter: Option<u32>,
	/// Raw S wrap mode.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wrap_s: Option<u32>,
	/// Raw T wrap mode.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wrap_t: Option<u32>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl Sampler {
	/// S wrapping with the default (`REPEAT`) applied.
	pub fn wrap_s(&self) -> u32 {
		self.wrap_s.unwrap_or(WrapMode::REPEAT.raw())
	}

	/// T wrapping with the default (`REPEAT`) applied.
	pub fn wrap_t(&self) -> u32 {
		self.wrap_t.unwrap_or(WrapMode::REPEAT.raw())
	}
}

/// Camera projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Camera {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// `perspective` or `orthographic`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Perspective parameters when `type` is `perspective`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub perspective: Option<Perspective>,
	/// Orthographic parameters when `type` is `orthographic`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub orthographic: Option<Orthographic>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Perspective {
	/// Viewport aspect ratio.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub aspect_ratio: Option<f64>,
	/// Vertical field of view in radians.
	pub yfov: f64,
	/// Absent means an infinite far plane.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub zfar: Option<f64>,
	/// Near clip distance.
	pub znear: f64,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Orthographic projection parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Orthographic {
	/// Horizontal magnification.
	pub xmag: f64,
	/// Vertical magnification.
	pub ymag: f64,
	/// Far clip distance.
	pub zfar: f64,
	/// Near clip distance.
	pub znear: f64,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Joints and inverse bind matrices for skinning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skin {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Accessor holding inverse bind matrices.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inverse_bind_matrices: Option<u32>,
	/// Skeleton root node.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub skeleton: Option<u32>,
	/// Joint node indices.
	pub joints: Vec<u32>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Keyframe animation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Animation {
	/// Optional user-facing name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Channels targeting node properties.
	pub channels: Vec<AnimationChannel>,
	/// Keyframe samplers referenced by channels.
	pub samplers: Vec<AnimationSampler>,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Binds an animation sampler to a node property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationChannel {
	/// Index into the owning animation's samplers.
	pub sampler: u32,
	/// Animated node and property.
	pub target: AnimationChannelTarget,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Node property driven by a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationChannelTarget {
	/// Target node index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node: Option<u32>,
	/// `translation`, `rotation`, `scale`, or `weights`.
	pub path: String,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

/// Keyframe input/output pair with interpolation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationSampler {
	/// Accessor holding keyframe times.
	pub input: u32,
	/// `LINEAR`, `STEP`, or `CUBICSPLINE`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub interpolation: Option<String>,
	/// Accessor holding keyframe values.
	pub output: u32,
	/// Extension objects keyed by extension name.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extensions: Extras,
	/// Application-specific data.
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub extras: Extras,
}

impl AnimationSampler {
	/// Interpolation with the default (`LINEAR`) applied.
	pub fn interpolation(&self) -> &str {
		self.interpolation.as_deref().unwrap_or("LINEAR")
	}
}
