mod bytes;
mod chunk;
mod constants;
mod container;
mod convert;
mod document;
mod error;
mod files;
mod header;
mod integrity;
mod schema;
mod uri;

/// Chunk header, chunk view, and chunk iterator types.
pub use chunk::{Chunk, ChunkHead, ChunkIter, ChunkType};
/// Named integer constants, accessor shapes, and MIME types.
pub use constants::{
	AccessorType, BufferTarget, ComponentType, MIME_JPEG, MIME_OCTET_STREAM, MIME_PNG, PrimitiveMode, SamplerFilter, WrapMode,
};
/// Binary container codec entry points and options.
pub use container::{EncodeOptions, GlbParts, decode, encode, is_container};
/// Storage-mode conversion and payload resolution.
pub use convert::{
	ConversionReport, ConvertOptions, ConvertOutcome, ImagePayload, buffer_bytes, convert_buffer, convert_buffers, convert_image,
	convert_images, export_image, image_bytes, region_bytes,
};
/// Document model with binary descriptors and load/save paths.
pub use document::{Accessor, AccessorSparse, Buffer, BufferView, Document, Image, SparseIndices, SparseValues, is_glb_path};
/// Error and result aliases.
pub use error::{ContainerFault, GltfError, Result};
/// Whole-file glTF/GLB repacking.
pub use files::{glb_to_gltf, gltf_to_glb};
/// Container file header.
pub use header::GlbHeader;
/// Buffer-view removal and reference checks.
pub use integrity::{DanglingRef, RefOwner, ReferenceIssue, RemovalReport, check_references, remove_binary_region};
/// Scene-graph records.
pub use schema::{
	Animation, AnimationChannel, AnimationChannelTarget, AnimationSampler, Asset, Attributes, Camera, Extras, GENERATOR, Material, Mesh,
	Node, NormalTextureInfo, OcclusionTextureInfo, Orthographic, PbrMetallicRoughness, Perspective, Primitive, Sampler, Scene, Skin,
	Texture, TextureInfo,
};
/// Storage locator classification and external payload IO.
pub use uri::{Locator, StorageMode, classify, encode_data_uri, identify, parse_data_uri, read_external, resolve_path, write_external};
