//! Public library API for reading, writing, and re-packing glTF 2.0 documents.

/// Container codec, document model, storage-mode conversion, and reference maintenance.
pub mod gltf;
