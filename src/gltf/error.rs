use std::path::PathBuf;

use thiserror::Error;

use crate::gltf::StorageMode;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, GltfError>;

/// Errors produced while decoding, converting, and writing glTF data.
#[derive(Debug, Error)]
pub enum GltfError {
	/// The binary container could not be parsed.
	#[error("malformed container: {0}")]
	MalformedContainer(#[from] ContainerFault),
	/// JSON text did not match the document model.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Filesystem read or write failure for a specific path.
	#[error("io: {path}: {source}")]
	Io {
		/// Path being read or written.
		path: PathBuf,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
	/// Top-level file to load does not exist.
	#[error("file not found: {path}")]
	NotFound {
		/// Requested path.
		path: PathBuf,
	},
	/// Target file exists and overwriting was not allowed.
	#[error("refusing to overwrite existing file {path}")]
	FileExistsNoOverride {
		/// Existing destination path.
		path: PathBuf,
	},
	/// Data cannot be represented in the requested storage mode or output format.
	#[error("{entity} {index}: cannot store {from} data as {to}")]
	IncompatibleStorageMode {
		/// Entity kind (`buffer`, `image`, `document`).
		entity: &'static str,
		/// Entity index.
		index: usize,
		/// Current storage mode.
		from: StorageMode,
		/// Requested representation.
		to: &'static str,
	},
	/// Locator starts with `data:` but is not a base64 data URI.
	#[error("invalid data uri: {reason}")]
	InvalidDataUri {
		/// Human-readable parse failure.
		reason: &'static str,
	},
	/// Data URI payload is not valid base64.
	#[error("invalid base64 payload: {0}")]
	InvalidBase64(#[from] base64::DecodeError),
	/// Resolved payload is shorter than the declared byte length.
	#[error("buffer {index}: declared byteLength {declared}, resolved {actual} bytes")]
	BufferLengthMismatch {
		/// Buffer index.
		index: usize,
		/// Declared `byteLength`.
		declared: u64,
		/// Resolved payload length.
		actual: usize,
	},
	/// Buffer has no locator but the document holds no container blob.
	#[error("buffer {index} is stored in the container blob, but no blob is loaded")]
	BlobMissing {
		/// Buffer index.
		index: usize,
	},
	/// Buffer index does not exist.
	#[error("buffer index out of range: idx={index}, len={len}")]
	BufferIndexOutOfRange {
		/// Offending index.
		index: usize,
		/// Number of buffers.
		len: usize,
	},
	/// Buffer view index does not exist.
	#[error("buffer view index out of range: idx={index}, len={len}")]
	BufferViewIndexOutOfRange {
		/// Offending index.
		index: usize,
		/// Number of buffer views.
		len: usize,
	},
	/// Image index does not exist.
	#[error("image index out of range: idx={index}, len={len}")]
	ImageIndexOutOfRange {
		/// Offending index.
		index: usize,
		/// Number of images.
		len: usize,
	},
	/// Buffer view range exceeds its parent buffer.
	#[error("buffer view {view}: range {offset}+{length} exceeds buffer length {buffer_len}")]
	BufferViewOutOfBounds {
		/// Buffer view index.
		view: usize,
		/// View byte offset.
		offset: u64,
		/// View byte length.
		length: u64,
		/// Resolved parent buffer length.
		buffer_len: usize,
	},
	/// Image has neither a URI nor a buffer view.
	#[error("image {index} has neither uri nor bufferView")]
	ImageSourceMissing {
		/// Image index.
		index: usize,
	},
	/// Integer or name is not a member of a named constant set.
	#[error("unknown {kind} constant: {value}")]
	UnknownConstant {
		/// Constant family name.
		kind: &'static str,
		/// Offending raw value or name.
		value: String,
	},
	/// Output size does not fit the 32-bit container length fields.
	#[error("container too large: {len} bytes")]
	ContainerTooLarge {
		/// Computed byte length.
		len: usize,
	},
}

/// Specific reasons a binary container failed to decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerFault {
	/// Leading magic is not `glTF`.
	#[error("bad magic {magic:?}")]
	BadMagic {
		/// First four bytes of the stream.
		magic: [u8; 4],
	},
	/// Container version is not supported.
	#[error("unsupported version {version} (expected 2)")]
	UnsupportedVersion {
		/// Parsed version field.
		version: u32,
	},
	/// Header length field disagrees with the stream length.
	#[error("declared length {declared} != actual length {actual}")]
	LengthMismatch {
		/// Header `length` field.
		declared: u32,
		/// Number of bytes supplied.
		actual: usize,
	},
	/// First chunk is not the JSON chunk.
	#[error("first chunk type 0x{chunk_type:08x} is not JSON")]
	FirstChunkNotJson {
		/// Type tag found in position 0.
		chunk_type: u32,
	},
	/// Container holds no chunks at all.
	#[error("missing JSON chunk")]
	MissingJsonChunk,
	/// Chunk payload extends past the end of the stream.
	#[error("chunk at offset {at} declares {len} bytes, remaining {rem}")]
	ChunkOutOfRange {
		/// Chunk header offset.
		at: usize,
		/// Declared chunk length.
		len: u32,
		/// Bytes left after the chunk header.
		rem: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// JSON chunk payload is not UTF-8.
	#[error("JSON chunk is not valid utf-8")]
	JsonNotUtf8,
}

impl GltfError {
	/// Build an IO error tagged with the path being touched.
	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { path, source }
	}
}
