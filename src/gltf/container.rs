use crate::gltf::bytes::{Cursor, padding_for};
use crate::gltf::{ChunkHead, ChunkIter, ChunkType, ContainerFault, GlbHeader, GltfError, Result};

/// JSON text and optional binary payload split out of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlbParts {
	/// JSON chunk text with trailing padding removed.
	pub json: String,
	/// First binary chunk payload, padding included. `None` when absent or zero-length.
	pub blob: Option<Vec<u8>>,
}

/// Knobs for container encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
	/// Write a zero-length `BIN` chunk when the blob is present but empty.
	pub emit_empty_bin_chunk: bool,
}

/// Split a binary container into JSON text and optional blob.
pub fn decode(bytes: &[u8]) -> Result<GlbParts> {
	let mut cursor = Cursor::new(bytes);
	GlbHeader::parse(&mut cursor, bytes.len())?;

	let mut chunks = ChunkIter::new(bytes, GlbHeader::SIZE);
	let first = chunks.next().ok_or(ContainerFault::MissingJsonChunk)??;
	if first.head.kind != ChunkType::Json {
		return Err(ContainerFault::FirstChunkNotJson {
			chunk_type: first.head.kind.raw(),
		}
		.into());
	}

	let json = std::str::from_utf8(first.payload).map_err(|_| ContainerFault::JsonNotUtf8)?;
	let json = json.trim_end_matches([' ', '\0']).to_owned();

	let mut blob = None;
	let mut seen_bin = false;
	for chunk in chunks {
		let chunk = chunk?;
		match chunk.head.kind {
			ChunkType::Bin if !seen_bin => {
				seen_bin = true;
				if !chunk.payload.is_empty() {
					blob = Some(chunk.payload.to_vec());
				}
			}
			kind => {
				tracing::debug!(offset = chunk.file_offset, tag = kind.raw(), "skipping chunk");
			}
		}
	}

	Ok(GlbParts { json, blob })
}

/// Assemble a container from JSON text and optional blob.
///
/// The JSON payload is padded with spaces and the blob with zeros. An empty blob is
/// omitted unless [`EncodeOptions::emit_empty_bin_chunk`] is set.
pub fn encode(json: &str, blob: Option<&[u8]>, options: &EncodeOptions) -> Result<Vec<u8>> {
	let json_len = json.len() + padding_for(json.len());
	let bin = blob.filter(|bytes| !bytes.is_empty() || options.emit_empty_bin_chunk);
	let bin_len = bin.map(|bytes| bytes.len() + padding_for(bytes.len()));

	let total = GlbHeader::SIZE + ChunkHead::SIZE + json_len + bin_len.map_or(0, |len| ChunkHead::SIZE + len);
	let length = u32::try_from(total).map_err(|_| GltfError::ContainerTooLarge { len: total })?;

	let mut out = Vec::with_capacity(total);
	GlbHeader {
		version: GlbHeader::VERSION,
		length,
	}
	.write(&mut out);

	write_chunk(&mut out, ChunkType::Json, json.as_bytes(), json_len);
	if let (Some(bytes), Some(len)) = (bin, bin_len) {
		write_chunk(&mut out, ChunkType::Bin, bytes, len);
	}

	Ok(out)
}

/// Return `true` when `bytes` starts with the container magic.
pub fn is_container(bytes: &[u8]) -> bool {
	bytes.get(0..4).is_some_and(|magic| magic == b"glTF")
}

fn write_chunk(out: &mut Vec<u8>, kind: ChunkType, payload: &[u8], padded_len: usize) {
	// `padded_len` is bounded by the already validated total length.
	ChunkHead {
		length: padded_len as u32,
		kind,
	}
	.write(out);
	out.extend_from_slice(payload);
	out.resize(out.len() + (padded_len - payload.len()), kind.pad_byte());
}
