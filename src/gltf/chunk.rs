use crate::gltf::ContainerFault;
use crate::gltf::bytes::Cursor;

/// Chunk type tag stored after each chunk length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkType {
	/// Structured JSON content (`JSON`).
	Json,
	/// Binary buffer payload (`BIN\0`).
	Bin,
	/// Any other tag; readers skip these.
	Unknown(u32),
}

impl ChunkType {
	/// `JSON` tag as a little-endian `u32`.
	pub const JSON: u32 = 0x4E4F_534A;
	/// `BIN\0` tag as a little-endian `u32`.
	pub const BIN: u32 = 0x004E_4942;

	/// Map a raw tag onto a chunk type.
	pub fn from_raw(raw: u32) -> Self {
		match raw {
			Self::JSON => Self::Json,
			Self::BIN => Self::Bin,
			other => Self::Unknown(other),
		}
	}

	/// Raw tag value.
	pub fn raw(self) -> u32 {
		match self {
			Self::Json => Self::JSON,
			Self::Bin => Self::BIN,
			Self::Unknown(raw) => raw,
		}
	}

	/// Byte used to pad this chunk's payload to a 4-byte boundary.
	pub fn pad_byte(self) -> u8 {
		match self {
			Self::Json => b' ',
			_ => 0,
		}
	}
}

/// Parsed 8-byte chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHead {
	/// Payload length in bytes, padding included.
	pub length: u32,
	/// Chunk type tag.
	pub kind: ChunkType,
}

impl ChunkHead {
	/// Encoded chunk header size in bytes.
	pub const SIZE: usize = 8;

	/// Parse a chunk header from cursor position.
	pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ContainerFault> {
		let length = cursor.read_u32_le()?;
		let kind = ChunkType::from_raw(cursor.read_u32_le()?);
		Ok(Self { length, kind })
	}

	/// Append the encoded chunk header to `out`.
	pub fn write(self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.length.to_le_bytes());
		out.extend_from_slice(&self.kind.raw().to_le_bytes());
	}
}

/// One chunk borrowed from a container stream.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
	/// Parsed chunk header.
	pub head: ChunkHead,
	/// Chunk payload, padding included.
	pub payload: &'a [u8],
	/// Offset of the chunk header within the container.
	pub file_offset: usize,
}

/// Iterator over chunks following the container header.
pub struct ChunkIter<'a> {
	cursor: Cursor<'a>,
	offset_base: usize,
	done: bool,
}

impl<'a> ChunkIter<'a> {
	/// Iterate chunks in `bytes` starting at `offset`.
	pub fn new(bytes: &'a [u8], offset: usize) -> Self {
		let slice = bytes.get(offset..).unwrap_or(&[]);
		Self {
			cursor: Cursor::new(slice),
			offset_base: offset,
			done: false,
		}
	}
}

impl<'a> Iterator for ChunkIter<'a> {
	type Item = Result<Chunk<'a>, ContainerFault>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		if self.cursor.remaining() == 0 {
			self.done = true;
			return None;
		}

		let file_offset = self.offset_base + self.cursor.pos();
		let head = match ChunkHead::parse(&mut self.cursor) {
			Ok(value) => value,
			Err(err) => {
				self.done = true;
				return Some(Err(err));
			}
		};

		let rem = self.cursor.remaining();
		let payload_len = match usize::try_from(head.length) {
			Ok(value) if value <= rem => value,
			_ => {
				self.done = true;
				return Some(Err(ContainerFault::ChunkOutOfRange {
					at: file_offset,
					len: head.length,
					rem,
				}));
			}
		};

		let payload = match self.cursor.read_exact(payload_len) {
			Ok(value) => value,
			Err(err) => {
				self.done = true;
				return Some(Err(err));
			}
		};

		Some(Ok(Chunk { head, payload, file_offset }))
	}
}

#[cfg(test)]
mod tests {
	use super::{ChunkIter, ChunkType};
	use crate::gltf::ContainerFault;

	fn chunk(kind: u32, payload: &[u8]) -> Vec<u8> {
		let mut out = (payload.len() as u32).to_le_bytes().to_vec();
		out.extend_from_slice(&kind.to_le_bytes());
		out.extend_from_slice(payload);
		out
	}

	#[test]
	fn tags_spell_ascii_names() {
		assert_eq!(&ChunkType::JSON.to_le_bytes(), b"JSON");
		assert_eq!(&ChunkType::BIN.to_le_bytes(), b"BIN\0");
	}

	#[test]
	fn iterates_chunks_with_offsets() {
		let mut bytes = chunk(ChunkType::JSON, b"{}  ");
		bytes.extend(chunk(ChunkType::BIN, &[1, 2, 3, 4]));

		let chunks: Vec<_> = ChunkIter::new(&bytes, 0).collect::<Result<_, _>>().expect("chunks parse");
		assert_eq!(chunks.len(), 2);
		assert_eq!(chunks[0].head.kind, ChunkType::Json);
		assert_eq!(chunks[0].payload, b"{}  ");
		assert_eq!(chunks[1].head.kind, ChunkType::Bin);
		assert_eq!(chunks[1].file_offset, 12);
		assert_eq!(chunks[1].payload, &[1, 2, 3, 4]);
	}

	#[test]
	fn unknown_tags_are_preserved() {
		let bytes = chunk(0x1234_5678, &[0; 4]);
		let first = ChunkIter::new(&bytes, 0).next().expect("one chunk").expect("chunk parses");
		assert_eq!(first.head.kind, ChunkType::Unknown(0x1234_5678));
	}

	#[test]
	fn oversized_chunk_stops_iteration() {
		let mut bytes = 64_u32.to_le_bytes().to_vec();
		bytes.extend_from_slice(&ChunkType::BIN.to_le_bytes());
		bytes.extend_from_slice(&[0; 4]);

		let mut iter = ChunkIter::new(&bytes, 0);
		let err = iter.next().expect("one item").expect_err("oversized chunk fails");
		assert_eq!(err, ContainerFault::ChunkOutOfRange { at: 0, len: 64, rem: 4 });
		assert!(iter.next().is_none());
	}
}
