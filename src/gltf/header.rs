use crate::gltf::ContainerFault;
use crate::gltf::bytes::Cursor;

/// Parsed 12-byte GLB file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlbHeader {
	/// Container format version.
	pub version: u32,
	/// Total container length in bytes, header included.
	pub length: u32,
}

impl GlbHeader {
	/// Encoded header size in bytes.
	pub const SIZE: usize = 12;
	/// `glTF` magic as a little-endian `u32`.
	pub const MAGIC: u32 = 0x4654_6C67;
	/// The only container version this crate reads and writes.
	pub const VERSION: u32 = 2;

	/// Parse the header from the cursor and validate it against the full stream length.
	pub fn parse(cursor: &mut Cursor<'_>, stream_len: usize) -> Result<Self, ContainerFault> {
		let magic = cursor.read_code4()?;
		if u32::from_le_bytes(magic) != Self::MAGIC {
			return Err(ContainerFault::BadMagic { magic });
		}

		let version = cursor.read_u32_le()?;
		if version != Self::VERSION {
			return Err(ContainerFault::UnsupportedVersion { version });
		}

		let length = cursor.read_u32_le()?;
		if usize::try_from(length).ok() != Some(stream_len) {
			return Err(ContainerFault::LengthMismatch {
				declared: length,
				actual: stream_len,
			});
		}

		Ok(Self { version, length })
	}

	/// Append the encoded header to `out`.
	pub fn write(self, out: &mut Vec<u8>) {
		out.extend_from_slice(&Self::MAGIC.to_le_bytes());
		out.extend_from_slice(&self.version.to_le_bytes());
		out.extend_from_slice(&self.length.to_le_bytes());
	}
}

#[cfg(test)]
mod tests {
	use crate::gltf::bytes::Cursor;
	use crate::gltf::{ContainerFault, GlbHeader};

	fn header_bytes(magic: &[u8; 4], version: u32, length: u32) -> Vec<u8> {
		let mut bytes = magic.to_vec();
		bytes.extend_from_slice(&version.to_le_bytes());
		bytes.extend_from_slice(&length.to_le_bytes());
		bytes
	}

	#[test]
	fn parses_v2_header() {
		let bytes = header_bytes(b"glTF", 2, 12);
		let header = GlbHeader::parse(&mut Cursor::new(&bytes), bytes.len()).expect("header parses");
		assert_eq!(header, GlbHeader { version: 2, length: 12 });
	}

	#[test]
	fn rejects_bad_magic() {
		let bytes = header_bytes(b"glTf", 2, 12);
		let err = GlbHeader::parse(&mut Cursor::new(&bytes), bytes.len()).expect_err("bad magic fails");
		assert_eq!(err, ContainerFault::BadMagic { magic: *b"glTf" });
	}

	#[test]
	fn rejects_version_one() {
		let bytes = header_bytes(b"glTF", 1, 12);
		let err = GlbHeader::parse(&mut Cursor::new(&bytes), bytes.len()).expect_err("v1 fails");
		assert_eq!(err, ContainerFault::UnsupportedVersion { version: 1 });
	}

	#[test]
	fn rejects_length_mismatch() {
		let bytes = header_bytes(b"glTF", 2, 16);
		let err = GlbHeader::parse(&mut Cursor::new(&bytes), bytes.len()).expect_err("length mismatch fails");
		assert_eq!(err, ContainerFault::LengthMismatch { declared: 16, actual: 12 });
	}

	#[test]
	fn write_matches_parse() {
		let mut out = Vec::new();
		GlbHeader { version: 2, length: 12 }.write(&mut out);
		assert_eq!(out, header_bytes(b"glTF", 2, 12));
	}
}
