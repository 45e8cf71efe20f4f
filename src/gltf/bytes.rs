use crate::gltf::ContainerFault;

/// Bounded little-endian cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], ContainerFault> {
		if n > self.remaining() {
			return Err(ContainerFault::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a four-byte tag.
	pub fn read_code4(&mut self) -> Result<[u8; 4], ContainerFault> {
		let raw = self.read_exact(4)?;
		let mut out = [0_u8; 4];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32, ContainerFault> {
		Ok(u32::from_le_bytes(self.read_code4()?))
	}
}

/// Bytes needed to bring `len` up to the next multiple of 4.
pub fn padding_for(len: usize) -> usize {
	(4 - len % 4) % 4
}

/// Append `fill` bytes until `bytes.len()` is a multiple of 4.
pub fn pad_to_4(bytes: &mut Vec<u8>, fill: u8) {
	let pad = padding_for(bytes.len());
	bytes.resize(bytes.len() + pad, fill);
}

#[cfg(test)]
mod tests {
	use super::{Cursor, pad_to_4, padding_for};
	use crate::gltf::ContainerFault;

	#[test]
	fn padding_reaches_next_multiple_of_four() {
		for len in 0..64 {
			let pad = padding_for(len);
			assert!(pad < 4);
			assert_eq!((len + pad) % 4, 0, "len={len}");
		}
		assert_eq!(padding_for(0), 0);
		assert_eq!(padding_for(5), 3);
	}

	#[test]
	fn pad_to_4_uses_fill_byte() {
		let mut bytes = b"{}".to_vec();
		pad_to_4(&mut bytes, b' ');
		assert_eq!(bytes, b"{}  ");

		let mut aligned = vec![1, 2, 3, 4];
		pad_to_4(&mut aligned, 0);
		assert_eq!(aligned, vec![1, 2, 3, 4]);
	}

	#[test]
	fn cursor_reports_eof_with_offsets() {
		let mut cursor = Cursor::new(&[1, 0, 0, 0, 9]);
		assert_eq!(cursor.read_u32_le().expect("u32 reads"), 1);
		let err = cursor.read_u32_le().expect_err("short read fails");
		assert_eq!(err, ContainerFault::UnexpectedEof { at: 4, need: 4, rem: 1 });
	}
}
