use crate::gltf::{GltfError, Result};

/// MIME type for PNG images.
pub const MIME_PNG: &str = "image/png";
/// MIME type for JPEG images.
pub const MIME_JPEG: &str = "image/jpeg";
/// MIME type for opaque binary buffers.
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

macro_rules! named_constants {
	($(#[$meta:meta])* $name:ident, $kind:literal { $($(#[$vmeta:meta])* $member:ident = $value:literal),+ $(,)? }) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub struct $name(u32);

		impl $name {
			$($(#[$vmeta])* pub const $member: Self = Self($value);)+

			/// Every member of the set, in declaration order.
			pub const ALL: &'static [Self] = &[$(Self::$member),+];

			/// Validate a raw integer against the set.
			pub fn from_raw(raw: u32) -> Result<Self> {
				if Self::ALL.iter().any(|item| item.0 == raw) {
					Ok(Self(raw))
				} else {
					Err(GltfError::UnknownConstant {
						kind: $kind,
						value: raw.to_string(),
					})
				}
			}

			/// Look a member up by its upper-case name.
			pub fn from_name(name: &str) -> Result<Self> {
				match name {
					$(stringify!($member) => Ok(Self::$member),)+
					_ => Err(GltfError::UnknownConstant {
						kind: $kind,
						value: name.to_owned(),
					}),
				}
			}

			/// Raw integer stored in JSON.
			pub fn raw(self) -> u32 {
				self.0
			}

			/// Upper-case member name.
			pub fn name(self) -> &'static str {
				match self.0 {
					$($value => stringify!($member),)+
					_ => "UNKNOWN",
				}
			}
		}

		impl TryFrom<u32> for $name {
			type Error = GltfError;

			fn try_from(raw: u32) -> Result<Self> {
				Self::from_raw(raw)
			}
		}

		impl From<$name> for u32 {
			fn from(value: $name) -> u32 {
				value.0
			}
		}
	};
}

named_constants! {
	/// Accessor component data type.
	ComponentType, "component type" {
		/// Signed 8-bit integer.
		BYTE = 5120,
		/// Unsigned 8-bit integer.
		UNSIGNED_BYTE = 5121,
		/// Signed 16-bit integer.
		SHORT = 5122,
		/// Unsigned 16-bit integer.
		UNSIGNED_SHORT = 5123,
		/// Unsigned 32-bit integer.
		UNSIGNED_INT = 5125,
		/// 32-bit float.
		FLOAT = 5126,
	}
}

named_constants! {
	/// GPU binding target hint on a buffer view.
	BufferTarget, "buffer view target" {
		/// Vertex attribute data.
		ARRAY_BUFFER = 34962,
		/// Index data.
		ELEMENT_ARRAY_BUFFER = 34963,
	}
}

named_constants! {
	/// Mesh primitive topology.
	PrimitiveMode, "primitive mode" {
		/// Point list.
		POINTS = 0,
		/// Line list.
		LINES = 1,
		/// Closed line loop.
		LINE_LOOP = 2,
		/// Line strip.
		LINE_STRIP = 3,
		/// Triangle list.
		TRIANGLES = 4,
		/// Triangle strip.
		TRIANGLE_STRIP = 5,
		/// Triangle fan.
		TRIANGLE_FAN = 6,
	}
}

named_constants! {
	/// Texture sampler magnification/minification filter.
	SamplerFilter, "sampler filter" {
		/// Nearest texel.
		NEAREST = 9728,
		/// Linear blend.
		LINEAR = 9729,
		/// Nearest texel, nearest mip.
		NEAREST_MIPMAP_NEAREST = 9984,
		/// Linear blend, nearest mip.
		LINEAR_MIPMAP_NEAREST = 9985,
		/// Nearest texel, linear mip blend.
		NEAREST_MIPMAP_LINEAR = 9986,
		/// Trilinear.
		LINEAR_MIPMAP_LINEAR = 9987,
	}
}

named_constants! {
	/// Texture coordinate wrapping mode.
	WrapMode, "wrap mode" {
		/// Clamp to edge texel.
		CLAMP_TO_EDGE = 33071,
		/// Mirror on every repeat.
		MIRRORED_REPEAT = 33648,
		/// Tile.
		REPEAT = 10497,
	}
}

impl ComponentType {
	/// Size of one component in bytes.
	pub fn byte_size(self) -> usize {
		match self {
			Self::BYTE | Self::UNSIGNED_BYTE => 1,
			Self::SHORT | Self::UNSIGNED_SHORT => 2,
			_ => 4,
		}
	}
}

/// Accessor element shape (`SCALAR` through `MAT4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorType {
	/// One component.
	Scalar,
	/// Two components.
	Vec2,
	/// Three components.
	Vec3,
	/// Four components.
	Vec4,
	/// 2x2 matrix.
	Mat2,
	/// 3x3 matrix.
	Mat3,
	/// 4x4 matrix.
	Mat4,
}

impl AccessorType {
	/// All shapes in declaration order.
	pub const ALL: [Self; 7] = [Self::Scalar, Self::Vec2, Self::Vec3, Self::Vec4, Self::Mat2, Self::Mat3, Self::Mat4];

	/// Name stored in JSON.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scalar => "SCALAR",
			Self::Vec2 => "VEC2",
			Self::Vec3 => "VEC3",
			Self::Vec4 => "VEC4",
			Self::Mat2 => "MAT2",
			Self::Mat3 => "MAT3",
			Self::Mat4 => "MAT4",
		}
	}

	/// Parse the JSON name.
	pub fn from_name(name: &str) -> Result<Self> {
		Self::ALL.into_iter().find(|item| item.as_str() == name).ok_or_else(|| GltfError::UnknownConstant {
			kind: "accessor type",
			value: name.to_owned(),
		})
	}

	/// Components per element.
	pub fn component_count(self) -> usize {
		match self {
			Self::Scalar => 1,
			Self::Vec2 => 2,
			Self::Vec3 => 3,
			Self::Vec4 | Self::Mat2 => 4,
			Self::Mat3 => 9,
			Self::Mat4 => 16,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{AccessorType, BufferTarget, ComponentType, PrimitiveMode, WrapMode};
	use crate::gltf::GltfError;

	#[test]
	fn component_types_validate_both_ways() {
		let float = ComponentType::from_raw(5126).expect("FLOAT is known");
		assert_eq!(float, ComponentType::FLOAT);
		assert_eq!(float.name(), "FLOAT");
		assert_eq!(ComponentType::from_name("UNSIGNED_SHORT").expect("name is known").raw(), 5123);
		assert_eq!(ComponentType::UNSIGNED_SHORT.byte_size(), 2);
	}

	#[test]
	fn gaps_in_integer_sets_are_rejected() {
		let err = ComponentType::from_raw(5124).expect_err("5124 is not a component type");
		assert!(matches!(err, GltfError::UnknownConstant { kind: "component type", ref value } if value == "5124"));
		assert!(BufferTarget::try_from(1).is_err());
		assert!(WrapMode::from_name("repeat").is_err());
	}

	#[test]
	fn every_member_maps_back_to_itself() {
		for mode in PrimitiveMode::ALL {
			assert_eq!(PrimitiveMode::from_name(mode.name()).expect("name resolves"), *mode);
			assert_eq!(PrimitiveMode::from_raw(u32::from(*mode)).expect("raw resolves"), *mode);
		}
	}

	#[test]
	fn accessor_types_count_components() {
		assert_eq!(AccessorType::from_name("MAT3").expect("known").component_count(), 9);
		assert_eq!(AccessorType::Vec3.as_str(), "VEC3");
		assert!(AccessorType::from_name("VEC5").is_err());
	}
}
