use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;

use crate::gltf::{GltfError, Result};

/// Decoder that accepts payloads with or without trailing `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
	&alphabet::STANDARD,
	GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Where a buffer's or image's bytes physically live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageMode {
	/// Sibling file referenced by a relative or absolute path.
	ExternalFile,
	/// Inline `data:` URI with a base64 payload.
	DataUri,
	/// Container blob (buffers) or a buffer view (images).
	ContainerBlob,
}

impl StorageMode {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::ExternalFile => "external_file",
			Self::DataUri => "data_uri",
			Self::ContainerBlob => "container_blob",
		}
	}
}

impl fmt::Display for StorageMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for StorageMode {
	type Err = String;

	fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
		match value {
			"file" | "external" | "external_file" => Ok(Self::ExternalFile),
			"datauri" | "data-uri" | "data_uri" => Ok(Self::DataUri),
			"blob" | "glb" | "container" | "container_blob" => Ok(Self::ContainerBlob),
			other => Err(format!("unknown storage mode `{other}` (expected file, datauri, or blob)")),
		}
	}
}

/// Classified storage locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
	/// Path relative to the document base directory (or absolute).
	ExternalFile(PathBuf),
	/// Decoded inline payload.
	DataUri {
		/// MIME type as written; may be empty.
		mime_type: String,
		/// Decoded bytes.
		bytes: Vec<u8>,
	},
	/// No locator: bytes come from the container blob or a buffer view.
	ContainerBlob,
}

/// Cheap storage-mode check that never decodes a payload.
pub fn identify(locator: Option<&str>) -> StorageMode {
	match locator {
		None | Some("") => StorageMode::ContainerBlob,
		Some(uri) if uri.starts_with("data:") => StorageMode::DataUri,
		Some(_) => StorageMode::ExternalFile,
	}
}

/// Classify a locator, decoding inline payloads. Performs no IO.
pub fn classify(locator: Option<&str>) -> Result<Locator> {
	match (identify(locator), locator) {
		(StorageMode::DataUri, Some(uri)) => {
			let (mime_type, bytes) = parse_data_uri(uri)?;
			Ok(Locator::DataUri { mime_type, bytes })
		}
		(StorageMode::ExternalFile, Some(uri)) => Ok(Locator::ExternalFile(PathBuf::from(uri))),
		_ => Ok(Locator::ContainerBlob),
	}
}

/// Split a `data:<mime>[;param]*;base64,<payload>` URI into MIME type and bytes.
pub fn parse_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
	let rest = uri.strip_prefix("data:").ok_or(GltfError::InvalidDataUri { reason: "missing data: prefix" })?;
	let (header, payload) = rest.split_once(',').ok_or(GltfError::InvalidDataUri { reason: "missing comma" })?;

	let mut params = header.split(';');
	let mime_type = params.next().unwrap_or_default().to_owned();
	if !params.any(|param| param.eq_ignore_ascii_case("base64")) {
		return Err(GltfError::InvalidDataUri {
			reason: "payload is not base64",
		});
	}

	let bytes = LENIENT.decode(payload.trim())?;
	Ok((mime_type, bytes))
}

/// Build a base64 data URI.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
	format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Resolve an external locator against the document base directory.
pub fn resolve_path(base_dir: &Path, uri: &str) -> PathBuf {
	base_dir.join(uri)
}

/// Read an external file locator.
pub fn read_external(base_dir: &Path, uri: &str) -> Result<Vec<u8>> {
	let path = resolve_path(base_dir, uri);
	tracing::debug!(path = %path.display(), "reading external payload");
	fs::read(&path).map_err(GltfError::io(&path))
}

/// Write `bytes` to `path`, refusing to replace an existing file unless `overwrite` is set.
pub fn write_external(path: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
	if overwrite {
		return fs::write(path, bytes).map_err(GltfError::io(path));
	}

	let mut file = OpenOptions::new().write(true).create_new(true).open(path).map_err(|source| {
		if source.kind() == ErrorKind::AlreadyExists {
			GltfError::FileExistsNoOverride { path: path.to_path_buf() }
		} else {
			GltfError::Io {
				path: path.to_path_buf(),
				source,
			}
		}
	})?;
	file.write_all(bytes).map_err(GltfError::io(path))
}
