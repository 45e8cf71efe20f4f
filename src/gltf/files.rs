use std::path::{Path, PathBuf};

use crate::gltf::{ConvertOptions, Document, EncodeOptions, Result, StorageMode, convert_buffers, write_external};

/// Repack a plain `.gltf` file as a `.glb` container.
///
/// Every buffer is merged into the container blob. `dst` defaults to `src`
/// with a `.glb` extension. Returns the written path.
pub fn gltf_to_glb(src: &Path, dst: Option<&Path>, overwrite: bool) -> Result<PathBuf> {
	let dst = dst.map_or_else(|| src.with_extension("glb"), Path::to_path_buf);
	let mut doc = Document::load(src)?;
	convert_buffers(&mut doc, StorageMode::ContainerBlob, &ConvertOptions::default())?;

	let bytes = doc.to_glb_bytes(&EncodeOptions::default())?;
	write_external(&dst, &bytes, overwrite)?;
	tracing::info!(src = %src.display(), dst = %dst.display(), bytes = bytes.len(), "packed glb");
	Ok(dst)
}

/// Unpack a `.glb` container into a self-contained plain `.gltf` file.
///
/// Every buffer is inlined as a data URI. `dst` defaults to `src` with a
/// `.gltf` extension. Returns the written path.
pub fn glb_to_gltf(src: &Path, dst: Option<&Path>, overwrite: bool) -> Result<PathBuf> {
	let dst = dst.map_or_else(|| src.with_extension("gltf"), Path::to_path_buf);
	let mut doc = Document::load(src)?;
	convert_buffers(&mut doc, StorageMode::DataUri, &ConvertOptions::default())?;

	let bytes = doc.to_gltf_bytes()?;
	write_external(&dst, &bytes, overwrite)?;
	tracing::info!(src = %src.display(), dst = %dst.display(), bytes = bytes.len(), "unpacked glb");
	Ok(dst)
}
