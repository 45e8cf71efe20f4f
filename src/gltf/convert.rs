use std::path::{Component, Path, PathBuf};

use crate::gltf::bytes::pad_to_4;
use crate::gltf::constants::{MIME_JPEG, MIME_OCTET_STREAM, MIME_PNG};
use crate::gltf::{
	Document, GltfError, Locator, Result, StorageMode, classify, encode_data_uri, read_external, write_external,
};

/// Options shared by buffer and image conversions.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
	/// Replace existing files when writing external payloads.
	pub overwrite: bool,
	/// Directory for external payloads; defaults to the document base directory.
	pub out_dir: Option<PathBuf>,
	/// Record per-element failures in the report instead of aborting the batch.
	pub continue_on_error: bool,
	/// MIME type written into buffer data URIs.
	pub buffer_mime_type: String,
	/// MIME type for image data URIs when the image declares none.
	pub image_mime_type: String,
}

impl Default for ConvertOptions {
	fn default() -> Self {
		Self {
			overwrite: false,
			out_dir: None,
			continue_on_error: false,
			buffer_mime_type: MIME_OCTET_STREAM.to_owned(),
			image_mime_type: MIME_PNG.to_owned(),
		}
	}
}

/// Result of converting one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOutcome {
	/// Element already used the target mode.
	Skipped,
	/// Element now uses the target mode at the same index.
	Converted,
	/// Buffer bytes were appended to the blob and the buffer was merged into `host`.
	///
	/// The converted buffer no longer exists; `host` is its post-removal index.
	Absorbed {
		/// Index of the blob-backed buffer that now owns the bytes.
		host: usize,
	},
}

/// Per-element outcome of a batch conversion, keyed by pre-conversion index.
#[derive(Debug, Default)]
pub struct ConversionReport {
	/// Elements whose storage changed.
	pub converted: Vec<usize>,
	/// Elements already in the target mode.
	pub skipped: Vec<usize>,
	/// Elements left untouched because their conversion failed.
	pub failed: Vec<(usize, GltfError)>,
}

impl ConversionReport {
	/// Return `true` when no element failed.
	pub fn is_clean(&self) -> bool {
		self.failed.is_empty()
	}
}

/// Resolved image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
	/// Declared or data-URI MIME type, when known.
	pub mime_type: Option<String>,
	/// Raw encoded image bytes.
	pub bytes: Vec<u8>,
}

/// Convert every buffer to `target`, in index order.
///
/// Converting to [`StorageMode::ContainerBlob`] merges all buffers into a
/// single blob-backed buffer, so buffer indices shift as buffers are absorbed.
pub fn convert_buffers(doc: &mut Document, target: StorageMode, options: &ConvertOptions) -> Result<ConversionReport> {
	let mut report = ConversionReport::default();
	let mut index = 0;

	for original in 0..doc.buffers.len() {
		match convert_buffer(doc, index, target, options) {
			Ok(ConvertOutcome::Skipped) => {
				report.skipped.push(original);
				index += 1;
			}
			Ok(ConvertOutcome::Converted) => {
				report.converted.push(original);
				index += 1;
			}
			Ok(ConvertOutcome::Absorbed { .. }) => report.converted.push(original),
			Err(err) if options.continue_on_error => {
				tracing::warn!(buffer = original, error = %err, "buffer conversion failed");
				report.failed.push((original, err));
				index += 1;
			}
			Err(err) => return Err(err),
		}
	}

	tracing::info!(
		mode = %target,
		converted = report.converted.len(),
		skipped = report.skipped.len(),
		failed = report.failed.len(),
		"converted buffers"
	);
	Ok(report)
}

/// Convert one buffer to `target`.
///
/// On error the document is left exactly as it was.
pub fn convert_buffer(doc: &mut Document, index: usize, target: StorageMode, options: &ConvertOptions) -> Result<ConvertOutcome> {
	let current = doc.buffer(index)?.storage_mode();
	if current == target {
		tracing::debug!(buffer = index, mode = %target, "buffer already in target mode");
		return Ok(ConvertOutcome::Skipped);
	}

	let bytes = buffer_bytes(doc, index)?;
	tracing::debug!(buffer = index, from = %current, to = %target, len = bytes.len(), "converting buffer");

	match target {
		StorageMode::DataUri => {
			let uri = encode_data_uri(&options.buffer_mime_type, &bytes);
			set_buffer_uri(doc, index, uri, bytes.len());
		}
		StorageMode::ExternalFile => {
			let name = file_name_or(doc.buffers[index].name.as_deref(), index, "bin");
			let uri = write_payload(doc, Owner::Buffer(index), &name, &bytes, options)?;
			set_buffer_uri(doc, index, uri, bytes.len());
		}
		StorageMode::ContainerBlob => return absorb_into_blob(doc, index, bytes),
	}

	release_unused_blob(doc);
	Ok(ConvertOutcome::Converted)
}

/// Convert every image to `target`, in index order.
///
/// `options.out_dir` overrides where external image files are written.
pub fn convert_images(doc: &mut Document, target: StorageMode, options: &ConvertOptions) -> Result<ConversionReport> {
	let mut report = ConversionReport::default();

	for index in 0..doc.images.len() {
		match convert_image(doc, index, target, options) {
			Ok(ConvertOutcome::Skipped) => report.skipped.push(index),
			Ok(_) => report.converted.push(index),
			Err(err) if options.continue_on_error => {
				tracing::warn!(image = index, error = %err, "image conversion failed");
				report.failed.push((index, err));
			}
			Err(err) => return Err(err),
		}
	}

	tracing::info!(
		mode = %target,
		converted = report.converted.len(),
		skipped = report.skipped.len(),
		failed = report.failed.len(),
		"converted images"
	);
	Ok(report)
}

/// Convert one image to `target`.
///
/// Images cannot be moved into the container blob directly; that requires a
/// buffer view assigned by the caller.
pub fn convert_image(doc: &mut Document, index: usize, target: StorageMode, options: &ConvertOptions) -> Result<ConvertOutcome> {
	let current = doc.image(index)?.storage_mode().ok_or(GltfError::ImageSourceMissing { index })?;
	if current == target {
		tracing::debug!(image = index, mode = %target, "image already in target mode");
		return Ok(ConvertOutcome::Skipped);
	}
	if target == StorageMode::ContainerBlob {
		return Err(GltfError::IncompatibleStorageMode {
			entity: "image",
			index,
			from: current,
			to: "container blob (assign a buffer view instead)",
		});
	}

	let payload = image_bytes(doc, index)?;
	let mime_type = payload.mime_type.unwrap_or_else(|| options.image_mime_type.clone());
	tracing::debug!(image = index, from = %current, to = %target, len = payload.bytes.len(), "converting image");

	let uri = match target {
		StorageMode::DataUri => encode_data_uri(&mime_type, &payload.bytes),
		_ => {
			let name = file_name_or(doc.images[index].name.as_deref(), index, image_extension(&mime_type));
			write_payload(doc, Owner::Image(index), &name, &payload.bytes, options)?
		}
	};

	let image = &mut doc.images[index];
	image.uri = Some(uri);
	image.buffer_view = None;
	Ok(ConvertOutcome::Converted)
}

/// Resolve a buffer's bytes, trimmed to its declared length.
pub fn buffer_bytes(doc: &Document, index: usize) -> Result<Vec<u8>> {
	let buffer = doc.buffer(index)?;
	let mut bytes = match classify(buffer.uri.as_deref())? {
		Locator::DataUri { bytes, .. } => bytes,
		Locator::ExternalFile(_) => read_external(&doc.base_dir, buffer.uri.as_deref().unwrap_or_default())?,
		Locator::ContainerBlob => doc.blob().ok_or(GltfError::BlobMissing { index })?.to_vec(),
	};

	let declared = buffer.byte_length;
	if (bytes.len() as u64) < declared {
		return Err(GltfError::BufferLengthMismatch {
			index,
			declared,
			actual: bytes.len(),
		});
	}
	if (bytes.len() as u64) > declared {
		if buffer.storage_mode() != StorageMode::ContainerBlob {
			tracing::warn!(buffer = index, declared, actual = bytes.len(), "trimming payload to declared length");
		}
		bytes.truncate(declared as usize);
	}
	Ok(bytes)
}

/// Resolve the bytes covered by a buffer view.
pub fn region_bytes(doc: &Document, view_index: usize) -> Result<Vec<u8>> {
	let view = doc.buffer_view(view_index)?;
	let bytes = buffer_bytes(doc, view.buffer as usize)?;

	let offset = view.offset();
	let out_of_bounds = || GltfError::BufferViewOutOfBounds {
		view: view_index,
		offset,
		length: view.byte_length,
		buffer_len: bytes.len(),
	};
	let end = offset.checked_add(view.byte_length).ok_or_else(out_of_bounds)?;
	if end > bytes.len() as u64 {
		return Err(out_of_bounds());
	}
	Ok(bytes[offset as usize..end as usize].to_vec())
}

/// Resolve an image's encoded bytes from its URI or buffer view.
pub fn image_bytes(doc: &Document, index: usize) -> Result<ImagePayload> {
	let image = doc.image(index)?;
	if let Some(view) = image.buffer_view {
		return Ok(ImagePayload {
			mime_type: image.mime_type.clone(),
			bytes: region_bytes(doc, view as usize)?,
		});
	}

	match classify(image.uri.as_deref())? {
		Locator::DataUri { mime_type, bytes } => Ok(ImagePayload {
			mime_type: image.mime_type.clone().or((!mime_type.is_empty()).then_some(mime_type)),
			bytes,
		}),
		Locator::ExternalFile(_) => Ok(ImagePayload {
			mime_type: image.mime_type.clone(),
			bytes: read_external(&doc.base_dir, image.uri.as_deref().unwrap_or_default())?,
		}),
		Locator::ContainerBlob => Err(GltfError::ImageSourceMissing { index }),
	}
}

/// Write an image's bytes into `dir` without modifying the document.
pub fn export_image(doc: &Document, index: usize, dir: &Path, overwrite: bool) -> Result<PathBuf> {
	let payload = image_bytes(doc, index)?;
	let ext = image_extension(payload.mime_type.as_deref().unwrap_or(MIME_PNG));
	let path = dir.join(file_name_or(doc.images[index].name.as_deref(), index, ext));
	write_external(&path, &payload.bytes, overwrite)?;
	tracing::info!(image = index, path = %path.display(), "exported image");
	Ok(path)
}

fn absorb_into_blob(doc: &mut Document, index: usize, bytes: Vec<u8>) -> Result<ConvertOutcome> {
	let host = doc.blob_backed_buffers().next();
	let Some(host) = host else {
		if doc.blob().is_some_and(|blob| !blob.is_empty()) {
			tracing::warn!(buffer = index, "replacing container blob not referenced by any buffer");
		}
		let len = bytes.len();
		let mut blob = bytes;
		pad_to_4(&mut blob, 0);
		doc.set_blob(Some(blob));

		let buffer = &mut doc.buffers[index];
		buffer.uri = None;
		buffer.byte_length = len as u64;
		return Ok(ConvertOutcome::Converted);
	};

	let host_len = doc.buffers[host].byte_length;
	let blob_len = doc.blob().ok_or(GltfError::BlobMissing { index: host })?.len();
	if (blob_len as u64) < host_len {
		return Err(GltfError::BufferLengthMismatch {
			index: host,
			declared: host_len,
			actual: blob_len,
		});
	}

	let blob = doc.blob_mut().get_or_insert_with(Vec::new);
	pad_to_4(blob, 0);
	let offset = blob.len() as u64;
	blob.extend_from_slice(&bytes);
	pad_to_4(blob, 0);
	doc.buffers[host].byte_length = offset + bytes.len() as u64;

	for view in &mut doc.buffer_views {
		if view.buffer as usize == index {
			view.buffer = host as u32;
			view.byte_offset = Some(view.offset() + offset);
		}
	}
	doc.buffers.remove(index);
	for view in &mut doc.buffer_views {
		if view.buffer as usize > index {
			view.buffer -= 1;
		}
	}

	let host = if host > index { host - 1 } else { host };
	tracing::debug!(buffer = index, host, offset, len = bytes.len(), "absorbed buffer into container blob");
	Ok(ConvertOutcome::Absorbed { host })
}

fn set_buffer_uri(doc: &mut Document, index: usize, uri: String, len: usize) {
	let buffer = &mut doc.buffers[index];
	buffer.uri = Some(uri);
	buffer.byte_length = len as u64;
}

fn release_unused_blob(doc: &mut Document) {
	if doc.blob().is_some() && doc.blob_backed_buffers().next().is_none() {
		tracing::debug!("releasing container blob");
		doc.take_blob();
	}
}

/// Element whose payload is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
	Buffer(usize),
	Image(usize),
}

impl Owner {
	fn index(self) -> usize {
		match self {
			Self::Buffer(index) | Self::Image(index) => index,
		}
	}
}

/// Write an external payload and return its locator relative to the base directory.
///
/// A name whose locator already belongs to another buffer or image gets an
/// `_{index}` suffix (then `_{index}_{n}`), so no two elements share a file.
fn write_payload(doc: &Document, owner: Owner, name: &str, bytes: &[u8], options: &ConvertOptions) -> Result<String> {
	let dir = options.out_dir.as_deref().unwrap_or(&doc.base_dir);

	let mut attempt = 0;
	let (path, uri) = loop {
		let candidate = if attempt == 0 { name.to_owned() } else { suffixed_name(name, owner.index(), attempt) };
		let path = dir.join(&candidate);
		let uri = relative_uri(&doc.base_dir, &path);
		if !uri_claimed(doc, owner, &uri) {
			break (path, uri);
		}
		attempt += 1;
	};
	if attempt > 0 {
		tracing::debug!(name, uri = %uri, "renamed external payload to avoid a shared file");
	}

	write_external(&path, bytes, options.overwrite)?;
	tracing::debug!(path = %path.display(), len = bytes.len(), "wrote external payload");
	Ok(uri)
}

/// Return `true` when another buffer or image already points at `uri`.
fn uri_claimed(doc: &Document, owner: Owner, uri: &str) -> bool {
	let buffers = doc.buffers.iter().enumerate().filter(|&(index, _)| owner != Owner::Buffer(index)).map(|(_, buffer)| &buffer.uri);
	let images = doc.images.iter().enumerate().filter(|&(index, _)| owner != Owner::Image(index)).map(|(_, image)| &image.uri);
	buffers.chain(images).any(|other| other.as_deref() == Some(uri))
}

/// `tex.png` -> `tex_3.png` on the first retry, `tex_3_2.png` after that.
fn suffixed_name(name: &str, index: usize, attempt: usize) -> String {
	let path = Path::new(name);
	let stem = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or(name);
	let suffix = if attempt == 1 { format!("{index}") } else { format!("{index}_{attempt}") };
	match path.extension().and_then(|ext| ext.to_str()) {
		Some(ext) => format!("{stem}_{suffix}.{ext}"),
		None => format!("{stem}_{suffix}"),
	}
}

/// File name from an element's `name`, or `{index}.{ext}`.
///
/// Directory components in `name` are dropped so payloads stay in the output directory.
fn file_name_or(name: Option<&str>, index: usize, ext: &str) -> String {
	let stem = name.and_then(|name| Path::new(name).file_name()).and_then(|name| name.to_str()).filter(|name| !name.is_empty());
	match stem {
		Some(name) if Path::new(name).extension().is_some() => name.to_owned(),
		Some(name) => format!("{name}.{ext}"),
		None => format!("{index}.{ext}"),
	}
}

fn image_extension(mime_type: &str) -> &'static str {
	if mime_type.eq_ignore_ascii_case(MIME_JPEG) { "jpg" } else { "png" }
}

fn relative_uri(base_dir: &Path, path: &Path) -> String {
	let relative = path.strip_prefix(base_dir).unwrap_or(path);
	if relative.is_absolute() {
		return relative.to_string_lossy().into_owned();
	}
	relative
		.components()
		.filter(|part| !matches!(part, Component::CurDir))
		.map(|part| part.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/")
}
