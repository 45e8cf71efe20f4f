use std::path::PathBuf;

use gltfkit::gltf::{Document, Result, check_references, is_glb_path};
use serde_json::json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print document counts, storage modes, and reference problems.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let doc = Document::load(&path)?;
	let issues = check_references(&doc);
	let format = if is_glb_path(&path) { "glb" } else { "gltf" };
	let blob_len = doc.blob().map_or(0, <[u8]>::len);

	if json {
		let buffers: Vec<_> = doc
			.buffers
			.iter()
			.map(|buffer| json!({ "mode": buffer.storage_mode().as_str(), "byte_length": buffer.byte_length, "name": buffer.name }))
			.collect();
		let images: Vec<_> = doc
			.images
			.iter()
			.map(|image| json!({ "mode": image.storage_mode().map(|mode| mode.as_str()), "mime_type": image.mime_type, "name": image.name }))
			.collect();
		let out = json!({
			"path": path.display().to_string(),
			"format": format,
			"version": doc.asset.version,
			"generator": doc.asset.generator,
			"blob_length": blob_len,
			"counts": {
				"scenes": doc.scenes.len(),
				"nodes": doc.nodes.len(),
				"meshes": doc.meshes.len(),
				"materials": doc.materials.len(),
				"accessors": doc.accessors.len(),
				"buffer_views": doc.buffer_views.len(),
				"buffers": doc.buffers.len(),
				"images": doc.images.len(),
			},
			"buffers": buffers,
			"images": images,
			"issues": issues.iter().map(ToString::to_string).collect::<Vec<_>>(),
		});
		println!("{}", serde_json::to_string_pretty(&out)?);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("format: {format}");
	println!("version: {}", doc.asset.version);
	println!("generator: {}", doc.asset.generator.as_deref().unwrap_or("-"));
	println!("blob_length: {blob_len}");
	println!("scenes: {}", doc.scenes.len());
	println!("nodes: {}", doc.nodes.len());
	println!("meshes: {}", doc.meshes.len());
	println!("accessors: {}", doc.accessors.len());
	println!("buffer_views: {}", doc.buffer_views.len());

	println!("buffers: {}", doc.buffers.len());
	for (index, buffer) in doc.buffers.iter().enumerate() {
		println!("  {index}: {} {} bytes", buffer.storage_mode(), buffer.byte_length);
	}
	println!("images: {}", doc.images.len());
	for (index, image) in doc.images.iter().enumerate() {
		let mode = image.storage_mode().map_or("missing", |mode| mode.as_str());
		println!("  {index}: {mode} {}", image.mime_type.as_deref().unwrap_or("-"));
	}

	if !issues.is_empty() {
		println!("issues:");
		for issue in &issues {
			println!("  {issue}");
		}
	}
	Ok(())
}
