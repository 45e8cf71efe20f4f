use std::path::PathBuf;

use gltfkit::gltf::{ConvertOptions, Document, Result, StorageMode, convert_images, export_image};

use crate::cmd::util::{print_report, save_document};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Target storage mode: file or datauri.
	#[arg(long, required_unless_present = "export")]
	pub to: Option<StorageMode>,
	/// Write every image into this directory without changing the document.
	#[arg(long, conflicts_with = "to")]
	pub export: Option<PathBuf>,
	/// Output document; defaults to rewriting the input.
	#[arg(short, long)]
	pub output: Option<PathBuf>,
	/// Directory for external image files.
	#[arg(long = "out-dir")]
	pub out_dir: Option<PathBuf>,
	#[arg(long)]
	pub overwrite: bool,
	#[arg(long = "keep-going")]
	pub keep_going: bool,
}

/// Convert or export every image.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		to,
		export,
		output,
		out_dir,
		overwrite,
		keep_going,
	} = args;

	let mut doc = Document::load(&path)?;

	if let Some(dir) = export {
		for index in 0..doc.images.len() {
			let written = export_image(&doc, index, &dir, overwrite)?;
			println!("{index}: {}", written.display());
		}
		return Ok(());
	}

	let Some(to) = to else {
		return Ok(());
	};
	let options = ConvertOptions {
		overwrite,
		out_dir,
		continue_on_error: keep_going,
		..ConvertOptions::default()
	};
	let report = convert_images(&mut doc, to, &options)?;
	let written = save_document(&doc, &path, output)?;

	print_report("images", &report);
	println!("written: {}", written.display());
	Ok(())
}
