use std::path::PathBuf;

use gltfkit::gltf::{ConvertOptions, Document, Result, StorageMode, convert_buffers};

use crate::cmd::util::{print_report, save_document};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Target storage mode: file, datauri, or blob.
	#[arg(long)]
	pub to: StorageMode,
	/// Output document; defaults to rewriting the input.
	#[arg(short, long)]
	pub output: Option<PathBuf>,
	/// Directory for external buffer files.
	#[arg(long = "out-dir")]
	pub out_dir: Option<PathBuf>,
	#[arg(long)]
	pub overwrite: bool,
	#[arg(long = "keep-going")]
	pub keep_going: bool,
}

/// Convert every buffer to one storage mode and save the document.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		to,
		output,
		out_dir,
		overwrite,
		keep_going,
	} = args;

	let mut doc = Document::load(&path)?;
	let options = ConvertOptions {
		overwrite,
		out_dir,
		continue_on_error: keep_going,
		..ConvertOptions::default()
	};
	let report = convert_buffers(&mut doc, to, &options)?;
	let written = save_document(&doc, &path, output)?;

	print_report("buffers", &report);
	println!("written: {}", written.display());
	Ok(())
}
