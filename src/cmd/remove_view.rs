use std::path::PathBuf;

use gltfkit::gltf::{Document, Result, remove_binary_region};

use crate::cmd::util::save_document;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	pub index: usize,
	/// Output document; defaults to rewriting the input.
	#[arg(short, long)]
	pub output: Option<PathBuf>,
}

/// Remove one buffer view, renumbering references, and list cleared references.
pub fn run(args: Args) -> Result<()> {
	let Args { path, index, output } = args;

	let mut doc = Document::load(&path)?;
	let report = remove_binary_region(&mut doc, index);
	let written = save_document(&doc, &path, output)?;

	println!("removed: {}", report.removed.is_some());
	for item in &report.dangling {
		println!("dangling: {}[{}]", item.owner, item.index);
	}
	println!("written: {}", written.display());
	Ok(())
}
