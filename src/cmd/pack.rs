use std::path::PathBuf;

use gltfkit::gltf::{Result, gltf_to_glb};

#[derive(clap::Args)]
pub struct Args {
	pub src: PathBuf,
	#[arg(short, long)]
	pub output: Option<PathBuf>,
	#[arg(long)]
	pub overwrite: bool,
}

/// Repack a `.gltf` file and its payloads into a single `.glb`.
pub fn run(args: Args) -> Result<()> {
	let Args { src, output, overwrite } = args;
	let written = gltf_to_glb(&src, output.as_deref(), overwrite)?;
	println!("{}", written.display());
	Ok(())
}
