use gltfkit::gltf::{Result, glb_to_gltf};

use crate::cmd::pack::Args;

/// Unpack a `.glb` into a self-contained `.gltf` with inline buffers.
pub fn run(args: Args) -> Result<()> {
	let Args { src, output, overwrite } = args;
	let written = glb_to_gltf(&src, output.as_deref(), overwrite)?;
	println!("{}", written.display());
	Ok(())
}
