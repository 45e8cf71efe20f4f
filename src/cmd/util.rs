use std::path::{Path, PathBuf};

use gltfkit::gltf::{ConversionReport, Document, EncodeOptions, Result};

/// Save `doc` to `output`, or back over `input` when no output was given.
pub(crate) fn save_document(doc: &Document, input: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
	let target = output.unwrap_or_else(|| input.to_path_buf());
	doc.save(&target, &EncodeOptions::default())?;
	Ok(target)
}

/// Print a conversion report as `key: value` lines.
pub(crate) fn print_report(kind: &str, report: &ConversionReport) {
	println!("{kind}_converted: {:?}", report.converted);
	println!("{kind}_skipped: {:?}", report.skipped);
	for (index, err) in &report.failed {
		println!("{kind}_failed: {index}: {err}");
	}
}
