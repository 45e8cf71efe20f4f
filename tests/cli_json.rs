#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use gltfkit::gltf::{Accessor, Buffer, BufferView, Document, EncodeOptions, Image, encode_data_uri};
use serde_json::Value;

const TRIANGLE: &str = "data:application/octet-stream;base64,AAABAAIAAAAAAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAAAAAACAPwAAAAA=";

#[test]
fn info_json_reports_counts_and_modes() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_triangle(dir.path());

	let json = run_json(&["info", &path.display().to_string(), "--json"]);
	assert_eq!(json["format"], "gltf");
	assert_eq!(json["counts"]["buffers"], 1);
	assert_eq!(json["counts"]["accessors"], 1);
	assert_eq!(json["buffers"][0]["mode"], "data_uri");
	assert_eq!(json["buffers"][0]["byte_length"], 44);
	assert_eq!(json["images"][0]["mode"], "data_uri");
	assert!(json["issues"].as_array().is_some_and(Vec::is_empty));
}

#[test]
fn pack_then_unpack_restores_payload() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_triangle(dir.path());

	let out = run(&["pack", &path.display().to_string()]);
	assert!(out.status.success(), "pack should succeed");
	let glb = dir.path().join("triangle.glb");
	assert_eq!(&fs::read(&glb).expect("glb written")[..4], b"glTF");

	let json = run_json(&["info", &glb.display().to_string(), "--json"]);
	assert_eq!(json["format"], "glb");
	assert_eq!(json["buffers"][0]["mode"], "container_blob");
	assert_eq!(json["blob_length"], 44);

	let unpacked = dir.path().join("unpacked.gltf");
	let out = run(&["unpack", &glb.display().to_string(), "-o", &unpacked.display().to_string()]);
	assert!(out.status.success(), "unpack should succeed");
	let doc = Document::load(&unpacked).expect("loads");
	assert_eq!(doc.buffers[0].uri.as_deref(), Some(TRIANGLE));
}

#[test]
fn pack_refuses_existing_output_without_overwrite() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_triangle(dir.path());
	fs::write(dir.path().join("triangle.glb"), b"keep").expect("seed");

	let out = run(&["pack", &path.display().to_string()]);
	assert!(!out.status.success(), "pack should fail");
	assert!(String::from_utf8_lossy(&out.stderr).contains("refusing to overwrite"));

	let out = run(&["pack", &path.display().to_string(), "--overwrite"]);
	assert!(out.status.success(), "pack --overwrite should succeed");
}

#[test]
fn buffers_to_file_writes_sidecar() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_triangle(dir.path());

	let out = run(&["buffers", &path.display().to_string(), "--to", "file"]);
	assert!(out.status.success(), "buffers should succeed");
	assert!(String::from_utf8_lossy(&out.stdout).contains("buffers_converted: [0]"));
	assert_eq!(fs::read(dir.path().join("0.bin")).expect("sidecar").len(), 44);

	let json = run_json(&["info", &path.display().to_string(), "--json"]);
	assert_eq!(json["buffers"][0]["mode"], "external_file");
}

#[test]
fn images_export_leaves_document_untouched() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_triangle(dir.path());
	let before = fs::read(&path).expect("reads");
	let export = dir.path().join("textures");
	fs::create_dir(&export).expect("mkdir");

	let out = run(&["images", &path.display().to_string(), "--export", &export.display().to_string()]);
	assert!(out.status.success(), "export should succeed");
	assert_eq!(fs::read(export.join("0.png")).expect("exported"), vec![0x89, b'P', b'N', b'G']);
	assert_eq!(fs::read(&path).expect("reads"), before);
}

#[test]
fn remove_view_reports_dangling_accessor() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_triangle(dir.path());

	let out = run(&["remove-view", &path.display().to_string(), "0"]);
	assert!(out.status.success(), "remove-view should succeed");
	let stdout = String::from_utf8_lossy(&out.stdout);
	assert!(stdout.contains("removed: true"));
	assert!(stdout.contains("dangling: accessor[0]"));

	let doc = Document::load(&path).expect("loads");
	assert!(doc.buffer_views.is_empty());
	assert_eq!(doc.accessors[0].buffer_view, None);
}

#[test]
fn missing_input_fails_with_not_found() {
	let dir = tempfile::tempdir().expect("tempdir");
	let out = run(&["info", &dir.path().join("nope.gltf").display().to_string()]);
	assert!(!out.status.success());
	assert!(String::from_utf8_lossy(&out.stderr).contains("file not found"));
}

#[test]
fn log_level_follows_rust_log() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = write_triangle(dir.path());
	let path = path.display().to_string();

	let debug = run_with_log("debug", &["buffers", &path, "--to", "file"]);
	assert!(debug.status.success(), "buffers should succeed");
	assert!(String::from_utf8_lossy(&debug.stderr).contains("converting buffer"));

	let quiet = run_with_log("warn", &["buffers", &path, "--to", "datauri"]);
	assert!(quiet.status.success(), "buffers should succeed");
	assert!(!String::from_utf8_lossy(&quiet.stderr).contains("converted buffers"));

	let default = run_with_log("", &["info", &path]);
	assert!(default.status.success(), "info should succeed");
	assert!(String::from_utf8_lossy(&default.stderr).contains("loaded document"));
}

fn write_triangle(dir: &Path) -> PathBuf {
	let mut doc = Document::new();
	doc.buffers.push(Buffer {
		uri: Some(TRIANGLE.to_owned()),
		byte_length: 44,
		..Buffer::default()
	});
	doc.buffer_views.push(BufferView {
		buffer: 0,
		byte_offset: Some(8),
		byte_length: 36,
		..BufferView::default()
	});
	doc.accessors.push(Accessor {
		buffer_view: Some(0),
		component_type: 5126,
		count: 3,
		kind: "VEC3".to_owned(),
		..Accessor::default()
	});
	doc.images.push(Image::from_uri(encode_data_uri("image/png", &[0x89, b'P', b'N', b'G'])));

	let path = dir.join("triangle.gltf");
	doc.save(&path, &EncodeOptions::default()).expect("fixture saves");
	path
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_gltfkit")).args(args).output().expect("command executes")
}

fn run_with_log(filter: &str, args: &[&str]) -> Output {
	let mut command = Command::new(env!("CARGO_BIN_EXE_gltfkit"));
	if filter.is_empty() {
		command.env_remove("RUST_LOG");
	} else {
		command.env("RUST_LOG", filter);
	}
	command.args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(output.status.success(), "command should succeed");
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
