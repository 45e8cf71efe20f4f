use std::fs;

use crate::gltf::{Buffer, BufferView, ComponentType, Document, EncodeOptions, GltfError, Image, StorageMode, encode_data_uri};

const MINIMAL: &str = r#"{"asset":{"version":"2.0"},"buffers":[{"byteLength":4,"uri":"data:application/octet-stream;base64,AAECAw=="}],"bufferViews":[{"buffer":0,"byteLength":4}]}"#;

fn blob_doc(len: u64, blob: Vec<u8>) -> Document {
	let mut doc = Document::new();
	doc.buffers.push(Buffer {
		byte_length: len,
		..Buffer::default()
	});
	doc.set_blob(Some(blob));
	doc
}

#[test]
fn parses_minimal_json_with_defaults() {
	let doc = Document::from_json_str(MINIMAL).expect("minimal parses");
	assert_eq!(doc.asset.version, "2.0");
	assert_eq!(doc.buffers.len(), 1);
	assert_eq!(doc.buffers[0].storage_mode(), StorageMode::DataUri);
	assert_eq!(doc.buffer_views[0].offset(), 0);
	assert!(doc.blob().is_none());
}

#[test]
fn compact_json_has_no_whitespace_and_skips_defaults() {
	let doc = Document::from_json_str(MINIMAL).expect("minimal parses");
	let text = doc.to_json_string().expect("serializes");
	assert!(!text.contains(' '));
	assert!(!text.contains('\n'));
	assert!(!text.contains("byteOffset"));
	assert!(!text.contains("\"nodes\""));
}

#[test]
fn unknown_members_in_extras_survive_round_trip() {
	let text = r#"{"asset":{"version":"2.0","extras":{"zeta":1,"alpha":[true]}},"extras":{"b":2,"a":1},"extensionsUsed":["KHR_x"]}"#;
	let doc = Document::from_json_str(text).expect("parses");
	let out = doc.to_json_string().expect("serializes");
	assert!(out.contains(r#""extras":{"b":2,"a":1}"#));
	assert!(out.contains(r#""extras":{"zeta":1,"alpha":[true]}"#));
	assert!(out.contains(r#""extensionsUsed":["KHR_x"]"#));
}

#[test]
fn unknown_component_type_is_preserved_but_rejected_on_access() {
	let text = r#"{"asset":{"version":"2.0"},"accessors":[{"componentType":9999,"count":1,"type":"SCALAR"}]}"#;
	let doc = Document::from_json_str(text).expect("parses");
	assert!(matches!(doc.accessors[0].component_type(), Err(GltfError::UnknownConstant { .. })));
	assert!(doc.to_json_string().expect("serializes").contains("9999"));

	let ok = r#"{"asset":{"version":"2.0"},"accessors":[{"componentType":5126,"count":3,"type":"VEC3"}]}"#;
	let doc = Document::from_json_str(ok).expect("parses");
	assert_eq!(doc.accessors[0].component_type().expect("known"), ComponentType::FLOAT);
	assert_eq!(doc.accessors[0].accessor_type().expect("known").component_count(), 3);
}

#[test]
fn glb_bytes_round_trip_keeps_blob() {
	let mut doc = blob_doc(4, vec![9, 8, 7, 6]);
	doc.buffer_views.push(BufferView {
		buffer: 0,
		byte_length: 4,
		..BufferView::default()
	});

	let bytes = doc.to_glb_bytes(&EncodeOptions::default()).expect("encodes");
	let back = Document::from_glb_bytes(&bytes).expect("decodes");
	assert_eq!(back.blob(), Some(&[9, 8, 7, 6][..]));
	assert_eq!(back.buffers, doc.buffers);
	assert_eq!(back.buffer_views, doc.buffer_views);
	assert_eq!(Document::from_slice(&bytes).expect("sniffed").blob(), back.blob());
}

#[test]
fn plain_json_refuses_blob_backed_buffer() {
	let doc = blob_doc(4, vec![0; 4]);
	let err = doc.to_gltf_bytes().expect_err("blob-backed buffer cannot be plain JSON");
	assert!(matches!(
		err,
		GltfError::IncompatibleStorageMode {
			entity: "buffer",
			index: 0,
			from: StorageMode::ContainerBlob,
			..
		}
	));
}

#[test]
fn plain_json_refuses_orphan_blob() {
	let mut doc = Document::new();
	doc.set_blob(Some(vec![1, 2, 3, 4]));
	assert!(matches!(doc.to_gltf_bytes(), Err(GltfError::IncompatibleStorageMode { entity: "document", .. })));
}

#[test]
fn container_refuses_second_blob_backed_buffer() {
	let mut doc = blob_doc(4, vec![0; 4]);
	doc.buffers.push(Buffer {
		byte_length: 4,
		..Buffer::default()
	});
	assert!(matches!(
		doc.to_glb_bytes(&EncodeOptions::default()),
		Err(GltfError::IncompatibleStorageMode { index: 1, .. })
	));
}

#[test]
fn container_refuses_short_or_missing_blob() {
	let short = blob_doc(8, vec![0; 4]);
	assert!(matches!(
		short.to_glb_bytes(&EncodeOptions::default()),
		Err(GltfError::BufferLengthMismatch { index: 0, declared: 8, actual: 4 })
	));

	let mut missing = blob_doc(8, Vec::new());
	missing.take_blob();
	assert!(matches!(missing.to_glb_bytes(&EncodeOptions::default()), Err(GltfError::BlobMissing { index: 0 })));
}

#[test]
fn load_missing_file_reports_not_found() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("absent.gltf");
	assert!(matches!(Document::load(&path), Err(GltfError::NotFound { .. })));
}

#[test]
fn save_and_load_choose_format_by_extension() {
	let dir = tempfile::tempdir().expect("tempdir");
	let mut doc = Document::from_json_str(MINIMAL).expect("minimal parses");
	doc.images.push(Image::from_uri(encode_data_uri("image/png", &[1, 2])));

	let json_path = dir.path().join("scene.gltf");
	doc.save(&json_path, &EncodeOptions::default()).expect("saves json");
	assert_eq!(fs::read(&json_path).expect("reads")[0], b'{');

	let glb_path = dir.path().join("scene.GLB");
	doc.save(&glb_path, &EncodeOptions::default()).expect("saves glb");
	assert_eq!(&fs::read(&glb_path).expect("reads")[..4], b"glTF");

	let from_json = Document::load(&json_path).expect("loads json");
	let from_glb = Document::load(&glb_path).expect("loads glb");
	assert_eq!(from_json.buffers, from_glb.buffers);
	assert_eq!(from_json.images, from_glb.images);
	assert_eq!(from_json.base_dir, dir.path());
}

#[test]
fn image_storage_mode_reflects_source() {
	assert_eq!(Image::from_buffer_view(2, "image/png").storage_mode(), Some(StorageMode::ContainerBlob));
	assert_eq!(Image::from_uri("tex.png").storage_mode(), Some(StorageMode::ExternalFile));
	assert_eq!(Image::from_uri("data:image/png;base64,AA==").storage_mode(), Some(StorageMode::DataUri));
	assert_eq!(Image::default().storage_mode(), None);
}

#[test]
fn index_lookups_report_range() {
	let doc = Document::new();
	assert!(matches!(doc.buffer(0), Err(GltfError::BufferIndexOutOfRange { index: 0, len: 0 })));
	assert!(matches!(doc.buffer_view(3), Err(GltfError::BufferViewIndexOutOfRange { index: 3, len: 0 })));
	assert!(matches!(doc.image(1), Err(GltfError::ImageIndexOutOfRange { index: 1, len: 0 })));
}

#[test]
fn missing_asset_is_not_stamped_with_generator() {
	let doc = Document::from_json_str("{}").expect("empty object parses");
	assert_eq!(doc.asset.version, "2.0");
	assert_eq!(doc.asset.generator, None);
	assert!(!doc.to_json_string().expect("serializes").contains("generator"));

	assert!(Document::new().asset.generator.is_some());
}
