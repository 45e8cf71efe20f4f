use std::fmt;

use crate::gltf::{BufferView, Document};

/// Entity kind holding a buffer-view reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefOwner {
	/// `accessors[i].bufferView`.
	Accessor,
	/// `accessors[i].sparse.indices.bufferView`.
	SparseIndices,
	/// `accessors[i].sparse.values.bufferView`.
	SparseValues,
	/// `images[i].bufferView`.
	Image,
}

impl RefOwner {
	/// JSON path fragment for the reference.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Accessor => "accessor",
			Self::SparseIndices => "accessor.sparse.indices",
			Self::SparseValues => "accessor.sparse.values",
			Self::Image => "image",
		}
	}
}

impl fmt::Display for RefOwner {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Reference that pointed at a removed buffer view and was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DanglingRef {
	/// Owning entity kind.
	pub owner: RefOwner,
	/// Index of the owning accessor or image.
	pub index: usize,
}

/// Outcome of [`remove_binary_region`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemovalReport {
	/// Removed descriptor, or `None` when the index was out of range.
	pub removed: Option<BufferView>,
	/// References that pointed at the removed view and are now absent.
	pub dangling: Vec<DanglingRef>,
}

/// Remove the buffer view at `index` and renumber every reference to later views.
///
/// References to the removed view are cleared and reported rather than
/// rejected. Buffer bytes are never moved.
pub fn remove_binary_region(doc: &mut Document, index: usize) -> RemovalReport {
	if index >= doc.buffer_views.len() {
		tracing::warn!(view = index, len = doc.buffer_views.len(), "buffer view index out of range; nothing removed");
		return RemovalReport::default();
	}

	let removed = doc.buffer_views.remove(index);
	let mut dangling = Vec::new();

	for (i, accessor) in doc.accessors.iter_mut().enumerate() {
		if renumber(&mut accessor.buffer_view, index) {
			dangling.push(DanglingRef { owner: RefOwner::Accessor, index: i });
		}
		if let Some(sparse) = &mut accessor.sparse {
			if renumber(&mut sparse.indices.buffer_view, index) {
				dangling.push(DanglingRef {
					owner: RefOwner::SparseIndices,
					index: i,
				});
			}
			if renumber(&mut sparse.values.buffer_view, index) {
				dangling.push(DanglingRef {
					owner: RefOwner::SparseValues,
					index: i,
				});
			}
		}
	}
	for (i, image) in doc.images.iter_mut().enumerate() {
		if renumber(&mut image.buffer_view, index) {
			dangling.push(DanglingRef { owner: RefOwner::Image, index: i });
		}
	}

	for item in &dangling {
		tracing::warn!(owner = %item.owner, index = item.index, view = index, "cleared reference to removed buffer view");
	}
	tracing::info!(view = index, dangling = dangling.len(), "removed buffer view");

	RemovalReport {
		removed: Some(removed),
		dangling,
	}
}

/// Shift one reference past a removed view. Returns `true` when it was cleared.
fn renumber(slot: &mut Option<u32>, removed: usize) -> bool {
	match *slot {
		Some(view) if view as usize == removed => {
			*slot = None;
			true
		}
		Some(view) if view as usize > removed => {
			*slot = Some(view - 1);
			false
		}
		_ => false,
	}
}

/// Structural problem found by [`check_references`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceIssue {
	/// A buffer view names a buffer that does not exist.
	MissingBuffer {
		/// Buffer view index.
		view: usize,
		/// Referenced buffer index.
		buffer: u32,
	},
	/// A buffer view extends past the declared length of its buffer.
	ViewOverflow {
		/// Buffer view index.
		view: usize,
		/// End offset of the view.
		end: u64,
		/// Declared buffer length.
		buffer_len: u64,
	},
	/// An accessor, sparse block, or image names a buffer view that does not exist.
	MissingView {
		/// Owning entity kind.
		owner: RefOwner,
		/// Owner index.
		index: usize,
		/// Referenced view index.
		view: u32,
	},
	/// An image has neither a URI nor a buffer view.
	ImageWithoutSource {
		/// Image index.
		image: usize,
	},
	/// An image sets both a URI and a buffer view.
	ImageWithBothSources {
		/// Image index.
		image: usize,
	},
}

impl fmt::Display for ReferenceIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MissingBuffer { view, buffer } => write!(f, "bufferViews[{view}] references missing buffer {buffer}"),
			Self::ViewOverflow { view, end, buffer_len } => {
				write!(f, "bufferViews[{view}] ends at {end} past buffer length {buffer_len}")
			}
			Self::MissingView { owner, index, view } => write!(f, "{owner}[{index}] references missing buffer view {view}"),
			Self::ImageWithoutSource { image } => write!(f, "images[{image}] has neither uri nor bufferView"),
			Self::ImageWithBothSources { image } => write!(f, "images[{image}] has both uri and bufferView"),
		}
	}
}

/// Scan for out-of-range and overflowing references without modifying the document.
pub fn check_references(doc: &Document) -> Vec<ReferenceIssue> {
	let mut issues = Vec::new();

	for (view, item) in doc.buffer_views.iter().enumerate() {
		let Some(buffer) = doc.buffers.get(item.buffer as usize) else {
			issues.push(ReferenceIssue::MissingBuffer { view, buffer: item.buffer });
			continue;
		};
		let end = item.offset().saturating_add(item.byte_length);
		if end > buffer.byte_length {
			issues.push(ReferenceIssue::ViewOverflow {
				view,
				end,
				buffer_len: buffer.byte_length,
			});
		}
	}

	let views = doc.buffer_views.len();
	let mut check = |owner: RefOwner, index: usize, slot: Option<u32>| {
		if let Some(view) = slot.filter(|&view| view as usize >= views) {
			issues.push(ReferenceIssue::MissingView { owner, index, view });
		}
	};
	for (i, accessor) in doc.accessors.iter().enumerate() {
		check(RefOwner::Accessor, i, accessor.buffer_view);
		if let Some(sparse) = &accessor.sparse {
			check(RefOwner::SparseIndices, i, sparse.indices.buffer_view);
			check(RefOwner::SparseValues, i, sparse.values.buffer_view);
		}
	}
	for (i, image) in doc.images.iter().enumerate() {
		check(RefOwner::Image, i, image.buffer_view);
	}

	for (image, item) in doc.images.iter().enumerate() {
		let has_uri = item.uri.as_deref().is_some_and(|uri| !uri.is_empty());
		match (has_uri, item.buffer_view.is_some()) {
			(false, false) => issues.push(ReferenceIssue::ImageWithoutSource { image }),
			(true, true) => issues.push(ReferenceIssue::ImageWithBothSources { image }),
			_ => {}
		}
	}
	issues
}

#[cfg(test)]
mod tests {
	use super::{DanglingRef, RefOwner, ReferenceIssue, check_references, remove_binary_region};
	use crate::gltf::{Accessor, AccessorSparse, Buffer, BufferView, Document, Image, SparseIndices, SparseValues};

	fn view(byte_length: u64) -> BufferView {
		BufferView {
			buffer: 0,
			byte_length,
			..BufferView::default()
		}
	}

	fn accessor(view: u32) -> Accessor {
		Accessor {
			buffer_view: Some(view),
			component_type: 5126,
			count: 1,
			kind: "SCALAR".to_owned(),
			..Accessor::default()
		}
	}

	fn four_views() -> Document {
		let mut doc = Document::new();
		doc.buffers.push(Buffer {
			byte_length: 64,
			..Buffer::default()
		});
		doc.buffer_views.extend([view(1), view(2), view(3), view(4)]);
		doc
	}

	#[test]
	fn removal_renumbers_and_clears() {
		let mut doc = four_views();
		doc.accessors.extend([accessor(1), accessor(2), accessor(3)]);

		let report = remove_binary_region(&mut doc, 2);
		assert_eq!(report.removed, Some(view(3)));
		assert_eq!(doc.buffer_views, vec![view(1), view(2), view(4)]);

		let refs: Vec<_> = doc.accessors.iter().map(|a| a.buffer_view).collect();
		assert_eq!(refs, vec![Some(1), None, Some(2)]);
		assert_eq!(report.dangling, vec![DanglingRef { owner: RefOwner::Accessor, index: 1 }]);
	}

	#[test]
	fn removal_updates_images_and_sparse_blocks() {
		let mut doc = four_views();
		doc.images.extend([Image::from_buffer_view(2, "image/png"), Image::from_buffer_view(1, "image/png"), Image::from_buffer_view(0, "image/png")]);
		let mut sparse_owner = accessor(0);
		sparse_owner.sparse = Some(AccessorSparse {
			count: 1,
			indices: SparseIndices {
				buffer_view: Some(1),
				component_type: 5125,
				..SparseIndices::default()
			},
			values: SparseValues {
				buffer_view: Some(3),
				..SparseValues::default()
			},
			..AccessorSparse::default()
		});
		doc.accessors.push(sparse_owner);

		let report = remove_binary_region(&mut doc, 1);

		let images: Vec<_> = doc.images.iter().map(|i| i.buffer_view).collect();
		assert_eq!(images, vec![Some(1), None, Some(0)]);
		let sparse = doc.accessors[0].sparse.as_ref().expect("sparse kept");
		assert_eq!(sparse.indices.buffer_view, None);
		assert_eq!(sparse.values.buffer_view, Some(2));
		assert_eq!(doc.accessors[0].buffer_view, Some(0));

		assert_eq!(
			report.dangling,
			vec![
				DanglingRef {
					owner: RefOwner::SparseIndices,
					index: 0
				},
				DanglingRef { owner: RefOwner::Image, index: 1 },
			]
		);
	}

	#[test]
	fn removal_out_of_range_is_a_no_op() {
		let mut doc = four_views();
		let before = doc.clone();
		let report = remove_binary_region(&mut doc, 4);
		assert_eq!(report.removed, None);
		assert!(report.dangling.is_empty());
		assert_eq!(doc, before);
	}

	#[test]
	fn check_finds_broken_references() {
		let mut doc = four_views();
		doc.buffer_views.push(BufferView {
			buffer: 0,
			byte_offset: Some(60),
			byte_length: 8,
			..BufferView::default()
		});
		doc.buffer_views.push(BufferView {
			buffer: 3,
			byte_length: 1,
			..BufferView::default()
		});
		doc.accessors.push(accessor(9));
		doc.images.push(Image::default());

		assert_eq!(
			check_references(&doc),
			vec![
				ReferenceIssue::ViewOverflow {
					view: 4,
					end: 68,
					buffer_len: 64
				},
				ReferenceIssue::MissingBuffer { view: 5, buffer: 3 },
				ReferenceIssue::MissingView {
					owner: RefOwner::Accessor,
					index: 0,
					view: 9
				},
				ReferenceIssue::ImageWithoutSource { image: 0 },
			]
		);
		assert!(check_references(&four_views()).is_empty());
	}

	#[test]
	fn check_flags_image_with_two_sources() {
		let mut doc = four_views();
		doc.images.push(Image {
			uri: Some("albedo.png".to_owned()),
			..Image::from_buffer_view(0, "image/png")
		});
		doc.images.push(Image::from_buffer_view(1, "image/png"));
		doc.images.push(Image::from_uri("normal.png"));

		assert_eq!(check_references(&doc), vec![ReferenceIssue::ImageWithBothSources { image: 0 }]);
	}
}
