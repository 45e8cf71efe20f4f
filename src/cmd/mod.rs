/// Buffer storage-mode conversion command.
pub mod buffers;
/// Image storage-mode conversion and export command.
pub mod images;
/// Document summary command.
pub mod info;
/// glTF to GLB repack command.
pub mod pack;
/// Buffer view removal command.
pub mod remove_view;
/// GLB to glTF repack command.
pub mod unpack;

mod util;
