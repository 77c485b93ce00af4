pub mod output;
pub mod walker;

pub use output::{create_writer, JsonWriter, OutputWriter};
pub use walker::{display_path, find_project_files, to_forward_slashes, Discovery, FileWalker};
