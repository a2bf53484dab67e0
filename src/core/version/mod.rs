pub mod version_file;

pub use version_file::{LibraryShape, VersionJson};
