//! Packaging of file records into a zip archive.
//!
//! Records are first placed in an [`ArchiveTree`], which creates each
//! directory once and resolves duplicate paths, then serialized with the
//! `zip` crate.

mod tree;
mod writer;

pub use tree::{ArchiveFile, ArchiveTree, Directory, Entry, Node};
pub use writer::{package, save_archive, write_archive, ArchiveSummary, Compression, PackOptions};
