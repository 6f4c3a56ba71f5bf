//! codesplit - Split a concatenated text bundle into files.
//!
//! Takes one block of text in which every file is introduced by a header line
//! of the form `<delimiter> <path>`, carves it into ordered file records, and
//! packages those records into a zip archive whose directories mirror the
//! record paths.
//!
//! # Example
//!
//! ```
//! use codesplit::{split, FileRecord};
//!
//! let files = split("### a.txt\nhello\n### b/c.txt\nworld", "###").unwrap();
//! assert_eq!(files, vec![
//!     FileRecord::new("a.txt", "hello"),
//!     FileRecord::new("b/c.txt", "world"),
//! ]);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, validation, and the header pattern
//! - [`types`]: `FileRecord` and `HeaderMatch`
//! - [`error`]: Error types and Result alias
//! - [`splitter`]: Text segmentation
//! - [`archive`]: Directory tree and zip packaging
//! - [`session`]: Immutable session state for interactive use
//! - [`input`]: Reading input from files or stdin
//! - [`render`]: Table and JSON output
//! - [`cli`]: Command-line interface
//! - `wasm`: Browser bindings (feature `wasm`)

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod session;
pub mod splitter;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used items
pub use archive::{package, save_archive, ArchiveTree, Compression, PackOptions};
pub use config::{validate_delimiter, DEFAULT_DELIMITER};
pub use error::{Result, SplitterError};
pub use session::{Phase, Session};
pub use splitter::{split, Splitter};
pub use types::{FileRecord, HeaderMatch};
