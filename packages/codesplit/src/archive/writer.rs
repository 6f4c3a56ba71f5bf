//! Zip serialization of an archive tree.

use std::fs::{self, File};
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime, Timelike};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::tree::{ArchiveTree, Entry};
use crate::error::{Result, SplitterError};
use crate::types::FileRecord;

/// Compression applied to file entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Compression {
    /// No compression.
    #[default]
    Stored,

    /// DEFLATE compression.
    Deflated,
}

impl From<Compression> for CompressionMethod {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Options for writing an archive.
#[derive(Debug, Clone, Default)]
pub struct PackOptions {
    /// Compression for file entries.
    pub compression: Compression,

    /// Modification time stamped on every entry (default: local now).
    pub modified: Option<NaiveDateTime>,
}

impl PackOptions {
    /// Set the compression.
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set a fixed modification time.
    #[must_use]
    pub fn with_modified(mut self, modified: NaiveDateTime) -> Self {
        self.modified = Some(modified);
        self
    }

    fn file_options(&self) -> SimpleFileOptions {
        let modified = self
            .modified
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        SimpleFileOptions::default()
            .compression_method(self.compression.into())
            .last_modified_time(zip_timestamp(modified))
            .unix_permissions(0o644)
    }
}

/// Result of writing an archive to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Where the archive was written.
    pub path: PathBuf,

    /// Number of file entries.
    pub files: usize,

    /// Number of directory entries.
    pub directories: usize,

    /// Archive size in bytes.
    pub bytes: u64,
}

/// Convert a timestamp to the zip (MS-DOS) representation.
///
/// Zip timestamps cover 1980 through 2107; anything outside falls back to
/// 1980-01-01 00:00.
fn zip_timestamp(modified: NaiveDateTime) -> zip::DateTime {
    u16::try_from(modified.year())
        .ok()
        .and_then(|year| {
            zip::DateTime::from_date_and_time(
                year,
                modified.month() as u8,
                modified.day() as u8,
                modified.hour() as u8,
                modified.minute() as u8,
                modified.second() as u8,
            )
            .ok()
        })
        .unwrap_or_default()
}

/// Write every entry of `tree` into a zip stream and return the finished writer.
pub fn write_archive<W: Write + Seek>(
    tree: &ArchiveTree,
    writer: W,
    options: &PackOptions,
) -> Result<W> {
    let file_options = options.file_options();
    let dir_options = file_options.unix_permissions(0o755);
    let mut zip = ZipWriter::new(writer);

    for entry in tree.entries() {
        match entry {
            Entry::Directory(path) => {
                tracing::debug!(path = %path, "Writing directory entry");
                zip.add_directory(path, dir_options)?;
            }
            Entry::File { path, content } => {
                tracing::debug!(path = %path, bytes = content.len(), "Writing file entry");
                zip.start_file(path, file_options)?;
                zip.write_all(content.as_bytes())?;
            }
        }
    }

    Ok(zip.finish()?)
}

/// Package records into an in-memory zip archive.
///
/// Fails with `NotProcessed` when there are no records, and with
/// `InvalidEntryPath` when a path cannot be placed in the archive.
///
/// # Examples
/// ```
/// use codesplit::archive::{package, PackOptions};
/// use codesplit::FileRecord;
///
/// let records = vec![FileRecord::new("a/b/c.txt", "hello")];
/// let bytes = package(&records, &PackOptions::default()).unwrap();
/// assert!(bytes.starts_with(b"PK"));
/// ```
pub fn package(records: &[FileRecord], options: &PackOptions) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Err(SplitterError::NotProcessed);
    }

    let tree = ArchiveTree::from_records(records)?;
    let cursor = write_archive(&tree, Cursor::new(Vec::new()), options)?;
    let bytes = cursor.into_inner();

    tracing::debug!(
        files = tree.file_count(),
        directories = tree.directory_count(),
        bytes = bytes.len(),
        "Packaged archive"
    );
    Ok(bytes)
}

/// Write the archive to `path` and flush it to disk.
fn write_synced(tree: &ArchiveTree, path: &Path, options: &PackOptions) -> Result<()> {
    let file = File::create(path)?;
    let file = write_archive(tree, file, options)?;
    file.sync_all()?;
    Ok(())
}

/// Save records as a zip archive at `output`.
///
/// Uses the atomic write pattern: writes to a temp file next to the target,
/// syncs to disk, then renames over the target.
pub fn save_archive(
    records: &[FileRecord],
    output: &Path,
    options: &PackOptions,
) -> Result<ArchiveSummary> {
    let tree = ArchiveTree::from_records(records)?;
    if tree.is_empty() {
        return Err(SplitterError::NotProcessed);
    }

    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&output_dir)?;

    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            SplitterError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path has no file name: {}", output.display()),
            ))
        })?;
    let temp_file = output_dir.join(format!(".{file_name}.tmp"));

    if let Err(e) = write_synced(&tree, &temp_file, options) {
        // Leave no partial archive behind and report the write error
        let _ = fs::remove_file(&temp_file);
        return Err(e);
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output.exists() {
        fs::remove_file(output)?;
    }

    fs::rename(&temp_file, output)?;

    let bytes = fs::metadata(output)?.len();
    Ok(ArchiveSummary {
        path: output.to_path_buf(),
        files: tree.file_count(),
        directories: tree.directory_count(),
        bytes,
    })
}
