//! In-memory directory tree built from file records.
//!
//! The tree sits between the splitter output and the zip writer. Directories
//! are get-or-create, so records sharing a prefix share one directory node,
//! and a repeated full path replaces the earlier file in place.
//!
//! ```text
//! records                   tree
//! a/b/c.txt          =>     a/
//! a/d.txt                   ├── d.txt
//! e.txt                     └── b/
//!                               └── c.txt
//!                           e.txt
//! ```

use crate::error::{Result, SplitterError};
use crate::types::FileRecord;

/// A file leaf in the archive tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    name: String,
    content: String,
}

impl ArchiveFile {
    /// Leaf name of the file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory(Directory),
    File(ArchiveFile),
}

/// A directory node in the archive tree.
///
/// Children are kept in one list in the order they were first created, so
/// files and subdirectories interleave the way their records did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    name: String,
    children: Vec<Node>,
}

impl Directory {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name of this directory (empty for the root).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All children in creation order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child directories in creation order.
    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.children.iter().filter_map(|node| match node {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        })
    }

    /// Files in creation order.
    pub fn files(&self) -> impl Iterator<Item = &ArchiveFile> {
        self.children.iter().filter_map(|node| match node {
            Node::File(file) => Some(file),
            Node::Directory(_) => None,
        })
    }

    /// Look up a child directory.
    #[must_use]
    pub fn get_directory(&self, name: &str) -> Option<&Directory> {
        self.directories().find(|d| d.name == name)
    }

    /// Look up a file in this directory.
    #[must_use]
    pub fn get_file(&self, name: &str) -> Option<&ArchiveFile> {
        self.files().find(|f| f.name == name)
    }

    /// Return the child directory `name`, creating it if it does not exist.
    pub fn directory(&mut self, name: &str) -> &mut Directory {
        let found = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Directory(d) if d.name == name));
        let index = match found {
            Some(index) => index,
            None => {
                self.children.push(Node::Directory(Directory::new(name)));
                self.children.len() - 1
            }
        };
        match &mut self.children[index] {
            Node::Directory(dir) => dir,
            Node::File(_) => unreachable!("index points at a directory node"),
        }
    }

    /// Store a file, replacing the content of an existing file with the same name.
    ///
    /// Returns `true` if an existing file was replaced.
    pub fn put_file(&mut self, name: &str, content: &str) -> bool {
        for node in &mut self.children {
            if let Node::File(existing) = node {
                if existing.name == name {
                    existing.content = content.to_string();
                    return true;
                }
            }
        }
        self.children.push(Node::File(ArchiveFile {
            name: name.to_string(),
            content: content.to_string(),
        }));
        false
    }
}


/// One flattened entry of the tree, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<'a> {
    /// Directory entry; the path ends with `/`.
    Directory(String),

    /// File entry with its full path.
    File { path: String, content: &'a str },
}

impl Entry<'_> {
    /// Full path of the entry inside the archive.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Directory(path) => path,
            Self::File { path, .. } => path,
        }
    }
}

/// Directory tree of an archive under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveTree {
    root: Directory,
}

impl ArchiveTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from records in order; later records win on duplicate paths.
    pub fn from_records(records: &[FileRecord]) -> Result<Self> {
        let mut tree = Self::new();
        for record in records {
            tree.insert(record)?;
        }
        Ok(tree)
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Walk a directory chain from the root, creating missing directories.
    pub fn directory_chain<'a>(&mut self, chain: impl IntoIterator<Item = &'a str>) -> &mut Directory {
        chain
            .into_iter()
            .fold(&mut self.root, |dir, name| dir.directory(name))
    }

    /// Place a record in the tree.
    pub fn insert(&mut self, record: &FileRecord) -> Result<()> {
        let (dirs, file_name) = entry_segments(&record.path)?;
        let replaced = self
            .directory_chain(dirs.iter().copied())
            .put_file(file_name, &record.content);

        if replaced {
            tracing::warn!(path = %record.path, "Duplicate path, keeping the last content");
        } else {
            tracing::debug!(path = %record.path, "Added file to archive tree");
        }
        Ok(())
    }

    /// Flatten the tree into entries.
    ///
    /// Entries follow record order. A directory entry is emitted where the
    /// directory was first created and is followed by its contents; a
    /// duplicate path keeps the position of its first occurrence.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry<'_>> {
        let mut entries = Vec::new();
        collect_entries(&self.root, "", &mut entries);
        entries
    }

    /// Total number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|e| matches!(e, Entry::File { .. }))
            .count()
    }

    /// Total number of directories, excluding the root.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|e| matches!(e, Entry::Directory(_)))
            .count()
    }

    /// Whether the tree holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

fn collect_entries<'a>(dir: &'a Directory, prefix: &str, entries: &mut Vec<Entry<'a>>) {
    for node in &dir.children {
        match node {
            Node::File(file) => entries.push(Entry::File {
                path: format!("{prefix}{}", file.name),
                content: &file.content,
            }),
            Node::Directory(child) => {
                let child_prefix = format!("{prefix}{}/", child.name);
                entries.push(Entry::Directory(child_prefix.clone()));
                collect_entries(child, &child_prefix, entries);
            }
        }
    }
}

/// Split a record path into its directory chain and leaf name.
///
/// Empty and `.` segments are dropped. `..` segments and paths without a leaf
/// name are rejected, including paths whose last segment is empty or `.`.
fn entry_segments(path: &str) -> Result<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(SplitterError::InvalidEntryPath {
                    path: path.to_string(),
                    reason: "parent directory segments are not allowed",
                })
            }
            name => segments.push(name),
        }
    }

    if matches!(path.rsplit('/').next(), Some("" | ".")) {
        return Err(SplitterError::InvalidEntryPath {
            path: path.to_string(),
            reason: "path names a directory, not a file",
        });
    }

    match segments.pop() {
        Some(file_name) => Ok((segments, file_name)),
        None => Err(SplitterError::InvalidEntryPath {
            path: path.to_string(),
            reason: "path has no file name",
        }),
    }
}
