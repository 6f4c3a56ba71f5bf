//! Core data types for codesplit.

use serde::{Deserialize, Serialize};

/// One file carved out of the input text.
///
/// Records carry no identity beyond their position in the sequence the
/// splitter produced; two records may share a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path token captured after the delimiter (e.g., "src/main.rs").
    pub path: String,

    /// Trimmed text between this header and the next one.
    pub content: String,
}

impl FileRecord {
    /// Create a new file record.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Directory components of the path, in order.
    ///
    /// ```
    /// use codesplit::FileRecord;
    ///
    /// let record = FileRecord::new("src/bin/tool.rs", "");
    /// assert_eq!(record.directories(), vec!["src", "bin"]);
    /// ```
    #[must_use]
    pub fn directories(&self) -> Vec<&str> {
        match self.path.rsplit_once('/') {
            Some((dirs, _)) => dirs.split('/').collect(),
            None => Vec::new(),
        }
    }

    /// Leaf file name of the path.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map_or(self.path.as_str(), |(_, name)| name)
    }

    /// First `limit` characters of the content, with `...` appended when
    /// the content is longer.
    #[must_use]
    pub fn preview(&self, limit: usize) -> String {
        let mut chars = self.content.char_indices();
        match chars.nth(limit) {
            Some((cut, _)) => format!("{}...", &self.content[..cut]),
            None => self.content.clone(),
        }
    }

    /// Size of the content in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Location of one header match in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Byte offset where the delimiter starts.
    pub start: usize,

    /// Byte offset just past the header line.
    pub end: usize,

    /// Captured path token.
    pub path: String,
}

impl HeaderMatch {
    /// Length of the full header match in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the match spans no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
