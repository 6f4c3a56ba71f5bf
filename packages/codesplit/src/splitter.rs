//! Text segmentation: carve a delimited text bundle into file records.
//!
//! A header is a literal delimiter followed by whitespace and a path token.
//! Each record owns the text from the end of its header line up to the start
//! of the next header, trimmed.
//!
//! ```text
//! ### src/main.rs          <- header match 0
//! fn main() {}             <- content of record 0
//! ### README.md            <- header match 1
//! # Title                  <- content of record 1 (runs to end of input)
//! ```

use regex::Regex;

use crate::config::{header_pattern, validate_input};
use crate::error::Result;
use crate::types::{FileRecord, HeaderMatch};

/// Splitter bound to a single delimiter.
///
/// Compiles the header pattern once so the same delimiter can be applied to
/// many inputs.
#[derive(Debug, Clone)]
pub struct Splitter {
    delimiter: String,
    pattern: Regex,
}

impl Splitter {
    /// Create a splitter for a delimiter.
    ///
    /// Fails with `InvalidDelimiter` if the delimiter is blank.
    pub fn new(delimiter: &str) -> Result<Self> {
        let pattern = header_pattern(delimiter)?;
        Ok(Self {
            delimiter: delimiter.to_string(),
            pattern,
        })
    }

    /// The delimiter this splitter matches.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Find every header match in `text`, in order of appearance.
    #[must_use]
    pub fn headers(&self, text: &str) -> Vec<HeaderMatch> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                // Group 0 and 1 always participate when the pattern matches
                let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) else {
                    return None;
                };
                Some(HeaderMatch {
                    start: whole.start(),
                    end: whole.end(),
                    path: path.as_str().to_string(),
                })
            })
            .collect()
    }

    /// Split `text` into file records.
    ///
    /// Fails with `EmptyInput` for blank text. Returns an empty vector when no
    /// header is found.
    pub fn split(&self, text: &str) -> Result<Vec<FileRecord>> {
        validate_input(text)?;

        let headers = self.headers(text);
        tracing::debug!(
            delimiter = %self.delimiter,
            headers = headers.len(),
            "Scanned input for file headers"
        );

        let records = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                // Matches are non-overlapping, so the next start is never before this end
                let end = headers.get(i + 1).map_or(text.len(), |next| next.start);
                FileRecord::new(header.path.clone(), text[header.end..end].trim())
            })
            .collect();

        Ok(records)
    }
}

/// Split `text` into file records using `delimiter` as a literal marker.
///
/// # Errors
/// * `InvalidDelimiter` if the delimiter is blank (checked first)
/// * `EmptyInput` if the text is blank
///
/// # Examples
/// ```
/// use codesplit::split;
///
/// let files = split("### a.txt\nhello\n### b/c.txt\nworld", "###").unwrap();
/// assert_eq!(files.len(), 2);
/// assert_eq!(files[1].path, "b/c.txt");
/// assert_eq!(files[1].content, "world");
/// ```
pub fn split(text: &str, delimiter: &str) -> Result<Vec<FileRecord>> {
    Splitter::new(delimiter)?.split(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitterError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_two_files() {
        let files = split("### a.txt\nhello\n### b/c.txt\nworld", "###").unwrap();
        assert_eq!(
            files,
            vec![
                FileRecord::new("a.txt", "hello"),
                FileRecord::new("b/c.txt", "world"),
            ]
        );
    }

    #[test]
    fn test_split_literal_delimiter() {
        let files = split("[[FILE]] x.txt\ndata", "[[FILE]]").unwrap();
        assert_eq!(files, vec![FileRecord::new("x.txt", "data")]);
    }

    #[test]
    fn test_split_no_headers() {
        let files = split("no delimiters here", "###").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_split_blank_text() {
        assert!(matches!(
            split("   \n\t", "###"),
            Err(SplitterError::EmptyInput)
        ));
    }

    #[test]
    fn test_split_blank_delimiter_checked_first() {
        assert!(matches!(
            split("", "  "),
            Err(SplitterError::InvalidDelimiter)
        ));
        assert!(matches!(
            split("### a.txt\nx", ""),
            Err(SplitterError::InvalidDelimiter)
        ));
    }

    #[test]
    fn test_adjacent_headers_yield_empty_content() {
        let files = split("### a.txt\n### b.txt\nbody", "###").unwrap();
        assert_eq!(
            files,
            vec![FileRecord::new("a.txt", ""), FileRecord::new("b.txt", "body")]
        );
    }

    #[test]
    fn test_delimiter_without_path_stays_in_content() {
        let text = "### a.txt\nline one\n### !!!\nline two";
        let files = split(text, "###").unwrap();
        assert_eq!(
            files,
            vec![FileRecord::new("a.txt", "line one\n### !!!\nline two")]
        );
    }

    #[test]
    fn test_text_before_first_header_is_dropped() {
        let files = split("preamble\n\n### a.txt\nbody", "###").unwrap();
        assert_eq!(files, vec![FileRecord::new("a.txt", "body")]);
    }

    #[test]
    fn test_duplicate_paths_are_kept() {
        let files = split("### a.txt\none\n### a.txt\ntwo", "###").unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].content, "one");
        assert_eq!(files[1].content, "two");
    }

    #[test]
    fn test_paths_are_not_normalized() {
        let files = split("### ../up.txt\nx\n### ./here/./a.txt\ny", "###").unwrap();
        assert_eq!(files[0].path, "../up.txt");
        assert_eq!(files[1].path, "./here/./a.txt");
    }

    #[test]
    fn test_content_is_trimmed() {
        let files = split("###   a.txt   \n\n\n  indented\n\n", "###").unwrap();
        assert_eq!(files, vec![FileRecord::new("a.txt", "indented")]);
    }

    #[test]
    fn test_header_path_stops_at_other_characters() {
        let files = split("### notes.md (draft)\nbody", "###").unwrap();
        assert_eq!(files, vec![FileRecord::new("notes.md", "(draft)\nbody")]);
    }

    #[test]
    fn test_header_whitespace_may_cross_a_line_break() {
        let files = split("###\nREADME\nbody", "###").unwrap();
        assert_eq!(files, vec![FileRecord::new("README", "body")]);

        let headers = Splitter::new("###").unwrap().headers("###\n\n  notes.md\nx");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].path, "notes.md");
    }

    #[test]
    fn test_crlf_input() {
        let files = split("### a.txt\r\nhello\r\n### b.txt\r\nworld\r\n", "###").unwrap();
        assert_eq!(
            files,
            vec![FileRecord::new("a.txt", "hello"), FileRecord::new("b.txt", "world")]
        );
    }

    #[test]
    fn test_headers_report_offsets() {
        let text = "### a.txt\nhello\n### b.txt\nworld";
        let splitter = Splitter::new("###").unwrap();
        let headers = splitter.headers(text);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].start, 0);
        assert_eq!(headers[0].end, 10);
        assert_eq!(headers[1].start, 16);
        assert_eq!(&text[headers[1].start..headers[1].end], "### b.txt\n");
    }

    #[test]
    fn test_k_headers_yield_k_records_in_order() {
        let paths: Vec<String> = (0..25).map(|i| format!("dir{}/file_{i}.rs", i % 3)).collect();
        let text: String = paths
            .iter()
            .map(|p| format!("### {p}\n// body of {p}\n\n"))
            .collect();

        let files = split(&text, "###").unwrap();
        let got: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(got, paths.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_rejoined_records_split_to_same_records() {
        let text = "### a.txt\nalpha\n\n### lib/b.rs\nfn b() {}\n### c/d/e.txt\n";
        let files = split(text, "###").unwrap();

        let rejoined: String = files
            .iter()
            .map(|f| format!("### {}\n{}\n", f.path, f.content))
            .collect();
        assert_eq!(split(&rejoined, "###").unwrap(), files);
    }

    #[test]
    fn test_splitter_reuse() {
        let splitter = Splitter::new("//>").unwrap();
        assert_eq!(splitter.delimiter(), "//>");
        assert_eq!(splitter.split("//> a\n1").unwrap()[0].content, "1");
        assert_eq!(splitter.split("//> b\n2").unwrap()[0].path, "b");
    }
}
