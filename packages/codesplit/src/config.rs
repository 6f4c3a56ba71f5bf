//! Configuration constants and validation functions for codesplit.

use regex::Regex;

use crate::error::{Result, SplitterError};

/// Delimiter used when none is given, matching headers like `### path/to/file.ext`.
pub const DEFAULT_DELIMITER: &str = "###";

/// File name used for the produced archive when no output path is given.
pub const DEFAULT_ARCHIVE_NAME: &str = "split_files.zip";

/// Number of content characters shown in a record preview.
pub const PREVIEW_CHARS: usize = 100;

/// Maximum accepted input size in bytes (50 MB).
///
/// Applies to uploaded files, stdin, and the WASM boundary.
pub const MAX_INPUT_SIZE: usize = 50 * 1024 * 1024;

/// Character class of a path token following a delimiter.
///
/// ASCII word characters plus `/`, `.` and `-`.
pub const PATH_TOKEN_CLASS: &str = r"[A-Za-z0-9_/.\-]";

/// Validate a delimiter.
///
/// # Returns
/// * `Ok(())` if the delimiter has at least one non-whitespace character
/// * `Err(SplitterError::InvalidDelimiter)` otherwise
///
/// # Examples
/// ```
/// use codesplit::config::validate_delimiter;
///
/// assert!(validate_delimiter("###").is_ok());
/// assert!(validate_delimiter("   ").is_err());
/// ```
pub fn validate_delimiter(delimiter: &str) -> Result<()> {
    if delimiter.trim().is_empty() {
        Err(SplitterError::InvalidDelimiter)
    } else {
        Ok(())
    }
}

/// Validate input text.
///
/// Blank text is rejected before any scanning happens.
pub fn validate_input(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        Err(SplitterError::EmptyInput)
    } else {
        Ok(())
    }
}

/// Check an input size against [`MAX_INPUT_SIZE`].
pub fn validate_input_size(size: usize) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        Err(SplitterError::InputTooLarge {
            size,
            limit: MAX_INPUT_SIZE,
        })
    } else {
        Ok(())
    }
}

/// Build the header pattern for a delimiter.
///
/// The delimiter is escaped so it matches literally. A header is the
/// delimiter, at least one whitespace character, a path token (captured), and
/// any trailing horizontal whitespace through the end of the line.
///
/// # Examples
/// ```
/// use codesplit::config::header_pattern;
///
/// let re = header_pattern("[[FILE]]").unwrap();
/// let caps = re.captures("[[FILE]] src/main.rs\n").unwrap();
/// assert_eq!(&caps[1], "src/main.rs");
/// ```
pub fn header_pattern(delimiter: &str) -> Result<Regex> {
    validate_delimiter(delimiter)?;

    let pattern = format!(
        r"{}\s+({PATH_TOKEN_CLASS}+)[^\S\r\n]*(?:\r?\n)?",
        regex::escape(delimiter)
    );

    // An escaped literal can only fail to compile by exceeding the size limit.
    Regex::new(&pattern).map_err(|_| SplitterError::InvalidDelimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_delimiter() {
        assert!(validate_delimiter("###").is_ok());
        assert!(validate_delimiter(" // ").is_ok());
        assert!(validate_delimiter("").is_err());
        assert!(validate_delimiter(" \t\n").is_err());
    }

    #[test]
    fn test_validate_input() {
        assert!(validate_input("### a.txt").is_ok());
        assert!(matches!(
            validate_input("  \n  "),
            Err(SplitterError::EmptyInput)
        ));
    }

    #[test]
    fn test_validate_input_size() {
        assert!(validate_input_size(0).is_ok());
        assert!(validate_input_size(MAX_INPUT_SIZE).is_ok());
        assert!(matches!(
            validate_input_size(MAX_INPUT_SIZE + 1),
            Err(SplitterError::InputTooLarge { .. })
        ));
    }

    #[test]
    fn test_header_pattern_escapes_delimiter() {
        let re = header_pattern("a.b").unwrap();
        assert!(re.is_match("a.b x.txt"));
        // '.' must not act as a wildcard
        assert!(!re.is_match("axb x.txt"));

        let re = header_pattern("$(*)").unwrap();
        assert!(re.is_match("$(*) x.txt"));
    }

    #[test]
    fn test_header_pattern_requires_whitespace() {
        let re = header_pattern("###").unwrap();
        assert!(!re.is_match("###x.txt"));
        assert!(re.is_match("###\tx.txt"));
    }

    #[test]
    fn test_header_pattern_consumes_line_end() {
        let re = header_pattern("###").unwrap();
        let m = re.find("### a.txt  \r\nbody").unwrap();
        assert_eq!(m.as_str(), "### a.txt  \r\n");
    }

    #[test]
    fn test_header_pattern_path_is_ascii_only() {
        let re = header_pattern("###").unwrap();
        let caps = re.captures("### naïve.txt").unwrap();
        assert_eq!(&caps[1], "na");
    }

    #[test]
    fn test_header_pattern_rejects_blank_delimiter() {
        assert!(matches!(
            header_pattern(" "),
            Err(SplitterError::InvalidDelimiter)
        ));
    }
}
