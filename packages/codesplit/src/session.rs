//! Session state for an interactive split-and-package run.
//!
//! The whole state is one value. Every action returns a new `Session` and
//! leaves the old one untouched, so a failed action keeps the caller's input
//! and derived records exactly as they were.
//!
//! ```text
//! Editing --process--> Processed --package--> Packaged
//!    ^                     |                      |
//!    +--------reset--------+----------------------+
//! ```

use crate::archive::{self, PackOptions};
use crate::config::{validate_delimiter, validate_input, DEFAULT_DELIMITER};
use crate::error::{Result, SplitterError};
use crate::splitter::split;
use crate::types::FileRecord;

/// Stage a session is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Input is being edited; nothing derived yet.
    #[default]
    Editing,

    /// Input was split into records.
    Processed,

    /// Records were packaged into an archive.
    Packaged,
}

/// Immutable snapshot of the tool's transient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    input: String,
    delimiter: String,
    delimiter_error: Option<String>,
    files: Vec<FileRecord>,
    archive: Option<Vec<u8>>,
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with the default delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: String::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            delimiter_error: None,
            files: Vec::new(),
            archive: None,
            phase: Phase::Editing,
        }
    }

    /// Replace the input text. Derived records and archive are discarded.
    #[must_use]
    pub fn with_input(&self, input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            delimiter: self.delimiter.clone(),
            delimiter_error: self.delimiter_error.clone(),
            ..Self::new()
        }
    }

    /// Replace the delimiter, recording an inline validation message when it
    /// is blank. Derived records and archive are discarded.
    #[must_use]
    pub fn with_delimiter(&self, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        let delimiter_error = validate_delimiter(&delimiter)
            .err()
            .map(|e| e.to_string());
        Self {
            input: self.input.clone(),
            delimiter,
            delimiter_error,
            ..Self::new()
        }
    }

    /// Split the input into records.
    ///
    /// # Errors
    /// * `InvalidDelimiter` if the delimiter is blank
    /// * `EmptyInput` if the input is blank
    /// * `NoHeadersFound` if the delimiter never precedes a valid path
    pub fn process(&self) -> Result<Self> {
        validate_delimiter(&self.delimiter)?;
        validate_input(&self.input)?;

        let files = split(&self.input, &self.delimiter)?;
        if files.is_empty() {
            return Err(SplitterError::NoHeadersFound {
                delimiter: self.delimiter.clone(),
            });
        }

        tracing::info!(files = files.len(), "Processed input");
        Ok(Self {
            input: self.input.clone(),
            delimiter: self.delimiter.clone(),
            delimiter_error: None,
            files,
            archive: None,
            phase: Phase::Processed,
        })
    }

    /// Package the processed records into a zip archive held in the session.
    ///
    /// # Errors
    /// * `NotProcessed` if there are no records yet
    /// * `InvalidEntryPath` or `Packaging` if the archive cannot be built;
    ///   the current session stays usable for a retry
    pub fn package(&self, options: &PackOptions) -> Result<Self> {
        if self.files.is_empty() {
            return Err(SplitterError::NotProcessed);
        }

        let bytes = archive::package(&self.files, options)?;
        Ok(Self {
            archive: Some(bytes),
            phase: Phase::Packaged,
            ..self.clone()
        })
    }

    /// Start over: drop input, records and archive but keep the delimiter.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            delimiter: self.delimiter.clone(),
            delimiter_error: self.delimiter_error.clone(),
            ..Self::new()
        }
    }

    /// Whether the split action is available.
    #[must_use]
    pub fn can_process(&self) -> bool {
        !self.input.trim().is_empty() && self.delimiter_error.is_none()
    }

    /// Current input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current delimiter.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Inline message for an invalid delimiter.
    #[must_use]
    pub fn delimiter_error(&self) -> Option<&str> {
        self.delimiter_error.as_deref()
    }

    /// Records produced by the last successful split.
    #[must_use]
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Archive bytes produced by the last successful packaging.
    #[must_use]
    pub fn archive(&self) -> Option<&[u8]> {
        self.archive.as_deref()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BUNDLE: &str = "### a.txt\nhello\n### b/c.txt\nworld";

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new();
        assert_eq!(session.delimiter(), "###");
        assert_eq!(session.phase(), Phase::Editing);
        assert!(!session.can_process());
    }

    #[test]
    fn test_process_then_package() {
        let session = Session::new().with_input(BUNDLE);
        assert!(session.can_process());

        let processed = session.process().unwrap();
        assert_eq!(processed.phase(), Phase::Processed);
        assert_eq!(
            processed.files(),
            &[
                FileRecord::new("a.txt", "hello"),
                FileRecord::new("b/c.txt", "world"),
            ]
        );

        let packaged = processed.package(&PackOptions::default()).unwrap();
        assert_eq!(packaged.phase(), Phase::Packaged);
        assert!(packaged.archive().is_some_and(|b| b.starts_with(b"PK")));
        assert_eq!(packaged.files(), processed.files());
    }

    #[test]
    fn test_blank_delimiter_sets_inline_error() {
        let session = Session::new().with_input(BUNDLE).with_delimiter("  ");
        assert_eq!(session.delimiter_error(), Some("Delimiter cannot be empty"));
        assert!(!session.can_process());
        assert!(matches!(
            session.process(),
            Err(SplitterError::InvalidDelimiter)
        ));

        let fixed = session.with_delimiter("###");
        assert_eq!(fixed.delimiter_error(), None);
        assert!(fixed.process().is_ok());
    }

    #[test]
    fn test_no_headers_keeps_input() {
        let session = Session::new().with_input("no delimiters here");
        let err = session.process().unwrap_err();

        assert!(matches!(err, SplitterError::NoHeadersFound { .. }));
        assert_eq!(session.input(), "no delimiters here");
        assert!(session.files().is_empty());
    }

    #[test]
    fn test_package_failure_keeps_records() {
        let processed = Session::new()
            .with_input("### ../escape.txt\nx")
            .process()
            .unwrap();

        assert!(processed.package(&PackOptions::default()).is_err());
        assert_eq!(processed.phase(), Phase::Processed);
        assert_eq!(processed.files().len(), 1);
    }

    #[test]
    fn test_package_before_process() {
        let session = Session::new().with_input(BUNDLE);
        assert!(matches!(
            session.package(&PackOptions::default()),
            Err(SplitterError::NotProcessed)
        ));
    }

    #[test]
    fn test_changing_input_discards_derived_state() {
        let packaged = Session::new()
            .with_input(BUNDLE)
            .process()
            .and_then(|s| s.package(&PackOptions::default()))
            .unwrap();

        let edited = packaged.with_input("### z.txt\nzzz");
        assert_eq!(edited.phase(), Phase::Editing);
        assert!(edited.files().is_empty());
        assert!(edited.archive().is_none());

        let redelimited = packaged.with_delimiter("@@");
        assert!(redelimited.files().is_empty());
        assert_eq!(redelimited.input(), BUNDLE);
    }

    #[test]
    fn test_reset_keeps_delimiter() {
        let processed = Session::new()
            .with_delimiter("[[FILE]]")
            .with_input("[[FILE]] x.txt\ndata")
            .process()
            .unwrap();

        let reset = processed.reset();
        assert_eq!(reset.delimiter(), "[[FILE]]");
        assert_eq!(reset.input(), "");
        assert!(reset.files().is_empty());
        assert_eq!(reset.phase(), Phase::Editing);
    }
}
