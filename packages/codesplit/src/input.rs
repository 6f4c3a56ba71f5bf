//! Loading input text from a file or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::{validate_input_size, MAX_INPUT_SIZE};
use crate::error::Result;

/// Where the input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read from standard input.
    Stdin,

    /// Read from a file.
    File(PathBuf),
}

impl InputSource {
    /// Interpret an optional CLI argument; missing or `-` means stdin.
    #[must_use]
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => Self::File(path.to_path_buf()),
            _ => Self::Stdin,
        }
    }

    /// Human-readable name for messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole input as text.
    ///
    /// Enforces [`MAX_INPUT_SIZE`]. Invalid UTF-8 is replaced with U+FFFD and
    /// logged rather than rejected.
    pub fn read(&self) -> Result<String> {
        let bytes = match self {
            Self::Stdin => read_limited(io::stdin().lock())?,
            Self::File(path) => {
                let size = fs::metadata(path)?.len();
                validate_input_size(usize::try_from(size).unwrap_or(usize::MAX))?;
                fs::read(path)?
            }
        };
        tracing::debug!(source = %self.describe(), bytes = bytes.len(), "Read input");
        Ok(bytes_to_string(bytes, &self.describe()))
    }
}

/// Read at most one byte past the limit so oversized input is detected
/// without buffering all of it.
fn read_limited(reader: impl Read) -> Result<Vec<u8>> {
    let limit = u64::try_from(MAX_INPUT_SIZE).unwrap_or(u64::MAX);
    let mut bytes = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
    validate_input_size(bytes.len())?;
    Ok(bytes)
}

/// Decode bytes as UTF-8, replacing invalid sequences.
pub fn bytes_to_string(bytes: Vec<u8>, context: &str) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!(
            source = %context,
            valid_up_to = e.utf8_error().valid_up_to(),
            "Input is not valid UTF-8, replacing invalid sequences"
        );
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}
