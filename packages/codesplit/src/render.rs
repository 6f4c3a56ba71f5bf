//! Text and JSON rendering of file records for inspection.

use crate::error::Result;
use crate::types::FileRecord;

/// Render records as a two-column table of path and content preview.
///
/// Previews are flattened onto one line and cut at `preview_chars`.
///
/// ```
/// use codesplit::render::render_table;
/// use codesplit::FileRecord;
///
/// let table = render_table(&[FileRecord::new("a.txt", "hello")], 100);
/// assert!(table.starts_with("Processed Files (1)"));
/// ```
#[must_use]
pub fn render_table(records: &[FileRecord], preview_chars: usize) -> String {
    let path_width = records
        .iter()
        .map(|r| r.path.chars().count())
        .max()
        .unwrap_or(0)
        .max("FILE PATH".len());

    let mut lines = vec![
        format!("Processed Files ({})", records.len()),
        String::new(),
        format!("{:<path_width$}  CONTENT PREVIEW", "FILE PATH"),
    ];

    for record in records {
        let preview = flatten(&record.preview(preview_chars));
        let line = format!("{:<path_width$}  {preview}", record.path);
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Render records as pretty-printed JSON (`[{"path": ..., "content": ...}]`).
pub fn render_json(records: &[FileRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Collapse whitespace runs (including newlines) into single spaces.
fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
