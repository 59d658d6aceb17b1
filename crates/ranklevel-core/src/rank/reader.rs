//! First-column reader for delimited reference files.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigurationError;

const BOM: char = '\u{feff}';

/// One non-blank row of the reference file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReferenceRow {
    /// 1-based line number in the file.
    pub line: usize,
    /// Trimmed first field.
    pub token: String,
}

/// Reads the first column of every non-blank row, in file order.
pub(crate) fn read_rows(
    path: &Path,
    delimiter: char,
) -> Result<Vec<ReferenceRow>, ConfigurationError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigurationError::Missing {
            path: path.to_path_buf(),
        },
        _ => ConfigurationError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut rows = Vec::new();
    for (index, raw) in bytes.split(|&b| b == b'\n').enumerate() {
        let line = index + 1;
        let text = std::str::from_utf8(raw).map_err(|_| ConfigurationError::InvalidEncoding {
            path: path.to_path_buf(),
            line,
        })?;
        let text = if index == 0 {
            text.trim_start_matches(BOM)
        } else {
            text
        };
        if text.trim().is_empty() {
            continue;
        }
        rows.push(ReferenceRow {
            line,
            token: first_field(text, delimiter),
        });
    }
    Ok(rows)
}

/// Extracts the first field of a row, honoring `"` quoting.
pub(crate) fn first_field(row: &str, delimiter: char) -> String {
    let row = row.trim_start();
    if let Some(rest) = row.strip_prefix('"') {
        let mut field = String::new();
        let mut chars = rest.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '"' {
                field.push(c);
            } else if chars.peek() == Some(&'"') {
                chars.next();
                field.push('"');
            } else {
                break;
            }
        }
        return field.trim().to_string();
    }

    let head = match row.split_once(delimiter) {
        Some((head, _)) => head,
        None => row,
    };
    head.trim().to_string()
}
