//! CSV export of a header and rows.
//!
//! Output is comma-delimited with CRLF between records and a leading byte-order
//! mark, which spreadsheet applications need to recognise UTF-8.

use crate::error::{ResultMessage, RustyCsvError};
use crate::helpers::string::BOM;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::info;

/// Separator between exported records.
pub const RECORD_TERMINATOR: &str = "\r\n";

/// Escapes one field for CSV output.
///
/// Values containing a comma, a double quote, `\n` or `\r` are wrapped in quotes
/// with inner quotes doubled; anything else is returned unchanged. A missing
/// value (`None`) exports as an empty field.
pub fn escape_field<'a>(value: impl Into<Option<&'a str>>) -> Cow<'a, str> {
    let Some(value) = value.into() else {
        return Cow::Borrowed("");
    };
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Serializes a header row and data rows as BOM-prefixed CSV text.
///
/// Rows are written as given: short rows stay short. Callers export the full
/// filtered and sorted row set, not a page of it.
pub fn serialize<R>(headers: &[String], rows: &[R]) -> String
where
    R: AsRef<[String]>,
{
    let mut output = String::new();
    output.push(BOM);
    push_record(&mut output, headers);
    for row in rows {
        output.push_str(RECORD_TERMINATOR);
        push_record(&mut output, row.as_ref());
    }
    output
}

/// Serializes and writes the rows to a file.
pub fn export_to_path<R>(path: impl AsRef<Path>, headers: &[String], rows: &[R]) -> Result<(), RustyCsvError>
where
    R: AsRef<[String]>,
{
    let path = path.as_ref();
    let text = serialize(headers, rows);
    fs::write(path, &text)
        .map_err(RustyCsvError::from)
        .with_prefix(&format!("Export to '{}' failed", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), bytes = text.len(), "exported rows");
    Ok(())
}

/// Appends one record, fields joined by commas.
fn push_record(output: &mut String, fields: &[String]) {
    for (index, value) in fields.iter().enumerate() {
        if index > 0 {
            output.push(',');
        }
        output.push_str(&escape_field(value.as_str()));
    }
}
