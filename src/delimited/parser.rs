//! Single-pass RFC 4180 field scanner.
//!
//! Quoted fields keep their content verbatim, including delimiters and line breaks,
//! with `""` standing for one literal quote. Unquoted fields are trimmed. Every
//! special character is ASCII, so the scanner walks bytes and slices the source
//! `&str` only at ASCII positions.

use super::{Delimiter, Row};
use crate::helpers::string::strip_bom;
use tracing::debug;

/// Outcome of parsing a block of delimited text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedText {
    /// Delimiter sniffed from the first line
    pub delimiter: Delimiter,
    /// Rows in input order; lengths may differ between rows
    pub rows: Vec<Row>,
}

/// Parses delimited text into a delimiter and rows of string fields.
///
/// A leading byte-order mark is ignored. Rows consisting of a single empty field
/// (blank lines, a trailing newline) are dropped; every other row is kept as is,
/// short rows included. Never fails: malformed quoting degrades to the most
/// literal reading of the input.
pub fn parse(text: &str) -> ParsedText {
    let text = strip_bom(text);
    let delimiter = Delimiter::detect(text);
    let rows = Scanner::new(text, delimiter).rows();
    debug!(%delimiter, rows = rows.len(), bytes = text.len(), "parsed delimited text");
    ParsedText { delimiter, rows }
}

/// What follows a field.
enum Terminator {
    /// Another field on the same row follows
    Delimiter,
    /// The row ended on `\n`, `\r` or `\r\n`
    LineBreak,
    /// The input ended
    End,
}

/// Cursor over the input text.
struct Scanner<'a> {
    text: &'a str,
    delimiter: u8,
    position: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, delimiter: Delimiter) -> Self {
        Self {
            text,
            delimiter: delimiter.as_byte(),
            position: 0,
        }
    }

    /// Scans the whole input.
    fn rows(mut self) -> Vec<Row> {
        let mut rows = Vec::new();
        if self.text.is_empty() {
            return rows;
        }
        let mut row = Row::new();
        loop {
            row.push(self.field());
            match self.terminator() {
                Terminator::Delimiter => continue,
                Terminator::LineBreak => {
                    push_row(&mut rows, std::mem::take(&mut row));
                    if self.at_end() {
                        break;
                    }
                }
                Terminator::End => {
                    push_row(&mut rows, row);
                    break;
                }
            }
        }
        rows
    }

    /// Reads one field starting at the cursor.
    fn field(&mut self) -> String {
        if self.peek() == Some(b'"') {
            self.quoted_field()
        } else {
            let end = self.boundary();
            let value = self.text[self.position..end].trim().to_owned();
            self.position = end;
            value
        }
    }

    /// Reads a quoted field; the cursor sits on the opening quote.
    fn quoted_field(&mut self) -> String {
        self.position += 1;
        let mut value = String::new();
        loop {
            let rest = &self.text[self.position..];
            match rest.find('"') {
                None => {
                    // Unterminated quote swallows the rest of the input.
                    value.push_str(rest);
                    self.position = self.text.len();
                    return value;
                }
                Some(offset) => {
                    value.push_str(&rest[..offset]);
                    self.position += offset + 1;
                    if self.peek() == Some(b'"') {
                        value.push('"');
                        self.position += 1;
                    } else {
                        break;
                    }
                }
            }
        }
        // Stray text between the closing quote and the next boundary is kept verbatim.
        let end = self.boundary();
        value.push_str(&self.text[self.position..end]);
        self.position = end;
        value
    }

    /// Consumes whatever ends the current field.
    fn terminator(&mut self) -> Terminator {
        match self.peek() {
            Some(byte) if byte == self.delimiter => {
                self.position += 1;
                Terminator::Delimiter
            }
            Some(b'\r') => {
                self.position += 1;
                if self.peek() == Some(b'\n') {
                    self.position += 1;
                }
                Terminator::LineBreak
            }
            Some(b'\n') => {
                self.position += 1;
                Terminator::LineBreak
            }
            // field() always stops at a boundary, so anything else is the end.
            _ => Terminator::End,
        }
    }

    /// Index of the next delimiter or line break at or after the cursor.
    fn boundary(&self) -> usize {
        let delimiter = self.delimiter;
        self.text.as_bytes()[self.position..]
            .iter()
            .position(|&byte| byte == delimiter || byte == b'\n' || byte == b'\r')
            .map_or(self.text.len(), |offset| self.position + offset)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.position).copied()
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.position >= self.text.len()
    }
}

/// Appends a finished row unless it is a lone empty field.
fn push_row(rows: &mut Vec<Row>, row: Row) {
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> Vec<Row> {
        parse(text).rows
    }

    #[test]
    fn parse_simple() {
        let parsed = parse("a,b,c\n1,2,3");
        assert_eq!(parsed.delimiter, Delimiter::Comma);
        assert_eq!(parsed.rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn parse_empty_input() {
        let parsed = parse("");
        assert_eq!(parsed.delimiter, Delimiter::Comma);
        assert!(parsed.rows.is_empty());
        assert!(parse("\u{FEFF}").rows.is_empty());
    }

    #[test]
    fn parse_strips_bom() {
        assert_eq!(rows("\u{FEFF}name,age\nAda,36"), vec![vec!["name", "age"], vec!["Ada", "36"]]);
    }

    #[test]
    fn parse_quoted_fields() {
        let text = "\"hello, world\",\"with \"\"quotes\"\"\"\n\"multi\nline\",x";
        assert_eq!(
            rows(text),
            vec![vec!["hello, world", "with \"quotes\""], vec!["multi\nline", "x"]]
        );
    }

    #[test]
    fn parse_trims_unquoted_but_not_quoted() {
        assert_eq!(rows("  a  ,\"  b  \", c\t"), vec![vec!["a", "  b  ", "c"]]);
    }

    #[test]
    fn parse_line_endings() {
        let expected = vec![vec!["a", "b"], vec!["1", "2"], vec!["3", "4"]];
        assert_eq!(rows("a,b\r\n1,2\r\n3,4\r\n"), expected);
        assert_eq!(rows("a,b\n1,2\n3,4\n"), expected);
        assert_eq!(rows("a,b\r1,2\r3,4"), expected);
    }

    #[test]
    fn parse_drops_blank_lines_keeps_short_rows() {
        assert_eq!(
            rows("a,b,c\n\n1,2\n\n\n3\n"),
            vec![vec!["a", "b", "c"], vec!["1", "2"], vec!["3"]]
        );
    }

    #[test]
    fn parse_keeps_rows_of_empty_fields() {
        assert_eq!(rows("a,b\n,\n"), vec![vec!["a", "b"], vec!["", ""]]);
        assert_eq!(rows("a,"), vec![vec!["a", ""]]);
    }

    #[test]
    fn parse_with_detected_delimiters() {
        let parsed = parse("a\tb\n1,5\t2");
        assert_eq!(parsed.delimiter, Delimiter::Tab);
        assert_eq!(parsed.rows, vec![vec!["a", "b"], vec!["1,5", "2"]]);

        let parsed = parse("x;y\n\"1;2\";3");
        assert_eq!(parsed.delimiter, Delimiter::Semicolon);
        assert_eq!(parsed.rows, vec![vec!["x", "y"], vec!["1;2", "3"]]);
    }

    #[test]
    fn parse_unterminated_quote_takes_rest() {
        assert_eq!(rows("a,\"b\nc,d"), vec![vec!["a", "b\nc,d"]]);
    }

    #[test]
    fn parse_text_after_closing_quote_is_kept() {
        assert_eq!(rows("\"ab\"cd,e"), vec![vec!["abcd", "e"]]);
    }

    #[test]
    fn parse_quote_inside_unquoted_field_is_literal() {
        assert_eq!(rows("a\"b,c"), vec![vec!["a\"b", "c"]]);
    }

    #[test]
    fn parse_multibyte_content() {
        assert_eq!(rows("名前,都市\n太郎,\"東京, 日本\""), vec![vec!["名前", "都市"], vec!["太郎", "東京, 日本"]]);
    }
}
