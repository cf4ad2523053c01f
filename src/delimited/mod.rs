//! # Delimited Text Module
//!
//! Turns raw CSV/TSV/delimited text into rows of string fields. The delimiter is
//! sniffed once per input from its first line; field scanning follows RFC 4180
//! quoting and never fails on malformed input.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod parser;

pub use parser::{parse, ParsedText};

/// An ordered sequence of string fields. Types are inferred metadata, never stored.
pub type Row = Vec<String>;

/// Field delimiters recognised by the sniffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `,`
    #[default]
    Comma,
    /// `;`
    Semicolon,
    /// `\t`
    Tab,
    /// `|`
    Pipe,
}

impl Delimiter {
    /// Candidates in tie-breaking order: an earlier entry wins equal counts.
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
    ];

    /// Returns the delimiter character.
    pub const fn as_char(&self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
            Self::Tab => '\t',
            Self::Pipe => '|',
        }
    }

    /// Returns the delimiter as a single ASCII byte.
    pub(crate) const fn as_byte(&self) -> u8 {
        self.as_char() as u8
    }

    /// Returns a readable name for the delimiter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Semicolon => "semicolon",
            Self::Tab => "tab",
            Self::Pipe => "pipe",
        }
    }

    /// Detects the delimiter from the first line of `text`.
    ///
    /// Counts each candidate in the text up to the first line break and picks the
    /// highest count. Ties go to the earlier candidate, so a line without any
    /// candidate yields a comma.
    pub fn detect(text: &str) -> Self {
        let first_line = text
            .find(|c: char| c == '\n' || c == '\r')
            .map_or(text, |end| &text[..end]);
        let mut best = Delimiter::Comma;
        let mut best_count = 0;
        for candidate in Self::CANDIDATES {
            let count = first_line.matches(candidate.as_char()).count();
            if count > best_count {
                best = candidate;
                best_count = count;
            }
        }
        best
    }
}

impl Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
