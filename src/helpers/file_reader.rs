use crate::error::ResultMessage;
use crate::error::RustyCsvError;
use encoding_rs::Encoding;
use encoding_rs::UTF_8;
use encoding_rs::WINDOWS_1252;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Reads a delimited text file into memory and decodes it to a `String`.
///
/// # Arguments
/// * `path` - Path to the file
///
/// # Returns
/// * `Result<String, RustyCsvError>` - Decoded file content, without a byte-order mark
pub fn read_text(path: impl AsRef<Path>) -> Result<String, RustyCsvError> {
    let path = path.as_ref();
    let bytes = read_bytes(path).with_prefix(&format!("Read '{}' failed", path.display()))?;
    let (text, encoding) = decode(&bytes);
    debug!(path = %path.display(), bytes = bytes.len(), encoding = encoding.name(), "decoded input file");
    Ok(text)
}

/// Reads all bytes of a local file.
fn read_bytes(path: &Path) -> Result<Vec<u8>, RustyCsvError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Decodes raw bytes to text.
/// Honours a UTF-8/UTF-16 byte-order mark, otherwise accepts valid UTF-8 and
/// falls back to Windows-1252, the usual encoding of spreadsheet exports without a BOM.
pub fn decode(bytes: &[u8]) -> (String, &'static Encoding) {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_with_bom_removal(bytes);
        return (text.into_owned(), encoding);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_owned(), UTF_8),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            (text.into_owned(), WINDOWS_1252)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_decode_utf8_with_bom() {
        let (text, encoding) = decode(b"\xEF\xBB\xBFa,b\n");
        assert_eq!(text, "a,b\n");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_decode_utf16le_with_bom() {
        let (text, encoding) = decode(b"\xFF\xFEa\x00,\x00b\x00");
        assert_eq!(text, "a,b");
        assert_eq!(encoding.name(), "UTF-16LE");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        let (text, encoding) = decode(b"caf\xE9");
        assert_eq!(text, "café");
        assert_eq!(encoding, WINDOWS_1252);
    }

    #[test]
    fn test_read_text_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name,age\nAlice,30\n").unwrap();
        assert_eq!(read_text(file.path()).unwrap(), "name,age\nAlice,30\n");
    }

    #[test]
    fn test_read_text_missing_file() {
        let result = read_text("non_existent_file.csv");
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Read 'non_existent_file.csv' failed"), "{message}");
    }
}
