use crate::utils::{Result, TextMapperError};
use csv::ReaderBuilder;
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};

/// A table is a list of rows, each a list of cell strings.
pub type Table = Vec<Vec<String>>;

pub const FIELD_DELIMITER: u8 = b';';

/// Reads a whole `;`-delimited, fully quoted table into memory.
pub struct TableReader {
    path: PathBuf,
    encoding: String,
    latin1_fallback: bool,
}

impl TableReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: "utf-8".to_string(),
            latin1_fallback: false,
        }
    }

    /// Encoding name: `latin-1` and its aliases, or any WHATWG label such as
    /// `utf-8` or `windows-1252`. Underscores count as dashes.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Retry once as ISO-8859-1 when the bytes do not decode.
    pub fn with_latin1_fallback(mut self, enabled: bool) -> Self {
        self.latin1_fallback = enabled;
        self
    }

    pub fn read_table(&self) -> Result<Table> {
        let content = self.read_decoded()?;
        parse_table(&content)
    }

    pub fn read_decoded(&self) -> Result<String> {
        if !file_exists(&self.path) {
            return Err(TextMapperError::FileNotFound(self.path.clone()));
        }

        let encoding = TextEncoding::from_label(&self.encoding)?;
        let bytes = std::fs::read(&self.path)?;

        if let Some(content) = encoding.decode(&bytes) {
            return Ok(content);
        }

        if !self.latin1_fallback {
            return Err(TextMapperError::Decode {
                path: self.path.clone(),
                encoding: encoding.name().to_string(),
            });
        }

        tracing::warn!(
            "{} is not valid {}, reading it as latin-1",
            self.path.display(),
            encoding.name()
        );
        Ok(decode_latin1(&bytes))
    }

}

#[derive(Debug, Clone, Copy)]
enum TextEncoding {
    Latin1,
    Whatwg(&'static Encoding),
}

impl TextEncoding {
    fn from_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => Ok(TextEncoding::Latin1),
            other => Encoding::for_label(other.as_bytes())
                .map(TextEncoding::Whatwg)
                .ok_or_else(|| TextMapperError::UnknownEncoding(label.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Whatwg(encoding) => encoding.name(),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Latin1 => Some(decode_latin1(bytes)),
            TextEncoding::Whatwg(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|content| content.into_owned()),
        }
    }
}

/// ISO-8859-1 maps every byte to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parses every physical record, keeping blank lines as empty rows.
pub fn parse_table(content: &str) -> Result<Table> {
    split_records(content).into_iter().map(parse_record).collect()
}

fn parse_record(record: &str) -> Result<Vec<String>> {
    if record.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_reader(record.as_bytes());

    match reader.records().next() {
        Some(result) => Ok(result?.iter().map(|s| s.to_string()).collect()),
        None => Ok(Vec::new()),
    }
}

/// Splits on line terminators (`\n`, `\r\n`, `\r`) outside quoted fields.
/// A quote only opens a quoted field at the start of a field, and `""` inside
/// one is an escaped quote.
fn split_records(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut field_start = true;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == b'"' {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
        } else if b == b'\r' || b == b'\n' {
            records.push(&content[start..i]);
            if b == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                i += 1;
            }
            start = i + 1;
            field_start = true;
        } else {
            if b == b'"' && field_start {
                in_quotes = true;
            }
            field_start = b == FIELD_DELIMITER;
        }
        i += 1;
    }

    if start < bytes.len() {
        records.push(&content[start..]);
    }
    records
}

pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_table_handles_quoted_delimiters() {
        let rows = parse_table("Hello;\"World;Test\"\nHELLO;world").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["Hello".to_string(), "World;Test".to_string()],
                vec!["HELLO".to_string(), "world".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_table_keeps_empty_and_multiline_fields() {
        let rows = parse_table("Hello;\nWorld;\"\"\n\"a\nb\";\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(rows[0], vec!["Hello", ""]);
        assert_eq!(rows[1], vec!["World", ""]);
        assert_eq!(rows[2], vec!["a\nb", "say \"hi\""]);
    }

    #[test]
    fn test_parse_table_keeps_blank_rows() {
        let rows = parse_table("\"a\"\n\n\"b\"\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["a"]);
        assert!(rows[1].is_empty());
        assert_eq!(rows[2], vec!["b"]);

        let rows = parse_table("\r\n\"x\ny\";\"\"\"\"\r\n\r\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec!["x\ny", "\""]);
        assert!(rows[2].is_empty());
    }

    #[test]
    fn test_split_records_respects_quotes() {
        assert_eq!(
            split_records("\"a\r\nb\";c\rd\n\ne\"f\ng"),
            vec!["\"a\r\nb\";c", "d", "", "e\"f", "g"]
        );
        assert!(split_records("").is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = TableReader::new("/nonexistent/input.csv")
            .read_table()
            .unwrap_err();
        assert!(matches!(err, TextMapperError::FileNotFound(_)));
    }

    #[test]
    fn test_latin1_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::write(&path, b"\"caf\xe9\";\"na\xefve\"\n").unwrap();

        let rows = TableReader::new(&path)
            .with_latin1_fallback(true)
            .read_table()
            .unwrap();
        assert_eq!(rows, vec![vec!["café".to_string(), "naïve".to_string()]]);
    }

    #[test]
    fn test_decode_error_without_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::write(&path, b"\"caf\xe9\"\n").unwrap();

        let err = TableReader::new(&path).read_table().unwrap_err();
        assert!(matches!(err, TextMapperError::Decode { .. }));
    }

    #[test]
    fn test_explicit_encoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cp1252.csv");
        std::fs::write(&path, b"\"\x80 price\"\n").unwrap();

        let rows = TableReader::new(&path)
            .with_encoding("windows-1252")
            .read_table()
            .unwrap();
        assert_eq!(rows[0][0], "€ price");
    }

    #[test]
    fn test_latin1_aliases() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.csv");
        std::fs::write(&path, b"\"caf\xe9\";\"\x80\"\n").unwrap();

        for label in ["latin-1", "latin_1", "ISO-8859-1", "l1"] {
            let rows = TableReader::new(&path).with_encoding(label).read_table().unwrap();
            assert_eq!(rows, vec![vec!["café".to_string(), "\u{80}".to_string()]]);
        }
    }

    #[test]
    fn test_underscore_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "\"é\"\n").unwrap();

        let rows = TableReader::new(&path).with_encoding("utf_8").read_table().unwrap();
        assert_eq!(rows[0][0], "é");
    }

    #[test]
    fn test_unknown_encoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "\"a\"\n").unwrap();

        let err = TableReader::new(&path)
            .with_encoding("klingon")
            .read_table()
            .unwrap_err();
        assert!(matches!(err, TextMapperError::UnknownEncoding(_)));
    }
}
