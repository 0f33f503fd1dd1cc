use crate::csv_processor::reader::FIELD_DELIMITER;
use crate::utils::Result;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes every field quoted through the `csv` writer, CRLF-terminated.
/// An empty row becomes a blank line.
pub fn write_quoted_table(path: impl AsRef<Path>, rows: &[Vec<String>]) -> Result<usize> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);

    for row in rows {
        if row.is_empty() {
            writer.write_all(b"\r\n")?;
            continue;
        }
        let mut record = WriterBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());
        record.write_record(row)?;
        let bytes = record.into_inner().map_err(|e| e.into_error())?;
        writer.write_all(&bytes)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Writes every field quoted by hand so carriage returns inside fields reach
/// the file untouched. Rows end with a bare `\n`.
pub fn write_raw_quoted_table(path: impl AsRef<Path>, rows: &[Vec<String>]) -> Result<usize> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let delimiter = char::from(FIELD_DELIMITER).to_string();
    let delimiter = delimiter.as_str();

    for row in rows {
        let line = row
            .iter()
            .map(|field| quote_field(field))
            .collect::<Vec<_>>()
            .join(delimiter);
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(rows.len())
}

pub fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
