use crate::csv_processor::{write_quoted_table, Table, TableReader};
use crate::mapping::{is_blank, split_fragments, write_mapping, TextMapping, SUB_VALUE_SEPARATOR};
use crate::utils::{MissingIdPolicy, Result, TextMapperError};
use std::path::Path;

/// Mapping plus the numbered table built from one scan of a source table.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub mapping: TextMapping,
    pub numbered: Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionReport {
    pub rows: usize,
    pub unique_texts: usize,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    missing_ids: MissingIdPolicy,
    latin1_fallback: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(MissingIdPolicy::default())
    }
}

impl Extractor {
    pub fn new(missing_ids: MissingIdPolicy) -> Self {
        Self {
            missing_ids,
            latin1_fallback: true,
        }
    }

    pub fn with_latin1_fallback(mut self, enabled: bool) -> Self {
        self.latin1_fallback = enabled;
        self
    }

    pub fn extract(&self, rows: &[Vec<String>]) -> Result<Extraction> {
        let mapping = TextMapping::from_rows(rows);
        let numbered = number_table(rows, &mapping, self.missing_ids)?;
        Ok(Extraction { mapping, numbered })
    }

    /// Reads `input`, then writes the mapping file and the numbered table.
    /// Nothing is written if reading or numbering fails.
    pub fn extract_file(
        &self,
        input: impl AsRef<Path>,
        mapping_out: impl AsRef<Path>,
        numbered_out: impl AsRef<Path>,
        encoding: &str,
    ) -> Result<ExtractionReport> {
        let rows = TableReader::new(input.as_ref())
            .with_encoding(encoding)
            .with_latin1_fallback(self.latin1_fallback)
            .read_table()?;
        tracing::debug!("Read {} rows from {}", rows.len(), input.as_ref().display());

        let extraction = self.extract(&rows)?;

        write_mapping(mapping_out.as_ref(), &extraction.mapping)?;
        write_quoted_table(numbered_out.as_ref(), &extraction.numbered)?;

        let report = ExtractionReport {
            rows: extraction.numbered.len(),
            unique_texts: extraction.mapping.len(),
        };
        tracing::info!(
            "Extracted {} unique texts from {} rows into {}",
            report.unique_texts,
            report.rows,
            mapping_out.as_ref().display()
        );
        Ok(report)
    }
}

/// Replaces each cell by the `;`-joined `[id]` tokens of its fragments.
pub fn number_table(
    rows: &[Vec<String>],
    mapping: &TextMapping,
    missing_ids: MissingIdPolicy,
) -> Result<Table> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| number_cell(cell, mapping, missing_ids))
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

pub fn number_cell(cell: &str, mapping: &TextMapping, missing_ids: MissingIdPolicy) -> Result<String> {
    if is_blank(cell) {
        return Ok(String::new());
    }

    let mut ids = Vec::new();
    for fragment in split_fragments(cell) {
        match mapping.id_for(fragment) {
            Some(id) => ids.push(format!("[{}]", id)),
            None if missing_ids.is_strict() => {
                return Err(TextMapperError::UnmappedFragment(fragment.to_string()));
            }
            None => tracing::debug!("Dropping unmapped fragment {:?}", fragment),
        }
    }
    Ok(ids.join(SUB_VALUE_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_extract_numbers_cells() {
        let rows = table(&[&["Hello", "World;Test"], &["HELLO", "world"]]);
        let extraction = Extractor::default().extract(&rows).unwrap();

        assert_eq!(extraction.mapping.len(), 3);
        assert_eq!(
            extraction.numbered,
            table(&[&["[1]", "[2];[3]"], &["[1]", "[2]"]])
        );
    }

    #[test]
    fn test_extract_empty_cells() {
        let rows = table(&[&["Hello", ""], &["World", "   "], &[" ; ", "x"]]);
        let extraction = Extractor::default().extract(&rows).unwrap();

        assert_eq!(
            extraction.numbered,
            table(&[&["[1]", ""], &["[2]", ""], &["", "[3]"]])
        );
    }

    #[test]
    fn test_numbering_drops_unmapped_fragments() {
        let mapping = TextMapping::from_rows(&[vec!["known"]]);
        let numbered = number_cell("Known;unknown", &mapping, MissingIdPolicy::PassThrough).unwrap();
        assert_eq!(numbered, "[1]");
    }

    #[test]
    fn test_numbering_fails_on_unmapped_fragment_when_strict() {
        let mapping = TextMapping::from_rows(&[vec!["known"]]);
        let err = number_cell("known; unknown", &mapping, MissingIdPolicy::Fail).unwrap_err();
        assert!(matches!(err, TextMapperError::UnmappedFragment(f) if f == "unknown"));
    }

    #[test]
    fn test_strict_extract_never_misses() {
        let rows = table(&[&["A;b", "B;a"], &["c"]]);
        let extraction = Extractor::new(MissingIdPolicy::Fail).extract(&rows).unwrap();
        assert_eq!(extraction.numbered, table(&[&["[1];[2]", "[2];[1]"], &["[3]"]]));
    }
}
