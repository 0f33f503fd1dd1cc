use crate::csv_processor::{write_quoted_table, write_raw_quoted_table, Table, TableReader};
use crate::mapping::file::{is_bracketed, strip_brackets};
use crate::mapping::{ParseMode, TranslatedMapping, SUB_VALUE_DELIMITER, SUB_VALUE_SEPARATOR};
use crate::utils::{clean_text_for_excel, MissingIdPolicy, Result, TextMapperError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reconstruction strategy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReconstructMode {
    /// Multi-line mapping entries, formula guard, carriage-return line breaks,
    /// hand-quoted output.
    #[default]
    Excel,
    /// One mapping entry per line, text substituted as-is, standard quoted writer.
    Legacy,
}

impl ReconstructMode {
    pub fn parse_mode(&self) -> ParseMode {
        match self {
            ReconstructMode::Excel => ParseMode::Lenient,
            ReconstructMode::Legacy => ParseMode::Strict,
        }
    }

    fn finish_text(&self, text: &str) -> String {
        match self {
            ReconstructMode::Excel => clean_text_for_excel(text),
            ReconstructMode::Legacy => text.to_string(),
        }
    }

    fn write_table(&self, path: &Path, rows: &[Vec<String>]) -> Result<usize> {
        match self {
            ReconstructMode::Excel => write_raw_quoted_table(path, rows),
            ReconstructMode::Legacy => write_quoted_table(path, rows),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructionReport {
    pub rows: usize,
    pub mapping_entries: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    mode: ReconstructMode,
    missing_ids: MissingIdPolicy,
}

impl Reconstructor {
    pub fn new(mode: ReconstructMode, missing_ids: MissingIdPolicy) -> Self {
        Self { mode, missing_ids }
    }

    pub fn parse_mapping(&self, content: &str) -> TranslatedMapping {
        TranslatedMapping::parse(content, self.mode.parse_mode())
    }

    pub fn reconstruct(&self, rows: &[Vec<String>], mapping: &TranslatedMapping) -> Result<Table> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| self.substitute_cell(cell, mapping))
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }

    /// A cell holding `;` and `[` is a list of identifiers; anything else is
    /// looked up whole. Misses keep the original text unless the policy is strict.
    pub fn substitute_cell(&self, cell: &str, mapping: &TranslatedMapping) -> Result<String> {
        if cell.contains(SUB_VALUE_DELIMITER) && cell.contains('[') {
            let parts = cell
                .trim_matches('"')
                .split(SUB_VALUE_DELIMITER)
                .map(|part| self.substitute_part(part, mapping))
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join(SUB_VALUE_SEPARATOR))
        } else {
            self.substitute_part(cell, mapping)
        }
    }

    fn substitute_part(&self, part: &str, mapping: &TranslatedMapping) -> Result<String> {
        let id = strip_brackets(part);
        let text = match mapping.get(id) {
            Some(text) => text,
            None if self.missing_ids.is_strict() && is_bracketed(part.trim()) => {
                return Err(TextMapperError::UnknownIdentifier(id.to_string()));
            }
            None => part,
        };
        Ok(self.mode.finish_text(text))
    }

    /// Reads both inputs, then writes `output`. Nothing is written if either
    /// input is missing or a lookup fails under the strict policy.
    pub fn reconstruct_file(
        &self,
        numbered: impl AsRef<Path>,
        mapping_file: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ReconstructionReport> {
        let mapping_path = mapping_file.as_ref();
        if !mapping_path.exists() {
            return Err(TextMapperError::FileNotFound(mapping_path.to_path_buf()));
        }
        let mapping = self.parse_mapping(&std::fs::read_to_string(mapping_path)?);
        tracing::debug!(
            "Loaded {} mapping entries from {}",
            mapping.len(),
            mapping_path.display()
        );

        let rows = TableReader::new(numbered.as_ref()).read_table()?;
        let reconstructed = self.reconstruct(&rows, &mapping)?;
        let written = self.mode.write_table(output.as_ref(), &reconstructed)?;

        let report = ReconstructionReport {
            rows: written,
            mapping_entries: mapping.len(),
        };
        tracing::info!(
            "Reconstructed {} rows with {} mapping entries ({:?} mode) into {}",
            report.rows,
            report.mapping_entries,
            self.mode,
            output.as_ref().display()
        );
        Ok(report)
    }
}
