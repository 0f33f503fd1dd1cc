use crate::mapping::memory::TextMapping;
use crate::utils::Result;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Separator between the lines of a multi-line mapping entry.
pub const LINE_BREAK: &str = "\n";

/// Writes `[<id>] <original_text>` lines in ascending identifier order.
pub fn write_mapping(path: impl AsRef<Path>, mapping: &TextMapping) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for entry in mapping.entries() {
        writeln!(writer, "[{}] {}", entry.id, entry.original)?;
    }
    writer.flush()?;
    Ok(())
}

/// How a mapping file is split into entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Lines that do not open a new `[id]` entry continue the previous one.
    #[default]
    Lenient,
    /// One entry per line; anything else is skipped.
    Strict,
}

/// Identifier token to replacement text, as edited outside this tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedMapping {
    texts: HashMap<String, String>,
}

impl TranslatedMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(content: &str, mode: ParseMode) -> Self {
        match mode {
            ParseMode::Lenient => parse_lenient(content),
            ParseMode::Strict => parse_strict(content),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(id.into(), text.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslatedMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (id, text) in iter {
            mapping.insert(id, text);
        }
        mapping
    }
}

pub(crate) fn strip_brackets(token: &str) -> &str {
    token.trim_matches(|c| c == '[' || c == ']')
}

pub(crate) fn is_bracketed(token: &str) -> bool {
    token.len() > 2 && token.starts_with('[') && token.ends_with(']')
}

/// Removes one layer of surrounding double quotes.
fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Entry being accumulated. A bare `[N]` header starts with no lines.
struct OpenEntry {
    id: String,
    lines: Vec<String>,
}

impl OpenEntry {
    fn close_into(self, texts: &mut HashMap<String, String>) {
        if self.lines.is_empty() {
            tracing::debug!("Mapping entry [{}] has no text, leaving it unmapped", self.id);
            return;
        }
        texts.insert(self.id, self.lines.join(LINE_BREAK));
    }
}

fn parse_lenient(content: &str) -> TranslatedMapping {
    let mut texts = HashMap::new();
    let mut current: Option<OpenEntry> = None;

    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            if let Some(entry) = current.take() {
                entry.close_into(&mut texts);
            }
            current = Some(match trimmed.split_once(' ') {
                Some((token, text)) => OpenEntry {
                    id: strip_brackets(token).to_string(),
                    lines: vec![strip_quotes(text.trim()).to_string()],
                },
                None => OpenEntry {
                    id: strip_brackets(trimmed).to_string(),
                    lines: Vec::new(),
                },
            });
        } else if let Some(entry) = current.as_mut() {
            entry.lines.push(line.to_string());
        } else {
            tracing::debug!("Ignoring line {} before the first mapping entry", line_no + 1);
        }
    }

    if let Some(entry) = current.take() {
        entry.close_into(&mut texts);
    }

    TranslatedMapping { texts }
}

fn parse_strict(content: &str) -> TranslatedMapping {
    let mut texts = HashMap::new();

    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.split_once(' ') {
            Some((token, text)) if is_bracketed(token) => {
                texts.insert(
                    strip_brackets(token).to_string(),
                    strip_quotes(text.trim()).to_string(),
                );
            }
            _ => {
                tracing::warn!("Skipping malformed mapping line {}: {}", line_no + 1, trimmed);
            }
        }
    }

    TranslatedMapping { texts }
}
