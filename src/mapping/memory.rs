use crate::mapping::normalize::{normalize_text, split_fragments};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub id: u32,
    /// First spelling seen for the normalized key.
    pub original: String,
}

/// Append-only table of unique texts keyed by their normalized form.
///
/// Identifiers start at 1 and follow first-encounter order. Once a key has an
/// identifier neither the identifier nor the stored spelling changes.
#[derive(Debug, Clone, Default)]
pub struct TextMapping {
    entries: Vec<MappingEntry>,
    index: HashMap<String, usize>,
}

impl TextMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans rows, cells and fragments in order and assigns identifiers.
    pub fn from_rows<T: AsRef<str>>(rows: &[Vec<T>]) -> Self {
        let mut mapping = Self::new();
        for row in rows {
            for cell in row {
                for fragment in split_fragments(cell.as_ref()) {
                    mapping.observe(fragment);
                }
            }
        }
        mapping
    }

    /// Returns the identifier for the fragment, assigning the next one if the
    /// normalized key is new.
    pub fn observe(&mut self, fragment: &str) -> u32 {
        let key = normalize_text(fragment);
        if let Some(&pos) = self.index.get(&key) {
            return self.entries[pos].id;
        }

        let id = self.entries.len() as u32 + 1;
        self.index.insert(key, self.entries.len());
        self.entries.push(MappingEntry {
            id,
            original: fragment.to_string(),
        });
        id
    }

    pub fn id_for(&self, fragment: &str) -> Option<u32> {
        self.index
            .get(&normalize_text(fragment))
            .map(|&pos| self.entries[pos].id)
    }

    pub fn get(&self, id: u32) -> Option<&MappingEntry> {
        let pos = usize::try_from(id).ok()?.checked_sub(1)?;
        self.entries.get(pos)
    }

    /// Entries in ascending identifier order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
