/// Sub-value delimiter inside a single cell.
pub const SUB_VALUE_DELIMITER: char = ';';
pub const SUB_VALUE_SEPARATOR: &str = ";";

/// Dedup key for a fragment: lowercased, whitespace runs collapsed, trimmed.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a cell on `;`, trims each part and drops the empty ones.
pub fn split_fragments(cell: &str) -> Vec<&str> {
    cell.split(SUB_VALUE_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}
