pub mod file;
pub mod memory;
pub mod normalize;

pub use file::{write_mapping, ParseMode, TranslatedMapping, LINE_BREAK};
pub use memory::{MappingEntry, TextMapping};
pub use normalize::{is_blank, normalize_text, split_fragments, SUB_VALUE_DELIMITER, SUB_VALUE_SEPARATOR};
