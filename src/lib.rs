pub mod csv_processor;
pub mod mapping;
pub mod pipeline;
pub mod utils;

pub use csv_processor::{Table, TableReader};
pub use mapping::{normalize_text, ParseMode, TextMapping, TranslatedMapping};
pub use pipeline::{Extraction, Extractor, ReconstructMode, Reconstructor};
pub use utils::{AppConfig, MissingIdPolicy, Result, TextMapperError};
