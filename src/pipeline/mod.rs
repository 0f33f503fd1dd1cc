pub mod extractor;
pub mod reconstructor;

pub use extractor::{number_cell, number_table, Extraction, ExtractionReport, Extractor};
pub use reconstructor::{ReconstructMode, ReconstructionReport, Reconstructor};
