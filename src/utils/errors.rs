use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextMapperError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Could not decode {} as {encoding}", .path.display())]
    Decode { path: PathBuf, encoding: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Identifier [{0}] has no entry in the mapping")]
    UnknownIdentifier(String),

    #[error("Fragment {0:?} has no identifier in the mapping")]
    UnmappedFragment(String),
}

pub type Result<T> = std::result::Result<T, TextMapperError>;

/// What to do when a lookup misses during numbering or reconstruction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MissingIdPolicy {
    /// Numbering drops the fragment; reconstruction leaves `[N]` in place.
    #[default]
    PassThrough,
    Fail,
}

impl MissingIdPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, MissingIdPolicy::Fail)
    }
}
