pub mod config;
pub mod errors;

pub use config::{AppConfig, ExtractConfig, LoggingConfig, ReconstructConfig};
pub use errors::{MissingIdPolicy, Result, TextMapperError};

/// Keeps spreadsheets from evaluating the text as a formula and turns line
/// feeds into the carriage returns Excel expects inside a quoted field.
pub fn clean_text_for_excel(value: &str) -> String {
    let value = if value.starts_with('=') {
        format!("'{}", value)
    } else {
        value.to_string()
    };
    value.replace('\n', "\r")
}
