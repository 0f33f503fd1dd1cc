pub mod reader;
pub mod writer;

pub use reader::{decode_latin1, file_exists, parse_table, Table, TableReader, FIELD_DELIMITER};
pub use writer::{quote_field, write_quoted_table, write_raw_quoted_table};
