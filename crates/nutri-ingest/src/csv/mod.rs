//! CSV table reading and writing.

mod reader;
mod writer;

pub use reader::{CsvLoad, CsvReadOptions, NULL_TOKENS, read_csv_table};
pub use writer::{write_csv, write_csv_table};
