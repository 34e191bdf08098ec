//! CSV input: a line reader and the record interpreter built on top of it.

pub mod reader;
pub mod record;

pub use reader::{CsvReader, RawLine, DEFAULT_MAX_LINE_LENGTH};
pub use record::{interpret, parse_record, Quantity, RecordLayout, ResultShape, TestCase};
