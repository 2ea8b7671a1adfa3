//! CSV output of extracted records.

mod writer;

pub use writer::{write_record_file, CsvRecordWriter};

use crate::models::record::Field;

/// The fixed CSV header, in column order.
pub fn header() -> [&'static str; Field::COUNT] {
    Field::ALL.map(Field::header)
}
