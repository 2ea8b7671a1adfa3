//! Fixed-schema CSV writer.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::record::FieldRecord;

use super::header;

/// Writes records under the 18-column header.
///
/// The header goes out once, in front of the first row. Unresolved values
/// are written as their sentinel, never as empty cells.
pub struct CsvRecordWriter<W: Write> {
    inner: csv::Writer<W>,
    header_written: bool,
    rows: usize,
}

impl<W: Write> CsvRecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
            header_written: false,
            rows: 0,
        }
    }

    /// Append one record as a row.
    pub fn write(&mut self, record: &FieldRecord) -> Result<()> {
        if !self.header_written {
            self.inner.write_record(header())?;
            self.header_written = true;
        }
        self.inner.write_record(record.values())?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.inner.into_inner().map_err(|e| {
            let io = std::io::Error::new(e.error().kind(), e.error().to_string());
            csv::Error::from(io).into()
        })
    }
}

impl CsvRecordWriter<File> {
    /// Create (or truncate) a CSV file, creating missing parent directories.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(csv::Error::from)?;
        }
        let file = File::create(path).map_err(csv::Error::from)?;
        Ok(Self::new(file))
    }
}

/// Write a single-record CSV file.
pub fn write_record_file(path: &Path, record: &FieldRecord) -> Result<()> {
    let mut writer = CsvRecordWriter::create(path)?;
    writer.write(record)?;
    writer.flush()?;
    debug!("Wrote CSV record to {}", path.display());
    Ok(())
}
