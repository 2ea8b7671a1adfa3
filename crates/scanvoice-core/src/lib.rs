//! Core library for scanned invoice processing.
//!
//! This crate provides:
//! - PDF rasterization (embedded page images via lopdf, or poppler's `pdftoppm`)
//! - OCR through pluggable text recognizers (tesseract, optional pure Rust ONNX)
//! - Page aggregation and rule-based invoice field extraction
//! - Arithmetic validation and fixed-schema CSV output
//! - Per-document pipeline and batch orchestration with isolated scratch space

pub mod error;
pub mod models;
pub mod pdf;
pub mod ocr;
pub mod text;
pub mod invoice;
pub mod output;
pub mod pipeline;

pub use error::{FailureKind, ScanvoiceError, Result};
pub use models::config::ScanvoiceConfig;
pub use models::record::{Field, FieldRecord, NOT_FOUND};
pub use pdf::{Rasterizer, EmbeddedImageRasterizer, PdftoppmRasterizer};
pub use ocr::{TextRecognizer, TesseractRecognizer};
#[cfg(feature = "onnx")]
pub use ocr::OnnxRecognizer;
pub use text::{AggregatedText, Document, Page};
pub use invoice::{FieldExtractor, FieldValidator, ValidationResult};
pub use output::CsvRecordWriter;
pub use pipeline::{
    BatchEvent, BatchOrchestrator, BatchResult, DocumentFailure, DocumentOutput,
    DocumentPipeline, ScratchSpace, Stage, SummaryRow,
};
