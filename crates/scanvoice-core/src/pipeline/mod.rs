//! Document processing pipeline and batch orchestration.

mod batch;
mod document;
mod scratch;

pub use batch::{BatchEvent, BatchOrchestrator, BatchResult, SummaryRow};
pub use document::DocumentPipeline;
pub use scratch::ScratchSpace;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::error::{FailureKind, ScanvoiceError};
use crate::models::record::FieldRecord;

/// Processing stages of a document, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Pending,
    Rasterizing,
    Recognizing,
    Aggregating,
    Extracting,
    Validating,
    Serializing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Pending => "pending",
            Stage::Rasterizing => "rasterizing",
            Stage::Recognizing => "recognizing",
            Stage::Aggregating => "aggregating",
            Stage::Extracting => "extracting",
            Stage::Validating => "validating",
            Stage::Serializing => "serializing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// A successfully processed document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutput {
    pub document: PathBuf,
    pub csv_path: PathBuf,
    pub record: FieldRecord,
    /// Validation warnings; never part of the CSV.
    pub warnings: Vec<String>,
    pub page_count: usize,
    pub processing_time_ms: u64,
}

/// A document that failed, with the stage it was in.
#[derive(Debug, Error)]
#[error("{} failed while {stage}: {error}", .document.display())]
pub struct DocumentFailure {
    pub document: PathBuf,
    pub stage: Stage,
    #[source]
    pub error: ScanvoiceError,
}

impl DocumentFailure {
    pub fn new(document: &Path, stage: Stage, error: ScanvoiceError) -> Self {
        Self {
            document: document.to_path_buf(),
            stage,
            error,
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.error.kind()
    }
}

/// Attach the current stage to a failed step.
pub(crate) trait AtStage<T> {
    fn at(self, stage: Stage, document: &Path) -> Result<T, DocumentFailure>;
}

impl<T, E: Into<ScanvoiceError>> AtStage<T> for Result<T, E> {
    fn at(self, stage: Stage, document: &Path) -> Result<T, DocumentFailure> {
        self.map_err(|e| DocumentFailure::new(document, stage, e.into()))
    }
}
