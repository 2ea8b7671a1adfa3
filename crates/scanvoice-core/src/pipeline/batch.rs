//! Batch processing of every PDF in a directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{DocumentFailure, DocumentOutput, DocumentPipeline, Stage};
use crate::error::ScanvoiceError;

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// Document `index` (0-based) of `total` is about to be processed.
    Started {
        document: &'a Path,
        index: usize,
        total: usize,
    },
    /// The document finished, successfully or not.
    Finished {
        document: &'a Path,
        outcome: Result<&'a DocumentOutput, &'a DocumentFailure>,
    },
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Number of candidate documents found.
    pub discovered: usize,
    pub succeeded: Vec<DocumentOutput>,
    pub failed: Vec<DocumentFailure>,
}

impl BatchResult {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// One summary row per document, successes first.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let ok = self.succeeded.iter().map(|o| SummaryRow {
            document: o.document.display().to_string(),
            status: "success",
            stage: Stage::Done.to_string(),
            output: o.csv_path.display().to_string(),
            error: String::new(),
            processing_time_ms: o.processing_time_ms,
        });
        let failed = self.failed.iter().map(|f| SummaryRow {
            document: f.document.display().to_string(),
            status: "failed",
            stage: f.stage.to_string(),
            output: String::new(),
            error: f.error.to_string(),
            processing_time_ms: 0,
        });
        ok.chain(failed).collect()
    }
}

/// A row of the batch summary CSV.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub document: String,
    pub status: &'static str,
    pub stage: String,
    pub output: String,
    pub error: String,
    pub processing_time_ms: u64,
}

/// Runs a [`DocumentPipeline`] over many documents, one at a time.
///
/// A failing document is recorded and the batch moves on.
pub struct BatchOrchestrator {
    pipeline: DocumentPipeline,
}

impl BatchOrchestrator {
    pub fn new(pipeline: DocumentPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &DocumentPipeline {
        &self.pipeline
    }

    /// PDFs directly inside `dir` (extension matched case-insensitively),
    /// sorted by path. A missing directory has no documents.
    pub fn discover(dir: &Path) -> crate::Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            debug!("Input directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }

        let pattern = glob::Pattern::escape(&dir.to_string_lossy()) + "/*.pdf";
        debug!("Discovering documents with {}", pattern);

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        let mut documents: Vec<PathBuf> = glob_with(&pattern, options)
            .map_err(|e| ScanvoiceError::Config(format!("invalid input directory: {}", e)))?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();

        documents.sort();
        Ok(documents)
    }

    /// Process every PDF in `dir`.
    pub fn run(&self, dir: &Path) -> crate::Result<BatchResult> {
        self.run_with_progress(dir, |_| {})
    }

    /// Process every PDF in `dir`, reporting progress through `on_event`.
    pub fn run_with_progress<F>(&self, dir: &Path, on_event: F) -> crate::Result<BatchResult>
    where
        F: FnMut(BatchEvent<'_>),
    {
        let documents = Self::discover(dir)?;
        info!("Found {} documents in {}", documents.len(), dir.display());
        Ok(self.process_all(&documents, on_event))
    }

    /// Process the given documents in order.
    ///
    /// Output and scratch names derive from the file stem, so `a.pdf` and
    /// `a.PDF` would share them. The later document fails instead of
    /// overwriting the earlier one's CSV.
    pub fn process_all<F>(&self, documents: &[PathBuf], mut on_event: F) -> BatchResult
    where
        F: FnMut(BatchEvent<'_>),
    {
        let mut result = BatchResult {
            discovered: documents.len(),
            ..Default::default()
        };

        // output path -> document that claimed it
        let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();

        for (index, document) in documents.iter().enumerate() {
            on_event(BatchEvent::Started {
                document,
                index,
                total: documents.len(),
            });

            let output_path = self.pipeline.output_path(document, None);
            if let Some(other) = claimed.get(&output_path) {
                let failure = DocumentFailure::new(
                    document,
                    Stage::Pending,
                    ScanvoiceError::NameCollision {
                        path: document.clone(),
                        other: other.to_path_buf(),
                    },
                );
                warn!("Skipping {}: {}", document.display(), failure.error);
                on_event(BatchEvent::Finished {
                    document,
                    outcome: Err(&failure),
                });
                result.failed.push(failure);
                continue;
            }
            claimed.insert(output_path, document);

            match self.pipeline.process(document, None) {
                Ok(output) => {
                    on_event(BatchEvent::Finished {
                        document,
                        outcome: Ok(&output),
                    });
                    result.succeeded.push(output);
                }
                Err(failure) => {
                    warn!("Skipping {}: {}", document.display(), failure.error);
                    on_event(BatchEvent::Finished {
                        document,
                        outcome: Err(&failure),
                    });
                    result.failed.push(failure);
                }
            }
        }

        info!(
            "Batch complete: {} discovered, {} succeeded, {} failed",
            result.discovered,
            result.success_count(),
            result.failure_count()
        );

        result
    }
}
