//! Error types for the scanvoice-core library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the scanvoice library.
#[derive(Error, Debug)]
pub enum ScanvoiceError {
    /// The source PDF is missing, corrupt, or could not be rasterized.
    #[error("source unreadable ({}): {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: PdfError,
    },

    /// Rasterization succeeded but produced no page images.
    #[error("no pages produced from {}", .path.display())]
    NoPagesProduced { path: PathBuf },

    /// The text recognizer could not be invoked for a page.
    #[error("recognition failed on page {page}: {source}")]
    RecognitionIo {
        page: usize,
        #[source]
        source: OcrError,
    },

    /// Another document in the same batch already claimed this output name.
    #[error("{} maps to the same output as {}", .path.display(), .other.display())]
    NameCollision { path: PathBuf, other: PathBuf },

    /// Writing the CSV record failed.
    #[error("failed to write CSV output: {0}")]
    SerializationIo(#[from] csv::Error),

    /// Preparing or cleaning the scratch namespace failed.
    #[error("scratch space error: {0}")]
    Scratch(#[source] std::io::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure classes reported for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    SourceUnreadable,
    NoPagesProduced,
    RecognitionIoFailure,
    SerializationIoFailure,
    NameCollision,
    Environment,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::SourceUnreadable => "source unreadable",
            FailureKind::NoPagesProduced => "no pages produced",
            FailureKind::RecognitionIoFailure => "recognition I/O failure",
            FailureKind::SerializationIoFailure => "serialization I/O failure",
            FailureKind::NameCollision => "name collision",
            FailureKind::Environment => "environment",
        };
        f.write_str(name)
    }
}

impl ScanvoiceError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ScanvoiceError::SourceUnreadable { .. } => FailureKind::SourceUnreadable,
            ScanvoiceError::NoPagesProduced { .. } => FailureKind::NoPagesProduced,
            ScanvoiceError::RecognitionIo { .. } => FailureKind::RecognitionIoFailure,
            ScanvoiceError::SerializationIo(_) => FailureKind::SerializationIoFailure,
            ScanvoiceError::NameCollision { .. } => FailureKind::NameCollision,
            ScanvoiceError::Scratch(_) | ScanvoiceError::Io(_) | ScanvoiceError::Config(_) => {
                FailureKind::Environment
            }
        }
    }
}

/// Errors related to PDF rasterization.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open or parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Unreadable(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// An external rasterization tool could not be run or exited with an error.
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    /// Failed to decode or write a page image.
    #[error("page image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to text recognition.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The recognition engine could not be launched.
    #[error("failed to invoke {engine}: {message}")]
    Invocation { engine: String, message: String },

    /// The engine ran but could not recognize the page.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Failed to read the page image.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the scanvoice library.
pub type Result<T> = std::result::Result<T, ScanvoiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = ScanvoiceError::NoPagesProduced {
            path: PathBuf::from("a.pdf"),
        };
        assert_eq!(err.kind(), FailureKind::NoPagesProduced);

        let err = ScanvoiceError::SourceUnreadable {
            path: PathBuf::from("b.pdf"),
            source: PdfError::Encrypted,
        };
        assert_eq!(err.kind(), FailureKind::SourceUnreadable);
        assert_eq!(err.to_string(), "source unreadable (b.pdf): PDF is encrypted");
    }
}
