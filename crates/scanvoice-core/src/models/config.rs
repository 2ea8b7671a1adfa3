//! Configuration structures for the scanvoice pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the scanvoice pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanvoiceConfig {
    /// PDF rasterization configuration.
    pub pdf: PdfConfig,

    /// Text recognition configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Input, scratch and output locations.
    pub paths: PathsConfig,
}

/// Which rasterizer turns a PDF into page images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterizerKind {
    /// Pull the scanned page images embedded in the PDF (lopdf).
    Embedded,
    /// Render pages with poppler's `pdftoppm`.
    Pdftoppm,
}

/// Which engine recognizes text on page images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrEngineKind {
    /// The `tesseract` command line tool.
    Tesseract,
    /// PaddleOCR models through pure-onnx-ocr (requires the `onnx` feature).
    Onnx,
}

/// PDF rasterization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Rasterizer implementation.
    pub rasterizer: RasterizerKind,

    /// DPI for rendering PDF pages to images (pdftoppm only).
    pub render_dpi: u32,

    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            rasterizer: RasterizerKind::Embedded,
            render_dpi: 300,
            max_pages: 0,
        }
    }
}

/// Text recognition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition engine.
    pub engine: OcrEngineKind,

    /// Tesseract language code.
    pub language: String,

    /// Tesseract page segmentation mode.
    pub page_segmentation_mode: u8,

    /// Tesseract executable name or path.
    pub tesseract_binary: String,

    /// Directory containing ONNX model files.
    pub model_dir: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: OcrEngineKind::Tesseract,
            language: "eng".to_string(),
            page_segmentation_mode: 3,
            tesseract_binary: "tesseract".to_string(),
            model_dir: PathBuf::from("models"),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Guess the vendor from frequent company-like tokens when no rule matches.
    pub vendor_fallback: bool,

    /// Absolute tolerance for the qty * unit price = net amount check.
    pub net_amount_tolerance: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendor_fallback: true,
            net_amount_tolerance: 0.01,
        }
    }
}

/// Input, scratch and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for PDFs in batch mode.
    pub input_dir: PathBuf,

    /// Root of the per-document scratch namespaces.
    pub scratch_dir: PathBuf,

    /// Directory receiving CSV output.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("invoices"),
            scratch_dir: std::env::temp_dir().join("scanvoice"),
            output_dir: PathBuf::from("csv"),
        }
    }
}

impl ScanvoiceConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
