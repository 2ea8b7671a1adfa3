//! Text recognition on page images.
//!
//! A [`TextRecognizer`] turns one page image into plain text. The default
//! engine is the `tesseract` command line tool; a pure Rust PaddleOCR engine
//! is available behind the `onnx` feature.

mod tesseract;
#[cfg(feature = "onnx")]
mod onnx;

pub use tesseract::TesseractRecognizer;
#[cfg(feature = "onnx")]
pub use onnx::OnnxRecognizer;

use std::cmp::Ordering;
use std::path::Path;

use crate::error::OcrError;
use crate::models::config::{OcrConfig, OcrEngineKind};

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Trait for page text recognizers.
pub trait TextRecognizer {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Recognize the text of one page image.
    ///
    /// Output is best effort and may be empty or garbled. Errors are reserved
    /// for failures to run the engine or read the image; an engine that ran
    /// but recognized nothing reports [`OcrError::Recognition`].
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// Build the recognizer selected in configuration.
pub fn from_config(config: &OcrConfig) -> Result<Box<dyn TextRecognizer>> {
    match config.engine {
        OcrEngineKind::Tesseract => Ok(Box::new(TesseractRecognizer::from_config(config))),
        #[cfg(feature = "onnx")]
        OcrEngineKind::Onnx => Ok(Box::new(OnnxRecognizer::from_dir(&config.model_dir)?)),
        #[cfg(not(feature = "onnx"))]
        OcrEngineKind::Onnx => Err(OcrError::ModelLoad(
            "the onnx engine requires building with the `onnx` feature".to_string(),
        )),
    }
}

/// A recognized text region with its axis-aligned bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    /// (min_x, min_y, max_x, max_y)
    pub rect: (f32, f32, f32, f32),
    pub text: String,
}

/// Height of a reading-order row in pixels.
const ROW_HEIGHT: f32 = 20.0;

/// Sort boxes top to bottom, then left to right within a row.
pub fn sort_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by(|a, b| {
        let row_a = (a.rect.1 / ROW_HEIGHT) as i32;
        let row_b = (b.rect.1 / ROW_HEIGHT) as i32;
        row_a
            .cmp(&row_b)
            .then_with(|| a.rect.0.partial_cmp(&b.rect.0).unwrap_or(Ordering::Equal))
    });
}

/// Join boxes into page text, one box per line, in reading order.
pub fn reading_order_text(mut boxes: Vec<TextBox>) -> String {
    sort_reading_order(&mut boxes);
    boxes
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
