//! Pure Rust recognition using `pure-onnx-ocr` PaddleOCR models.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use super::{reading_order_text, Result, TextBox, TextRecognizer};
use crate::error::OcrError;

/// PaddleOCR detection + recognition without an external runtime.
pub struct OnnxRecognizer {
    engine: pure_onnx_ocr::engine::OcrEngine,
}

impl OnnxRecognizer {
    /// Load `det.onnx`, `latin_rec.onnx` and `latin_dict.txt` from a directory.
    pub fn from_dir(model_dir: &Path) -> Result<Self> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());
        Ok(Self { engine })
    }
}

impl TextRecognizer for OnnxRecognizer {
    fn name(&self) -> &str {
        "onnx"
    }

    fn recognize(&self, image: &Path) -> Result<String> {
        let start = Instant::now();
        let img = image::open(image).map_err(|e| {
            OcrError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
        })?;

        let results = self
            .engine
            .run_from_image(&img)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let boxes: Vec<TextBox> = results
            .iter()
            .map(|r| TextBox {
                rect: polygon_rect(&r.bounding_box),
                text: r.text.replace("[UNK]", " "),
            })
            .collect();

        debug!(
            "pure-onnx-ocr found {} text regions in {}ms",
            boxes.len(),
            start.elapsed().as_millis()
        );

        Ok(reading_order_text(boxes))
    }
}

/// Axis-aligned bounds of a detection polygon.
fn polygon_rect(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32, f32, f32) {
    polygon.exterior().coords().fold(
        (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), c| {
            let (x, y) = (c.x as f32, c.y as f32);
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        },
    )
}
