//! Page images from scanned PDFs using lopdf.
//!
//! Scanned invoices usually carry one full-page image per page. This
//! rasterizer pulls that image out instead of rendering the page.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{page_image_name, Rasterizer, Result};
use crate::error::PdfError;

/// Extracts the embedded image of each page.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedImageRasterizer {
    /// Maximum pages to extract (0 = unlimited).
    max_pages: usize,
}

impl EmbeddedImageRasterizer {
    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }

    fn load(&self, source: &Path) -> Result<Document> {
        let mut doc = Document::load(source).map_err(|e| PdfError::Unreadable(e.to_string()))?;

        // Scanners often emit PDFs encrypted with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted {} with empty password", source.display());
        }

        Ok(doc)
    }

    /// The largest decodable image drawn on a page.
    fn page_image(&self, doc: &Document, page_id: ObjectId) -> Option<DynamicImage> {
        let resources = page_resources(doc, page_id)?;
        let xobjects = resources.get(b"XObject").ok()?;
        let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) else {
            return None;
        };

        xobj_dict
            .iter()
            .filter_map(|(_, obj_ref)| doc.dereference(obj_ref).ok())
            .filter_map(|(_, obj)| decode_image(doc, obj))
            .max_by_key(|img| u64::from(img.width()) * u64::from(img.height()))
    }

    /// Every decodable image in the document, in object order.
    fn document_images(&self, doc: &Document) -> Vec<DynamicImage> {
        let images: Vec<DynamicImage> = doc
            .objects
            .values()
            .filter_map(|object| decode_image(doc, object))
            .collect();

        debug!("Found {} images in document objects", images.len());
        images
    }
}

impl Rasterizer for EmbeddedImageRasterizer {
    fn name(&self) -> &str {
        "embedded"
    }

    fn rasterize(&self, source: &Path, pages_dir: &Path) -> Result<Vec<PathBuf>> {
        let doc = self.load(source)?;
        let pages = doc.get_pages();

        let limit = match self.max_pages {
            0 => pages.len(),
            n => n.min(pages.len()),
        };

        debug!("Loaded {} with {} pages", source.display(), pages.len());

        let mut images = Vec::with_capacity(limit);
        for (&number, &page_id) in pages.iter().take(limit) {
            match self.page_image(&doc, page_id) {
                Some(img) => images.push(img),
                None => debug!("No image on page {}", number),
            }
        }

        if images.is_empty() && limit > 0 {
            debug!("No page-level images, scanning all objects");
            images = self.document_images(&doc);
            images.truncate(limit);
        }

        fs::create_dir_all(pages_dir)?;

        let mut written = Vec::with_capacity(images.len());
        for (i, img) in images.into_iter().enumerate() {
            let path = pages_dir.join(page_image_name(i + 1));
            img.save(&path)?;
            trace!("Wrote {}x{} page image {}", img.width(), img.height(), path.display());
            written.push(path);
        }

        Ok(written)
    }
}

/// Resources dictionary of a page, following `Parent` links for inherited
/// resources.
fn page_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut node_id = page_id;
    loop {
        let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
            return None;
        };

        if let Ok(resources) = dict.get(b"Resources") {
            if let Ok((_, Object::Dictionary(res_dict))) = doc.dereference(resources) {
                return Some(res_dict.clone());
            }
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => node_id = *parent_id,
            _ => return None,
        }
    }
}

fn decode_image(doc: &Document, obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;

    trace!("Found image object: {}x{}", width, height);

    if let Ok(filter) = dict.get(b"Filter") {
        let filter_name = match filter {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            _ => None,
        };

        match filter_name {
            Some(b"DCTDecode") => {
                // JPEG bytes are stored as-is
                return image::load_from_memory_with_format(
                    &stream.content,
                    image::ImageFormat::Jpeg,
                )
                .ok();
            }
            Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                trace!("Unsupported image filter");
                return None;
            }
            _ => {}
        }
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);

    decode_raw(data, width, height, color_space, bits)
}

fn decode_raw(
    mut data: Vec<u8>,
    width: u32,
    height: u32,
    color_space: &[u8],
    bits_per_component: i64,
) -> Option<DynamicImage> {
    if bits_per_component != 8 {
        trace!("Unsupported bits per component: {}", bits_per_component);
        return None;
    }

    let pixels = width as usize * height as usize;

    match color_space {
        b"DeviceRGB" | b"RGB" if data.len() >= pixels * 3 => {
            data.truncate(pixels * 3);
            RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
        }
        b"DeviceGray" | b"G" if data.len() >= pixels => {
            data.truncate(pixels);
            GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
        }
        _ => {
            trace!(
                "Could not decode image: colorspace={:?}, data_len={}",
                String::from_utf8_lossy(color_space),
                data.len()
            );
            None
        }
    }
}
