//! First-page text and scan extraction using lopdf and pdf-extract.

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF extractor backed by lopdf (structure, images) and pdf-extract (text).
pub struct PdfExtractor {
    document: Option<Document>,
    /// Decrypted bytes handed to pdf-extract.
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF file from disk.
    pub fn open(path: &std::path::Path) -> crate::Result<Self> {
        let data = std::fs::read(path)?;
        let mut extractor = Self::new();
        extractor.load(&data)?;
        Ok(extractor)
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.document()?
            .get_pages()
            .get(&page)
            .copied()
            .ok_or(PdfError::InvalidPage(page))
    }

    /// All decodable images drawn on a page.
    pub fn page_images(&self, page: u32) -> Result<Vec<DynamicImage>> {
        let doc = self.document()?;
        let page_id = self.page_id(page)?;

        let Some(resources) = page_resources(doc, page_id) else {
            debug!("Page {} has no resources", page);
            return Ok(Vec::new());
        };

        let mut images = Vec::new();
        if let Ok(xobjects) = resources.get(b"XObject") {
            if let Ok((_, Object::Dictionary(xobjects))) = doc.dereference(xobjects) {
                for (name, reference) in xobjects.iter() {
                    let Ok((_, Object::Stream(stream))) = doc.dereference(reference) else {
                        continue;
                    };
                    match decode_image(doc, stream) {
                        Some(image) => images.push(image),
                        None => trace!("Skipped XObject {}", String::from_utf8_lossy(name)),
                    }
                }
            }
        }

        debug!("Decoded {} images on page {}", images.len(), page);
        Ok(images)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Statements are often "encrypted" with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        let pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let text = pages.into_iter().nth((page - 1) as usize).unwrap_or_default();
        debug!("Extracted {} chars of text from page {}", text.len(), page);
        Ok(text)
    }

    fn render_page(&self, page: u32) -> Result<DynamicImage> {
        // Scanned statements carry one full-page image; take the largest.
        self.page_images(page)?
            .into_iter()
            .max_by_key(|img| u64::from(img.width()) * u64::from(img.height()))
            .ok_or_else(|| PdfError::ImageExtraction(format!("no images on page {}", page)))
    }
}

/// Resources dictionary of a page, inherited from the page tree if needed.
fn page_resources(doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(node)) = doc.get_object(node_id) else {
        return None;
    };

    if let Ok(resources) = node.get(b"Resources") {
        if let Ok((_, Object::Dictionary(resources))) = doc.dereference(resources) {
            return Some(resources.clone());
        }
    }

    match node.get(b"Parent") {
        Ok(Object::Reference(parent_id)) => page_resources(doc, *parent_id),
        _ => None,
    }
}

/// First name in a name-or-array entry such as `Filter` or `ColorSpace`.
fn first_name<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a [u8]> {
    match object {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(items) => items.first().and_then(|o| o.as_name().ok()),
        Object::Reference(id) => doc.get_object(*id).ok().and_then(|o| o.as_name().ok()),
        _ => None,
    }
}

/// Decode an image XObject stream.
///
/// Supports JPEG (`DCTDecode`) and raw 8-bit RGB or gray samples.
fn decode_image(doc: &Document, stream: &Stream) -> Option<DynamicImage> {
    let dict = &stream.dict;
    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;
    let filter = dict.get(b"Filter").ok().and_then(|f| first_name(doc, f));

    trace!("Image XObject {}x{} filter={:?}", width, height, filter.map(String::from_utf8_lossy));

    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg).ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Unsupported image filter");
            return None;
        }
        _ => {}
    }

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        trace!("Unsupported bits per component: {}", bits);
        return None;
    }

    let samples = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|c| first_name(doc, c))
        .unwrap_or(b"DeviceRGB");

    let channels: usize = match color_space {
        b"DeviceRGB" | b"RGB" => 3,
        b"DeviceGray" | b"G" => 1,
        _ => 0,
    };
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(channels));
    let Some(expected) = expected else {
        trace!("Image dimensions {}x{} overflow", width, height);
        return None;
    };

    match channels {
        3 if samples.len() >= expected => {
            RgbImage::from_raw(width, height, samples[..expected].to_vec()).map(DynamicImage::ImageRgb8)
        }
        1 if samples.len() >= expected => {
            GrayImage::from_raw(width, height, samples[..expected].to_vec()).map(DynamicImage::ImageLuma8)
        }
        _ => {
            trace!(
                "Could not decode {} samples as {}",
                samples.len(),
                String::from_utf8_lossy(color_space)
            );
            None
        }
    }
}
