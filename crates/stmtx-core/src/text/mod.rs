//! First-page text acquisition with OCR fallback.

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{OcrError, Result};
use crate::models::config::PdfConfig;
use crate::ocr::OcrBackend;
use crate::pdf::{PdfExtractor, PdfProcessor};

const FIRST_PAGE: u32 = 1;

/// Produces the raw text of a statement's first page.
///
/// Direct text extraction is tried first. When it yields too little text
/// and OCR is allowed, the page image is run through the configured
/// [`OcrBackend`]. Without a backend no OCR is attempted.
pub struct TextExtractor {
    config: PdfConfig,
    ocr: Option<Box<dyn OcrBackend>>,
}

impl TextExtractor {
    /// Create an extractor without OCR support.
    pub fn new(config: PdfConfig) -> Self {
        Self { config, ocr: None }
    }

    /// Attach an OCR backend.
    pub fn with_ocr(mut self, backend: Box<dyn OcrBackend>) -> Self {
        self.ocr = Some(backend);
        self
    }

    /// Whether an OCR backend is configured.
    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    /// Text of the first page of the PDF at `path`.
    ///
    /// Never fails: unreadable files yield an empty string.
    pub fn first_page_text_from_file(&self, path: &Path, allow_ocr: bool) -> String {
        info!("Processing '{}'", path.display());

        match PdfExtractor::open(path) {
            Ok(extractor) => self.first_page_text(&extractor, allow_ocr),
            Err(e) => {
                warn!("Could not open PDF: {}", e);
                String::new()
            }
        }
    }

    /// Text of the first page of a loaded PDF.
    pub fn first_page_text(&self, pdf: &dyn PdfProcessor, allow_ocr: bool) -> String {
        let direct = match pdf.extract_page_text(FIRST_PAGE) {
            Ok(text) => text,
            Err(e) => {
                warn!("Direct extraction error: {}", e);
                String::new()
            }
        };

        let direct_len = direct.trim().chars().count();
        if direct_len > self.config.min_direct_text_len {
            return direct;
        }
        info!("Direct extraction returned little or no text ({} chars)", direct_len);

        if !(allow_ocr && self.config.ocr_fallback) {
            return direct;
        }

        match self.ocr_page(pdf) {
            Ok(text) if text.trim().chars().count() > self.config.min_ocr_text_len => text,
            Ok(text) => {
                debug!(
                    "OCR text too short ({} chars), keeping direct text",
                    text.trim().chars().count()
                );
                direct
            }
            Err(OcrError::Unavailable) => {
                warn!("OCR fallback requested but no OCR engine is configured");
                direct
            }
            Err(e) => {
                warn!("OCR fallback failed: {}", e);
                direct
            }
        }
    }

    fn ocr_page(&self, pdf: &dyn PdfProcessor) -> std::result::Result<String, OcrError> {
        let backend = self.ocr.as_ref().ok_or(OcrError::Unavailable)?;
        info!("Attempting OCR fallback");

        let image = pdf
            .render_page(FIRST_PAGE)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        Ok(backend.recognize(&image)?.text)
    }

    /// OCR an image file directly.
    pub fn image_text(&self, image: &DynamicImage) -> Result<String> {
        let backend = self.ocr.as_ref().ok_or(OcrError::Unavailable)?;
        Ok(backend.recognize(image)?.text)
    }

    /// Open and OCR an image file.
    pub fn image_file_text(&self, path: &Path) -> Result<String> {
        let image = image::open(path)?;
        self.image_text(&image)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(PdfConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PdfError, StmtxError};
    use crate::ocr::OcrResult;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakePdf {
        text: Option<&'static str>,
    }

    impl PdfProcessor for FakePdf {
        fn load(&mut self, _data: &[u8]) -> crate::pdf::Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            1
        }

        fn extract_page_text(&self, _page: u32) -> crate::pdf::Result<String> {
            self.text
                .map(str::to_string)
                .ok_or_else(|| PdfError::TextExtraction("broken stream".to_string()))
        }

        fn render_page(&self, _page: u32) -> crate::pdf::Result<DynamicImage> {
            Ok(DynamicImage::new_luma8(4, 4))
        }
    }

    struct FakeOcr {
        text: &'static str,
        calls: Rc<Cell<usize>>,
    }

    impl OcrBackend for FakeOcr {
        fn recognize(&self, _image: &DynamicImage) -> crate::ocr::Result<OcrResult> {
            self.calls.set(self.calls.get() + 1);
            Ok(OcrResult {
                boxes: Vec::new(),
                text: self.text.to_string(),
                processing_time_ms: 0,
                image_size: (4, 4),
            })
        }
    }

    const LONG_TEXT: &str = "Credit Card Statement\nStatement Date 18/02/2024\nTotal Due 1,200.00";
    const OCR_TEXT: &str = "Name: PRIYA NAIR\nPayment Due Date 08/03/2024";

    fn with_fake_ocr(text: &'static str) -> (TextExtractor, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let extractor = TextExtractor::default().with_ocr(Box::new(FakeOcr {
            text,
            calls: Rc::clone(&calls),
        }));
        (extractor, calls)
    }

    #[test]
    fn test_long_direct_text_skips_ocr() {
        let (extractor, calls) = with_fake_ocr(OCR_TEXT);
        let pdf = FakePdf { text: Some(LONG_TEXT) };

        assert_eq!(extractor.first_page_text(&pdf, true), LONG_TEXT);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_short_direct_text_uses_ocr() {
        let (extractor, calls) = with_fake_ocr(OCR_TEXT);
        let pdf = FakePdf { text: Some("   \n  ") };

        assert_eq!(extractor.first_page_text(&pdf, true), OCR_TEXT);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_direct_error_falls_back_to_ocr() {
        let (extractor, _) = with_fake_ocr(OCR_TEXT);
        let pdf = FakePdf { text: None };

        assert_eq!(extractor.first_page_text(&pdf, true), OCR_TEXT);
    }

    #[test]
    fn test_short_ocr_text_is_discarded() {
        let (extractor, calls) = with_fake_ocr("  too short  ");
        let pdf = FakePdf { text: Some("Page 1") };

        assert_eq!(extractor.first_page_text(&pdf, true), "Page 1");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_ocr_not_allowed() {
        let (extractor, calls) = with_fake_ocr(OCR_TEXT);
        let pdf = FakePdf { text: Some("Page 1") };

        assert_eq!(extractor.first_page_text(&pdf, false), "Page 1");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_ocr_disabled_in_config() {
        let calls = Rc::new(Cell::new(0));
        let config = PdfConfig {
            ocr_fallback: false,
            ..Default::default()
        };
        let extractor = TextExtractor::new(config).with_ocr(Box::new(FakeOcr {
            text: OCR_TEXT,
            calls: Rc::clone(&calls),
        }));

        assert_eq!(extractor.first_page_text(&FakePdf { text: None }, true), "");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_without_backend_returns_direct_text() {
        let extractor = TextExtractor::default();
        assert!(!extractor.has_ocr());
        assert_eq!(extractor.first_page_text(&FakePdf { text: Some("x") }, true), "x");
    }

    #[test]
    fn test_missing_file_yields_empty_text() {
        let extractor = TextExtractor::default();
        let text = extractor.first_page_text_from_file(Path::new("/nonexistent/statement.pdf"), true);
        assert_eq!(text, "");
    }

    #[test]
    fn test_image_text_requires_backend() {
        let extractor = TextExtractor::default();
        let err = extractor.image_text(&DynamicImage::new_luma8(2, 2)).unwrap_err();
        assert!(matches!(err, StmtxError::Ocr(OcrError::Unavailable)));

        let (extractor, _) = with_fake_ocr(OCR_TEXT);
        assert_eq!(extractor.image_text(&DynamicImage::new_luma8(2, 2)).unwrap(), OCR_TEXT);
    }
}
