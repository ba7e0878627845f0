//! Core library for credit-card statement datapoint extraction.
//!
//! This crate provides:
//! - First-page PDF text extraction with an optional OCR fallback
//! - Heuristic extraction of cardholder name, statement date, payment due
//!   date, total amount due and masked card last-4 digits
//! - A candidate pool of every date-like and amount-like substring

pub mod error;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod statement;
pub mod text;

pub use error::{OcrError, PdfError, Result, StmtxError};
pub use models::config::StmtxConfig;
pub use models::statement::{Candidates, ExtractionResult};
pub use ocr::{OcrBackend, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use statement::{extract_datapoints, StatementExtractor};
pub use text::TextExtractor;
