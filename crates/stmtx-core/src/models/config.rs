//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StmtxError};

/// Main configuration for the stmtx pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StmtxConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Datapoint extraction configuration.
    pub extraction: ExtractionConfig,

    /// OCR model configuration.
    pub models: ModelConfig,
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Fall back to OCR when direct extraction yields too little text.
    pub ocr_fallback: bool,

    /// Direct text is accepted when its trimmed length exceeds this.
    pub min_direct_text_len: usize,

    /// OCR text is accepted when its trimmed length exceeds this.
    pub min_ocr_text_len: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            ocr_fallback: true,
            min_direct_text_len: 40,
            min_ocr_text_len: 20,
        }
    }
}

/// Heuristic search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters searched for an amount after a "total due" keyword.
    pub amount_window: usize,

    /// Characters searched by the looser "total ... due" fallback.
    pub fallback_amount_window: usize,

    /// Characters searched for a date after a due/statement date label.
    pub label_window: usize,

    /// Leading lines scanned for a name-like line.
    pub name_scan_lines: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            amount_window: 200,
            fallback_amount_window: 300,
            label_window: 140,
            name_scan_lines: 12,
        }
    }
}

/// OCR model file names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl ModelConfig {
    /// Whether every model file exists under `model_dir`.
    pub fn is_available(&self) -> bool {
        [&self.detection_model, &self.recognition_model, &self.dictionary]
            .iter()
            .all(|name| self.model_dir.join(name).exists())
    }
}

impl StmtxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| StmtxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StmtxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }
}
