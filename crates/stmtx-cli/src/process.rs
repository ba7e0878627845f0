//! Extract datapoints from a single statement file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use stmtx_core::models::config::ModelConfig;
use stmtx_core::{ExtractionResult, StatementExtractor, StmtxConfig, TextExtractor};

use crate::output::{format_result, OutputFormat};

/// Arguments for processing a statement.
#[derive(Args)]
pub struct ProcessArgs {
    /// Path to the statement (PDF, extracted text, or page image)
    #[arg(short, long, required = true)]
    file: PathBuf,

    /// Disable OCR fallback even if available
    #[arg(long)]
    no_ocr: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// OCR model directory (overrides the config file)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub async fn run(args: ProcessArgs, mut config: StmtxConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    if let Some(dir) = &args.model_dir {
        config.models.model_dir = dir.clone();
    }

    if !args.file.exists() {
        anyhow::bail!("Input file not found: {}", args.file.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Processing {}...", args.file.display()));

    let file = args.file.clone();
    let no_ocr = args.no_ocr;
    let extracted = tokio::task::spawn_blocking(move || extract_file(&file, no_ocr, &config)).await?;

    pb.finish_and_clear();
    let result = extracted?;

    let output = format_result(&result, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Obtain first-page text for `path` and extract datapoints from it.
fn extract_file(path: &Path, no_ocr: bool, config: &StmtxConfig) -> anyhow::Result<ExtractionResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text_extractor = text_extractor(config, no_ocr);

    let text = match extension.as_str() {
        "pdf" => text_extractor.first_page_text_from_file(path, !no_ocr),
        "txt" => fs::read_to_string(path)?,
        "png" | "jpg" | "jpeg" | "tiff" | "bmp" => {
            if no_ocr {
                anyhow::bail!("Image input requires OCR; remove --no-ocr");
            }
            if !text_extractor.has_ocr() {
                anyhow::bail!(
                    "OCR models not found at {}; image input requires OCR",
                    config.models.model_dir.display()
                );
            }
            text_extractor.image_file_text(path)?
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {} (even after OCR fallback)", path.display());
    }
    info!("Obtained {} chars of first-page text", text.chars().count());

    Ok(StatementExtractor::with_config(config.extraction.clone()).extract(&text))
}

fn text_extractor(config: &StmtxConfig, no_ocr: bool) -> TextExtractor {
    let extractor = TextExtractor::new(config.pdf.clone());
    if no_ocr {
        return extractor;
    }
    attach_ocr(extractor, &config.models)
}

#[cfg(feature = "native")]
fn attach_ocr(extractor: TextExtractor, models: &ModelConfig) -> TextExtractor {
    use stmtx_core::PureOcrEngine;
    use tracing::warn;

    if !models.is_available() {
        debug!("OCR models not found at {}", models.model_dir.display());
        return extractor;
    }

    match PureOcrEngine::from_config(models) {
        Ok(engine) => extractor.with_ocr(Box::new(engine)),
        Err(e) => {
            warn!("Failed to load OCR models: {}", e);
            extractor
        }
    }
}

#[cfg(not(feature = "native"))]
fn attach_ocr(extractor: TextExtractor, models: &ModelConfig) -> TextExtractor {
    debug!("Built without OCR support; ignoring {}", models.model_dir.display());
    extractor
}
