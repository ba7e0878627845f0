//! Heuristic statement parser driving the field rules.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::statement::{Candidates, ExtractionResult};

use super::rules::{
    amounts::{extract_total_amount_due, AmountExtractor},
    card::extract_card_last4,
    dates::{extract_payment_due_date, extract_statement_date, DateExtractor},
    name::extract_cardholder_name,
    FieldExtractor,
};

/// Extracts statement datapoints from first-page text.
///
/// Each field is found by an independent rule chain; a field that no rule
/// matches is left as `None`. Extraction never fails and holds no state
/// between calls.
#[derive(Debug, Clone)]
pub struct StatementExtractor {
    config: ExtractionConfig,
}

impl StatementExtractor {
    /// Create an extractor with default search windows.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create an extractor from configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set the window searched after a "total due" label.
    pub fn with_amount_window(mut self, window: usize) -> Self {
        self.config.amount_window = window;
        self
    }

    /// Set the window searched after a date label.
    pub fn with_label_window(mut self, window: usize) -> Self {
        self.config.label_window = window;
        self
    }

    /// Run every rule over `text`.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let config = &self.config;

        let result = ExtractionResult {
            card_last4: extract_card_last4(text),
            total_amount_due: extract_total_amount_due(
                text,
                config.amount_window,
                config.fallback_amount_window,
            ),
            payment_due_date: extract_payment_due_date(text, config.label_window),
            statement_date: extract_statement_date(text, config.label_window),
            cardholder_name: extract_cardholder_name(text, config.name_scan_lines),
            candidates: collect_candidates(text),
        };

        debug!(
            "Extracted {}/5 fields from {} chars ({} date, {} amount candidates)",
            result.found_count(),
            text.chars().count(),
            result.candidates.dates.len(),
            result.candidates.amounts.len()
        );

        result
    }
}

impl Default for StatementExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect every date and amount in the text, in document order.
fn collect_candidates(text: &str) -> Candidates {
    Candidates {
        dates: DateExtractor::new().extract_all(text),
        amounts: AmountExtractor::new().extract_all(text),
    }
}

/// Extract statement datapoints using the default configuration.
pub fn extract_datapoints(text: &str) -> ExtractionResult {
    StatementExtractor::new().extract(text)
}
