//! Amount extraction for credit-card statements.

use tracing::trace;

use super::patterns::{AMOUNT_PATTERN, TOTAL_DUE_KEYWORDS, TOTAL_DUE_LOOSE};
use super::{char_window, first_labeled, FieldExtractor};

/// Amount field extractor.
///
/// Yields numerals with thousands separators stripped; currency markers
/// are matched but never part of the value.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        AMOUNT_PATTERN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| strip_thousands(m.as_str()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_PATTERN
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| strip_thousands(m.as_str()))
            .collect()
    }
}

/// Remove thousands separators from a captured numeral.
pub fn strip_thousands(amount: &str) -> String {
    amount.replace(',', "")
}

/// Find the first amount within `window` characters after `start`.
///
/// The numeral is returned as written, separators included.
pub fn find_amount_near(text: &str, start: usize, window: usize) -> Option<String> {
    AMOUNT_PATTERN
        .captures(char_window(text, start, window))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the total amount due.
///
/// Tries each "total due" label in order and searches `window` characters
/// after every occurrence. If no label yields an amount, falls back to a
/// looser `total ... due` phrase searched `fallback_window` characters from
/// the phrase start.
pub fn extract_total_amount_due(text: &str, window: usize, fallback_window: usize) -> Option<String> {
    let labeled = first_labeled(text, &TOTAL_DUE_KEYWORDS, |m| {
        trace!("total due label {:?} at {}", m.as_str(), m.start());
        find_amount_near(text, m.end(), window)
    });

    labeled
        .or_else(|| {
            TOTAL_DUE_LOOSE
                .find_iter(text)
                .find_map(|m| find_amount_near(text, m.start(), fallback_window))
        })
        .map(|amount| strip_thousands(&amount))
}
