//! Date extraction for credit-card statements.
//!
//! Dates are kept exactly as written; no normalization is attempted.

use tracing::trace;

use super::patterns::{
    DATE_PATTERN, DATE_RANGE_PATTERN, IMMEDIATE, PAYMENT_DUE_KEYWORDS, STATEMENT_DATE_KEYWORDS,
};
use super::{char_window, first_labeled, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_PATTERN.find(text).map(|m| m.as_str().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Extract the payment due date.
///
/// After each due-date label, the next `window` characters are searched for
/// a date, then for an "immediate(ly)" instruction.
pub fn extract_payment_due_date(text: &str, window: usize) -> Option<String> {
    let dates = DateExtractor::new();

    first_labeled(text, &PAYMENT_DUE_KEYWORDS, |m| {
        let following = char_window(text, m.end(), window);
        trace!("payment due label {:?} at {}", m.as_str(), m.start());

        dates
            .extract(following)
            .or_else(|| IMMEDIATE.find(following).map(|im| im.as_str().to_string()))
            .map(|value| value.trim().to_string())
    })
}

/// Extract the statement date or statement period.
pub fn extract_statement_date(text: &str, window: usize) -> Option<String> {
    let dates = DateExtractor::new();

    first_labeled(text, &STATEMENT_DATE_KEYWORDS, |m| {
        let following = char_window(text, m.end(), window);
        trace!("statement label {:?} at {}", m.as_str(), m.start());

        dates
            .extract(following)
            .or_else(|| {
                DATE_RANGE_PATTERN
                    .find(following)
                    .map(|range| range.as_str().to_string())
            })
            .map(|value| value.trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_shapes() {
        let extractor = DateExtractor::new();

        assert_eq!(extractor.extract("on 15/03/2024."), Some("15/03/2024".to_string()));
        assert_eq!(extractor.extract("on 5-3-24"), Some("5-3-24".to_string()));
        assert_eq!(extractor.extract("12 Feb 2023"), Some("12 Feb 2023".to_string()));
        assert_eq!(extractor.extract("March 3, 2024"), Some("March 3, 2024".to_string()));
        assert_eq!(extractor.extract("no date here"), None);
    }

    #[test]
    fn test_extract_all_dates_in_order() {
        let extractor = DateExtractor::new();
        let text = "From 14/01/2024 to 12/02/2024, due 03 Mar 2024";

        assert_eq!(
            extractor.extract_all(text),
            vec!["14/01/2024", "12/02/2024", "03 Mar 2024"]
        );
    }

    #[test]
    fn test_payment_due_date() {
        assert_eq!(
            extract_payment_due_date("Payment Due Date 15/03/2024", 140),
            Some("15/03/2024".to_string())
        );
        assert_eq!(
            extract_payment_due_date("DUE DATE: 02 Apr 2024", 140),
            Some("02 Apr 2024".to_string())
        );
    }

    #[test]
    fn test_payment_due_immediately_keeps_case() {
        assert_eq!(
            extract_payment_due_date("Payment Due IMMEDIATELY", 140),
            Some("IMMEDIATELY".to_string())
        );
        assert_eq!(
            extract_payment_due_date("payment due: Immediate", 140),
            Some("Immediate".to_string())
        );
    }

    #[test]
    fn test_payment_due_skips_occurrence_without_date() {
        let text = format!(
            "Due Date{}\nDue Date 20/05/2024",
            " ".repeat(150)
        );
        assert_eq!(
            extract_payment_due_date(&text, 140),
            Some("20/05/2024".to_string())
        );
    }

    #[test]
    fn test_payment_due_outside_window() {
        let text = format!("Payment Due Date{}15/03/2024", " ".repeat(141));
        assert_eq!(extract_payment_due_date(&text, 140), None);
    }

    #[test]
    fn test_statement_date() {
        assert_eq!(
            extract_statement_date("Statement Date : 18 Feb, 2024", 140),
            Some("18 Feb, 2024".to_string())
        );
        assert_eq!(
            extract_statement_date("Statement Generation Date 01-02-2024", 140),
            Some("01-02-2024".to_string())
        );
    }

    #[test]
    fn test_statement_period_takes_first_date() {
        assert_eq!(
            extract_statement_date("Statement Period: 14/01/2024 - 12/02/2024", 140),
            Some("14/01/2024".to_string())
        );
    }

    #[test]
    fn test_statement_period_falls_back_to_range() {
        // Glued to surrounding letters, the single-date shapes lack word
        // boundaries and only the range pattern matches.
        assert_eq!(
            extract_statement_date("Statement Period: a14/01/2024-12/02/2024b", 140),
            Some("14/01/2024-12/02/2024".to_string())
        );
    }

    #[test]
    fn test_statement_date_missing() {
        assert_eq!(extract_statement_date("Account Summary", 140), None);
        assert_eq!(extract_statement_date("Statement Date: pending", 140), None);
    }
}
