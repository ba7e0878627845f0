//! Statement datapoint models.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Datapoints extracted from the first page of a credit-card statement.
///
/// Every field is independently optional; `None` means the corresponding
/// heuristic found nothing. Values are raw substrings of the input text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Best-guess personal name line.
    pub cardholder_name: Option<String>,

    /// Statement date or date range, as written.
    pub statement_date: Option<String>,

    /// Payment due date as written, or an "immediate(ly)" token.
    pub payment_due_date: Option<String>,

    /// Total amount due with thousands separators stripped.
    pub total_amount_due: Option<String>,

    /// Last four digits of the (usually masked) card number.
    pub card_last4: Option<String>,

    /// Every date-like and amount-like substring, for manual review.
    pub candidates: Candidates,
}

/// Unfiltered pool of detected dates and amounts, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidates {
    /// Raw date substrings.
    pub dates: Vec<String>,

    /// Amount numerals with thousands separators stripped.
    pub amounts: Vec<String>,
}

impl ExtractionResult {
    /// True when none of the five primary fields was found.
    pub fn is_empty(&self) -> bool {
        self.cardholder_name.is_none()
            && self.statement_date.is_none()
            && self.payment_due_date.is_none()
            && self.total_amount_due.is_none()
            && self.card_last4.is_none()
    }

    /// Number of primary fields that were found.
    pub fn found_count(&self) -> usize {
        [
            &self.cardholder_name,
            &self.statement_date,
            &self.payment_due_date,
            &self.total_amount_due,
            &self.card_last4,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }

    /// Total amount due as a decimal, if present and numeric.
    pub fn total_amount_due_decimal(&self) -> Option<Decimal> {
        self.total_amount_due
            .as_deref()
            .and_then(|s| Decimal::from_str(s).ok())
    }

    /// Primary fields as (label, value) pairs in display order.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("cardholder_name", self.cardholder_name.as_deref()),
            ("statement_date", self.statement_date.as_deref()),
            ("payment_due_date", self.payment_due_date.as_deref()),
            ("total_amount_due", self.total_amount_due.as_deref()),
            ("card_last4", self.card_last4.as_deref()),
        ]
    }
}

impl Candidates {
    /// First `n` detected dates.
    pub fn sample_dates(&self, n: usize) -> &[String] {
        &self.dates[..n.min(self.dates.len())]
    }

    /// First `n` detected amounts.
    pub fn sample_amounts(&self, n: usize) -> &[String] {
        &self.amounts[..n.min(self.amounts.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_result() {
        let result = ExtractionResult::default();
        assert!(result.is_empty());
        assert_eq!(result.found_count(), 0);
        assert_eq!(result.total_amount_due_decimal(), None);
    }

    #[test]
    fn test_total_amount_due_decimal() {
        let result = ExtractionResult {
            total_amount_due: Some("12345.67".to_string()),
            ..Default::default()
        };
        assert!(!result.is_empty());
        assert_eq!(
            result.total_amount_due_decimal(),
            Some(Decimal::from_str("12345.67").unwrap())
        );
    }

    #[test]
    fn test_candidate_samples_clamp() {
        let candidates = Candidates {
            dates: vec!["01/02/2024".to_string(), "15/02/2024".to_string()],
            amounts: vec!["10".to_string()],
        };
        assert_eq!(candidates.sample_dates(5).len(), 2);
        assert_eq!(candidates.sample_dates(1), &["01/02/2024".to_string()]);
        assert_eq!(candidates.sample_amounts(8).len(), 1);
    }

    #[test]
    fn test_serialized_field_names() {
        let result = ExtractionResult {
            card_last4: Some("9004".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["card_last4"], "9004");
        assert!(json["cardholder_name"].is_null());
        assert!(json["candidates"]["dates"].as_array().unwrap().is_empty());
    }
}
