//! Rule-based field extractors for credit-card statements.

pub mod amounts;
pub mod card;
pub mod dates;
pub mod name;
pub mod patterns;

pub use amounts::{extract_total_amount_due, find_amount_near, strip_thousands, AmountExtractor};
pub use card::extract_card_last4;
pub use dates::{extract_payment_due_date, extract_statement_date, DateExtractor};
pub use name::extract_cardholder_name;
pub use patterns::*;

use regex::{Match, Regex};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Slice of at most `window` characters of `text` starting at byte `start`.
///
/// Returns an empty slice when `start` is past the end or not on a char
/// boundary.
pub fn char_window(text: &str, start: usize, window: usize) -> &str {
    let Some(rest) = text.get(start..) else {
        return "";
    };
    let end = rest
        .char_indices()
        .nth(window)
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Run `probe` on every occurrence of each keyword pattern, in order.
///
/// All occurrences of a pattern are tried before moving to the next
/// pattern; the first value produced ends the search.
pub fn first_labeled<F>(text: &str, keywords: &[Regex], mut probe: F) -> Option<String>
where
    F: FnMut(Match<'_>) -> Option<String>,
{
    keywords
        .iter()
        .find_map(|keyword| keyword.find_iter(text).find_map(&mut probe))
}
