//! Card last-4 extraction.

use regex::Match;
use tracing::trace;

use super::patterns::{CARD_KEYWORD, FOUR_DIGITS, MASKED_CARD};

/// Four-digit values in this range are taken to be calendar years.
const YEAR_RANGE: std::ops::RangeInclusive<u32> = 1900..=2099;

/// Extract the last four digits of the card number.
///
/// Prefers a masked card number; otherwise the four-digit run closest to a
/// "card" keyword; otherwise the first four-digit run that is not a year.
pub fn extract_card_last4(text: &str) -> Option<String> {
    masked_card_tail(text).or_else(|| {
        let runs: Vec<Match<'_>> = FOUR_DIGITS.find_iter(text).collect();
        if runs.is_empty() {
            return None;
        }
        nearest_to_card_keyword(text, &runs).or_else(|| first_non_year(&runs))
    })
}

/// Trailing digits of a masked number such as `530562******9004`.
fn masked_card_tail(text: &str) -> Option<String> {
    MASKED_CARD
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Four-digit run with the smallest distance, in characters, to any "card"
/// keyword.
///
/// Ties keep the first run seen, scanning keywords in document order.
fn nearest_to_card_keyword(text: &str, runs: &[Match<'_>]) -> Option<String> {
    let run_offsets: Vec<(usize, &str)> = runs
        .iter()
        .map(|run| (char_offset(text, run.start()), run.as_str()))
        .collect();
    let mut best: Option<(usize, &str)> = None;

    for keyword in CARD_KEYWORD.find_iter(text) {
        let keyword_offset = char_offset(text, keyword.start());
        for &(run_offset, digits) in &run_offsets {
            let distance = run_offset.abs_diff(keyword_offset);
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((distance, digits));
            }
        }
    }

    if let Some((distance, digits)) = best {
        trace!("card digits {} at distance {} from keyword", digits, distance);
    }
    best.map(|(_, digits)| digits.to_string())
}

/// Character index of a byte offset taken from a regex match.
fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// First four-digit run that does not look like a year.
fn first_non_year(runs: &[Match<'_>]) -> Option<String> {
    runs.iter()
        .map(|m| m.as_str())
        .find(|digits| {
            digits
                .parse::<u32>()
                .map_or(true, |value| !YEAR_RANGE.contains(&value))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_card_number() {
        assert_eq!(
            extract_card_last4("Card No: 530562******9004"),
            Some("9004".to_string())
        );
        assert_eq!(
            extract_card_last4("4695 25XX XXXX 3458 statement 2024"),
            Some("3458".to_string())
        );
        assert_eq!(
            extract_card_last4("xxxx-xxxx-xxxx-1234"),
            Some("1234".to_string())
        );
    }

    #[test]
    fn test_nearest_to_card_keyword() {
        let text = "Ref 7781 ... Credit Card 4111 2222 3333 4444 ... Txn 5678";
        assert_eq!(extract_card_last4(text), Some("4111".to_string()));
    }

    #[test]
    fn test_card_keyword_keeps_years() {
        // With a keyword present, the nearest run wins even if it looks like a year.
        assert_eq!(
            extract_card_last4("Card issued 2019, ref 8812 far away"),
            Some("2019".to_string())
        );
    }

    #[test]
    fn test_keyword_tie_is_deterministic() {
        // 1111 and 2222 are both 5 characters from the keyword.
        let text = "1111 card 2222";
        assert_eq!(extract_card_last4(text), Some("1111".to_string()));
        assert_eq!(extract_card_last4(text), extract_card_last4(text));
    }

    #[test]
    fn test_keyword_distance_counts_characters() {
        // Each rupee sign is one character but three bytes.
        assert_eq!(
            extract_card_last4("1111₹₹card   2222"),
            Some("1111".to_string())
        );
        assert_eq!(
            extract_card_last4("Card ₹₹₹₹ 4321 Limit ₹ 8765"),
            Some("4321".to_string())
        );
    }

    #[test]
    fn test_first_non_year_without_keyword() {
        assert_eq!(
            extract_card_last4("Statement 2024 for account 7732 opened 1999"),
            Some("7732".to_string())
        );
    }

    #[test]
    fn test_only_years_without_keyword() {
        assert_eq!(extract_card_last4("Statement 2024 since 1998"), None);
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(extract_card_last4("Card holder: Jane"), None);
        assert_eq!(extract_card_last4(""), None);
    }
}
