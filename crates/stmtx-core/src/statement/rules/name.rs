//! Cardholder name extraction.

use super::patterns::{CUSTOMER_NAME_LABEL, DIGIT, NAME_LABEL, NAME_STOPWORDS, NAME_WORD};

/// Extract the cardholder name.
///
/// Labeled names (`Name:` then `Customer Name`) win; otherwise the first
/// name-like line among the first `scan_lines` lines is used.
pub fn extract_cardholder_name(text: &str, scan_lines: usize) -> Option<String> {
    NAME_LABEL
        .captures(text)
        .or_else(|| CUSTOMER_NAME_LABEL.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .or_else(|| {
            split_lines(text)
                .take(scan_lines)
                .map(str::trim)
                .find(|line| looks_like_name(line))
                .map(str::to_string)
        })
}

fn looks_like_name(line: &str) -> bool {
    if line.is_empty() || DIGIT.is_match(line) {
        return false;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=5).contains(&words.len())
        && words.iter().any(|w| NAME_WORD.is_match(w))
        && !NAME_STOPWORDS.is_match(line)
}

/// Split on every line boundary a text extractor may emit, treating
/// `\r\n` as a single break.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.char_indices().find(|(_, c)| is_line_break(*c)) {
            Some((i, c)) => {
                let mut next = i + c.len_utf8();
                if c == '\r' && current[next..].starts_with('\n') {
                    next += 1;
                }
                rest = (next < current.len()).then(|| &current[next..]);
                Some(&current[..i])
            }
            None => {
                rest = None;
                (!current.is_empty()).then_some(current)
            }
        }
    })
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
