//! Common regex patterns for credit-card statement extraction.
//!
//! Keyword patterns are case-insensitive and matched against the original
//! text, so match offsets can be used directly to slice windows out of it.

use lazy_static::lazy_static;
use regex::Regex;

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

lazy_static! {
    // Amounts: optional currency marker, then a grouped (1,234,567.89) or
    // plain (12345.67) numeral. Group 1 is the numeral only.
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"(?:Rs\.?|INR|₹)?\s*([0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]+)?|[0-9]+(?:\.[0-9]+)?)"
    ).unwrap();

    // Dates: 01/04/2023, 1-4-23, 12 Feb 2023, Feb 12, 2023
    pub static ref DATE_PATTERN: Regex = Regex::new(concat!(
        r"(?i)(\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|",
        r"\b(?:\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)[a-z]*[.,]?\s+\d{2,4})\b|",
        r"\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{2,4}\b)"
    )).unwrap();

    // Statement periods: 14/01/2024 - 12/02/2024
    pub static ref DATE_RANGE_PATTERN: Regex = Regex::new(
        r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\s*[-–]\s*\d{1,2}[/-]\d{1,2}[/-]\d{2,4}"
    ).unwrap();

    // Card numbers: 530562******9004, 4695 25XX XXXX 3458
    pub static ref MASKED_CARD: Regex = Regex::new(
        r"[*Xx]{2,}[*Xx0-9\s\-]{0,20}([0-9]{4})"
    ).unwrap();

    pub static ref FOUR_DIGITS: Regex = Regex::new(r"[0-9]{4}").unwrap();

    // "card" covers "card no", "card number" and "card account"
    pub static ref CARD_KEYWORD: Regex = Regex::new(r"(?i)\bcard\b").unwrap();

    // Total amount due labels, most specific first
    pub static ref TOTAL_DUE_KEYWORDS: Vec<Regex> = compile_all(&[
        r"(?i)total\s*(?:amount\s*)?due",
        r"(?i)total\s*dues",
        r"(?i)total\s*payment\s*due",
        r"(?i)your\s*total\s*amount\s*due",
        r"(?i)total\s*amount\s*payable",
        r"(?i)total\s*payment",
        r"(?i)total\s*d(?:ue|ues)\b",
    ]);

    pub static ref TOTAL_DUE_LOOSE: Regex = Regex::new(r"(?i)total[\s\w]{0,20}dues?").unwrap();

    // Payment due labels
    pub static ref PAYMENT_DUE_KEYWORDS: Vec<Regex> = compile_all(&[
        r"(?i)payment\s*due\s*date",
        r"(?i)due\s*date",
        r"(?i)payment\s*due\b",
        r"(?i)payment\s*due\s*[:\-]?",
        r"(?i)payment\s*due\s*",
    ]);

    // Longest alternative first so the whole word is captured
    pub static ref IMMEDIATE: Regex = Regex::new(r"(?i)immediately|immediate|immediat").unwrap();

    // Statement date labels
    pub static ref STATEMENT_DATE_KEYWORDS: Vec<Regex> = compile_all(&[
        r"(?i)statement\s*date",
        r"(?i)statement\s*generation\s*date",
        r"(?i)statement\s*period",
        r"(?i)statement\s*for",
    ]);

    // Cardholder name labels
    pub static ref NAME_LABEL: Regex = Regex::new(
        r"\bName\s*[:\-]\s*([A-Z][A-Z \t.\-]{2,100})"
    ).unwrap();

    pub static ref CUSTOMER_NAME_LABEL: Regex = Regex::new(
        r"\bCustomer\s+Name\s*[:\-]?\s*([A-Z][A-Z \t.\-]{2,100})"
    ).unwrap();

    pub static ref NAME_WORD: Regex = Regex::new(r"^[A-Z][a-zA-Z.]+$").unwrap();

    pub static ref NAME_STOPWORDS: Regex = Regex::new(
        r"(?i)statement|payment|due|account|page|customer|bank|credit"
    ).unwrap();

    pub static ref DIGIT: Regex = Regex::new(r"\d").unwrap();
}
