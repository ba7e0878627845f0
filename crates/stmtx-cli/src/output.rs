//! Output formatting for extraction results.

use console::style;

use stmtx_core::ExtractionResult;

/// Candidate samples shown in text output.
const SAMPLE_DATES: usize = 5;
const SAMPLE_AMOUNTS: usize = 8;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON output
    Json,
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style("=== Extracted datapoints ===").bold()));
    for (label, value) in result.fields() {
        output.push_str(&format!("{}: {}\n", label, value.unwrap_or("None")));
    }

    let candidates = &result.candidates;
    output.push_str(&format!("\n{}\n", style("Candidates (sample):").bold()));
    output.push_str(&format!(
        "Dates found: {:?}\n",
        candidates.sample_dates(SAMPLE_DATES)
    ));
    output.push_str(&format!(
        "Amounts found: {:?}",
        candidates.sample_amounts(SAMPLE_AMOUNTS)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use stmtx_core::Candidates;

    #[test]
    fn test_format_text() {
        let result = ExtractionResult {
            card_last4: Some("9004".to_string()),
            candidates: Candidates {
                dates: (1..=7).map(|d| format!("0{}/01/2024", d)).collect(),
                amounts: vec!["100".to_string()],
            },
            ..Default::default()
        };

        let text = format_text(&result);
        assert!(text.contains("card_last4: 9004"));
        assert!(text.contains("cardholder_name: None"));
        assert!(text.contains("\"05/01/2024\"]"));
        assert!(!text.contains("06/01/2024"));
        assert!(text.contains("Amounts found: [\"100\"]"));
    }

    #[test]
    fn test_format_json() {
        let result = ExtractionResult {
            total_amount_due: Some("12345.67".to_string()),
            ..Default::default()
        };

        let json = format_result(&result, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_amount_due"], "12345.67");
        assert!(value["payment_due_date"].is_null());
    }
}
