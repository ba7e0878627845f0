//! Statement datapoint extraction.

mod parser;
pub mod rules;

pub use parser::{extract_datapoints, StatementExtractor};
