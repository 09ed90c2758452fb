mod json_lines_parser;
pub use json_lines_parser::*;

use std::io::BufRead;

use crate::{error::Result, types::Prediction};

pub trait PredictionParser: Sync {
    fn get_next_chunk(
        &self,
        input: &mut dyn BufRead,
        output_buffer: String,
    ) -> Result<Option<String>>;
    fn parse_chunk(&self, chunk: &str) -> Result<Option<Prediction>>;
}

/// Reads every prediction from `input`. Errors carry the 1-based line number.
pub fn read_predictions(
    parser: &dyn PredictionParser,
    input: &mut dyn BufRead,
) -> Result<Vec<Prediction>> {
    let mut predictions = Vec::new();
    let mut buffer = String::new();
    let mut line = 0;
    while let Some(chunk) = parser.get_next_chunk(input, buffer)? {
        line += 1;
        match parser.parse_chunk(&chunk) {
            Ok(Some(prediction)) => predictions.push(prediction),
            Ok(None) => (),
            Err(e) => {
                return Err(crate::error::Error::ParserError(format!(
                    "line {}: {}",
                    line, e
                )))
            }
        }
        // Transfer ownership so we can reuse the buffer
        buffer = chunk;
    }
    log::debug!("Read {} predictions from {} lines", predictions.len(), line);
    Ok(predictions)
}
