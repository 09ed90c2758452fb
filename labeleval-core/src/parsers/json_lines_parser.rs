use crate::error::Result;
use crate::types::Prediction;

use super::PredictionParser;

/// One JSON object per line, e.g.
/// `{"trueLabel": "a", "predictedLabel": "b", "scores": {"a": 0.4, "b": 0.6}}`.
/// Blank lines are skipped.
#[derive(Default)]
pub struct JsonLinesParser;

impl PredictionParser for JsonLinesParser {
    fn get_next_chunk(
        &self,
        input: &mut dyn std::io::BufRead,
        mut output_buffer: String,
    ) -> Result<Option<String>> {
        output_buffer.clear();
        input.read_line(&mut output_buffer)?;
        if output_buffer.is_empty() {
            return Ok(None);
        }
        Ok(Some(output_buffer))
    }

    fn parse_chunk(&self, chunk: &str) -> Result<Option<Prediction>> {
        let trimmed = chunk.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(trimmed)?))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::Error;
    use crate::parsers::read_predictions;
    use crate::types::Label;

    #[test]
    fn test_read_predictions() {
        let input = "{\"trueLabel\": \"a\", \"predictedLabel\": \"b\"}\n\n{\"trueLabel\": \"b\", \"predictedLabel\": \"b\", \"scores\": {\"a\": 0.1, \"b\": 0.9}}";
        let predictions = read_predictions(&JsonLinesParser, &mut Cursor::new(input)).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0], Prediction::new("a", "b"));
        assert_eq!(
            predictions[1].scores.as_ref().unwrap()[&Label::from("b")],
            0.9
        );
    }

    #[test]
    fn test_error_reports_line() {
        let input = "{\"trueLabel\": \"a\", \"predictedLabel\": \"b\"}\n{\"trueLabel\": \"a\"}\n";
        let result = read_predictions(&JsonLinesParser, &mut Cursor::new(input));
        match result {
            Err(Error::ParserError(message)) => assert!(message.starts_with("line 2:")),
            _ => panic!("expected a parser error"),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let chunk = r#"{"trueLabel": "a", "predictedLabel": "a", "weight": 2.0}"#;
        assert!(JsonLinesParser.parse_chunk(chunk).is_err());
    }
}
