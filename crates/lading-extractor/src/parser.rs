//! Model output repair and record parsing

use crate::error::ExtractError;
use crate::types::RawRecord;
use serde_json::Value;
use tracing::warn;

/// Slice a model response down to the outermost JSON array.
///
/// The contract asks for a bare array, but models routinely wrap it in
/// prose or code fences. Repair is purely positional: trim, drop anything
/// before the first `[`, drop anything after the last `]`. A response with
/// no brackets at all is returned trimmed and left for the parser to
/// reject.
pub fn repair_json_array(response: &str) -> String {
    let mut text = response.trim();

    if !text.starts_with('[') {
        if let Some(start) = text.find('[') {
            text = &text[start..];
        }
    }

    if !text.ends_with(']') {
        if let Some(end) = text.rfind(']') {
            text = &text[..=end];
        }
    }

    text.to_string()
}

/// Repair and parse a model response into record mappings.
///
/// Accepted payload shapes:
/// - a JSON array: each object element becomes a record
/// - an object with a `data` key holding an array: the inner array is used
/// - any other object: wrapped as a single record
///
/// Non-object array elements are dropped with a warning. Anything that is
/// not valid JSON after repair is a hard failure for this call.
pub fn parse_record_payload(response: &str) -> Result<Vec<RawRecord>, ExtractError> {
    let repaired = repair_json_array(response);

    let payload: Value = serde_json::from_str(&repaired)
        .map_err(|e| ExtractError::JsonParse(format!("{} in: {:.80}", e, repaired)))?;

    match payload {
        Value::Array(items) => Ok(collect_objects(items)),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("data") {
                Ok(collect_objects(items.clone()))
            } else {
                Ok(vec![map])
            }
        }
        other => Err(ExtractError::InvalidFormat(format!(
            "expected a JSON array or object, got {}",
            type_name(&other)
        ))),
    }
}

fn collect_objects(items: Vec<Value>) -> Vec<RawRecord> {
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => records.push(map),
            other => warn!("dropping non-object payload element: {}", type_name(&other)),
        }
    }
    records
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_strips_leading_and_trailing_garbage() {
        assert_eq!(repair_json_array("garbage[{\"a\":1}]trailer"), "[{\"a\":1}]");
    }

    #[test]
    fn test_repair_leaves_clean_arrays_alone() {
        assert_eq!(repair_json_array("[{\"a\":1}]"), "[{\"a\":1}]");
        assert_eq!(repair_json_array("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn test_repair_handles_markdown_fences() {
        let response = "```json\n[{\"vessel\": \"Ever Given\"}]\n```";
        assert_eq!(repair_json_array(response), "[{\"vessel\": \"Ever Given\"}]");
    }

    #[test]
    fn test_repair_without_brackets_returns_trimmed() {
        assert_eq!(repair_json_array("  no json here  "), "no json here");
    }

    #[test]
    fn test_parse_array_of_objects() {
        let records =
            parse_record_payload(r#"[{"vessel": "A"}, {"vessel": "B"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["vessel"], "A");
        assert_eq!(records[1]["vessel"], "B");
    }

    #[test]
    fn test_parse_unwraps_data_key() {
        let records =
            parse_record_payload(r#"{"data": [{"vessel": "A"}, {"vessel": "B"}]}"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_wraps_bare_object() {
        let records = parse_record_payload(r#"{"vessel": "A"}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["vessel"], "A");
    }

    #[test]
    fn test_parse_drops_non_object_elements() {
        let records = parse_record_payload(r#"[{"vessel": "A"}, 42, "noise"]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_empty_array() {
        let records = parse_record_payload("[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_garbage_is_hard_failure() {
        assert!(matches!(
            parse_record_payload("I could not find any shipments."),
            Err(ExtractError::JsonParse(_))
        ));
    }

    #[test]
    fn test_parse_scalar_is_invalid_format() {
        // A bare scalar survives repair untouched and parses as JSON,
        // but is not a usable payload.
        assert!(matches!(
            parse_record_payload("42"),
            Err(ExtractError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_repaired_response_end_to_end() {
        let response = "Here are the results:\n[{\"container_number\": \"MSCU1234567\"}]\nHope that helps!";
        let records = parse_record_payload(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["container_number"], "MSCU1234567");
    }
}
