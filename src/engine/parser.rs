use serde::Deserialize;
use serde_json::Value;

use super::EngineError;
use crate::models::FindingSet;

/// Top-level keys a genuine analysis response would carry. A parsed object
/// containing none of them is rejected rather than normalized into an empty
/// report.
const EXPECTED_KEYS: &[&str] = &[
    "interactions",
    "allergies",
    "contraindications",
    "condition_specific_concerns",
    "vital_signs_considerations",
    "monitoring",
    "alternatives",
    "drug_class_analysis",
    "overall_risk",
    "summary",
];

/// Locate the JSON object embedded in free-form model text: everything from
/// the first `{` to the last `}`, tolerating markdown fences and surrounding
/// prose. Load-bearing heuristic — kept in one place and tested.
pub fn extract_json_object(text: &str) -> Result<&str, EngineError> {
    let start = text
        .find('{')
        .ok_or_else(|| EngineError::MalformedResponse("no '{' in response".into()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| EngineError::MalformedResponse("no '}' in response".into()))?;
    if end < start {
        return Err(EngineError::MalformedResponse(
            "braces out of order in response".into(),
        ));
    }
    Ok(&text[start..=end])
}

/// Parse the model's raw text into a finding set.
///
/// The response must contain a JSON object carrying at least one expected
/// top-level key. Individual list items that fail to decode are skipped;
/// `overall_risk` and `summary` are intentionally discarded (both are always
/// recomputed locally by the normalizer).
pub fn parse_analysis_response(text: &str) -> Result<FindingSet, EngineError> {
    let json_str = extract_json_object(text)?;
    let value: Value =
        serde_json::from_str(json_str).map_err(|e| EngineError::JsonParsing(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| EngineError::MalformedResponse("response JSON is not an object".into()))?;

    if !EXPECTED_KEYS.iter().any(|k| object.contains_key(*k)) {
        return Err(EngineError::MalformedResponse(
            "response object has none of the expected keys".into(),
        ));
    }

    Ok(FindingSet {
        interactions: parse_array_lenient(object.get("interactions")),
        allergies: parse_array_lenient(object.get("allergies")),
        contraindications: parse_array_lenient(object.get("contraindications")),
        condition_specific_concerns: parse_array_lenient(object.get("condition_specific_concerns")),
        vital_signs_considerations: parse_array_lenient(object.get("vital_signs_considerations")),
        monitoring: parse_array_lenient(object.get("monitoring")),
        alternatives: parse_array_lenient(object.get("alternatives")),
        drug_class_analysis: parse_array_lenient(object.get("drug_class_analysis")),
    })
}

/// Decode an array leniently — a missing key or non-array value yields an
/// empty list, and items that fail to deserialize are skipped.
fn parse_array_lenient<T: for<'de> Deserialize<'de>>(value: Option<&Value>) -> Vec<T> {
    match value.and_then(Value::as_array) {
        None => vec![],
        Some(items) => items
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
    }
}
