//! Lenient JSON extraction from model output.
//!
//! Backends are asked for JSON, but models still wrap payloads in prose or
//! Markdown fences often enough that strict parsing would turn good answers
//! into failures. Strategy: prefer a fenced ```json block, fall back to the
//! outermost brace-delimited object.

use super::types::InferenceError;

/// Pull the JSON object out of a raw model response.
pub fn extract_json_object(response: &str) -> Result<&str, InferenceError> {
    if let Some(fenced) = extract_fenced_json(response) {
        return Ok(fenced);
    }

    let start = response
        .find('{')
        .ok_or_else(|| InferenceError::MalformedOutput("no JSON object in response".into()))?;
    let end = response
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| InferenceError::MalformedOutput("unterminated JSON object".into()))?;

    Ok(response[start..=end].trim())
}

/// Extract and deserialize the JSON object in one step.
pub fn parse_json_object<T: serde::de::DeserializeOwned>(
    response: &str,
) -> Result<T, InferenceError> {
    let json = extract_json_object(response)?;
    serde_json::from_str(json)
        .map_err(|e| InferenceError::MalformedOutput(format!("JSON did not match schema: {e}")))
}

fn extract_fenced_json(response: &str) -> Option<&str> {
    let fence_start = response.find("```json")?;
    let content_start = fence_start + "```json".len();
    let fence_end = response[content_start..].find("```")?;
    Some(response[content_start..content_start + fence_end].trim())
}
