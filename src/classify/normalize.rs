use super::ClassificationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_LABEL: &str = "unknown";
pub const UNKNOWN_LABEL_AR: &str = "غير معروف";

/// Largest integer a JSON consumer using IEEE doubles represents exactly.
pub const MAX_CALORIES: u64 = (1 << 53) - 1;

/// Validated relay output. `None` nutrition fields mean the provider gave no
/// usable number, which is distinct from a reading of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub label: String,
    pub label_ar: String,
    pub score: f64,
    pub calories_100g: Option<u64>,
    pub protein_100g: Option<f64>,
    pub carbs_100g: Option<f64>,
    pub fat_100g: Option<f64>,
    pub fiber_100g: Option<f64>,
}

/// Parses the model's message text. No fuzzy recovery: anything that is not
/// a JSON document, including an empty reply, is a parse error.
pub fn parse_reply(text: &str) -> Result<NormalizedResult, ClassificationError> {
    let text = text.trim();
    let parsed: Value = serde_json::from_str(text).map_err(|_| ClassificationError::Parse {
        raw: text.to_string(),
    })?;
    Ok(normalize(&parsed))
}

/// Projects an untrusted reply onto [`NormalizedResult`], field by field.
/// Non-object values normalize to all sentinels.
pub fn normalize(reply: &Value) -> NormalizedResult {
    NormalizedResult {
        label: text_or(reply.get("label"), UNKNOWN_LABEL).to_lowercase(),
        label_ar: text_or(reply.get("label_ar"), UNKNOWN_LABEL_AR),
        score: unit_interval(reply.get("confidence")),
        calories_100g: calories(reply.get("calories_100g")),
        protein_100g: finite_number(reply.get("protein_100g")),
        carbs_100g: finite_number(reply.get("carbs_100g")),
        fat_100g: finite_number(reply.get("fat_100g")),
        fiber_100g: finite_number(reply.get("fiber_100g")),
    }
}

fn finite_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|v| v.is_finite())
}

// Negative calorie readings are bad upstream data and floor at zero.
fn calories(value: Option<&Value>) -> Option<u64> {
    finite_number(value).map(|v| (v.round().max(0.0) as u64).min(MAX_CALORIES))
}

fn unit_interval(value: Option<&Value>) -> f64 {
    finite_number(value)
        .filter(|v| (0.0..=1.0).contains(v))
        .unwrap_or(0.0)
}

fn text_or(value: Option<&Value>, sentinel: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(sentinel)
        .to_string()
}
