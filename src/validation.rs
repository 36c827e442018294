//! Field checks shared by the donor and recipient registration forms.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Trimmed value, or `None` when absent or blank.
pub fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trimmed value, empty string when absent.
pub fn optional(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Canonical upper-case blood group, if `value` names one.
pub fn blood_type(value: &str) -> Option<String> {
    let upper = value.trim().to_ascii_uppercase();
    BLOOD_TYPES.contains(&upper.as_str()).then_some(upper)
}

/// Reads an age sent either as a JSON number or as a numeric string (`34` or `"34"`).
/// Anything else is treated as absent so it fails the required-field check.
pub fn lenient_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let age = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_counts_as_missing() {
        assert_eq!(required(&None), None);
        assert_eq!(required(&Some("   ".into())), None);
        assert_eq!(required(&Some(" Ann ".into())), Some("Ann".into()));
    }

    #[test]
    fn optional_defaults_to_empty() {
        assert_eq!(optional(None), "");
        assert_eq!(optional(Some(" x ".into())), "x");
    }

    #[test]
    fn blood_types_are_normalized() {
        assert_eq!(blood_type("ab-").as_deref(), Some("AB-"));
        assert_eq!(blood_type(" O+ ").as_deref(), Some("O+"));
        assert_eq!(blood_type("C+"), None);
        assert_eq!(blood_type("A"), None);
    }

    #[derive(Deserialize)]
    struct AgeOnly {
        #[serde(default, deserialize_with = "lenient_age")]
        age: Option<i32>,
    }

    fn age_of(body: &str) -> Option<i32> {
        serde_json::from_str::<AgeOnly>(body).unwrap().age
    }

    #[test]
    fn age_accepts_numbers_and_numeric_strings() {
        assert_eq!(age_of(r#"{"age":34}"#), Some(34));
        assert_eq!(age_of(r#"{"age":"34"}"#), Some(34));
        assert_eq!(age_of(r#"{"age":" 7 "}"#), Some(7));
        assert_eq!(age_of(r#"{"age":"-3"}"#), Some(-3));
    }

    #[test]
    fn unreadable_age_counts_as_missing() {
        assert_eq!(age_of("{}"), None);
        assert_eq!(age_of(r#"{"age":null}"#), None);
        assert_eq!(age_of(r#"{"age":"abc"}"#), None);
        assert_eq!(age_of(r#"{"age":""}"#), None);
        assert_eq!(age_of(r#"{"age":34.5}"#), None);
        assert_eq!(age_of(r#"{"age":true}"#), None);
        assert_eq!(age_of(r#"{"age":99999999999}"#), None);
    }
}
