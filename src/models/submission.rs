// src/models/submission.rs

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// A submitted or expected answer.
///
/// Options arrive from the student app as arbitrary JSON scalars (usually the
/// option text or its index), so the raw value is kept and interpreted with
/// two rules: `is_answered` treats `null`, `false`, `0` and `""` as blank,
/// and `strictly_equals` never coerces between types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerValue(pub Value);

impl AnswerValue {
    pub fn is_answered(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// `1` and `1.0` are the same answer; `1` and `"1"` are not.
    pub fn strictly_equals(&self, other: &AnswerValue) -> bool {
        match (&self.0, &other.0) {
            (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => a == b,
            },
            (a, b) => a == b,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue(Value::String(value.to_string()))
    }
}

impl From<Value> for AnswerValue {
    fn from(value: Value) -> Self {
        AnswerValue(value)
    }
}

/// DTO for submitting a test attempt.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestRequest {
    pub student_id: i64,

    /// Key: Question ID. Value: the selected option.
    /// Missing questions and blank values count as unanswered.
    #[serde(default, deserialize_with = "lenient_answers")]
    pub answers: HashMap<i64, AnswerValue>,

    /// Seconds spent on the test.
    #[serde(default, deserialize_with = "lenient_seconds")]
    #[validate(range(min = 0, message = "timeTaken must not be negative"))]
    pub time_taken: i64,
}

/// Anything other than an object (including `null`) reads as no answers.
/// Keys that are not question ids are dropped.
fn lenient_answers<'de, D>(deserializer: D) -> Result<HashMap<i64, AnswerValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(HashMap::new());
    };

    let mut answers = HashMap::with_capacity(map.len());
    for (key, value) in map {
        match key.trim().parse::<i64>() {
            Ok(id) => {
                answers.insert(id, AnswerValue(value));
            }
            Err(_) => tracing::warn!("Dropping answer with non-numeric question id {:?}", key),
        }
    }
    Ok(answers)
}

/// Accepts a number or a numeric string; anything else reads as `0`.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|v| v.round() as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map_or(0, |v| v.round() as i64),
        _ => 0,
    };
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values_are_unanswered() {
        for blank in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!AnswerValue(blank.clone()).is_answered(), "{} should be blank", blank);
        }
        for given in [json!("A"), json!(2), json!(true), json!(["A", "C"]), json!("0")] {
            assert!(AnswerValue(given.clone()).is_answered(), "{} should count", given);
        }
    }

    #[test]
    fn strict_equality_does_not_coerce() {
        assert!(AnswerValue(json!(1)).strictly_equals(&AnswerValue(json!(1.0))));
        assert!(!AnswerValue(json!(1)).strictly_equals(&AnswerValue(json!("1"))));
        assert!(AnswerValue::from("B").strictly_equals(&AnswerValue::from("B")));
        assert!(!AnswerValue::from("b").strictly_equals(&AnswerValue::from("B")));
    }

    #[test]
    fn submit_request_tolerates_missing_fields() {
        let req: SubmitTestRequest = serde_json::from_value(json!({ "studentId": 7 })).unwrap();
        assert_eq!(req.student_id, 7);
        assert!(req.answers.is_empty());
        assert_eq!(req.time_taken, 0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn submit_request_rejects_negative_time() {
        let req: SubmitTestRequest = serde_json::from_value(json!({
            "studentId": 7,
            "answers": { "1": "A", "2": null },
            "timeTaken": -5
        }))
        .unwrap();
        assert_eq!(req.answers.len(), 2);
        assert!(req.validate().is_err());
    }

    #[test]
    fn null_and_malformed_fields_read_as_no_answer() {
        let req: SubmitTestRequest = serde_json::from_value(json!({
            "studentId": 7,
            "answers": null,
            "timeTaken": null
        }))
        .unwrap();
        assert!(req.answers.is_empty());
        assert_eq!(req.time_taken, 0);

        let req: SubmitTestRequest =
            serde_json::from_value(json!({ "studentId": 7, "answers": ["A"], "timeTaken": "soon" }))
                .unwrap();
        assert!(req.answers.is_empty());
        assert_eq!(req.time_taken, 0);
    }

    #[test]
    fn numeric_strings_and_bad_keys() {
        let req: SubmitTestRequest = serde_json::from_value(json!({
            "studentId": 7,
            "answers": { "abc": "A", " 12 ": "B" },
            "timeTaken": "120"
        }))
        .unwrap();
        assert_eq!(req.time_taken, 120);
        assert_eq!(req.answers.len(), 1);
        assert_eq!(req.answers[&12], AnswerValue::from("B"));
    }
}
