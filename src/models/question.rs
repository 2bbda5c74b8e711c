// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

use crate::models::submission::AnswerValue;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,

    /// Owning test. Course-level question banks leave this empty.
    pub test_id: Option<i64>,

    pub course_id: Option<i64>,

    /// The text content of the question.
    pub content: String,

    /// List of options (e.g., ["Option A", "Option B"]).
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// The correct answer, compared strictly against the submitted value.
    pub correct_answer: Json<AnswerValue>,

    /// Per-question override of the test's `marks_per_question`.
    pub marks: Option<f64>,

    /// Per-question override of the test's `negative_marking`.
    pub negative_marks: Option<f64>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Input for seeding a question into a store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub test_id: Option<i64>,
    pub course_id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: AnswerValue,
    pub marks: Option<f64>,
    pub negative_marks: Option<f64>,
}

/// DTO for sending question to client (excludes the correct answer).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: i64,
    pub content: String,
    pub options: Json<Vec<String>>,
    pub marks: f64,
    pub negative_marks: f64,
}
