// src/models/test.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::question::PublicQuestion;

/// Represents the 'tests' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: i64,

    pub name: String,

    pub course_id: Option<i64>,

    /// Course name cached on the test itself. When present it wins over a
    /// lookup through `course_id`.
    pub course_name: Option<String>,

    pub description: Option<String>,

    pub duration_minutes: Option<i32>,

    /// Marks for a correct answer, unless the question overrides it.
    pub marks_per_question: Option<f64>,

    /// Marks deducted for a wrong answer, unless the question overrides it.
    pub negative_marking: Option<f64>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Input for seeding a test into a store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTest {
    pub name: String,
    pub course_id: Option<i64>,
    pub course_name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub marks_per_question: Option<f64>,
    pub negative_marking: Option<f64>,
}

/// DTO for handing a test to a student: resolved marking scheme, no answer keys.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPaper {
    pub id: i64,
    pub name: String,
    pub course_id: Option<i64>,
    pub course_name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub marks_per_question: f64,
    pub negative_marking: f64,
    pub questions: Vec<PublicQuestion>,
}
