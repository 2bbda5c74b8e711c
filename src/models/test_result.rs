// src/models/test_result.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

use crate::models::submission::AnswerValue;

/// Represents the 'test_results' table in the database.
/// One row per graded submission; rows are never updated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: i64,
    pub test_id: i64,
    pub course_id: Option<i64>,
    pub student_id: i64,

    // Display names captured at submission time. Blank when the lookup failed.
    pub test_name: String,
    pub course_name: String,
    pub student_name: String,

    /// Per-question breakdown.
    pub answers: Json<Vec<QuestionOutcome>>,

    pub total_questions: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub unanswered: i64,

    pub total_marks: f64,
    /// Never below zero.
    pub obtained_marks: f64,
    pub negative_marks_total: f64,
    pub percentage: i64,

    /// Seconds, as reported by the client.
    pub time_taken: i64,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// A graded result that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewTestResult {
    pub test_id: i64,
    pub course_id: Option<i64>,
    pub student_id: i64,
    pub test_name: String,
    pub course_name: String,
    pub student_name: String,
    pub answers: Vec<QuestionOutcome>,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub unanswered: i64,
    pub total_marks: f64,
    pub obtained_marks: f64,
    pub negative_marks_total: f64,
    pub percentage: i64,
    pub time_taken: i64,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl NewTestResult {
    /// Attaches the identifier assigned by the store.
    pub fn into_result(self, id: i64) -> TestResult {
        TestResult {
            id,
            test_id: self.test_id,
            course_id: self.course_id,
            student_id: self.student_id,
            test_name: self.test_name,
            course_name: self.course_name,
            student_name: self.student_name,
            answers: Json(self.answers),
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
            wrong_answers: self.wrong_answers,
            unanswered: self.unanswered,
            total_marks: self.total_marks,
            obtained_marks: self.obtained_marks,
            negative_marks_total: self.negative_marks_total,
            percentage: self.percentage,
            time_taken: self.time_taken,
            submitted_at: self.submitted_at,
        }
    }
}

/// How one question was graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question_id: i64,
    /// `null` when the question was left blank.
    pub student_answer: AnswerValue,
    pub correct_answer: AnswerValue,
    pub is_correct: bool,
    pub marks_awarded: f64,
    pub negative_marks: f64,
}

/// Query parameters for the admin result listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultFilter {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub test_id: Option<i64>,
}

impl ResultFilter {
    pub fn for_student(student_id: i64) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, result: &TestResult) -> bool {
        self.student_id.is_none_or(|id| result.student_id == id)
            && self.course_id.is_none_or(|id| result.course_id == Some(id))
            && self.test_id.is_none_or(|id| result.test_id == id)
    }
}
