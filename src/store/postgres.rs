// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::{
    error::AppError,
    models::{
        question::Question,
        test::Test,
        test_result::{NewTestResult, ResultFilter, TestResult},
    },
    store::Store,
};

const RESULT_COLUMNS: &str = r#"
    id, test_id, course_id, student_id,
    test_name, course_name, student_name,
    answers,
    total_questions, correct_answers, wrong_answers, unanswered,
    total_marks, obtained_marks, negative_marks_total, percentage,
    time_taken, submitted_at
"#;

/// `Store` backed by a Postgres pool. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_test(&self, id: i64) -> Result<Option<Test>, AppError> {
        let test = sqlx::query_as::<_, Test>(
            r#"
            SELECT
                id, name, course_id, course_name, description, duration_minutes,
                marks_per_question, negative_marking, created_at
            FROM tests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(test)
    }

    async fn questions_for_test(&self, test_id: i64) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT
                id, test_id, course_id, content, options, correct_answer,
                marks, negative_marks, created_at
            FROM questions
            WHERE test_id = $1
            ORDER BY id
            "#,
        )
        .bind(test_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn student_name(&self, id: i64) -> Result<Option<String>, AppError> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name)
    }

    async fn course_name(&self, id: i64) -> Result<Option<String>, AppError> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name)
    }

    async fn insert_result(&self, result: NewTestResult) -> Result<TestResult, AppError> {
        let sql = format!(
            r#"
            INSERT INTO test_results (
                test_id, course_id, student_id,
                test_name, course_name, student_name,
                answers,
                total_questions, correct_answers, wrong_answers, unanswered,
                total_marks, obtained_marks, negative_marks_total, percentage,
                time_taken, submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {RESULT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, TestResult>(&sql)
            .bind(result.test_id)
            .bind(result.course_id)
            .bind(result.student_id)
            .bind(&result.test_name)
            .bind(&result.course_name)
            .bind(&result.student_name)
            .bind(Json(&result.answers))
            .bind(result.total_questions)
            .bind(result.correct_answers)
            .bind(result.wrong_answers)
            .bind(result.unanswered)
            .bind(result.total_marks)
            .bind(result.obtained_marks)
            .bind(result.negative_marks_total)
            .bind(result.percentage)
            .bind(result.time_taken)
            .bind(result.submitted_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn find_result(&self, id: i64) -> Result<Option<TestResult>, AppError> {
        let sql = format!("SELECT {RESULT_COLUMNS} FROM test_results WHERE id = $1");

        let row = sqlx::query_as::<_, TestResult>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<TestResult>, AppError> {
        let sql = format!(
            r#"
            SELECT {RESULT_COLUMNS}
            FROM test_results
            WHERE ($1::BIGINT IS NULL OR student_id = $1)
              AND ($2::BIGINT IS NULL OR course_id = $2)
              AND ($3::BIGINT IS NULL OR test_id = $3)
            ORDER BY submitted_at DESC, id DESC
            "#
        );

        let rows = sqlx::query_as::<_, TestResult>(&sql)
            .bind(filter.student_id)
            .bind(filter.course_id)
            .bind(filter.test_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
