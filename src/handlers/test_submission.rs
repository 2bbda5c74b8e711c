// src/handlers/test_submission.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{question::PublicQuestion, submission::SubmitTestRequest, test::TestPaper},
    scoring::MarkingScheme,
    services::{grading, names::NameResolver},
    store::Store,
};

/// Returns a test with its questions, ready to be taken.
///
/// Correct answers are stripped; each question carries its resolved marks.
pub async fn get_test_paper(
    State(store): State<Arc<dyn Store>>,
    Path(test_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let test = store
        .find_test(test_id)
        .await?
        .ok_or(AppError::NotFound("Test not found".to_string()))?;

    let questions = store.questions_for_test(test.id).await?;
    let scheme = MarkingScheme::for_test(&test);

    let mut names = NameResolver::new(store.as_ref());
    let course_name = names.course_name_for_test(&test).await.unwrap_or_default();

    let questions = questions
        .into_iter()
        .map(|q| PublicQuestion {
            marks: scheme.marks_for(&q),
            negative_marks: scheme.negative_marks_for(&q),
            id: q.id,
            content: q.content,
            options: q.options,
        })
        .collect();

    Ok(Json(TestPaper {
        id: test.id,
        name: test.name,
        course_id: test.course_id,
        course_name,
        description: test.description,
        duration_minutes: test.duration_minutes,
        marks_per_question: scheme.marks_per_question,
        negative_marking: scheme.negative_marking,
        questions,
    }))
}

/// Grades a student's answers and stores the result.
///
/// * 201 with the full result on success.
/// * 400 if the payload fails validation.
/// * 404 if the test does not exist (nothing is stored).
/// * 500 "Failed to submit test" if the store fails.
pub async fn submit_test(
    State(store): State<Arc<dyn Store>>,
    Path(test_id): Path<i64>,
    Json(req): Json<SubmitTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let result = grading::grade_submission(store.as_ref(), test_id, req)
        .await
        .map_err(|e| e.context("Failed to submit test"))?;

    Ok((StatusCode::CREATED, Json(result)))
}
