// src/services/grading.rs

use crate::{
    error::AppError,
    models::{
        submission::SubmitTestRequest,
        test_result::{NewTestResult, TestResult},
    },
    scoring::score_submission,
    services::names::NameResolver,
    store::Store,
};

/// Grades one submission and persists the result.
///
/// * Fails with `NotFound` before any write if the test does not exist.
/// * Name lookups never fail the submission; unknown names are stored blank.
/// * Exactly one result is written. Repeat submissions are not deduplicated.
pub async fn grade_submission(
    store: &dyn Store,
    test_id: i64,
    req: SubmitTestRequest,
) -> Result<TestResult, AppError> {
    let test = store
        .find_test(test_id)
        .await?
        .ok_or(AppError::NotFound("Test not found".to_string()))?;

    let questions = store.questions_for_test(test.id).await?;
    let card = score_submission(&test, &questions, &req.answers);

    if card.stray_answers > 0 {
        tracing::warn!(
            "Ignoring {} answer(s) for questions outside test {} (student {})",
            card.stray_answers,
            test.id,
            req.student_id
        );
    }

    let mut names = NameResolver::new(store);
    let student_name = names.student_name(req.student_id).await.unwrap_or_default();
    let course_name = names.course_name_for_test(&test).await.unwrap_or_default();

    let result = store
        .insert_result(NewTestResult {
            test_id: test.id,
            course_id: test.course_id,
            student_id: req.student_id,
            test_name: test.name.clone(),
            course_name,
            student_name,
            answers: card.outcomes,
            total_questions: card.total_questions,
            correct_answers: card.correct_answers,
            wrong_answers: card.wrong_answers,
            unanswered: card.unanswered,
            total_marks: card.total_marks,
            obtained_marks: card.obtained_marks,
            negative_marks_total: card.negative_marks_total,
            percentage: card.percentage,
            time_taken: req.time_taken,
            submitted_at: chrono::Utc::now(),
        })
        .await?;

    tracing::info!(
        "Graded test {} for student {}: {}/{} ({}%)",
        result.test_id,
        result.student_id,
        result.obtained_marks,
        result.total_marks,
        result.percentage
    );

    Ok(result)
}
