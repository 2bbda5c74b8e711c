// src/handlers/test_results.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{
    error::AppError, models::test_result::ResultFilter, services::reporting, store::Store,
};

/// Lists one student's results, newest first.
pub async fn list_student_results(
    State(store): State<Arc<dyn Store>>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let results = reporting::results_for_student(store.as_ref(), student_id)
        .await
        .map_err(|e| e.context("Failed to fetch test results"))?;

    Ok(Json(results))
}

/// Lists results across students.
/// Optional `studentId`, `courseId` and `testId` query parameters narrow the list.
pub async fn list_all_results(
    State(store): State<Arc<dyn Store>>,
    Query(filter): Query<ResultFilter>,
) -> Result<impl IntoResponse, AppError> {
    let results = reporting::list_results(store.as_ref(), &filter)
        .await
        .map_err(|e| e.context("Failed to fetch test results"))?;

    Ok(Json(results))
}

pub async fn get_result(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = reporting::get_result(store.as_ref(), id)
        .await
        .map_err(|e| e.context("Failed to fetch test result"))?;

    Ok(Json(result))
}
