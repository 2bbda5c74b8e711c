// src/services/reporting.rs

use crate::{
    error::AppError,
    models::test_result::{ResultFilter, TestResult},
    services::names::NameResolver,
    store::Store,
};

/// Results for one student, newest first.
pub async fn results_for_student(
    store: &dyn Store,
    student_id: i64,
) -> Result<Vec<TestResult>, AppError> {
    list_results(store, &ResultFilter::for_student(student_id)).await
}

/// Results matching `filter`, newest first, with blank names filled in.
pub async fn list_results(
    store: &dyn Store,
    filter: &ResultFilter,
) -> Result<Vec<TestResult>, AppError> {
    let results = store.list_results(filter).await?;

    let mut names = NameResolver::new(store);
    let mut repaired = Vec::with_capacity(results.len());
    for result in results {
        repaired.push(backfill_names(&mut names, result).await);
    }

    Ok(repaired)
}

pub async fn get_result(store: &dyn Store, id: i64) -> Result<TestResult, AppError> {
    let result = store
        .find_result(id)
        .await?
        .ok_or(AppError::NotFound("Test result not found".to_string()))?;

    let mut names = NameResolver::new(store);
    Ok(backfill_names(&mut names, result).await)
}

/// Fills blank display names from the current test/course/student records.
///
/// Only the returned copy changes; the stored result is never rewritten.
async fn backfill_names(names: &mut NameResolver<'_>, mut result: TestResult) -> TestResult {
    if !result.test_name.is_empty()
        && !result.course_name.is_empty()
        && !result.student_name.is_empty()
    {
        return result;
    }

    let test = if result.test_name.is_empty() || result.course_name.is_empty() {
        names.test(result.test_id).await
    } else {
        None
    };

    if result.test_name.is_empty() {
        if let Some(test) = &test {
            result.test_name = test.name.clone();
        }
    }

    if result.course_name.is_empty() {
        let from_test = match &test {
            Some(test) => names.course_name_for_test(test).await,
            None => None,
        };
        let name = match (from_test, result.course_id) {
            (Some(name), _) => Some(name),
            (None, Some(course_id)) => names.course_name(course_id).await,
            (None, None) => None,
        };
        if let Some(name) = name {
            result.course_name = name;
        }
    }

    if result.student_name.is_empty() {
        if let Some(name) = names.student_name(result.student_id).await {
            result.student_name = name;
        }
    }

    result
}
