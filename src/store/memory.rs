// src/store/memory.rs

use std::{
    collections::BTreeMap,
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use serde::Deserialize;
use sqlx::types::Json;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{
        course::Course,
        question::{NewQuestion, Question},
        student::Student,
        test::{NewTest, Test},
        test_result::{NewTestResult, ResultFilter, TestResult},
    },
    store::Store,
};

/// In-process `Store`.
///
/// Ids are handed out from one shared counter, so every record in the store
/// has a distinct id. Reads, writes, or just the student/course name
/// lookups can be made to fail on demand to exercise error paths.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_name_lookups: AtomicBool,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    courses: BTreeMap<i64, Course>,
    students: BTreeMap<i64, Student>,
    tests: BTreeMap<i64, Test>,
    questions: BTreeMap<i64, Question>,
    results: BTreeMap<i64, TestResult>,
}

impl Inner {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Seed data for `STORE_BACKEND=memory`.
///
/// Tests point at courses by `key`, so a fixture file never hard-codes
/// generated ids.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub courses: Vec<FixtureCourse>,
    #[serde(default)]
    pub students: Vec<String>,
    #[serde(default)]
    pub tests: Vec<FixtureTest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCourse {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureTest {
    /// Key of a course in the same fixture.
    pub course: Option<String>,
    #[serde(flatten)]
    pub test: NewTest,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a JSON fixture file.
    pub async fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await.map_err(|e| {
            AppError::InternalServerError(format!(
                "failed to read fixture {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let fixture: Fixture = serde_json::from_str(&raw)
            .map_err(|e| AppError::InternalServerError(format!("invalid fixture: {}", e)))?;

        let store = Self::new();
        store.load_fixture(fixture).await?;
        Ok(store)
    }

    pub async fn load_fixture(&self, fixture: Fixture) -> Result<(), AppError> {
        let mut course_ids = BTreeMap::new();
        for course in fixture.courses {
            let created = self.add_course(&course.name).await;
            course_ids.insert(course.key, created.id);
        }

        for name in fixture.students {
            self.add_student(&name).await;
        }

        for entry in fixture.tests {
            let mut new_test = entry.test;
            if let Some(key) = entry.course {
                let id = course_ids.get(&key).copied().ok_or_else(|| {
                    AppError::InternalServerError(format!(
                        "fixture references unknown course '{}'",
                        key
                    ))
                })?;
                new_test.course_id = Some(id);
            }

            let test = self.add_test(new_test).await;
            for mut question in entry.questions {
                question.test_id = Some(test.id);
                question.course_id = question.course_id.or(test.course_id);
                self.add_question(question).await;
            }
        }

        Ok(())
    }

    pub async fn add_course(&self, name: &str) -> Course {
        let mut inner = self.inner.write().await;
        let course = Course {
            id: inner.allocate_id(),
            name: name.to_string(),
        };
        inner.courses.insert(course.id, course.clone());
        course
    }

    pub async fn add_student(&self, name: &str) -> Student {
        let mut inner = self.inner.write().await;
        let student = Student {
            id: inner.allocate_id(),
            name: name.to_string(),
        };
        inner.students.insert(student.id, student.clone());
        student
    }

    pub async fn add_test(&self, new: NewTest) -> Test {
        let mut inner = self.inner.write().await;
        let test = Test {
            id: inner.allocate_id(),
            name: new.name,
            course_id: new.course_id,
            course_name: new.course_name,
            description: new.description,
            duration_minutes: new.duration_minutes,
            marks_per_question: new.marks_per_question,
            negative_marking: new.negative_marking,
            created_at: Some(chrono::Utc::now()),
        };
        inner.tests.insert(test.id, test.clone());
        test
    }

    pub async fn add_question(&self, new: NewQuestion) -> Question {
        let mut inner = self.inner.write().await;
        let question = Question {
            id: inner.allocate_id(),
            test_id: new.test_id,
            course_id: new.course_id,
            content: new.content,
            options: Json(new.options),
            correct_answer: Json(new.correct_answer),
            marks: new.marks,
            negative_marks: new.negative_marks,
            created_at: Some(chrono::Utc::now()),
        };
        inner.questions.insert(question.id, question.clone());
        question
    }

    /// Renames a student in place. Stored results keep the old name.
    pub async fn rename_student(&self, id: i64, name: &str) -> bool {
        let mut inner = self.inner.write().await;
        match inner.students.get_mut(&id) {
            Some(student) => {
                student.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub async fn result_count(&self) -> usize {
        self.inner.read().await.results.len()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Fails `student_name` and `course_name` only; tests and results stay readable.
    pub fn set_fail_name_lookups(&self, fail: bool) {
        self.fail_name_lookups.store(fail, Ordering::Relaxed);
    }

    fn check_name_lookup(&self) -> Result<(), AppError> {
        self.check_read()?;
        if self.fail_name_lookups.load(Ordering::Relaxed) {
            return Err(AppError::storage("memory store: name lookups disabled"));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), AppError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(AppError::storage("memory store: reads disabled"));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(AppError::storage("memory store: writes disabled"));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_test(&self, id: i64) -> Result<Option<Test>, AppError> {
        self.check_read()?;
        Ok(self.inner.read().await.tests.get(&id).cloned())
    }

    async fn questions_for_test(&self, test_id: i64) -> Result<Vec<Question>, AppError> {
        self.check_read()?;
        let inner = self.inner.read().await;
        Ok(inner
            .questions
            .values()
            .filter(|q| q.test_id == Some(test_id))
            .cloned()
            .collect())
    }

    async fn student_name(&self, id: i64) -> Result<Option<String>, AppError> {
        self.check_name_lookup()?;
        Ok(self.inner.read().await.students.get(&id).map(|s| s.name.clone()))
    }

    async fn course_name(&self, id: i64) -> Result<Option<String>, AppError> {
        self.check_name_lookup()?;
        Ok(self.inner.read().await.courses.get(&id).map(|c| c.name.clone()))
    }

    async fn insert_result(&self, result: NewTestResult) -> Result<TestResult, AppError> {
        self.check_write()?;
        let mut inner = self.inner.write().await;
        let id = inner.allocate_id();
        let stored = result.into_result(id);
        inner.results.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_result(&self, id: i64) -> Result<Option<TestResult>, AppError> {
        self.check_read()?;
        Ok(self.inner.read().await.results.get(&id).cloned())
    }

    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<TestResult>, AppError> {
        self.check_read()?;
        let inner = self.inner.read().await;
        let mut rows: Vec<TestResult> = inner
            .results
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn questions_are_scoped_to_their_test() {
        let store = MemoryStore::new();
        let t1 = store.add_test(NewTest { name: "T1".into(), ..Default::default() }).await;
        let t2 = store.add_test(NewTest { name: "T2".into(), ..Default::default() }).await;
        for (test_id, answer) in [(t1.id, "A"), (t2.id, "B"), (t1.id, "C")] {
            store
                .add_question(NewQuestion {
                    test_id: Some(test_id),
                    content: "?".into(),
                    correct_answer: answer.into(),
                    ..Default::default()
                })
                .await;
        }

        let questions = store.questions_for_test(t1.id).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn failure_injection_surfaces_storage_errors() {
        let store = MemoryStore::new();
        store.set_fail_reads(true);
        assert!(matches!(store.find_test(1).await, Err(AppError::Storage { .. })));
        store.set_fail_reads(false);
        assert!(store.find_test(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn name_lookup_failures_leave_other_reads_working() {
        let store = MemoryStore::new();
        let student = store.add_student("Asha").await;
        let test = store.add_test(NewTest { name: "T1".into(), ..Default::default() }).await;
        store.set_fail_name_lookups(true);

        assert!(store.student_name(student.id).await.is_err());
        assert!(store.course_name(1).await.is_err());
        assert!(store.find_test(test.id).await.unwrap().is_some());
        assert!(store.list_results(&ResultFilter::default()).await.is_ok());
    }

    #[tokio::test]
    async fn fixture_links_tests_to_courses() {
        let fixture: Fixture = serde_json::from_value(json!({
            "courses": [{ "key": "jee", "name": "JEE Foundation" }],
            "students": ["Asha"],
            "tests": [{
                "course": "jee",
                "name": "Physics Mock 1",
                "marksPerQuestion": 4,
                "negativeMarking": 1,
                "questions": [
                    { "content": "g on earth?", "options": ["9.8", "10"], "correctAnswer": "9.8" }
                ]
            }]
        }))
        .unwrap();

        let store = MemoryStore::new();
        store.load_fixture(fixture).await.unwrap();

        let inner = store.inner.read().await;
        let test = inner.tests.values().next().unwrap();
        let course = inner.courses.values().next().unwrap();
        assert_eq!(test.course_id, Some(course.id));
        assert_eq!(test.negative_marking, Some(1.0));
        let question = inner.questions.values().next().unwrap();
        assert_eq!(question.test_id, Some(test.id));
        assert_eq!(inner.students.len(), 1);
    }
}
