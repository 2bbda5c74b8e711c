// src/services/names.rs

use std::collections::HashMap;

use crate::{models::test::Test, store::Store};

/// Best-effort display-name lookups for one request.
///
/// Every lookup returns `Option<String>`: a missing record and a failed
/// query both come back as `None` (failures are logged). Answers are cached
/// per id so listing many results for one student costs one query.
pub struct NameResolver<'a> {
    store: &'a dyn Store,
    students: HashMap<i64, Option<String>>,
    courses: HashMap<i64, Option<String>>,
    tests: HashMap<i64, Option<Test>>,
}

impl<'a> NameResolver<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self {
            store,
            students: HashMap::new(),
            courses: HashMap::new(),
            tests: HashMap::new(),
        }
    }

    pub async fn student_name(&mut self, id: i64) -> Option<String> {
        if let Some(cached) = self.students.get(&id) {
            return cached.clone();
        }
        let name = match self.store.student_name(id).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Student name lookup failed for {}: {}", id, e);
                None
            }
        };
        self.students.insert(id, name.clone());
        name
    }

    pub async fn course_name(&mut self, id: i64) -> Option<String> {
        if let Some(cached) = self.courses.get(&id) {
            return cached.clone();
        }
        let name = match self.store.course_name(id).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Course name lookup failed for {}: {}", id, e);
                None
            }
        };
        self.courses.insert(id, name.clone());
        name
    }

    pub async fn test(&mut self, id: i64) -> Option<Test> {
        if let Some(cached) = self.tests.get(&id) {
            return cached.clone();
        }
        let test = match self.store.find_test(id).await {
            Ok(test) => test,
            Err(e) => {
                tracing::warn!("Test lookup failed for {}: {}", id, e);
                None
            }
        };
        self.tests.insert(id, test.clone());
        test
    }

    /// The test's own cached course name, else the name of the course it points to.
    pub async fn course_name_for_test(&mut self, test: &Test) -> Option<String> {
        if let Some(name) = test.course_name.as_ref().filter(|n| !n.is_empty()) {
            return Some(name.clone());
        }
        match test.course_id {
            Some(course_id) => self.course_name(course_id).await,
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::test::NewTest, store::MemoryStore};

    #[tokio::test]
    async fn failed_lookups_degrade_to_none() {
        let store = MemoryStore::new();
        let student = store.add_student("Ravi").await;
        store.set_fail_reads(true);

        let mut names = NameResolver::new(&store);
        assert_eq!(names.student_name(student.id).await, None);
        assert_eq!(names.course_name(1).await, None);
        assert!(names.test(1).await.is_none());
    }

    #[tokio::test]
    async fn lookups_are_cached_per_resolver() {
        let store = MemoryStore::new();
        let student = store.add_student("Ravi").await;

        let mut names = NameResolver::new(&store);
        assert_eq!(names.student_name(student.id).await.as_deref(), Some("Ravi"));

        store.rename_student(student.id, "Ravi Kumar").await;
        assert_eq!(names.student_name(student.id).await.as_deref(), Some("Ravi"));

        let mut fresh = NameResolver::new(&store);
        assert_eq!(fresh.student_name(student.id).await.as_deref(), Some("Ravi Kumar"));
    }

    #[tokio::test]
    async fn test_course_name_takes_precedence() {
        let store = MemoryStore::new();
        let course = store.add_course("NEET Crash Course").await;
        let cached = store
            .add_test(NewTest {
                name: "Biology 1".into(),
                course_id: Some(course.id),
                course_name: Some("NEET 2026".into()),
                ..Default::default()
            })
            .await;
        let linked = store
            .add_test(NewTest {
                name: "Biology 2".into(),
                course_id: Some(course.id),
                course_name: Some(String::new()),
                ..Default::default()
            })
            .await;

        let mut names = NameResolver::new(&store);
        assert_eq!(names.course_name_for_test(&cached).await.as_deref(), Some("NEET 2026"));
        assert_eq!(
            names.course_name_for_test(&linked).await.as_deref(),
            Some("NEET Crash Course")
        );
    }
}
