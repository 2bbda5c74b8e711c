// src/store/mod.rs

//! Persistence seam.
//!
//! Handlers never talk to a database directly; they receive an
//! `Arc<dyn Store>` through `AppState`. `PgStore` backs production,
//! `MemoryStore` backs tests and database-less demos.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        question::Question,
        test::Test,
        test_result::{NewTestResult, ResultFilter, TestResult},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_test(&self, id: i64) -> Result<Option<Test>, AppError>;

    /// All questions owned by the test, ordered by id.
    async fn questions_for_test(&self, test_id: i64) -> Result<Vec<Question>, AppError>;

    async fn student_name(&self, id: i64) -> Result<Option<String>, AppError>;

    async fn course_name(&self, id: i64) -> Result<Option<String>, AppError>;

    /// Persists a graded result in a single write and returns it with its new id.
    async fn insert_result(&self, result: NewTestResult) -> Result<TestResult, AppError>;

    async fn find_result(&self, id: i64) -> Result<Option<TestResult>, AppError>;

    /// Results matching `filter`, newest submission first.
    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<TestResult>, AppError>;
}
