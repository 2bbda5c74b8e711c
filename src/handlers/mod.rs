// src/handlers/mod.rs

pub mod health;
pub mod test_results;
pub mod test_submission;
