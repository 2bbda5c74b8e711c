// src/services/mod.rs

pub mod grading;
pub mod names;
pub mod reporting;
