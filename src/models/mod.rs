// src/models/mod.rs

pub mod course;
pub mod question;
pub mod student;
pub mod submission;
pub mod test;
pub mod test_result;
