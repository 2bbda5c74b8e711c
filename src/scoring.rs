// src/scoring.rs

//! Test scoring.
//!
//! Pure functions only: everything here works on data already loaded from
//! the store, so grading rules can be tested without a database.

use std::collections::{HashMap, HashSet};

use crate::{
    config::{DEFAULT_MARKS_PER_QUESTION, DEFAULT_NEGATIVE_MARKING},
    models::{
        question::Question, submission::AnswerValue, test::Test, test_result::QuestionOutcome,
    },
};

/// Test-level marking defaults, already resolved against the global defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkingScheme {
    pub marks_per_question: f64,
    pub negative_marking: f64,
}

impl MarkingScheme {
    pub fn for_test(test: &Test) -> Self {
        Self {
            marks_per_question: test.marks_per_question.unwrap_or(DEFAULT_MARKS_PER_QUESTION),
            negative_marking: test.negative_marking.unwrap_or(DEFAULT_NEGATIVE_MARKING),
        }
    }

    pub fn marks_for(&self, question: &Question) -> f64 {
        question.marks.unwrap_or(self.marks_per_question)
    }

    pub fn negative_marks_for(&self, question: &Question) -> f64 {
        question.negative_marks.unwrap_or(self.negative_marking)
    }
}

/// Aggregate outcome of one submission, before names and timestamps are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub outcomes: Vec<QuestionOutcome>,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    pub unanswered: i64,
    pub total_marks: f64,
    /// Clamped at zero.
    pub obtained_marks: f64,
    pub negative_marks_total: f64,
    pub percentage: i64,
    /// Non-blank answers whose question id is not part of this test. Ignored for grading.
    pub stray_answers: usize,
}

/// Grades `answers` against the questions of `test`.
///
/// Questions are graded in the order given. Every question contributes its
/// marks to the total, answered or not. A wrong answer costs the question's
/// negative marks; a blank one costs nothing.
pub fn score_submission(
    test: &Test,
    questions: &[Question],
    answers: &HashMap<i64, AnswerValue>,
) -> Scorecard {
    let scheme = MarkingScheme::for_test(test);

    let mut outcomes = Vec::with_capacity(questions.len());
    let mut total_marks = 0.0;
    let mut raw_obtained = 0.0;
    let mut negative_marks_total = 0.0;
    let mut correct_answers = 0;
    let mut wrong_answers = 0;

    for question in questions {
        let marks = scheme.marks_for(question);
        let negative_marks = scheme.negative_marks_for(question);
        total_marks += marks;

        let submitted = answers.get(&question.id).filter(|a| a.is_answered());
        let correct_answer = question.correct_answer.0.clone();

        let outcome = match submitted {
            None => QuestionOutcome {
                question_id: question.id,
                student_answer: AnswerValue::default(),
                correct_answer,
                is_correct: false,
                marks_awarded: 0.0,
                negative_marks: 0.0,
            },
            Some(answer) if answer.strictly_equals(&correct_answer) => {
                correct_answers += 1;
                raw_obtained += marks;
                QuestionOutcome {
                    question_id: question.id,
                    student_answer: answer.clone(),
                    correct_answer,
                    is_correct: true,
                    marks_awarded: marks,
                    negative_marks: 0.0,
                }
            }
            Some(answer) => {
                wrong_answers += 1;
                raw_obtained -= negative_marks;
                negative_marks_total += negative_marks;
                QuestionOutcome {
                    question_id: question.id,
                    student_answer: answer.clone(),
                    correct_answer,
                    is_correct: false,
                    marks_awarded: 0.0,
                    negative_marks,
                }
            }
        };
        outcomes.push(outcome);
    }

    let own_ids: HashSet<i64> = questions.iter().map(|q| q.id).collect();
    let stray_answers = answers
        .iter()
        .filter(|(id, answer)| answer.is_answered() && !own_ids.contains(*id))
        .count();

    let total_questions = questions.len() as i64;
    let obtained_marks = f64::max(raw_obtained, 0.0);

    Scorecard {
        outcomes,
        total_questions,
        correct_answers,
        wrong_answers,
        unanswered: total_questions - correct_answers - wrong_answers,
        total_marks,
        obtained_marks,
        negative_marks_total,
        percentage: percentage(obtained_marks, total_marks),
        stray_answers,
    }
}

/// `round(max(0, obtained) / total * 100)`, or 0 for a test worth nothing.
pub fn percentage(obtained: f64, total: f64) -> i64 {
    if total <= 0.0 {
        return 0;
    }
    (obtained.max(0.0) / total * 100.0).round() as i64
}
