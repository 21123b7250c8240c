//! Core data model shared by the authoring and taking engines.

mod quiz;

pub(crate) use quiz::new_id;
pub use quiz::{AnswerOption, Question, QuestionType, Quiz, QuizSummary};
