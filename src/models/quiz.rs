use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How many correct answers a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Exactly one option is the answer.
    Single,
    /// Any subset of options can be the answer.
    Multiple,
}

/// One selectable answer within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    /// Unique within the owning question.
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl AnswerOption {
    /// Fresh empty option, not marked correct.
    pub(crate) fn blank() -> Self {
        Self {
            id: new_id(),
            text: String::new(),
            is_correct: false,
        }
    }
}

/// A single quiz question with its answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the owning quiz.
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Fresh single-choice question with two empty options, the shape a new
    /// question takes in the editor.
    pub(crate) fn blank() -> Self {
        Self {
            id: new_id(),
            text: String::new(),
            kind: QuestionType::Single,
            options: vec![AnswerOption::blank(), AnswerOption::blank()],
        }
    }

    /// Look up an option by id.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Iterator over the options currently marked correct.
    pub fn correct_options(&self) -> impl Iterator<Item = &AnswerOption> {
        self.options.iter().filter(|o| o.is_correct)
    }
}

/// A complete quiz as authored and taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Look up a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// Catalog listing row for a stored quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
    pub last_updated: chrono::NaiveDate,
}

/// Generate an id unique within any enclosing quiz or question.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_question_is_single_with_two_options() {
        let question = Question::blank();
        assert_eq!(question.kind, QuestionType::Single);
        assert_eq!(question.options.len(), 2);
        assert!(question.options.iter().all(|o| !o.is_correct));
        assert_ne!(question.options[0].id, question.options[1].id);
    }

    #[test]
    fn question_serializes_with_catalog_field_names() {
        let question = Question {
            id: "q1".to_string(),
            text: "What is 2 + 2?".to_string(),
            kind: QuestionType::Single,
            options: vec![AnswerOption {
                id: "q1-o1".to_string(),
                text: "4".to_string(),
                is_correct: true,
            }],
        };
        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"type\":\"single\""));
        assert!(json.contains("\"isCorrect\":true"));
    }
}
