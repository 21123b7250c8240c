//! Draft editing operations and save validation.

use std::fmt;

use crate::models::{new_id, AnswerOption, Question, QuestionType, Quiz};

/// Message shown when removing the last remaining question.
const MIN_QUESTIONS_MESSAGE: &str = "You must have at least one question";
/// Message shown when removing an option from a question at the floor.
const MIN_OPTIONS_MESSAGE: &str = "Each question must have at least two options";

/// A rule violated when saving a draft.
///
/// Reported to the caller with the draft untouched; the view layer decides
/// how to surface the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyQuestionText { question_id: String },
    NoCorrectOption { question_id: String },
    EmptyOptionText { question_id: String, option_id: String },
}

impl ValidationError {
    /// User-facing message for this violation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "Please provide a quiz title",
            Self::EmptyQuestionText { .. } => "All questions must have text",
            Self::NoCorrectOption { .. } => {
                "Each question must have at least one correct answer"
            }
            Self::EmptyOptionText { .. } => "All options must have text",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// An editing operation that would break the draft's structure.
///
/// The operation is rejected and the draft left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// Removal would drop below the minimum question or option count.
    MinimumCountViolation(&'static str),
    /// The referenced question or option id does not exist in the draft.
    NotFound,
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinimumCountViolation(message) => f.write_str(message),
            Self::NotFound => f.write_str("No question or option with that id"),
        }
    }
}

impl std::error::Error for StructuralError {}

/// A quiz under active authoring.
///
/// Title and description are free-form until save; the question list is only
/// reachable through the editing operations, which hold the count floors.
/// `validate_for_save` gates the transition to a publishable [`Quiz`].
pub struct QuizDraft {
    id: String,
    pub title: String,
    pub description: String,
    questions: Vec<Question>,
}

impl QuizDraft {
    /// Empty draft opened the way the editor starts: one blank single-choice
    /// question with two blank options.
    pub fn new() -> Self {
        Self {
            id: new_id(),
            title: String::new(),
            description: String::new(),
            questions: vec![Question::blank()],
        }
    }

    /// Re-open a saved quiz for editing.
    pub fn from_quiz(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description.unwrap_or_default(),
            questions: quiz.questions,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn question_mut(&mut self, question_id: &str) -> Result<&mut Question, StructuralError> {
        self.questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or(StructuralError::NotFound)
    }

    /// Append a new blank question. Never fails.
    pub fn add_question(&mut self) {
        self.questions.push(Question::blank());
    }

    /// Remove a question, keeping the order of the rest.
    pub fn remove_question(&mut self, question_id: &str) -> Result<(), StructuralError> {
        if self.questions.len() == 1 {
            return Err(StructuralError::MinimumCountViolation(MIN_QUESTIONS_MESSAGE));
        }
        let index = self
            .questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or(StructuralError::NotFound)?;
        self.questions.remove(index);
        Ok(())
    }

    /// Replace a question's text.
    pub fn set_question_text(
        &mut self,
        question_id: &str,
        text: impl Into<String>,
    ) -> Result<(), StructuralError> {
        self.question_mut(question_id)?.text = text.into();
        Ok(())
    }

    /// Change how many correct answers a question accepts.
    ///
    /// Correct flags are left as they are: a question switched away from
    /// single choice and back can carry several correct options until the
    /// next `set_option_correct` call on it re-imposes exclusivity.
    pub fn set_question_kind(
        &mut self,
        question_id: &str,
        kind: QuestionType,
    ) -> Result<(), StructuralError> {
        self.question_mut(question_id)?.kind = kind;
        Ok(())
    }

    /// Replace an option's text.
    pub fn set_option_text(
        &mut self,
        question_id: &str,
        option_id: &str,
        text: impl Into<String>,
    ) -> Result<(), StructuralError> {
        let question = self.question_mut(question_id)?;
        let option = question
            .options
            .iter_mut()
            .find(|o| o.id == option_id)
            .ok_or(StructuralError::NotFound)?;
        option.text = text.into();
        Ok(())
    }

    /// Mark or unmark an option as correct.
    ///
    /// On a single-choice question, marking an option correct clears every
    /// other option of that question; unmarking clears only the named option
    /// and may leave the question without a correct answer, which is allowed
    /// while editing and rejected at save. On a multiple-choice question only
    /// the named option changes.
    pub fn set_option_correct(
        &mut self,
        question_id: &str,
        option_id: &str,
        is_correct: bool,
    ) -> Result<(), StructuralError> {
        let question = self.question_mut(question_id)?;
        if !question.options.iter().any(|o| o.id == option_id) {
            return Err(StructuralError::NotFound);
        }

        if question.kind == QuestionType::Single && is_correct {
            for option in &mut question.options {
                option.is_correct = option.id == option_id;
            }
        } else {
            for option in &mut question.options {
                if option.id == option_id {
                    option.is_correct = is_correct;
                }
            }
        }
        Ok(())
    }

    /// Append a blank option, not marked correct.
    pub fn add_option(&mut self, question_id: &str) -> Result<(), StructuralError> {
        self.question_mut(question_id)?
            .options
            .push(AnswerOption::blank());
        Ok(())
    }

    /// Remove an option from a question.
    pub fn remove_option(
        &mut self,
        question_id: &str,
        option_id: &str,
    ) -> Result<(), StructuralError> {
        let question = self.question_mut(question_id)?;
        if question.options.len() <= 2 {
            return Err(StructuralError::MinimumCountViolation(MIN_OPTIONS_MESSAGE));
        }
        let index = question
            .options
            .iter()
            .position(|o| o.id == option_id)
            .ok_or(StructuralError::NotFound)?;
        question.options.remove(index);
        Ok(())
    }

    /// Check the draft against the save rules and produce the publishable
    /// quiz.
    ///
    /// Rules are checked one at a time across the whole draft — title
    /// non-empty, then question texts, then at least one correct option per
    /// question, then option texts — and the first violation is returned, so
    /// the caller surfaces one message at a time.
    pub fn validate_for_save(&self) -> Result<Quiz, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        if let Some(question) = self.questions.iter().find(|q| q.text.trim().is_empty()) {
            return Err(ValidationError::EmptyQuestionText {
                question_id: question.id.clone(),
            });
        }

        if let Some(question) = self
            .questions
            .iter()
            .find(|q| q.correct_options().next().is_none())
        {
            return Err(ValidationError::NoCorrectOption {
                question_id: question.id.clone(),
            });
        }

        for question in &self.questions {
            if let Some(option) = question.options.iter().find(|o| o.text.trim().is_empty()) {
                return Err(ValidationError::EmptyOptionText {
                    question_id: question.id.clone(),
                    option_id: option.id.clone(),
                });
            }
        }

        Ok(Quiz {
            id: self.id.clone(),
            title: self.title.clone(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            questions: self.questions.clone(),
        })
    }
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Draft with a title and two fully filled-in questions, built through
    /// the editing operations: a single-choice question (second option
    /// correct) and a multiple-choice question with three options (first and
    /// third correct).
    fn filled_draft() -> QuizDraft {
        let mut draft = QuizDraft::new();
        draft.title = "Basic Mathematics".to_string();

        let q1 = draft.questions()[0].id.clone();
        draft.set_question_text(&q1, "What is 2 + 2?").unwrap();
        for (index, text) in ["3", "4"].iter().enumerate() {
            let option_id = draft.questions()[0].options[index].id.clone();
            draft.set_option_text(&q1, &option_id, *text).unwrap();
        }
        let correct = draft.questions()[0].options[1].id.clone();
        draft.set_option_correct(&q1, &correct, true).unwrap();

        draft.add_question();
        let q2 = draft.questions()[1].id.clone();
        draft
            .set_question_text(&q2, "Which of these are prime numbers?")
            .unwrap();
        draft.set_question_kind(&q2, QuestionType::Multiple).unwrap();
        draft.add_option(&q2).unwrap();
        for (index, text) in ["2", "4", "7"].iter().enumerate() {
            let option_id = draft.questions()[1].options[index].id.clone();
            draft.set_option_text(&q2, &option_id, *text).unwrap();
        }
        for index in [0, 2] {
            let option_id = draft.questions()[1].options[index].id.clone();
            draft.set_option_correct(&q2, &option_id, true).unwrap();
        }

        draft
    }

    #[test]
    fn new_draft_opens_with_one_blank_question() {
        let draft = QuizDraft::new();
        assert_eq!(draft.questions().len(), 1);
        assert_eq!(draft.questions()[0].kind, QuestionType::Single);
        assert_eq!(draft.questions()[0].options.len(), 2);
    }

    #[test]
    fn add_question_appends_with_fresh_ids() {
        let mut draft = QuizDraft::new();
        draft.add_question();
        assert_eq!(draft.questions().len(), 2);
        assert_ne!(draft.questions()[0].id, draft.questions()[1].id);
    }

    #[test]
    fn remove_question_keeps_at_least_one() {
        let mut draft = QuizDraft::new();
        let only = draft.questions()[0].id.clone();
        assert!(matches!(
            draft.remove_question(&only),
            Err(StructuralError::MinimumCountViolation(_))
        ));
        assert_eq!(draft.questions().len(), 1);
    }

    #[test]
    fn remove_question_preserves_order() {
        let mut draft = QuizDraft::new();
        draft.add_question();
        draft.add_question();
        let ids: Vec<String> = draft.questions().iter().map(|q| q.id.clone()).collect();

        draft.remove_question(&ids[1]).unwrap();
        let remaining: Vec<&str> = draft.questions().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(remaining, vec![ids[0].as_str(), ids[2].as_str()]);
    }

    #[test]
    fn operations_reject_unknown_ids() {
        let mut draft = QuizDraft::new();
        draft.add_question();
        assert_eq!(
            draft.set_question_text("missing", "text"),
            Err(StructuralError::NotFound)
        );
        assert_eq!(
            draft.set_question_kind("missing", QuestionType::Multiple),
            Err(StructuralError::NotFound)
        );
        assert_eq!(draft.remove_question("missing"), Err(StructuralError::NotFound));

        let q = draft.questions()[0].id.clone();
        assert_eq!(
            draft.set_option_correct(&q, "missing", true),
            Err(StructuralError::NotFound)
        );
        assert_eq!(
            draft.set_option_text(&q, "missing", "text"),
            Err(StructuralError::NotFound)
        );
    }

    #[test]
    fn single_choice_keeps_one_correct_option() {
        let mut draft = QuizDraft::new();
        let q = draft.questions()[0].id.clone();
        draft.add_option(&q).unwrap();
        let option_ids: Vec<String> =
            draft.questions()[0].options.iter().map(|o| o.id.clone()).collect();

        // Marking each option in turn always leaves exactly one correct.
        for option_id in &option_ids {
            draft.set_option_correct(&q, option_id, true).unwrap();
            let correct: Vec<&str> = draft.questions()[0]
                .correct_options()
                .map(|o| o.id.as_str())
                .collect();
            assert_eq!(correct, vec![option_id.as_str()]);
        }
    }

    #[test]
    fn unmarking_under_single_clears_only_that_option() {
        let mut draft = QuizDraft::new();
        let q = draft.questions()[0].id.clone();
        let option_id = draft.questions()[0].options[0].id.clone();
        draft.set_option_correct(&q, &option_id, true).unwrap();
        draft.set_option_correct(&q, &option_id, false).unwrap();
        assert_eq!(draft.questions()[0].correct_options().count(), 0);
    }

    #[test]
    fn multiple_choice_toggles_independently() {
        let mut draft = QuizDraft::new();
        let q = draft.questions()[0].id.clone();
        draft.set_question_kind(&q, QuestionType::Multiple).unwrap();
        let first = draft.questions()[0].options[0].id.clone();
        let second = draft.questions()[0].options[1].id.clone();

        draft.set_option_correct(&q, &first, true).unwrap();
        draft.set_option_correct(&q, &second, true).unwrap();
        assert_eq!(draft.questions()[0].correct_options().count(), 2);

        draft.set_option_correct(&q, &first, false).unwrap();
        let correct: Vec<&str> = draft.questions()[0]
            .correct_options()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(correct, vec![second.as_str()]);
    }

    #[test]
    fn kind_switch_keeps_stray_correct_flags() {
        let mut draft = QuizDraft::new();
        let q = draft.questions()[0].id.clone();
        let first = draft.questions()[0].options[0].id.clone();
        let second = draft.questions()[0].options[1].id.clone();

        draft.set_option_correct(&q, &first, true).unwrap();
        draft.set_question_kind(&q, QuestionType::Multiple).unwrap();
        draft.set_option_correct(&q, &second, true).unwrap();
        draft.set_question_kind(&q, QuestionType::Single).unwrap();

        // Both flags survive the switch back; the next exclusive mark wins.
        assert_eq!(draft.questions()[0].correct_options().count(), 2);
        draft.set_option_correct(&q, &first, true).unwrap();
        let correct: Vec<&str> = draft.questions()[0]
            .correct_options()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(correct, vec![first.as_str()]);
    }

    #[test]
    fn remove_option_keeps_at_least_two() {
        let mut draft = QuizDraft::new();
        let q = draft.questions()[0].id.clone();
        let option_id = draft.questions()[0].options[0].id.clone();
        assert!(matches!(
            draft.remove_option(&q, &option_id),
            Err(StructuralError::MinimumCountViolation(_))
        ));
        assert_eq!(draft.questions()[0].options.len(), 2);

        draft.add_option(&q).unwrap();
        draft.remove_option(&q, &option_id).unwrap();
        assert_eq!(draft.questions()[0].options.len(), 2);
    }

    #[test]
    fn validate_reports_empty_title_first() {
        // Even a fully valid question does not get checked before the title.
        let mut draft = filled_draft();
        draft.title = "  ".to_string();
        assert_eq!(draft.validate_for_save(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn validate_checks_rules_in_order_across_the_whole_draft() {
        // First question lacks a correct option, second has blank text; the
        // text rule runs across every question before the correct-option rule.
        let mut draft = filled_draft();
        let q1 = draft.questions()[0].id.clone();
        let q2 = draft.questions()[1].id.clone();
        let q1_correct = draft.questions()[0].options[1].id.clone();
        draft.set_option_correct(&q1, &q1_correct, false).unwrap();
        draft.set_question_text(&q2, "").unwrap();

        assert_eq!(
            draft.validate_for_save(),
            Err(ValidationError::EmptyQuestionText { question_id: q2 })
        );
    }

    #[test]
    fn validate_reports_missing_correct_option() {
        let mut draft = filled_draft();
        let q1 = draft.questions()[0].id.clone();
        let q1_correct = draft.questions()[0].options[1].id.clone();
        draft.set_option_correct(&q1, &q1_correct, false).unwrap();

        assert_eq!(
            draft.validate_for_save(),
            Err(ValidationError::NoCorrectOption { question_id: q1 })
        );
    }

    #[test]
    fn validate_reports_blank_option_text() {
        let mut draft = filled_draft();
        let q2 = draft.questions()[1].id.clone();
        let option_id = draft.questions()[1].options[1].id.clone();
        draft.set_option_text(&q2, &option_id, "   ").unwrap();

        assert_eq!(
            draft.validate_for_save(),
            Err(ValidationError::EmptyOptionText {
                question_id: q2,
                option_id,
            })
        );
    }

    #[test]
    fn validate_produces_the_quiz() {
        let mut draft = filled_draft();
        draft.description = "Test your math knowledge".to_string();
        let quiz = draft.validate_for_save().unwrap();
        assert_eq!(quiz.title, "Basic Mathematics");
        assert_eq!(quiz.description.as_deref(), Some("Test your math knowledge"));
        assert_eq!(quiz.questions.len(), 2);

        // A blank description saves as no description at all.
        draft.description = " ".to_string();
        assert_eq!(draft.validate_for_save().unwrap().description, None);
    }
}
