//! One participant's attempt at a quiz.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::{Question, QuestionType, Quiz};

use super::score::{self, ScoreResult};

/// Where a participant currently is within an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Viewing the question at this index.
    Answering(usize),
    /// Past the last question; the attempt can be scored.
    Completed,
}

/// A recorded answer, shaped by the kind of question it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// The selected option of a single-choice question.
    Single(String),
    /// The selected option set of a multiple-choice question.
    Multiple(HashSet<String>),
}

/// Map from question id to the participant's recorded answer.
pub type AnswerSheet = HashMap<String, Answer>;

/// A transition or recording the session rejected.
///
/// The session is left exactly as it was, so every failure is safe to retry
/// once the caller fixes the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The current question has no recorded answer yet.
    QuestionUnanswered,
    /// Already at the first question.
    AtFirstQuestion,
    /// The attempt is complete; answering and navigation are over.
    SessionComplete,
    /// The attempt is not complete yet.
    NotComplete,
    /// The question id is not part of this quiz.
    UnknownQuestion,
    /// A single-answer call on a multiple-choice question, or the reverse.
    AnswerKindMismatch,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::QuestionUnanswered => "Answer the current question before moving on",
            Self::AtFirstQuestion => "Already at the first question",
            Self::SessionComplete => "The attempt is already complete",
            Self::NotComplete => "The attempt is not complete yet",
            Self::UnknownQuestion => "No question with that id in this quiz",
            Self::AnswerKindMismatch => "Answer does not match the question kind",
        };
        f.write_str(message)
    }
}

impl std::error::Error for SessionError {}

/// Drives a participant through a quiz's questions in order, records
/// answers, and scores the attempt.
///
/// The session owns its answer sheet for the lifetime of the attempt and
/// never mutates the quiz it reads.
pub struct TakingSession {
    quiz: Quiz,
    state: SessionState,
    answers: AnswerSheet,
}

impl TakingSession {
    /// Start a fresh attempt at the first question with an empty sheet.
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            state: SessionState::Answering(0),
            answers: AnswerSheet::new(),
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Index of the question being viewed, `None` once completed.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Answering(index) => Some(index),
            SessionState::Completed => None,
        }
    }

    /// The question being viewed, `None` once completed.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.quiz.questions.get(i))
    }

    /// The recorded answer for a question, if any.
    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn answer_sheet(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Whether a question counts as answered: a single-choice question needs
    /// a recorded option, a multiple-choice question a non-empty selection.
    pub fn is_answered(&self, question_id: &str) -> bool {
        match self.answers.get(question_id) {
            Some(Answer::Single(_)) => true,
            Some(Answer::Multiple(selected)) => !selected.is_empty(),
            None => false,
        }
    }

    /// How far through the quiz the participant is, as a whole percentage of
    /// questions reached.
    pub fn progress_percentage(&self) -> u8 {
        match self.state {
            SessionState::Answering(index) => {
                score::percentage(index + 1, self.quiz.questions.len())
            }
            SessionState::Completed => 100,
        }
    }

    /// Record the answer to a single-choice question, replacing any earlier
    /// choice.
    pub fn record_single(
        &mut self,
        question_id: &str,
        option_id: &str,
    ) -> Result<(), SessionError> {
        self.check_answering()?;
        let kind = self
            .quiz
            .question(question_id)
            .ok_or(SessionError::UnknownQuestion)?
            .kind;
        if kind != QuestionType::Single {
            return Err(SessionError::AnswerKindMismatch);
        }
        self.answers
            .insert(question_id.to_string(), Answer::Single(option_id.to_string()));
        Ok(())
    }

    /// Add or remove one option from the selection of a multiple-choice
    /// question. Removing an option that was never selected is a no-op.
    pub fn record_multiple(
        &mut self,
        question_id: &str,
        option_id: &str,
        selected: bool,
    ) -> Result<(), SessionError> {
        self.check_answering()?;
        let kind = self
            .quiz
            .question(question_id)
            .ok_or(SessionError::UnknownQuestion)?
            .kind;
        if kind != QuestionType::Multiple {
            return Err(SessionError::AnswerKindMismatch);
        }

        if selected {
            let entry = self
                .answers
                .entry(question_id.to_string())
                .or_insert_with(|| Answer::Multiple(HashSet::new()));
            if let Answer::Multiple(selected_ids) = entry {
                selected_ids.insert(option_id.to_string());
            }
        } else if let Some(Answer::Multiple(selected_ids)) = self.answers.get_mut(question_id) {
            selected_ids.remove(option_id);
        }
        Ok(())
    }

    /// Move to the next question, or complete the attempt past the last one.
    ///
    /// Rejected while the current question is unanswered; the guard lives
    /// here, not in the view layer.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        let SessionState::Answering(index) = self.state else {
            return Err(SessionError::SessionComplete);
        };
        let answered = self
            .quiz
            .questions
            .get(index)
            .is_some_and(|q| self.is_answered(&q.id));
        if !answered {
            return Err(SessionError::QuestionUnanswered);
        }

        self.state = if index + 1 < self.quiz.questions.len() {
            SessionState::Answering(index + 1)
        } else {
            SessionState::Completed
        };
        Ok(())
    }

    /// Step back to the previous question.
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        let SessionState::Answering(index) = self.state else {
            return Err(SessionError::SessionComplete);
        };
        if index == 0 {
            return Err(SessionError::AtFirstQuestion);
        }
        self.state = SessionState::Answering(index - 1);
        Ok(())
    }

    /// Re-enter the quiz at the last question to inspect answers, keeping the
    /// sheet intact.
    pub fn review(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Completed {
            return Err(SessionError::NotComplete);
        }
        self.state = SessionState::Answering(self.quiz.questions.len().saturating_sub(1));
        Ok(())
    }

    /// Score the attempt as recorded so far.
    pub fn score(&self) -> ScoreResult {
        score::compute_score(&self.quiz, &self.answers)
    }

    /// Whether the recorded answer for a question matches exactly.
    pub fn question_correct(&self, question_id: &str) -> bool {
        self.quiz
            .question(question_id)
            .is_some_and(|q| score::question_matches(q, self.answers.get(question_id)))
    }

    fn check_answering(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Answering(_) => Ok(()),
            SessionState::Completed => Err(SessionError::SessionComplete),
        }
    }
}
