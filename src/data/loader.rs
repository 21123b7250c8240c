use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::models::Quiz;

/// Error loading or saving a quiz catalog file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read or written.
    Io(io::Error),
    /// The file contents are not a valid quiz catalog.
    Parse(serde_json::Error),
    /// The catalog parsed but a quiz violates the model invariants.
    Invalid { quiz_id: String, reason: &'static str },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Parse(e) => write!(f, "Invalid catalog JSON: {}", e),
            LoadError::Invalid { quiz_id, reason } => {
                write!(f, "Invalid quiz {}: {}", quiz_id, reason)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// Load a quiz catalog from a JSON file.
///
/// External catalogs must already satisfy the model invariants the editor
/// enforces interactively, so every quiz is checked before any is returned.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Quiz>, LoadError> {
    let contents = fs::read_to_string(path)?;
    let quizzes: Vec<Quiz> = serde_json::from_str(&contents)?;

    for quiz in &quizzes {
        check_quiz(quiz)?;
    }

    Ok(quizzes)
}

/// Write a quiz catalog as pretty-printed JSON.
pub fn save_catalog<P: AsRef<Path>>(path: P, quizzes: &[Quiz]) -> Result<(), LoadError> {
    let json = serde_json::to_string_pretty(quizzes)?;
    fs::write(path, json)?;
    Ok(())
}

fn check_quiz(quiz: &Quiz) -> Result<(), LoadError> {
    let invalid = |reason| LoadError::Invalid {
        quiz_id: quiz.id.clone(),
        reason,
    };

    if quiz.title.trim().is_empty() {
        return Err(invalid("quiz title is empty"));
    }
    if quiz.questions.is_empty() {
        return Err(invalid("quiz has no questions"));
    }

    for question in &quiz.questions {
        if question.text.trim().is_empty() {
            return Err(invalid("question text is empty"));
        }
        if question.options.len() < 2 {
            return Err(invalid("question has fewer than two options"));
        }
        if question.correct_options().next().is_none() {
            return Err(invalid("question has no correct option"));
        }
        if question.options.iter().any(|o| o.text.trim().is_empty()) {
            return Err(invalid("option text is empty"));
        }
    }

    Ok(())
}
