//! Persistence boundary for the quiz catalog.
//!
//! The engines never assume a storage technology; they talk to a
//! [`QuizStore`]. [`MemoryStore`] is the process-local implementation used by
//! the single-user terminal app.

mod memory;

use std::fmt;

use crate::models::{Quiz, QuizSummary};

pub use memory::MemoryStore;

/// Filter for catalog listings.
#[derive(Debug, Clone, Default)]
pub struct QuizFilter {
    /// Case-insensitive title substring, the dashboard search box.
    pub title_contains: Option<String>,
}

impl QuizFilter {
    /// Filter matching every quiz.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn title_contains(needle: impl Into<String>) -> Self {
        Self {
            title_contains: Some(needle.into()),
        }
    }

    fn matches(&self, title: &str) -> bool {
        match &self.title_contains {
            Some(needle) => title.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

/// Failure at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No quiz with the requested id.
    NotFound(String),
    /// The backing storage rejected the operation.
    Persistence(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Quiz not found: {}", id),
            Self::Persistence(message) => write!(f, "Storage failure: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

/// Load/save interface the engines delegate storage to.
pub trait QuizStore {
    /// Fetch a quiz by id.
    fn load_quiz(&self, id: &str) -> Result<Quiz, StoreError>;

    /// Persist a quiz, returning its id. Saving an existing id replaces the
    /// stored quiz.
    fn save_quiz(&mut self, quiz: Quiz) -> Result<String, StoreError>;

    /// Catalog rows matching the filter.
    fn list_quizzes(&self, filter: &QuizFilter) -> Vec<QuizSummary>;
}
