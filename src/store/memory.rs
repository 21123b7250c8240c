//! In-memory quiz catalog.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};

use crate::models::{AnswerOption, Question, QuestionType, Quiz, QuizSummary};

use super::{QuizFilter, QuizStore, StoreError};

/// One stored catalog entry.
struct QuizRecord {
    quiz: Quiz,
    last_updated: NaiveDate,
}

/// Process-local [`QuizStore`].
///
/// Holds the catalog for one session; nothing outside the store mutates it.
/// Use [`MemoryStore::with_sample_quizzes`] for the built-in demo catalog.
#[derive(Default)]
pub struct MemoryStore {
    quizzes: HashMap<String, QuizRecord>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the sample catalog.
    pub fn with_sample_quizzes() -> Self {
        let mut store = Self::new();
        for (quiz, last_updated) in sample_quizzes() {
            store.insert_seed(quiz, last_updated);
        }
        store
    }

    /// Seed one quiz with a known modification date, bypassing the
    /// save-time date stamp.
    pub fn insert_seed(&mut self, quiz: Quiz, last_updated: NaiveDate) {
        self.quizzes
            .insert(quiz.id.clone(), QuizRecord { quiz, last_updated });
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// Every stored quiz, for catalog export.
    pub fn quizzes(&self) -> Vec<Quiz> {
        let mut quizzes: Vec<Quiz> = self.quizzes.values().map(|r| r.quiz.clone()).collect();
        quizzes.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        quizzes
    }
}

impl QuizStore for MemoryStore {
    fn load_quiz(&self, id: &str) -> Result<Quiz, StoreError> {
        self.quizzes
            .get(id)
            .map(|record| record.quiz.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save_quiz(&mut self, quiz: Quiz) -> Result<String, StoreError> {
        let id = quiz.id.clone();
        self.quizzes.insert(
            id.clone(),
            QuizRecord {
                quiz,
                last_updated: Utc::now().date_naive(),
            },
        );
        Ok(id)
    }

    fn list_quizzes(&self, filter: &QuizFilter) -> Vec<QuizSummary> {
        let mut summaries: Vec<QuizSummary> = self
            .quizzes
            .values()
            .filter(|record| filter.matches(&record.quiz.title))
            .map(|record| QuizSummary {
                id: record.quiz.id.clone(),
                title: record.quiz.title.clone(),
                question_count: record.quiz.questions.len(),
                last_updated: record.last_updated,
            })
            .collect();
        summaries.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        summaries
    }
}

fn question(
    id: &str,
    text: &str,
    kind: QuestionType,
    options: &[(&str, &str, bool)],
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        kind,
        options: options
            .iter()
            .map(|(id, text, is_correct)| AnswerOption {
                id: (*id).to_string(),
                text: (*text).to_string(),
                is_correct: *is_correct,
            })
            .collect(),
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// The sample catalog: three small quizzes covering both question kinds.
fn sample_quizzes() -> Vec<(Quiz, NaiveDate)> {
    vec![
        (
            Quiz {
                id: "1".to_string(),
                title: "Basic Mathematics".to_string(),
                description: Some(
                    "Test your math knowledge with these basic questions".to_string(),
                ),
                questions: vec![
                    question(
                        "q1",
                        "What is 2 + 2?",
                        QuestionType::Single,
                        &[
                            ("q1-o1", "3", false),
                            ("q1-o2", "4", true),
                            ("q1-o3", "5", false),
                        ],
                    ),
                    question(
                        "q2",
                        "Which of these are prime numbers?",
                        QuestionType::Multiple,
                        &[
                            ("q2-o1", "2", true),
                            ("q2-o2", "4", false),
                            ("q2-o3", "7", true),
                            ("q2-o4", "9", false),
                        ],
                    ),
                ],
            },
            seed_date(2025, 4, 12),
        ),
        (
            Quiz {
                id: "2".to_string(),
                title: "World Geography".to_string(),
                description: Some("Test your knowledge of world geography".to_string()),
                questions: vec![
                    question(
                        "q1",
                        "What is the capital of France?",
                        QuestionType::Single,
                        &[
                            ("q1-o1", "London", false),
                            ("q1-o2", "Berlin", false),
                            ("q1-o3", "Paris", true),
                        ],
                    ),
                    question(
                        "q2",
                        "Which of these countries are in Europe?",
                        QuestionType::Multiple,
                        &[
                            ("q2-o1", "Spain", true),
                            ("q2-o2", "Egypt", false),
                            ("q2-o3", "Italy", true),
                            ("q2-o4", "Japan", false),
                        ],
                    ),
                    question(
                        "q3",
                        "What is the largest continent?",
                        QuestionType::Single,
                        &[
                            ("q3-o1", "Europe", false),
                            ("q3-o2", "Asia", true),
                            ("q3-o3", "Africa", false),
                        ],
                    ),
                ],
            },
            seed_date(2025, 4, 14),
        ),
        (
            Quiz {
                id: "3".to_string(),
                title: "Science: Elements".to_string(),
                description: Some("Test your knowledge of chemical elements".to_string()),
                questions: vec![
                    question(
                        "q1",
                        "What is the chemical symbol for Gold?",
                        QuestionType::Single,
                        &[
                            ("q1-o1", "Go", false),
                            ("q1-o2", "Au", true),
                            ("q1-o3", "Ag", false),
                        ],
                    ),
                    question(
                        "q2",
                        "Which of these are noble gases?",
                        QuestionType::Multiple,
                        &[
                            ("q2-o1", "Helium", true),
                            ("q2-o2", "Oxygen", false),
                            ("q2-o3", "Neon", true),
                            ("q2-o4", "Sodium", false),
                        ],
                    ),
                ],
            },
            seed_date(2025, 4, 15),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_loads_by_id() {
        let store = MemoryStore::with_sample_quizzes();
        assert_eq!(store.len(), 3);

        let quiz = store.load_quiz("2").unwrap();
        assert_eq!(quiz.title, "World Geography");
        assert_eq!(quiz.questions.len(), 3);
    }

    #[test]
    fn loading_an_unknown_id_fails() {
        let store = MemoryStore::with_sample_quizzes();
        assert_eq!(
            store.load_quiz("99"),
            Err(StoreError::NotFound("99".to_string()))
        );
    }

    #[test]
    fn saved_quizzes_come_back_unchanged() {
        let mut store = MemoryStore::new();
        let quiz = sample_quizzes().remove(0).0;
        let id = store.save_quiz(quiz.clone()).unwrap();
        assert_eq!(store.load_quiz(&id).unwrap(), quiz);
    }

    #[test]
    fn saving_an_existing_id_replaces_the_quiz() {
        let mut store = MemoryStore::with_sample_quizzes();
        let mut quiz = store.load_quiz("1").unwrap();
        quiz.title = "Advanced Mathematics".to_string();
        store.save_quiz(quiz).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.load_quiz("1").unwrap().title, "Advanced Mathematics");
    }

    #[test]
    fn listing_reports_question_counts_and_dates() {
        let store = MemoryStore::with_sample_quizzes();
        let summaries = store.list_quizzes(&QuizFilter::all());
        assert_eq!(summaries.len(), 3);

        let geography = summaries.iter().find(|s| s.id == "2").unwrap();
        assert_eq!(geography.question_count, 3);
        assert_eq!(geography.last_updated, seed_date(2025, 4, 14));
    }

    #[test]
    fn listing_filters_by_title_case_insensitively() {
        let store = MemoryStore::with_sample_quizzes();

        let hits = store.list_quizzes(&QuizFilter::title_contains("GEO"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "World Geography");

        assert!(store
            .list_quizzes(&QuizFilter::title_contains("history"))
            .is_empty());
    }
}
