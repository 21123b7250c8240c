//! Exact-match scoring of a recorded attempt.

use std::collections::HashSet;

use crate::models::{Question, QuestionType, Quiz};

use super::session::{Answer, AnswerSheet};

/// Outcome of scoring one attempt. Derived from the quiz and the answer
/// sheet, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub correct_count: usize,
    pub total: usize,
    /// Whole percentage in `[0, 100]`, rounded half up.
    pub percentage: u8,
}

/// Score an attempt: each question matches or it doesn't, no partial credit.
///
/// Pure and deterministic; callers recompute freely, for example on every
/// render of a results view.
pub fn compute_score(quiz: &Quiz, answers: &AnswerSheet) -> ScoreResult {
    let correct_count = quiz
        .questions
        .iter()
        .filter(|q| question_matches(q, answers.get(&q.id)))
        .count();
    let total = quiz.questions.len();

    ScoreResult {
        correct_count,
        total,
        percentage: percentage(correct_count, total),
    }
}

/// Whether a recorded answer matches a question exactly.
///
/// A single-choice question matches only when it has exactly one correct
/// option and that option was chosen; zero or several correct flags (a state
/// editing can leave behind) make the question unmatchable rather than a
/// crash. A multiple-choice question matches when the selected set equals
/// the correct set, order irrelevant.
pub(crate) fn question_matches(question: &Question, answer: Option<&Answer>) -> bool {
    match (question.kind, answer) {
        (QuestionType::Single, Some(Answer::Single(selected))) => {
            let mut correct = question.correct_options();
            match (correct.next(), correct.next()) {
                (Some(option), None) => option.id == *selected,
                _ => false,
            }
        }
        (QuestionType::Multiple, Some(Answer::Multiple(selected))) => {
            let correct: HashSet<&str> = question
                .correct_options()
                .map(|o| o.id.as_str())
                .collect();
            selected.len() == correct.len()
                && selected.iter().all(|id| correct.contains(id.as_str()))
        }
        _ => false,
    }
}

/// Whole percentage of `part` in `whole`, rounded half up.
pub(crate) fn percentage(part: usize, whole: usize) -> u8 {
    ((100 * part) as f64 / whole as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;

    fn option(id: &str, is_correct: bool) -> AnswerOption {
        AnswerOption {
            id: id.to_string(),
            text: id.to_string(),
            is_correct,
        }
    }

    fn single_question(id: &str, options: Vec<AnswerOption>) -> Question {
        Question {
            id: id.to_string(),
            text: format!("{} text", id),
            kind: QuestionType::Single,
            options,
        }
    }

    fn multiple_question(id: &str, options: Vec<AnswerOption>) -> Question {
        Question {
            id: id.to_string(),
            text: format!("{} text", id),
            kind: QuestionType::Multiple,
            options,
        }
    }

    fn quiz(questions: Vec<Question>) -> Quiz {
        Quiz {
            id: "quiz".to_string(),
            title: "Scoring".to_string(),
            description: None,
            questions,
        }
    }

    fn single_answer(question_id: &str, option_id: &str) -> (String, Answer) {
        (question_id.to_string(), Answer::Single(option_id.to_string()))
    }

    fn multiple_answer(question_id: &str, option_ids: &[&str]) -> (String, Answer) {
        (
            question_id.to_string(),
            Answer::Multiple(option_ids.iter().map(|id| id.to_string()).collect()),
        )
    }

    #[test]
    fn single_choice_full_marks() {
        let quiz = quiz(vec![single_question(
            "q1",
            vec![option("o1", false), option("o2", true), option("o3", false)],
        )]);
        let answers = AnswerSheet::from([single_answer("q1", "o2")]);

        let result = compute_score(&quiz, &answers);
        assert_eq!(
            result,
            ScoreResult {
                correct_count: 1,
                total: 1,
                percentage: 100,
            }
        );
    }

    #[test]
    fn multiple_choice_matches_regardless_of_selection_order() {
        let quiz = quiz(vec![multiple_question(
            "q1",
            vec![
                option("o1", true),
                option("o2", false),
                option("o3", true),
                option("o4", false),
            ],
        )]);
        // Selected third then first; order never matters.
        let answers = AnswerSheet::from([multiple_answer("q1", &["o3", "o1"])]);

        assert_eq!(compute_score(&quiz, &answers).percentage, 100);
    }

    #[test]
    fn multiple_choice_requires_the_exact_set() {
        let quiz = quiz(vec![multiple_question(
            "q1",
            vec![
                option("o1", true),
                option("o2", false),
                option("o3", true),
                option("o4", false),
            ],
        )]);

        for selected in [&["o1", "o2"][..], &["o1"][..], &["o1", "o3", "o4"][..]] {
            let answers = AnswerSheet::from([multiple_answer("q1", selected)]);
            let result = compute_score(&quiz, &answers);
            assert_eq!(result.correct_count, 0);
            assert_eq!(result.percentage, 0);
        }
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        let quiz = quiz(vec![
            single_question("q1", vec![option("o1", true), option("o2", false)]),
            multiple_question("q2", vec![option("o3", true), option("o4", false)]),
        ]);
        let answers = AnswerSheet::from([single_answer("q1", "o1")]);

        let result = compute_score(&quiz, &answers);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.percentage, 50);
    }

    #[test]
    fn malformed_single_questions_never_match() {
        // Zero correct options, and several correct options: both states are
        // reachable through editing and both simply score as incorrect.
        let quiz = quiz(vec![
            single_question("q1", vec![option("o1", false), option("o2", false)]),
            single_question("q2", vec![option("o3", true), option("o4", true)]),
        ]);
        let answers =
            AnswerSheet::from([single_answer("q1", "o1"), single_answer("q2", "o3")]);

        assert_eq!(compute_score(&quiz, &answers).correct_count, 0);
    }

    #[test]
    fn answer_of_the_wrong_shape_never_matches() {
        let quiz = quiz(vec![single_question(
            "q1",
            vec![option("o1", true), option("o2", false)],
        )]);
        let answers = AnswerSheet::from([multiple_answer("q1", &["o1"])]);

        assert_eq!(compute_score(&quiz, &answers).correct_count, 0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 4), 0);
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn scoring_is_deterministic() {
        let quiz = quiz(vec![
            single_question("q1", vec![option("o1", true), option("o2", false)]),
            multiple_question("q2", vec![option("o3", true), option("o4", true)]),
        ]);
        let answers = AnswerSheet::from([
            single_answer("q1", "o1"),
            multiple_answer("q2", &["o3", "o4"]),
        ]);

        let first = compute_score(&quiz, &answers);
        let second = compute_score(&quiz, &answers);
        assert_eq!(first, second);
        assert_eq!(first.percentage, 100);
    }
}
