//! Quiz taking engine.
//!
//! Walks a finalized quiz question-by-question, records answers, computes a
//! score, and reports progress.

mod score;
mod session;

pub use score::{compute_score, ScoreResult};
pub use session::{Answer, AnswerSheet, SessionError, SessionState, TakingSession};
