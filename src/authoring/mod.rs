//! Quiz authoring engine.
//!
//! Owns a draft quiz while it is being edited and gates saving behind the
//! validation rules.

mod draft;

pub use draft::{QuizDraft, StructuralError, ValidationError};
