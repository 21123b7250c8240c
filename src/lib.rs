//! # quiz-studio
//!
//! A terminal application for authoring and taking multiple-choice quizzes.
//!
//! The authoring engine ([`QuizDraft`]) edits a draft quiz and gates saving
//! behind validation; the taking engine ([`TakingSession`]) walks a saved
//! quiz question-by-question and scores the attempt. Both sit on a
//! [`QuizStore`] catalog.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_studio::{Studio, StudioError};
//!
//! fn main() -> Result<(), StudioError> {
//!     // Start with the built-in sample catalog
//!     let studio = Studio::with_sample_quizzes();
//!
//!     // Run the studio in the terminal
//!     studio.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod authoring;
mod data;
mod models;
mod store;
mod taking;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub use app::{App, EditorField, EditorState, Screen, StatusLine};
pub use authoring::{QuizDraft, StructuralError, ValidationError};
pub use data::{load_catalog, save_catalog, LoadError};
pub use models::{AnswerOption, Question, QuestionType, Quiz, QuizSummary};
pub use store::{MemoryStore, QuizFilter, QuizStore, StoreError};
pub use taking::{
    compute_score, Answer, AnswerSheet, ScoreResult, SessionError, SessionState, TakingSession,
};

/// Error type for running the studio.
#[derive(Debug)]
pub enum StudioError {
    /// Error loading the quiz catalog.
    Load(LoadError),
    /// IO error while driving the terminal.
    Io(io::Error),
}

impl std::fmt::Display for StudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudioError::Load(e) => write!(f, "Failed to load quiz catalog: {}", e),
            StudioError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StudioError::Load(e) => Some(e),
            StudioError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for StudioError {
    fn from(err: LoadError) -> Self {
        StudioError::Load(err)
    }
}

impl From<io::Error> for StudioError {
    fn from(err: io::Error) -> Self {
        StudioError::Io(err)
    }
}

/// A studio instance that can be run in the terminal.
pub struct Studio {
    app: App,
}

impl Studio {
    /// Create a studio over any quiz store.
    pub fn new(store: Box<dyn QuizStore>) -> Self {
        Self {
            app: App::new(store),
        }
    }

    /// Create a studio over the built-in sample catalog.
    pub fn with_sample_quizzes() -> Self {
        Self::new(Box::new(MemoryStore::with_sample_quizzes()))
    }

    /// Create a studio over a catalog loaded from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_studio::Studio;
    ///
    /// let studio = Studio::from_json("quizzes.json").expect("Failed to load catalog");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, StudioError> {
        let mut store = MemoryStore::new();
        for quiz in load_catalog(path)? {
            let _ = store.save_quiz(quiz);
        }
        Ok(Self::new(Box::new(store)))
    }

    /// Run the studio in the terminal.
    ///
    /// This will take over the terminal, display the studio UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), StudioError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::StudioTerminal, app: &mut App) -> Result<(), StudioError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.screen {
        Screen::Dashboard => handle_dashboard_input(app, key),
        Screen::Editor => handle_editor_input(app, key),
        Screen::Taking => handle_taking_input(app, key),
        Screen::Results => handle_results_input(app, key),
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('n') => app.open_editor_new(),
            KeyCode::Char('e') => app.open_editor_selected(),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Enter => app.start_selected_quiz(),
        KeyCode::Char(c) => app.search_push(c),
        KeyCode::Backspace => app.search_pop(),
        _ => {}
    }
    false
}

fn handle_editor_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => app.editor_save(),
            KeyCode::Char('n') => app.editor_add_question(),
            KeyCode::Char('d') => app.editor_remove_question(),
            KeyCode::Char('o') => app.editor_add_option(),
            KeyCode::Char('x') => app.editor_remove_option(),
            KeyCode::Char('t') => app.editor_toggle_kind(),
            _ => {}
        }
        return false;
    }

    let on_option = app
        .editor
        .as_ref()
        .is_some_and(|e| matches!(e.focus, EditorField::Option(..)));

    match key.code {
        KeyCode::Esc => app.close_editor(),
        KeyCode::Up | KeyCode::BackTab => app.editor_focus_previous(),
        KeyCode::Down | KeyCode::Tab => app.editor_focus_next(),
        KeyCode::Enter if on_option => app.editor_toggle_correct(),
        KeyCode::Enter => app.editor_focus_next(),
        KeyCode::Char(c) => app.editor_input_char(c),
        KeyCode::Backspace => app.editor_backspace(),
        _ => {}
    }
    false
}

fn handle_taking_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.abandon_session(),
        KeyCode::Up | KeyCode::Char('k') => app.taking_select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.taking_select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.taking_choose(),
        KeyCode::Right | KeyCode::Char('n') => app.taking_next(),
        KeyCode::Left | KeyCode::Char('p') => app.taking_previous(),
        _ => {}
    }
    false
}

fn handle_results_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => app.results_review(),
        KeyCode::Char('d') | KeyCode::Esc => app.close_results(),
        KeyCode::Down | KeyCode::Char('j') => app.results_scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.results_scroll_up(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
