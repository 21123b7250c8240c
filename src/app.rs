//! Application state: screens, their transient input state, and the
//! bindings from user actions to the authoring and taking engines.
//!
//! All quiz logic lives in the engines; this module only routes actions,
//! keeps cursors, and turns rejected operations into status-line feedback.

use crate::authoring::QuizDraft;
use crate::models::{QuestionType, QuizSummary};
use crate::store::{QuizFilter, QuizStore};
use crate::taking::{Answer, TakingSession};

/// Which screen the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Quiz catalog with title search.
    Dashboard,
    /// Draft editor.
    Editor,
    /// Question-by-question quiz taking.
    Taking,
    /// Score summary after completing an attempt.
    Results,
}

/// One-line feedback at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Field currently focused in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Description,
    /// Text of the question at this index.
    QuestionText(usize),
    /// Option `(question index, option index)`.
    Option(usize, usize),
}

/// Editor screen state: the draft being edited and the focused field.
pub struct EditorState {
    pub draft: QuizDraft,
    pub focus: EditorField,
}

impl EditorState {
    pub fn new(draft: QuizDraft) -> Self {
        Self {
            draft,
            focus: EditorField::Title,
        }
    }

    /// Every focusable field, in visual order.
    fn field_list(&self) -> Vec<EditorField> {
        let mut fields = vec![EditorField::Title, EditorField::Description];
        for (qi, question) in self.draft.questions().iter().enumerate() {
            fields.push(EditorField::QuestionText(qi));
            for oi in 0..question.options.len() {
                fields.push(EditorField::Option(qi, oi));
            }
        }
        fields
    }

    pub fn focus_next(&mut self) {
        let fields = self.field_list();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(current + 1) % fields.len()];
    }

    pub fn focus_previous(&mut self) {
        let fields = self.field_list();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(current + fields.len() - 1) % fields.len()];
    }

    /// Index of the question the focus sits in, if any.
    fn focused_question_index(&self) -> Option<usize> {
        match self.focus {
            EditorField::QuestionText(qi) | EditorField::Option(qi, _) => Some(qi),
            _ => None,
        }
    }

    fn focused_question_id(&self) -> Option<String> {
        self.focused_question_index()
            .and_then(|qi| self.draft.questions().get(qi))
            .map(|q| q.id.clone())
    }

    fn focused_option_ids(&self) -> Option<(String, String)> {
        let EditorField::Option(qi, oi) = self.focus else {
            return None;
        };
        let question = self.draft.questions().get(qi)?;
        let option = question.options.get(oi)?;
        Some((question.id.clone(), option.id.clone()))
    }
}

/// Top-level application state.
pub struct App {
    store: Box<dyn QuizStore>,
    pub screen: Screen,
    /// Dashboard search box contents.
    pub search_input: String,
    /// Catalog rows matching the current search.
    pub summaries: Vec<QuizSummary>,
    /// Dashboard selection cursor.
    pub selected: usize,
    pub editor: Option<EditorState>,
    pub session: Option<TakingSession>,
    /// Option cursor on the taking screen.
    pub option_cursor: usize,
    /// Scroll offset of the results breakdown.
    pub results_scroll: usize,
    pub status: Option<StatusLine>,
}

impl App {
    pub fn new(store: Box<dyn QuizStore>) -> Self {
        let mut app = Self {
            store,
            screen: Screen::Dashboard,
            search_input: String::new(),
            summaries: Vec::new(),
            selected: 0,
            editor: None,
            session: None,
            option_cursor: 0,
            results_scroll: 0,
            status: None,
        };
        app.refresh_summaries();
        app
    }

    pub fn store(&self) -> &dyn QuizStore {
        self.store.as_ref()
    }

    fn refresh_summaries(&mut self) {
        let filter = if self.search_input.trim().is_empty() {
            QuizFilter::all()
        } else {
            QuizFilter::title_contains(self.search_input.trim())
        };
        self.summaries = self.store.list_quizzes(&filter);
        if self.selected >= self.summaries.len() {
            self.selected = self.summaries.len().saturating_sub(1);
        }
    }

    fn selected_quiz_id(&self) -> Option<String> {
        self.summaries.get(self.selected).map(|s| s.id.clone())
    }

    // ----- dashboard -----

    pub fn search_push(&mut self, c: char) {
        self.status = None;
        self.search_input.push(c);
        self.refresh_summaries();
    }

    pub fn search_pop(&mut self) {
        self.status = None;
        self.search_input.pop();
        self.refresh_summaries();
    }

    pub fn select_next(&mut self) {
        if !self.summaries.is_empty() {
            self.selected = (self.selected + 1) % self.summaries.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.summaries.is_empty() {
            self.selected =
                (self.selected + self.summaries.len() - 1) % self.summaries.len();
        }
    }

    /// Open the editor on a fresh draft.
    pub fn open_editor_new(&mut self) {
        self.status = None;
        self.editor = Some(EditorState::new(QuizDraft::new()));
        self.screen = Screen::Editor;
    }

    /// Open the editor on the selected quiz.
    pub fn open_editor_selected(&mut self) {
        self.status = None;
        let Some(id) = self.selected_quiz_id() else {
            return;
        };
        match self.store.load_quiz(&id) {
            Ok(quiz) => {
                self.editor = Some(EditorState::new(QuizDraft::from_quiz(quiz)));
                self.screen = Screen::Editor;
            }
            Err(e) => self.status = Some(StatusLine::error(e.to_string())),
        }
    }

    /// Start a taking session on the selected quiz.
    pub fn start_selected_quiz(&mut self) {
        self.status = None;
        let Some(id) = self.selected_quiz_id() else {
            return;
        };
        match self.store.load_quiz(&id) {
            Ok(quiz) => {
                self.session = Some(TakingSession::new(quiz));
                self.option_cursor = 0;
                self.screen = Screen::Taking;
            }
            Err(e) => self.status = Some(StatusLine::error(e.to_string())),
        }
    }

    // ----- editor -----

    /// Leave the editor, discarding the draft.
    pub fn close_editor(&mut self) {
        self.editor = None;
        self.status = None;
        self.screen = Screen::Dashboard;
    }

    pub fn editor_focus_next(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.focus_next();
        }
    }

    pub fn editor_focus_previous(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.focus_previous();
        }
    }

    pub fn editor_input_char(&mut self, c: char) {
        self.status = None;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match editor.focus {
            EditorField::Title => editor.draft.title.push(c),
            EditorField::Description => editor.draft.description.push(c),
            EditorField::QuestionText(qi) => {
                let Some(question) = editor.draft.questions().get(qi) else {
                    return;
                };
                let id = question.id.clone();
                let mut text = question.text.clone();
                text.push(c);
                let _ = editor.draft.set_question_text(&id, text);
            }
            EditorField::Option(qi, oi) => {
                let Some(question) = editor.draft.questions().get(qi) else {
                    return;
                };
                let Some(option) = question.options.get(oi) else {
                    return;
                };
                let question_id = question.id.clone();
                let option_id = option.id.clone();
                let mut text = option.text.clone();
                text.push(c);
                let _ = editor.draft.set_option_text(&question_id, &option_id, text);
            }
        }
    }

    pub fn editor_backspace(&mut self) {
        self.status = None;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match editor.focus {
            EditorField::Title => {
                editor.draft.title.pop();
            }
            EditorField::Description => {
                editor.draft.description.pop();
            }
            EditorField::QuestionText(qi) => {
                let Some(question) = editor.draft.questions().get(qi) else {
                    return;
                };
                let id = question.id.clone();
                let mut text = question.text.clone();
                text.pop();
                let _ = editor.draft.set_question_text(&id, text);
            }
            EditorField::Option(qi, oi) => {
                let Some(question) = editor.draft.questions().get(qi) else {
                    return;
                };
                let Some(option) = question.options.get(oi) else {
                    return;
                };
                let question_id = question.id.clone();
                let option_id = option.id.clone();
                let mut text = option.text.clone();
                text.pop();
                let _ = editor.draft.set_option_text(&question_id, &option_id, text);
            }
        }
    }

    /// Toggle the focused option's correct flag. On single-choice questions
    /// marking is exclusive; the engine handles both kinds.
    pub fn editor_toggle_correct(&mut self) {
        self.status = None;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let Some((question_id, option_id)) = editor.focused_option_ids() else {
            return;
        };
        let currently = editor
            .draft
            .questions()
            .iter()
            .find(|q| q.id == question_id)
            .and_then(|q| q.option(&option_id))
            .is_some_and(|o| o.is_correct);
        if let Err(e) = editor
            .draft
            .set_option_correct(&question_id, &option_id, !currently)
        {
            self.status = Some(StatusLine::error(e.to_string()));
        }
    }

    /// Switch the focused question between single and multiple choice.
    pub fn editor_toggle_kind(&mut self) {
        self.status = None;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let Some(qi) = editor.focused_question_index() else {
            return;
        };
        let Some(question) = editor.draft.questions().get(qi) else {
            return;
        };
        let id = question.id.clone();
        let kind = match question.kind {
            QuestionType::Single => QuestionType::Multiple,
            QuestionType::Multiple => QuestionType::Single,
        };
        let _ = editor.draft.set_question_kind(&id, kind);
    }

    pub fn editor_add_question(&mut self) {
        self.status = None;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        editor.draft.add_question();
        let qi = editor.draft.questions().len() - 1;
        editor.focus = EditorField::QuestionText(qi);
    }

    /// Remove the question the focus sits in.
    pub fn editor_remove_question(&mut self) {
        self.status = None;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let Some(qi) = editor.focused_question_index() else {
            return;
        };
        let Some(id) = editor.focused_question_id() else {
            return;
        };
        match editor.draft.remove_question(&id) {
            Ok(()) => {
                let last = editor.draft.questions().len() - 1;
                editor.focus = EditorField::QuestionText(qi.min(last));
            }
            Err(e) => self.status = Some(StatusLine::error(e.to_string())),
        }
    }

    /// Append an option to the focused question.
    pub fn editor_add_option(&mut self) {
        self.status = None;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let Some(qi) = editor.focused_question_index() else {
            return;
        };
        let Some(id) = editor.focused_question_id() else {
            return;
        };
        if editor.draft.add_option(&id).is_ok() {
            let last = editor.draft.questions()[qi].options.len() - 1;
            editor.focus = EditorField::Option(qi, last);
        }
    }

    /// Remove the focused option.
    pub fn editor_remove_option(&mut self) {
        self.status = None;
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let EditorField::Option(qi, oi) = editor.focus else {
            return;
        };
        let Some((question_id, option_id)) = editor.focused_option_ids() else {
            return;
        };
        match editor.draft.remove_option(&question_id, &option_id) {
            Ok(()) => {
                let last = editor.draft.questions()[qi].options.len() - 1;
                editor.focus = EditorField::Option(qi, oi.min(last));
            }
            Err(e) => self.status = Some(StatusLine::error(e.to_string())),
        }
    }

    /// Validate the draft and persist it.
    pub fn editor_save(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        match editor.draft.validate_for_save() {
            Ok(quiz) => match self.store.save_quiz(quiz) {
                Ok(_) => {
                    self.editor = None;
                    self.screen = Screen::Dashboard;
                    self.refresh_summaries();
                    self.status = Some(StatusLine::info("Quiz saved"));
                }
                Err(e) => self.status = Some(StatusLine::error(e.to_string())),
            },
            Err(e) => self.status = Some(StatusLine::error(e.message())),
        }
    }

    // ----- taking -----

    /// Leave the taking screen, discarding the attempt.
    pub fn abandon_session(&mut self) {
        self.session = None;
        self.status = None;
        self.screen = Screen::Dashboard;
    }

    fn current_option_count(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.current_question())
            .map(|q| q.options.len())
            .unwrap_or(0)
    }

    pub fn taking_select_next(&mut self) {
        let count = self.current_option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    pub fn taking_select_previous(&mut self) {
        let count = self.current_option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    /// Record the option under the cursor: the choice of a single-choice
    /// question, or a toggle in a multiple-choice selection.
    pub fn taking_choose(&mut self) {
        self.status = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(question) = session.current_question() else {
            return;
        };
        let question_id = question.id.clone();
        let kind = question.kind;
        let Some(option) = question.options.get(self.option_cursor) else {
            return;
        };
        let option_id = option.id.clone();

        let result = match kind {
            QuestionType::Single => session.record_single(&question_id, &option_id),
            QuestionType::Multiple => {
                let selected = !matches!(
                    session.answer(&question_id),
                    Some(Answer::Multiple(ids)) if ids.contains(&option_id)
                );
                session.record_multiple(&question_id, &option_id, selected)
            }
        };
        if let Err(e) = result {
            self.status = Some(StatusLine::error(e.to_string()));
        }
    }

    /// Move to the next question, or to the results once past the last one.
    pub fn taking_next(&mut self) {
        self.status = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.advance() {
            Ok(()) => {
                self.option_cursor = 0;
                if session.current_question().is_none() {
                    self.results_scroll = 0;
                    self.screen = Screen::Results;
                }
            }
            Err(e) => self.status = Some(StatusLine::error(e.to_string())),
        }
    }

    /// Step back to the previous question.
    pub fn taking_previous(&mut self) {
        self.status = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.retreat() {
            Ok(()) => self.option_cursor = 0,
            Err(e) => self.status = Some(StatusLine::error(e.to_string())),
        }
    }

    // ----- results -----

    /// Re-enter the quiz to inspect answers without clearing them.
    pub fn results_review(&mut self) {
        self.status = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.review().is_ok() {
            self.option_cursor = 0;
            self.screen = Screen::Taking;
        }
    }

    /// Back to the dashboard, ending the attempt.
    pub fn close_results(&mut self) {
        self.session = None;
        self.status = None;
        self.screen = Screen::Dashboard;
    }

    pub fn results_scroll_down(&mut self) {
        let max_scroll = self
            .session
            .as_ref()
            .map(|s| s.quiz().questions.len().saturating_sub(1))
            .unwrap_or(0);
        self.results_scroll = (self.results_scroll + 1).min(max_scroll);
    }

    pub fn results_scroll_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::taking::SessionState;

    fn sample_app() -> App {
        App::new(Box::new(MemoryStore::with_sample_quizzes()))
    }

    #[test]
    fn dashboard_lists_and_searches_the_catalog() {
        let mut app = sample_app();
        assert_eq!(app.summaries.len(), 3);

        for c in "geo".chars() {
            app.search_push(c);
        }
        assert_eq!(app.summaries.len(), 1);
        assert_eq!(app.summaries[0].title, "World Geography");

        app.search_pop();
        app.search_pop();
        app.search_pop();
        assert_eq!(app.summaries.len(), 3);
    }

    #[test]
    fn saving_a_valid_draft_extends_the_catalog() {
        let mut app = sample_app();
        app.open_editor_new();
        assert_eq!(app.screen, Screen::Editor);

        {
            let editor = app.editor.as_mut().unwrap();
            editor.draft.title = "Capitals".to_string();
            let q = editor.draft.questions()[0].id.clone();
            editor.draft.set_question_text(&q, "Capital of France?").unwrap();
            for (index, text) in ["Paris", "London"].iter().enumerate() {
                let option_id = editor.draft.questions()[0].options[index].id.clone();
                editor.draft.set_option_text(&q, &option_id, *text).unwrap();
            }
            let correct = editor.draft.questions()[0].options[0].id.clone();
            editor.draft.set_option_correct(&q, &correct, true).unwrap();
        }

        app.editor_save();
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.summaries.len(), 4);
        assert!(app.status.as_ref().is_some_and(|s| !s.is_error));
    }

    #[test]
    fn saving_an_invalid_draft_reports_and_stays_in_the_editor() {
        let mut app = sample_app();
        app.open_editor_new();
        app.editor_save();

        assert_eq!(app.screen, Screen::Editor);
        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert_eq!(status.text, "Please provide a quiz title");
    }

    #[test]
    fn taking_flow_reaches_the_results_screen() {
        let mut app = sample_app();
        // First summary alphabetically is Basic Mathematics (id "1").
        app.start_selected_quiz();
        assert_eq!(app.screen, Screen::Taking);

        // Unanswered: blocked with a status message.
        app.taking_next();
        assert_eq!(app.screen, Screen::Taking);
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));

        // Answer the single-choice question and move on.
        app.taking_select_next();
        app.taking_choose();
        app.taking_next();

        // Answer the multiple-choice question and finish.
        app.taking_choose();
        app.taking_next();
        assert_eq!(app.screen, Screen::Results);

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn review_returns_to_the_last_question_with_answers_intact() {
        let mut app = sample_app();
        app.start_selected_quiz();
        app.taking_choose();
        app.taking_next();
        app.taking_choose();
        app.taking_next();
        assert_eq!(app.screen, Screen::Results);

        app.results_review();
        assert_eq!(app.screen, Screen::Taking);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.state(), SessionState::Answering(1));
        assert_eq!(session.answer_sheet().len(), 2);
    }

    #[test]
    fn editor_focus_walks_every_field() {
        let mut app = sample_app();
        app.open_editor_new();
        let editor = app.editor.as_mut().unwrap();

        // Title, description, one question, two options, then wrap.
        assert_eq!(editor.focus, EditorField::Title);
        editor.focus_next();
        assert_eq!(editor.focus, EditorField::Description);
        editor.focus_next();
        assert_eq!(editor.focus, EditorField::QuestionText(0));
        editor.focus_next();
        assert_eq!(editor.focus, EditorField::Option(0, 0));
        editor.focus_next();
        assert_eq!(editor.focus, EditorField::Option(0, 1));
        editor.focus_next();
        assert_eq!(editor.focus, EditorField::Title);
        editor.focus_previous();
        assert_eq!(editor.focus, EditorField::Option(0, 1));
    }
}
