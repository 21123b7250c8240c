//! Question-by-question quiz taking screen.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Question, QuestionType};
use crate::taking::{Answer, TakingSession};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else {
        return;
    };
    let Some(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], session);
    render_question_text(frame, chunks[1], question);
    render_options(frame, chunks[2], session, question, app.option_cursor);
    render_controls(frame, chunks[3]);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &TakingSession) {
    let index = session.current_index().unwrap_or(0);
    let total = session.quiz().questions.len();

    let title = Paragraph::new(session.quiz().title.as_str()).fg(Color::White);
    frame.render_widget(title, area);

    let progress = format!(
        "Question {} of {}  ·  {}%",
        index + 1,
        total,
        session.progress_percentage()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let widget = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    session: &TakingSession,
    question: &Question,
    cursor: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_under_cursor = index == cursor;
        let is_selected = option_selected(session, question, &option.id);

        let style = if is_under_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = match (question.kind, is_selected) {
            (QuestionType::Single, true) => "(•)",
            (QuestionType::Single, false) => "( )",
            (QuestionType::Multiple, true) => "[x]",
            (QuestionType::Multiple, false) => "[ ]",
        };
        let marker_style = if is_selected {
            Style::default().fg(Color::Green)
        } else {
            style
        };
        let pointer = if is_under_cursor { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", pointer), style),
            Span::styled(format!("{} ", marker), marker_style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Whether this option is part of the recorded answer.
fn option_selected(session: &TakingSession, question: &Question, option_id: &str) -> bool {
    match session.answer(&question.id) {
        Some(Answer::Single(selected)) => selected == option_id,
        Some(Answer::Multiple(selected)) => selected.contains(option_id),
        None => false,
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "j/k move  ·  space select  ·  p previous  ·  n next/finish  ·  esc dashboard",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
