//! Score summary after completing an attempt.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::taking::{ScoreResult, TakingSession};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else {
        return;
    };
    let score = session.score();
    let grade_color = get_grade_color(score.percentage);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], session, score, grade_color);
    render_question_breakdown(frame, chunks[2], session, app.results_scroll);
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: u8) -> Color {
    match percentage {
        80..=100 => Color::Green,
        60..=79 => Color::Cyan,
        40..=59 => Color::Yellow,
        _ => Color::Red,
    }
}

/// Encouragement tiers shown under the score.
fn encouragement(percentage: u8) -> &'static str {
    if percentage >= 80 {
        "Excellent work!"
    } else if percentage >= 60 {
        "Good job!"
    } else {
        "Keep practicing!"
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    session: &TakingSession,
    score: ScoreResult,
    grade_color: Color,
) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(session.quiz().title.as_str().fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{}%  ·  You scored {} out of {}",
                score.percentage, score.correct_count, score.total
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(encouragement(score.percentage).fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    session: &TakingSession,
    scroll: usize,
) {
    let lines: Vec<Line> = session
        .quiz()
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let (symbol, color) = if session.question_correct(&question.id) {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            let preview = truncate_question(&question.text);

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(preview, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r review answers  ·  d dashboard  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
