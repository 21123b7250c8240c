//! Quiz catalog screen with title search.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0]);
    render_search(frame, chunks[1], app);
    render_quiz_list(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "QUIZ STUDIO",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Manage and create your quiz tests".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content), area);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::White)),
        Span::styled(app.search_input.as_str(), Style::default().fg(Color::Yellow)),
        Span::styled("_", Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_quiz_list(frame: &mut Frame, area: Rect, app: &App) {
    if app.summaries.is_empty() {
        let message = if app.search_input.trim().is_empty() {
            "No quizzes yet".to_string()
        } else {
            format!("No quizzes found matching \"{}\"", app.search_input.trim())
        };
        let widget = Paragraph::new(message.fg(Color::DarkGray));
        frame.render_widget(widget, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(app.summaries.len() * 3);
    for (index, summary) in app.summaries.iter().enumerate() {
        let is_selected = index == app.selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(summary.title.as_str(), style),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "     {} questions · updated {}",
                summary.question_count,
                summary.last_updated.format("%Y-%m-%d")
            ),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget =
        Paragraph::new("↑/↓ select  ·  enter take  ·  ctrl-e edit  ·  ctrl-n new  ·  esc quit")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
