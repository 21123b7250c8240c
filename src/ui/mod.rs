mod dashboard;
mod editor;
mod results;
mod taking;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

    match app.screen {
        Screen::Dashboard => dashboard::render(frame, chunks[0], app),
        Screen::Editor => editor::render(frame, chunks[0], app),
        Screen::Taking => taking::render(frame, chunks[0], app),
        Screen::Results => results::render(frame, chunks[0], app),
    }

    render_status(frame, chunks[1], app);
}

/// Bottom status line for save confirmations and rejected operations.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = &app.status else {
        return;
    };
    let color = if status.is_error {
        Color::Red
    } else {
        Color::Green
    };
    let widget = Paragraph::new(status.text.as_str())
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}
