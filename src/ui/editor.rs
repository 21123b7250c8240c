//! Draft editor screen.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{App, EditorField, EditorState};
use crate::models::QuestionType;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(editor) = &app.editor else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0]);
    render_draft(frame, chunks[1], editor);
    render_controls(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let content = vec![Line::from(Span::styled(
        "QUIZ EDITOR",
        Style::default().fg(Color::Cyan).bold(),
    ))];
    frame.render_widget(Paragraph::new(content), area);
}

fn render_draft(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let (lines, focus_line) = draft_lines(editor);

    // Keep the focused field roughly centered once the draft outgrows the
    // screen.
    let scroll = focus_line.saturating_sub(area.height as usize / 2);
    let widget = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

/// Flatten the draft into display lines, returning the index of the line
/// holding the focused field.
fn draft_lines(editor: &EditorState) -> (Vec<Line<'_>>, usize) {
    let mut lines = Vec::new();
    let mut focus_line = 0;

    let focused = editor.focus == EditorField::Title;
    if focused {
        focus_line = lines.len();
    }
    lines.push(text_field_line("Title: ", &editor.draft.title, focused));

    let focused = editor.focus == EditorField::Description;
    if focused {
        focus_line = lines.len();
    }
    lines.push(text_field_line(
        "Description: ",
        &editor.draft.description,
        focused,
    ));
    lines.push(Line::from(""));

    for (qi, question) in editor.draft.questions().iter().enumerate() {
        let kind_label = match question.kind {
            QuestionType::Single => "single choice",
            QuestionType::Multiple => "multiple choice",
        };
        lines.push(Line::from(Span::styled(
            format!("Question {}  ·  {}", qi + 1, kind_label),
            Style::default().fg(Color::DarkGray),
        )));

        let focused = editor.focus == EditorField::QuestionText(qi);
        if focused {
            focus_line = lines.len();
        }
        lines.push(text_field_line("  ", &question.text, focused));

        for (oi, option) in question.options.iter().enumerate() {
            let focused = editor.focus == EditorField::Option(qi, oi);
            if focused {
                focus_line = lines.len();
            }

            let marker = match (question.kind, option.is_correct) {
                (QuestionType::Single, true) => "(•)",
                (QuestionType::Single, false) => "( )",
                (QuestionType::Multiple, true) => "[x]",
                (QuestionType::Multiple, false) => "[ ]",
            };
            let marker_style = if option.is_correct {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let text_style = if focused {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(format!("    {} ", marker), marker_style),
                Span::styled(option.text.clone(), text_style),
            ];
            if focused {
                spans.push(Span::styled("_", text_style));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    (lines, focus_line)
}

fn text_field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(label, Style::default().fg(Color::White)),
        Span::styled(value, style),
    ];
    if focused {
        spans.push(Span::styled("_", style));
    }
    Line::from(spans)
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "↑/↓ field  ·  enter mark correct  ·  ^t type  ·  ^n/^d question  ·  ^o/^x option  ·  ^s save  ·  esc discard",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
