//! Chat view: conversation transcript and input line

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::cli::tui::app::{App, ChatRole, InputMode};

/// Draw the chat layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Transcript
            Constraint::Length(3), // Input
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    draw_transcript(frame, app, main_chunks[0]);
    draw_input(frame, app, main_chunks[1]);
    super::status_bar(frame, app, main_chunks[2]);
}

fn draw_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if app.chat_log().is_empty() && !app.chat_pending() {
        lines.push(Line::styled(
            "Ask about your schedule, what to work on next, or how to plan your day.",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for entry in app.chat_log() {
        let (prefix, style) = match entry.role {
            ChatRole::User => ("You: ", Style::default().fg(Color::Green)),
            ChatRole::Assistant => ("AI:  ", Style::default().fg(Color::Cyan)),
        };
        let mut parts = entry.text.lines();
        if let Some(first) = parts.next() {
            lines.push(Line::styled(format!("{}{}", prefix, first), style));
        }
        for rest in parts {
            lines.push(Line::styled(format!("     {}", rest), style));
        }
        lines.push(Line::raw(""));
    }

    if app.chat_pending() {
        lines.push(Line::styled(
            "AI is thinking...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    // Keep the tail of the conversation in view.
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Chat").borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Chat(draft) => (
            format!("{}_", draft),
            Style::default().fg(Color::Green),
        ),
        _ => (
            "press i to type a message".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().title("Message").borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
