//! TUI views
//!
//! One module per view mode, plus the status bar and form overlay shared
//! by all of them.

pub mod board;
pub mod chat;
pub mod list;
pub mod summary;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, ConfirmAction, FormField, InputMode, TaskForm};
use super::utils::truncate_str;
use super::ViewMode;

/// Draw overlays that sit on top of any view (the task form)
pub fn draw_overlays(frame: &mut Frame, app: &App) {
    match app.input_mode() {
        InputMode::NewTask(form) => draw_form(frame, form, "New Task"),
        InputMode::EditTask(_, form) => draw_form(frame, form, "Edit Task"),
        _ => {}
    }
}

/// Draw the shared status bar
pub fn status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = match app.status_message() {
                Some(msg) => msg.to_string(),
                None if app.dragging().is_some() => {
                    "j/k:move h/l:column space/Enter:drop Esc:cancel".to_string()
                }
                None => "space:drag n:new e:edit s:start d:done x:delete \
                         p:prioritize t:estimate i:chat 1-4:views [?]help [q]uit"
                    .to_string(),
            };
            (msg, Style::default())
        }
        InputMode::Confirm(action) => {
            let msg = match action {
                ConfirmAction::CompleteTask(id) => {
                    format!("Complete \"{}\"? [y/n]", task_name(app, id))
                }
                ConfirmAction::DeleteTask(id) => {
                    format!("Delete \"{}\"? [y/n]", task_name(app, id))
                }
            };
            (msg, Style::default().fg(Color::Yellow))
        }
        InputMode::Chat(draft) => (
            format!("Chat: {}_", draft),
            Style::default().fg(Color::Green),
        ),
        InputMode::NewTask(_) | InputMode::EditTask(..) => (
            "Tab:next field Enter:save Esc:cancel".to_string(),
            Style::default().fg(Color::Green),
        ),
    };

    let view_str = match app.view_mode() {
        ViewMode::List => "[1:List]",
        ViewMode::Board => "[2:Board]",
        ViewMode::Summary => "[3:Summary]",
        ViewMode::Chat => "[4:Chat]",
    };

    let busy = app
        .ai_busy()
        .map(|b| format!(" [{}...]", b))
        .unwrap_or_default();

    let status_text = format!("PlanWise {}{} {}", view_str, busy, content);

    let paragraph = Paragraph::new(status_text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn task_name(app: &App, id: &crate::domain::TaskId) -> String {
    app.render_tasks()
        .iter()
        .find(|t| t.id == *id)
        .map(|t| truncate_str(&t.name, 30))
        .unwrap_or_else(|| id.to_string())
}

/// Draw the task form as a centered overlay
fn draw_form(frame: &mut Frame, form: &TaskForm, title: &str) {
    let area = centered_rect(60, 12, frame.area());
    frame.render_widget(Clear, area);

    let fields = [
        (FormField::Name, form.name.as_str()),
        (FormField::Description, form.description.as_str()),
        (FormField::Deadline, form.deadline.as_str()),
        (FormField::Category, form.category.label()),
        (FormField::Estimate, form.estimate.as_str()),
    ];

    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(field, value)| {
            let marker = if *field == form.field { "> " } else { "  " };
            let cursor = if *field == form.field && *field != FormField::Category {
                "_"
            } else {
                ""
            };
            let style = if *field == form.field {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::styled(
                format!("{}{}: {}{}", marker, field.label(), value, cursor),
                style,
            )
        })
        .collect();

    lines.push(Line::raw(""));
    match &form.error {
        Some(error) => lines.push(Line::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )),
        None => lines.push(Line::styled(
            "Left/Right cycles category; estimate like \"2 hours\" (optional)",
            Style::default().fg(Color::DarkGray),
        )),
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(paragraph, area);
}

/// A fixed-size rect centered in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
