//! Board view: tasks grouped by status in kanban columns
//!
//! Column membership is derived from each task's status; within a column
//! tasks keep their relative order from the global sequence.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::cli::tui::app::App;
use crate::cli::tui::utils::{deadline_label, truncate_str};
use crate::domain::{Task, TaskStatus};

/// Draw the board layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Columns
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(main_chunks[0]);

    for (idx, status) in TaskStatus::ALL.iter().enumerate() {
        draw_column(frame, app, *status, columns[idx]);
    }

    super::status_bar(frame, app, main_chunks[1]);
}

fn draw_column(frame: &mut Frame, app: &App, status: TaskStatus, area: Rect) {
    let focused = app.column() == status;
    let dragging = app.dragging();

    let tasks: Vec<&Task> = app
        .render_tasks()
        .iter()
        .filter(|t| t.status == status)
        .collect();

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let is_dragged = dragging == Some(&task.id);
            let style = if is_dragged {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                column_style(status)
            };
            let priority = task
                .priority
                .map(|p| format!("P{} ", p))
                .unwrap_or_default();
            let line = format!(
                "{}{} ({})",
                priority,
                truncate_str(&task.name, 22),
                deadline_label(task.deadline, app.today())
            );
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!("{} ({})", status.title(), tasks.len());
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        column_style(status)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused && !tasks.is_empty() {
        state.select(Some(app.cursor().min(tasks.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn column_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Todo => Style::default().fg(Color::Green),
        TaskStatus::InProgress => Style::default().fg(Color::Yellow),
        TaskStatus::Done => Style::default().fg(Color::DarkGray),
    }
}
