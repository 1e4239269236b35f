//! List view: every task in the global order

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::cli::tui::app::App;
use crate::cli::tui::utils::{deadline_label, truncate_str};
use crate::domain::{Task, TaskStatus};

/// Draw the list layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Task list
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    draw_task_list(frame, app, main_chunks[0]);
    super::status_bar(frame, app, main_chunks[1]);
}

fn draw_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let dragging = app.dragging();

    let items: Vec<ListItem> = app
        .render_tasks()
        .iter()
        .map(|task| {
            let is_dragged = dragging == Some(&task.id);
            let style = if is_dragged {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                match task.status {
                    TaskStatus::Todo => Style::default(),
                    TaskStatus::InProgress => Style::default().fg(Color::Yellow),
                    TaskStatus::Done => Style::default().fg(Color::DarkGray),
                }
            };
            ListItem::new(task_line(task, app)).style(style)
        })
        .collect();

    let title = format!("Tasks ({})", app.render_tasks().len());
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.render_tasks().is_empty() {
        state.select(Some(app.cursor()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn task_line(task: &Task, app: &App) -> String {
    let indicator = match task.status {
        TaskStatus::Todo => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Done => "[x]",
    };
    let priority = task
        .priority
        .map(|p| format!("P{} ", p))
        .unwrap_or_default();
    let estimate = task
        .estimate
        .map(|e| format!("  ~{}", e))
        .unwrap_or_default();

    format!(
        "{} {}{:<40} {:<10} {:>10}{}",
        indicator,
        priority,
        truncate_str(&task.name, 38),
        task.category.label(),
        deadline_label(task.deadline, app.today()),
        estimate,
    )
}
