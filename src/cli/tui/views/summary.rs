//! Summary view: completion gauge and upcoming workload chart

use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge},
};

use crate::cli::tui::app::App;
use crate::domain::views::{completion, daily_workload};

/// Draw the summary layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Completion gauge
            Constraint::Min(8),    // Workload chart
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    draw_completion(frame, app, main_chunks[0]);
    draw_workload(frame, app, main_chunks[1]);
    super::status_bar(frame, app, main_chunks[2]);
}

fn draw_completion(frame: &mut Frame, app: &App, area: Rect) {
    let summary = completion(app.render_tasks());

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Progress Overview")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(summary.percent as u16)
        .label(format!(
            "{}/{} done ({}%)",
            summary.done, summary.total, summary.percent
        ));

    frame.render_widget(gauge, area);
}

fn draw_workload(frame: &mut Frame, app: &App, area: Rect) {
    let series = daily_workload(app.render_tasks(), app.today());

    let bars: Vec<Bar> = series
        .iter()
        .map(|day| {
            // Whole minutes; the label shows hours
            let minutes = (day.hours * 60.0).round() as u64;
            Bar::default()
                .value(minutes)
                .label(Line::from(day.date.format("%a %d").to_string()))
                .text_value(format!("{:.1}h", day.hours))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Daily Time Summary (next 7 days)")
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(chart, area);
}
