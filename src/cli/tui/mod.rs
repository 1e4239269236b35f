//! Interactive TUI for PlanWise
//!
//! Provides a terminal-based interface for managing the task list with
//! keyboard-driven reordering and AI assistance, using ratatui.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use anyhow::{anyhow, Result};

use super::Output;
use crate::config::Config;
use crate::domain::TaskStore;
use app::App;
use event::EventHandler;

/// View mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Board,
    Summary,
    Chat,
}

impl FromStr for ViewMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" | "l" | "1" => Ok(ViewMode::List),
            "board" | "b" | "2" => Ok(ViewMode::Board),
            "summary" | "s" | "3" => Ok(ViewMode::Summary),
            "chat" | "c" | "4" => Ok(ViewMode::Chat),
            _ => Err(()),
        }
    }
}

/// Launch the TUI
pub fn run(output: &Output, store: TaskStore, config: &Config, view: &str) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    let view_mode = view.parse().unwrap_or_default();

    // Initialize terminal
    let mut terminal = ui::init_terminal()?;

    // Create event handler first: the app hands its sender to AI workers
    let event_handler = EventHandler::new(250);

    let mut app = App::new(store, config, view_mode, event_handler.sender());

    // Run the main loop with panic safety
    // This ensures terminal is restored even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal();

    // Handle the result
    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            // Try to restore terminal first
            let _ = restore_result;
            // Re-raise the panic with context
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
