//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! Running `planwise` with no subcommand opens the interactive TUI; the
//! subcommands are one-shot equivalents of its views and AI flows:
//!
//! | Command | Purpose |
//! |---------|---------|
//! | (none) | Interactive TUI (`--view` picks the starting view) |
//! | `summary` | 7-day workload and completion snapshot |
//! | `estimate` | AI time estimate for a task |
//! | `chat` | One AI chat message with the task list as context |
//!
//! All commands support `--format text` (default) or `--format json`, and
//! `--verbose` for debug output on stderr. `--demo` seeds the session with
//! sample tasks; `--tasks FILE` loads a JSON task list.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod assist;
mod output;
mod summary;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
