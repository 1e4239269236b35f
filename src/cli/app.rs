//! Main CLI application structure

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{assist, summary, tui};
use crate::config::Config;
use crate::domain::{Category, Task, TaskStore};
use crate::seed;

#[derive(Parser)]
#[command(name = "planwise")]
#[command(author, version, about = "AI-assisted task planner for the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Load the built-in sample task list
    #[arg(long, global = true)]
    pub demo: bool,

    /// Load tasks from a JSON file (an array of tasks)
    #[arg(long, global = true, value_name = "FILE")]
    pub tasks: Option<PathBuf>,

    /// Initial view when launching the TUI (list, board, summary, chat)
    #[arg(long, default_value = "list")]
    pub view: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the 7-day workload and completion summary
    Summary,

    /// Suggest a time estimate for a task
    Estimate {
        /// Task name
        name: String,

        /// Task description
        #[arg(long, short, default_value = "")]
        description: String,

        /// Deadline (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        deadline: Option<NaiveDate>,

        /// Category (Work, Personal, Errands, Study)
        #[arg(long, default_value = "Work")]
        category: Category,
    },

    /// Send one chat message with the task list as context
    Chat {
        /// The message
        message: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let format = cli
        .format
        .unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("PlanWise starting");

    let today = Local::now().date_naive();
    let store = load_store(cli.tasks.as_deref(), cli.demo, today)?;

    match cli.command {
        None => {
            tui::run(&output, store, &config, &cli.view)?;
        }

        Some(Commands::Summary) => summary::run(&output, &store, today)?,

        Some(Commands::Estimate {
            name,
            description,
            deadline,
            category,
        }) => {
            let deadline = deadline.unwrap_or(today);
            assist::estimate(&output, &config, &name, &description, deadline, category)?;
        }

        Some(Commands::Chat { message }) => {
            assist::chat(&output, &config, &store, &message, today)?;
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Builds the session's task store: a JSON file when given, the sample
/// list with `--demo`, an empty store otherwise
fn load_store(tasks_file: Option<&Path>, demo: bool, today: NaiveDate) -> Result<TaskStore> {
    if let Some(path) = tasks_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tasks file: {}", path.display()))?;
        let tasks: Vec<Task> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse tasks file: {}", path.display()))?;
        return Ok(TaskStore::with_tasks(tasks));
    }

    if demo {
        return Ok(seed::sample_store(today));
    }

    Ok(TaskStore::new())
}
