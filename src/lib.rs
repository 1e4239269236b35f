//! PlanWise - AI-assisted task planning for the terminal
//!
//! PlanWise keeps a single ordered task list shared by a flat list view
//! and a kanban board, with keyboard-driven drag reordering and optional
//! AI assistance (prioritization, time estimates, chat) backed by the
//! Gemini API.

pub mod ai;
pub mod cli;
pub mod config;
pub mod domain;
pub mod seed;

pub use domain::{Category, Estimate, Task, TaskId, TaskStatus, TaskStore};
