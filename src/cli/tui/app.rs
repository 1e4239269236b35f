//! TUI application state and logic

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;

use super::event::{AiEvent, Event, EventHandler};
use super::ui::Terminal;
use super::views;
use super::ViewMode;
use crate::ai::{self, Assistant, EstimateRequest, TaskBrief};
use crate::config::Config;
use crate::domain::{
    Category, DragSession, Estimate, Task, TaskDraft, TaskFields, TaskId, TaskStatus, TaskStore,
};

/// Ticks a status message stays visible (ticks arrive every 250ms)
const STATUS_TTL: u8 = 24;

/// Field focus inside the task form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Deadline,
    Category,
    Estimate,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::Deadline,
            FormField::Deadline => FormField::Category,
            FormField::Category => FormField::Estimate,
            FormField::Estimate => FormField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Estimate,
            FormField::Description => FormField::Name,
            FormField::Deadline => FormField::Description,
            FormField::Category => FormField::Deadline,
            FormField::Estimate => FormField::Category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Description => "Description",
            FormField::Deadline => "Deadline",
            FormField::Category => "Category",
            FormField::Estimate => "Estimate",
        }
    }
}

/// Task create/edit form; text fields are edited raw and validated on
/// submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub name: String,
    pub description: String,
    pub deadline: String,
    pub category: Category,
    pub estimate: String,
    pub field: FormField,
    pub error: Option<String>,
}

impl TaskForm {
    /// An empty form with the deadline prefilled to today
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            deadline: today.to_string(),
            category: Category::default(),
            estimate: String::new(),
            field: FormField::Name,
            error: None,
        }
    }

    /// A form prefilled from an existing task
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            deadline: task.deadline.to_string(),
            category: task.category,
            estimate: task
                .estimate
                .map(|e| e.to_string())
                .unwrap_or_default(),
            field: FormField::Name,
            error: None,
        }
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::Deadline => Some(&mut self.deadline),
            FormField::Estimate => Some(&mut self.estimate),
            FormField::Category => None,
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        let all = Category::ALL;
        let idx = all
            .iter()
            .position(|c| *c == self.category)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % all.len()
        } else {
            (idx + all.len() - 1) % all.len()
        };
        self.category = all[next];
    }

    /// Validates the form into concrete values
    fn validate(&self) -> Result<FormValues, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name must not be empty".to_string());
        }

        let deadline: NaiveDate = self
            .deadline
            .trim()
            .parse()
            .map_err(|_| format!("Invalid deadline '{}' (expected YYYY-MM-DD)", self.deadline))?;

        let estimate = if self.estimate.trim().is_empty() {
            None
        } else {
            Some(
                self.estimate
                    .parse::<Estimate>()
                    .map_err(|e| e.to_string())?,
            )
        };

        Ok(FormValues {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            deadline,
            category: self.category,
            estimate,
        })
    }
}

/// Validated output of a task form
struct FormValues {
    name: String,
    description: String,
    deadline: NaiveDate,
    category: Category,
    estimate: Option<Estimate>,
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    NewTask(TaskForm),
    EditTask(TaskId, TaskForm),
    Confirm(ConfirmAction),
    Chat(String),
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::Normal
    }
}

/// Confirmation actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    CompleteTask(TaskId),
    DeleteTask(TaskId),
}

/// One entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// Application state
pub struct App {
    /// The authoritative task sequence
    store: TaskStore,

    /// Live drag, if one is in flight
    drag: Option<DragSession>,

    /// AI results arriving during a drag; applied once the drag resolves
    deferred: Vec<AiEvent>,

    /// Current view mode
    view_mode: ViewMode,

    /// Input mode
    input_mode: InputMode,

    /// Selected column on the board (index into TaskStatus::ALL)
    column_idx: usize,

    /// Selected row within the visible task sequence
    cursor: usize,

    /// Chat transcript
    chat_log: Vec<ChatEntry>,

    /// AI backend; None when the API key is missing
    assistant: Option<Arc<dyn Assistant>>,
    assistant_err: Option<String>,

    /// Sender handed to AI worker threads
    events_tx: mpsc::Sender<Event>,

    /// In-flight AI operations
    estimating: Option<TaskId>,
    prioritizing: bool,
    chat_pending: bool,

    /// Status message and its remaining lifetime in ticks
    status_message: Option<String>,
    status_ttl: u8,

    /// Date captured at launch; all relative-date displays use it
    today: NaiveDate,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application
    pub fn new(
        store: TaskStore,
        config: &Config,
        view_mode: ViewMode,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        let (assistant, assistant_err) = match ai::create_assistant(&config.ai) {
            Ok(a) => (Some(a), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            store,
            drag: None,
            deferred: Vec::new(),
            view_mode,
            input_mode: InputMode::Normal,
            column_idx: 0,
            cursor: 0,
            chat_log: Vec::new(),
            assistant,
            assistant_err,
            events_tx,
            estimating: None,
            prioritizing: false,
            chat_pending: false,
            status_message: None,
            status_ttl: 0,
            today: Local::now().date_naive(),
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize(_, _) => {} // Terminal handles resize automatically
                Event::Tick => self.on_tick(),
                Event::Ai(ai_event) => self.handle_ai_event(ai_event),
            }
        }

        Ok(())
    }

    fn on_tick(&mut self) {
        if self.status_ttl > 0 {
            self.status_ttl -= 1;
            if self.status_ttl == 0 {
                self.status_message = None;
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ttl = STATUS_TTL;
    }

    /// Draw the UI
    fn draw(&self, frame: &mut Frame) {
        match self.view_mode {
            ViewMode::List => views::list::draw(frame, self),
            ViewMode::Board => views::board::draw(frame, self),
            ViewMode::Summary => views::summary::draw(frame, self),
            ViewMode::Chat => views::chat::draw(frame, self),
        }
        views::draw_overlays(frame, self);
    }

    // ==========================================================================
    // Key handling
    // ==========================================================================

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::NewTask(_) | InputMode::EditTask(..) => self.handle_form_key(key),
            InputMode::Confirm(_) => self.handle_confirm_key(key),
            InputMode::Chat(_) => self.handle_chat_key(key),
        }

        Ok(())
    }

    fn handle_normal_key(&mut self, key: crossterm::event::KeyEvent) {
        if self.drag.is_some() {
            self.handle_drag_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('h') | KeyCode::Left => self.move_column(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_column(1),

            // View switching
            KeyCode::Char('1') => self.switch_view(ViewMode::List),
            KeyCode::Char('2') => self.switch_view(ViewMode::Board),
            KeyCode::Char('3') => self.switch_view(ViewMode::Summary),
            KeyCode::Char('4') => self.switch_view(ViewMode::Chat),

            // Drag
            KeyCode::Char(' ') => self.begin_drag(),

            // Task lifecycle
            KeyCode::Char('n') => {
                self.input_mode = InputMode::NewTask(TaskForm::blank(self.today));
            }
            KeyCode::Char('e') => self.edit_selected(),
            KeyCode::Char('s') => self.start_selected(),
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task_id() {
                    self.input_mode = InputMode::Confirm(ConfirmAction::CompleteTask(id));
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_task_id() {
                    self.input_mode = InputMode::Confirm(ConfirmAction::DeleteTask(id));
                }
            }

            // AI
            KeyCode::Char('p') => self.spawn_prioritize(),
            KeyCode::Char('t') => self.spawn_estimate(),
            KeyCode::Char('i') => {
                self.view_mode = ViewMode::Chat;
                self.input_mode = InputMode::Chat(String::new());
            }

            KeyCode::Char('?') => {
                self.set_status(
                    "j/k:move h/l:column space:drag n:new e:edit s:start d:done x:delete \
                     p:prioritize t:estimate i:chat 1-4:views q:quit",
                );
            }

            _ => {}
        }
    }

    /// Keys while a drag is in flight
    fn handle_drag_key(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.drag_hover_step(1),
            KeyCode::Char('k') | KeyCode::Up => self.drag_hover_step(-1),
            KeyCode::Char('h') | KeyCode::Left => self.drag_hover_column(-1),
            KeyCode::Char('l') | KeyCode::Right => self.drag_hover_column(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.commit_drag(),
            KeyCode::Esc => self.cancel_drag(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: crossterm::event::KeyEvent) {
        let form = match &mut self.input_mode {
            InputMode::NewTask(form) => form,
            InputMode::EditTask(_, form) => form,
            _ => return,
        };

        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
            KeyCode::Left => {
                if form.field == FormField::Category {
                    form.cycle_category(false);
                }
            }
            KeyCode::Right => {
                if form.field == FormField::Category {
                    form.cycle_category(true);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = form.active_text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = form.active_text_mut() {
                    text.push(c);
                } else if c == ' ' {
                    form.cycle_category(true);
                }
            }
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let (target, form) = match &mut self.input_mode {
            InputMode::NewTask(form) => (None, form),
            InputMode::EditTask(id, form) => (Some(id.clone()), form),
            _ => return,
        };

        let values = match form.validate() {
            Ok(values) => values,
            Err(message) => {
                form.error = Some(message);
                return;
            }
        };

        match target {
            None => {
                let task = self.store.add(TaskDraft {
                    name: values.name,
                    description: values.description,
                    deadline: values.deadline,
                    category: values.category,
                    estimate: values.estimate,
                });
                self.cursor = self.store.position(&task.id).unwrap_or(0);
                self.set_status(format!("Added \"{}\"", task.name));
            }
            Some(id) => {
                if let Some(existing) = self.store.get(&id) {
                    let fields = TaskFields {
                        name: values.name.clone(),
                        description: values.description,
                        deadline: values.deadline,
                        category: values.category,
                        priority: existing.priority,
                        status: existing.status,
                        estimate: values.estimate,
                    };
                    self.store.update(&id, fields);
                    self.set_status(format!("Updated \"{}\"", values.name));
                }
            }
        }

        self.input_mode = InputMode::Normal;
        self.clamp_cursor();
    }

    fn handle_confirm_key(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let InputMode::Confirm(action) = self.input_mode.clone() {
                    match action {
                        ConfirmAction::CompleteTask(id) => {
                            self.store.set_status(&id, TaskStatus::Done);
                            let name = self
                                .store
                                .get(&id)
                                .map(|t| t.name.clone())
                                .unwrap_or_default();
                            self.set_status(format!("Completed: {}", name));
                        }
                        ConfirmAction::DeleteTask(id) => {
                            let name = self
                                .store
                                .get(&id)
                                .map(|t| t.name.clone())
                                .unwrap_or_default();
                            self.store.remove(&id);
                            self.set_status(format!("Deleted: {}", name));
                        }
                    }
                }
                self.input_mode = InputMode::Normal;
                self.clamp_cursor();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: crossterm::event::KeyEvent) {
        let draft = match &mut self.input_mode {
            InputMode::Chat(draft) => draft,
            _ => return,
        };

        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                draft.pop();
            }
            KeyCode::Char(c) => {
                draft.push(c);
            }
            KeyCode::Enter => {
                let message = draft.trim().to_string();
                if !message.is_empty() {
                    self.send_chat(message);
                }
            }
            _ => {}
        }
    }

    // ==========================================================================
    // Navigation
    // ==========================================================================

    /// Ids of the tasks visible in the current view, in display order
    fn visible_ids(&self) -> Vec<TaskId> {
        let tasks = self.render_tasks();
        match self.view_mode {
            ViewMode::Board => tasks
                .iter()
                .filter(|t| t.status == self.column())
                .map(|t| t.id.clone())
                .collect(),
            _ => tasks.iter().map(|t| t.id.clone()).collect(),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_ids().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let len = len as isize;
        let next = (self.cursor as isize + delta).rem_euclid(len);
        self.cursor = next as usize;
    }

    fn move_column(&mut self, delta: isize) {
        if self.view_mode != ViewMode::Board {
            return;
        }
        let len = TaskStatus::ALL.len() as isize;
        self.column_idx = ((self.column_idx as isize + delta).rem_euclid(len)) as usize;
        self.clamp_cursor();
    }

    fn switch_view(&mut self, view: ViewMode) {
        self.view_mode = view;
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_ids().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    // ==========================================================================
    // Drag
    // ==========================================================================

    fn begin_drag(&mut self) {
        if self.view_mode != ViewMode::List && self.view_mode != ViewMode::Board {
            return;
        }
        if let Some(id) = self.selected_task_id() {
            self.drag = DragSession::begin(&self.store, &id);
            if self.drag.is_some() {
                self.set_status("Dragging: j/k to move, h/l to change column, space to drop, Esc to cancel");
            }
        }
    }

    /// Moves the dragged task over its neighbor in the current view
    fn drag_hover_step(&mut self, delta: isize) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        let Some(active) = drag.active_task() else {
            return;
        };
        let active_id = active.id.clone();
        let active_status = active.status;

        // Neighbors in display order: the whole sequence in the list view,
        // the active task's current column on the board.
        let ids: Vec<TaskId> = match self.view_mode {
            ViewMode::Board => drag
                .working()
                .iter()
                .filter(|t| t.status == active_status)
                .map(|t| t.id.clone())
                .collect(),
            _ => drag.working().iter().map(|t| t.id.clone()).collect(),
        };

        let Some(pos) = ids.iter().position(|id| *id == active_id) else {
            return;
        };
        let target_pos = pos as isize + delta;
        if target_pos < 0 || target_pos >= ids.len() as isize {
            return;
        }

        drag.hover_task(&ids[target_pos as usize]);
    }

    /// Moves the dragged task into an adjacent board column
    fn drag_hover_column(&mut self, delta: isize) {
        if self.view_mode != ViewMode::Board {
            return;
        }
        let Some(drag) = &mut self.drag else {
            return;
        };
        let Some(active) = drag.active_task() else {
            return;
        };

        let all = TaskStatus::ALL;
        let Some(idx) = all.iter().position(|s| *s == active.status) else {
            return;
        };
        let target = idx as isize + delta;
        if target < 0 || target >= all.len() as isize {
            return;
        }

        let status = all[target as usize];
        drag.hover_column(status);
        self.column_idx = target as usize;
    }

    fn commit_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            let active = drag.active().clone();
            let moved = !drag.is_noop();
            drag.commit(&mut self.store);
            if moved {
                self.set_status("Moved");
            }
            self.follow_task(&active);
            self.flush_deferred();
        }
    }

    fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            let active = drag.active().clone();
            drag.cancel();
            self.set_status("Drag cancelled");
            self.follow_task(&active);
            self.flush_deferred();
        }
    }

    /// Points the cursor (and board column) at the given task
    fn follow_task(&mut self, id: &TaskId) {
        if self.view_mode == ViewMode::Board {
            if let Some(task) = self.store.get(id) {
                if let Some(idx) = TaskStatus::ALL.iter().position(|s| *s == task.status) {
                    self.column_idx = idx;
                }
            }
        }
        let ids = self.visible_ids();
        if let Some(pos) = ids.iter().position(|i| i == id) {
            self.cursor = pos;
        } else {
            self.clamp_cursor();
        }
    }

    // ==========================================================================
    // Task lifecycle
    // ==========================================================================

    fn edit_selected(&mut self) {
        if let Some(task) = self.selected_task() {
            let form = TaskForm::from_task(task);
            self.input_mode = InputMode::EditTask(task.id.clone(), form);
        }
    }

    fn start_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.set_status(&id, TaskStatus::InProgress);
            let name = self
                .store
                .get(&id)
                .map(|t| t.name.clone())
                .unwrap_or_default();
            self.set_status(format!("Started: {}", name));
            self.clamp_cursor();
        }
    }

    // ==========================================================================
    // AI flows
    // ==========================================================================

    /// The backend, or a status message explaining why there is none
    fn require_assistant(&mut self) -> Option<Arc<dyn Assistant>> {
        match &self.assistant {
            Some(assistant) => Some(assistant.clone()),
            None => {
                let reason = self
                    .assistant_err
                    .clone()
                    .unwrap_or_else(|| "AI backend unavailable".to_string());
                self.set_status(reason);
                None
            }
        }
    }

    fn spawn_prioritize(&mut self) {
        if self.prioritizing {
            self.set_status("Prioritization already running");
            return;
        }
        if self.store.is_empty() {
            self.set_status("Nothing to prioritize");
            return;
        }
        let Some(assistant) = self.require_assistant() else {
            return;
        };

        let briefs: Vec<TaskBrief> = self.store.tasks().iter().map(TaskBrief::from).collect();
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = assistant.prioritize(&briefs);
            let _ = tx.send(Event::Ai(AiEvent::Prioritize(result)));
        });

        self.prioritizing = true;
        self.set_status("Prioritizing...");
    }

    fn spawn_estimate(&mut self) {
        if self.estimating.is_some() {
            self.set_status("Estimation already running");
            return;
        }
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        let Some(assistant) = self.require_assistant() else {
            return;
        };

        let request = EstimateRequest::from(&task);
        let id = task.id.clone();
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = assistant.estimate(&request);
            let _ = tx.send(Event::Ai(AiEvent::Estimate { task: id, result }));
        });

        self.estimating = Some(task.id);
        self.set_status(format!("Estimating \"{}\"...", task.name));
    }

    fn send_chat(&mut self, message: String) {
        if self.chat_pending {
            self.set_status("Waiting for the previous reply");
            return;
        }
        let Some(assistant) = self.require_assistant() else {
            return;
        };

        // Optimistic append; rolled back if the request fails.
        self.chat_log.push(ChatEntry {
            role: ChatRole::User,
            text: message.clone(),
        });
        self.input_mode = InputMode::Chat(String::new());

        let tasks = self.store.tasks().to_vec();
        let today = self.today;
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = assistant.chat(&message, &tasks, today);
            let _ = tx.send(Event::Ai(AiEvent::Chat(result)));
        });

        self.chat_pending = true;
    }

    /// Applies an AI result, or defers it while a drag is in flight so the
    /// drop target cannot shift under the user
    fn handle_ai_event(&mut self, event: AiEvent) {
        if self.drag.is_some() {
            self.deferred.push(event);
            return;
        }
        self.apply_ai_event(event);
    }

    fn flush_deferred(&mut self) {
        let deferred = std::mem::take(&mut self.deferred);
        for event in deferred {
            self.apply_ai_event(event);
        }
    }

    fn apply_ai_event(&mut self, event: AiEvent) {
        match event {
            AiEvent::Prioritize(result) => {
                self.prioritizing = false;
                match result {
                    Ok(ranked) => {
                        let pairs: Vec<(TaskId, u32)> = ranked
                            .iter()
                            .filter_map(|p| p.id.parse().ok().map(|id| (id, p.priority)))
                            .collect();
                        let skipped = ranked.len() - pairs.len();
                        self.store.apply_priorities(&pairs);
                        self.store.sort_by_priority();
                        self.clamp_cursor();
                        if skipped > 0 {
                            self.set_status(format!(
                                "Prioritized {} tasks ({} unmatched)",
                                pairs.len(),
                                skipped
                            ));
                        } else {
                            self.set_status(format!("Prioritized {} tasks", pairs.len()));
                        }
                    }
                    Err(e) => self.set_status(format!("Prioritization failed: {}", e)),
                }
            }

            AiEvent::Estimate { task, result } => {
                self.estimating = None;
                match result {
                    Ok(suggestion) => match suggestion.estimated_time.parse::<Estimate>() {
                        Ok(estimate) => {
                            self.store.set_estimate(&task, Some(estimate));
                            self.set_status(format!(
                                "Estimated {}: {}",
                                estimate, suggestion.reasoning
                            ));
                        }
                        Err(e) => {
                            // The task keeps whatever estimate it had.
                            self.set_status(format!("Unusable estimate: {}", e));
                        }
                    },
                    Err(e) => self.set_status(format!("Estimation failed: {}", e)),
                }
            }

            AiEvent::Chat(result) => {
                self.chat_pending = false;
                match result {
                    Ok(text) => self.chat_log.push(ChatEntry {
                        role: ChatRole::Assistant,
                        text,
                    }),
                    Err(e) => {
                        // Roll back the optimistic user entry so the
                        // transcript only shows delivered messages.
                        if matches!(
                            self.chat_log.last(),
                            Some(entry) if entry.role == ChatRole::User
                        ) {
                            self.chat_log.pop();
                        }
                        self.set_status(format!("Chat failed: {}", e));
                    }
                }
            }
        }
    }

    // ==========================================================================
    // Accessors for views
    // ==========================================================================

    /// The sequence views should render: the drag's working copy while a
    /// drag is in flight, the store otherwise
    pub fn render_tasks(&self) -> &[Task] {
        match &self.drag {
            Some(drag) => drag.working(),
            None => self.store.tasks(),
        }
    }

    /// Id of the task being dragged, if any
    pub fn dragging(&self) -> Option<&TaskId> {
        self.drag.as_ref().map(|d| d.active())
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.visible_ids().get(self.cursor).cloned()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected_task_id()?;
        self.render_tasks().iter().find(|t| t.id == id)
    }

    /// Status of the selected board column
    pub fn column(&self) -> TaskStatus {
        TaskStatus::ALL[self.column_idx.min(TaskStatus::ALL.len() - 1)]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn chat_log(&self) -> &[ChatEntry] {
        &self.chat_log
    }

    pub fn chat_pending(&self) -> bool {
        self.chat_pending
    }

    /// Short label for the status bar while an AI call is in flight
    pub fn ai_busy(&self) -> Option<&'static str> {
        if self.prioritizing {
            Some("prioritizing")
        } else if self.estimating.is_some() {
            Some("estimating")
        } else if self.chat_pending {
            Some("thinking")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn app_with_seed() -> App {
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let store = seed::sample_store(today);
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(store, &Config::default(), ViewMode::List, tx);
        app.today = today;
        app
    }

    // ==========================================================================
    // Form tests
    // ==========================================================================

    #[test]
    fn form_field_cycles() {
        let start = FormField::Name;
        assert_eq!(
            start.next().next().next().next().next(),
            start
        );
        assert_eq!(start.prev(), FormField::Estimate);
    }

    #[test]
    fn blank_form_prefills_today() {
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let form = TaskForm::blank(today);
        assert_eq!(form.deadline, "2026-09-01");
        assert_eq!(form.field, FormField::Name);
    }

    #[test]
    fn form_rejects_empty_name() {
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let form = TaskForm::blank(today);
        assert!(form.validate().is_err());
    }

    #[test]
    fn form_rejects_bad_deadline() {
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let mut form = TaskForm::blank(today);
        form.name = "x".to_string();
        form.deadline = "tomorrow".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn form_parses_optional_estimate() {
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let mut form = TaskForm::blank(today);
        form.name = "x".to_string();

        let values = form.validate().unwrap();
        assert!(values.estimate.is_none());

        form.estimate = "2 hours".to_string();
        let values = form.validate().unwrap();
        assert_eq!(values.estimate, Some(Estimate::hours(2.0)));

        form.estimate = "soonish".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn form_category_cycles_through_all() {
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let mut form = TaskForm::blank(today);
        let start = form.category;
        for _ in 0..Category::ALL.len() {
            form.cycle_category(true);
        }
        assert_eq!(form.category, start);
    }

    // ==========================================================================
    // Navigation tests
    // ==========================================================================

    #[test]
    fn cursor_wraps_in_list_view() {
        let mut app = app_with_seed();
        assert_eq!(app.cursor(), 0);
        app.move_cursor(-1);
        assert_eq!(app.cursor(), 4);
        app.move_cursor(1);
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn board_column_wraps() {
        let mut app = app_with_seed();
        app.switch_view(ViewMode::Board);
        assert_eq!(app.column(), TaskStatus::Todo);
        app.move_column(-1);
        assert_eq!(app.column(), TaskStatus::Done);
        app.move_column(1);
        assert_eq!(app.column(), TaskStatus::Todo);
    }

    #[test]
    fn board_visible_ids_follow_column() {
        let mut app = app_with_seed();
        app.switch_view(ViewMode::Board);
        let todo_ids = app.visible_ids();
        assert!(todo_ids
            .iter()
            .all(|id| app.store.get(id).unwrap().status == TaskStatus::Todo));
        app.move_column(1);
        assert!(app
            .visible_ids()
            .iter()
            .all(|id| app.store.get(id).unwrap().status == TaskStatus::InProgress));
    }

    // ==========================================================================
    // Drag tests
    // ==========================================================================

    #[test]
    fn drag_renders_working_copy_and_commit_applies() {
        let mut app = app_with_seed();
        let first = app.store.tasks()[0].id.clone();
        let second = app.store.tasks()[1].id.clone();

        app.begin_drag();
        assert_eq!(app.dragging(), Some(&first));

        app.drag_hover_step(1);
        assert_eq!(app.render_tasks()[1].id, first);
        // The store itself has not moved yet.
        assert_eq!(app.store.tasks()[0].id, first);

        app.commit_drag();
        assert!(app.dragging().is_none());
        assert_eq!(app.store.tasks()[0].id, second);
        assert_eq!(app.store.tasks()[1].id, first);
        // Cursor follows the dropped task.
        assert_eq!(app.cursor(), 1);
    }

    #[test]
    fn drag_cancel_restores_everything() {
        let mut app = app_with_seed();
        let before = app.store.clone();

        app.begin_drag();
        app.drag_hover_step(1);
        app.drag_hover_step(1);
        app.cancel_drag();

        assert_eq!(app.store, before);
    }

    #[test]
    fn ai_results_defer_until_drag_resolves() {
        let mut app = app_with_seed();
        let id = app.store.tasks()[0].id.clone();

        app.begin_drag();
        app.handle_ai_event(AiEvent::Estimate {
            task: id.clone(),
            result: Ok(crate::ai::EstimateSuggestion {
                estimated_time: "1 hour".to_string(),
                reasoning: "Small task".to_string(),
            }),
        });

        // Not applied yet.
        assert_ne!(
            app.store.get(&id).unwrap().estimate,
            Some(Estimate::hours(1.0))
        );

        app.commit_drag();
        assert_eq!(
            app.store.get(&id).unwrap().estimate,
            Some(Estimate::hours(1.0))
        );
    }

    #[test]
    fn drag_column_hover_moves_status_on_board() {
        let mut app = app_with_seed();
        app.switch_view(ViewMode::Board);
        let id = app.selected_task_id().unwrap();

        app.begin_drag();
        app.drag_hover_column(1);
        app.commit_drag();

        assert_eq!(
            app.store.get(&id).unwrap().status,
            TaskStatus::InProgress
        );
        // The board follows the task into its new column.
        assert_eq!(app.column(), TaskStatus::InProgress);
    }

    // ==========================================================================
    // AI result application
    // ==========================================================================

    #[test]
    fn prioritize_result_applies_and_resorts() {
        let mut app = app_with_seed();
        let last = app.store.tasks().last().unwrap().id.clone();

        let ranked = app
            .store
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, t)| crate::ai::PrioritizedTask {
                id: t.id.to_string(),
                // Reverse the current order.
                priority: (app.store.len() - i) as u32,
                reason: "test".to_string(),
            })
            .collect();

        app.apply_ai_event(AiEvent::Prioritize(Ok(ranked)));

        // The formerly-last task has priority 1; done tasks still sort last.
        let first = &app.store.tasks()[0];
        assert!(first.id == last || app.store.get(&last).unwrap().status.is_complete());
        assert!(app
            .store
            .tasks()
            .iter()
            .all(|t| t.priority.is_some()));
    }

    #[test]
    fn unmatched_priority_ids_are_skipped() {
        let mut app = app_with_seed();
        let before = app.store.clone();

        app.apply_ai_event(AiEvent::Prioritize(Ok(vec![crate::ai::PrioritizedTask {
            id: "t-zzzzzzz".to_string(),
            priority: 1,
            reason: "bogus".to_string(),
        }])));

        // No task picked up a priority from the unmatched id.
        assert!(app.store.tasks().iter().all(|t| t.priority.is_none()));
        assert_eq!(app.store.len(), before.len());
    }

    #[test]
    fn unparseable_estimate_leaves_task_untouched() {
        let mut app = app_with_seed();
        let id = app.store.tasks()[0].id.clone();
        let before = app.store.get(&id).unwrap().estimate;

        app.apply_ai_event(AiEvent::Estimate {
            task: id.clone(),
            result: Ok(crate::ai::EstimateSuggestion {
                estimated_time: "a while".to_string(),
                reasoning: "unsure".to_string(),
            }),
        });

        assert_eq!(app.store.get(&id).unwrap().estimate, before);
        assert!(app.status_message().unwrap().contains("Unusable estimate"));
    }

    #[test]
    fn failed_chat_rolls_back_optimistic_message() {
        let mut app = app_with_seed();
        app.chat_log.push(ChatEntry {
            role: ChatRole::User,
            text: "hello".to_string(),
        });
        app.chat_pending = true;

        app.apply_ai_event(AiEvent::Chat(Err(crate::ai::AiError::InvalidResponse(
            "boom".to_string(),
        ))));

        assert!(app.chat_log.is_empty());
        assert!(!app.chat_pending());
    }

    #[test]
    fn successful_chat_appends_reply() {
        let mut app = app_with_seed();
        app.chat_log.push(ChatEntry {
            role: ChatRole::User,
            text: "hello".to_string(),
        });
        app.chat_pending = true;

        app.apply_ai_event(AiEvent::Chat(Ok("hi there".to_string())));

        assert_eq!(app.chat_log.len(), 2);
        assert_eq!(app.chat_log[1].role, ChatRole::Assistant);
    }
}
