//! The task store: the authoritative ordered sequence of tasks
//!
//! A session's tasks live entirely in memory. The store keeps ONE global
//! total order shared by the list view and the board columns; column
//! membership is derived from each task's status, never stored separately.
//!
//! Mutations referencing an unknown id are silent no-ops: callers must not
//! rely on an error signal.

use chrono::Utc;

use super::estimate::Estimate;
use super::id::TaskId;
use super::task::{Task, TaskDraft, TaskFields, TaskStatus};
use super::views::priority_cmp;

/// In-memory ordered collection of tasks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from an existing sequence, keeping its order
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// The tasks in their current global order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Position of a task in the global order
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == *id)
    }

    /// Adds a task from a draft: assigns a fresh unique id, sets status to
    /// Todo, then re-sorts the sequence ascending by deadline. The sort is
    /// stable, so a task sharing a deadline with an existing one lands
    /// after it. Returns the created task.
    pub fn add(&mut self, draft: TaskDraft) -> Task {
        let mut timestamp = Utc::now();
        let mut id = TaskId::new(&draft.name, timestamp);
        // Hash collisions need the same name in the same nanosecond; nudge
        // the timestamp until the id is unique anyway.
        while self.get(&id).is_some() {
            timestamp = timestamp + chrono::Duration::nanoseconds(1);
            id = TaskId::new(&draft.name, timestamp);
        }

        let task = Task::new(id, draft);
        self.tasks.push(task.clone());
        self.tasks.sort_by_key(|t| t.deadline);
        task
    }

    /// Replaces every mutable field of the task with `id`; no-op if absent
    pub fn update(&mut self, id: &TaskId, fields: TaskFields) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
            task.name = fields.name;
            task.description = fields.description;
            task.deadline = fields.deadline;
            task.category = fields.category;
            task.priority = fields.priority;
            task.status = fields.status;
            task.estimate = fields.estimate;
        }
    }

    /// Removes the task with `id`; no-op if absent
    pub fn remove(&mut self, id: &TaskId) {
        self.tasks.retain(|t| t.id != *id);
    }

    /// Sets only the status of the task with `id`; idempotent, no-op if
    /// absent
    pub fn set_status(&mut self, id: &TaskId, status: TaskStatus) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
            task.status = status;
        }
    }

    /// Sets only the priority of the task with `id`; no-op if absent
    pub fn set_priority(&mut self, id: &TaskId, priority: Option<u32>) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
            task.priority = priority;
        }
    }

    /// Sets only the estimate of the task with `id`; no-op if absent
    pub fn set_estimate(&mut self, id: &TaskId, estimate: Option<Estimate>) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == *id) {
            task.estimate = estimate;
        }
    }

    /// Moves the task `active` relative to the task `target` in the global
    /// order, atomically adopting `status` when one is supplied and differs
    /// from the task's current status.
    ///
    /// With a status change the task lands immediately before `target`;
    /// without one it takes `target`'s exact position. No-op when either id
    /// is unknown or `active == target`.
    pub fn reorder(&mut self, active: &TaskId, target: &TaskId, status: Option<TaskStatus>) {
        if active == target {
            return;
        }
        let (Some(active_idx), Some(target_idx)) = (self.position(active), self.position(target))
        else {
            return;
        };

        match status {
            Some(s) if s != self.tasks[active_idx].status => {
                let mut task = self.tasks.remove(active_idx);
                task.status = s;
                // Recompute where the target sits now that active is out.
                let before = self
                    .position(target)
                    .unwrap_or(self.tasks.len());
                self.tasks.insert(before, task);
            }
            _ => {
                let task = self.tasks.remove(active_idx);
                self.tasks.insert(target_idx.min(self.tasks.len()), task);
            }
        }
    }

    /// Applies AI-assigned priorities, matching by id; unknown ids are
    /// skipped silently
    pub fn apply_priorities(&mut self, priorities: &[(TaskId, u32)]) {
        for (id, priority) in priorities {
            self.set_priority(id, Some(*priority));
        }
    }

    /// Re-sorts the sequence with the priority comparator (done tasks last,
    /// then ascending priority, ties by deadline)
    pub fn sort_by_priority(&mut self) {
        self.tasks.sort_by(priority_cmp);
    }

    /// Wholesale replacement of the sequence; used by the drag engine to
    /// commit its working copy atomically
    pub(crate) fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub(crate) fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, day).unwrap()
    }

    fn draft(name: &str, day: u32) -> TaskDraft {
        TaskDraft {
            name: name.to_string(),
            description: String::new(),
            deadline: date(day),
            category: Category::Work,
            estimate: None,
        }
    }

    #[test]
    fn add_assigns_unique_ids() {
        let mut store = TaskStore::new();
        for i in 0..20 {
            store.add(draft("Same name", 1 + (i % 5)));
        }

        let ids: HashSet<_> = store.tasks().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn add_keeps_ascending_deadline_order() {
        let mut store = TaskStore::new();
        store.add(draft("c", 10));
        store.add(draft("a", 3));
        store.add(draft("b", 7));

        let names: Vec<_> = store.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn add_earlier_deadline_goes_first() {
        let mut store = TaskStore::new();
        store.add(draft("late", 20));
        store.add(draft("early", 1));

        assert_eq!(store.tasks()[0].name, "early");
    }

    #[test]
    fn add_equal_deadline_goes_after_existing() {
        let mut store = TaskStore::new();
        store.add(draft("first", 5));
        store.add(draft("second", 5));

        let names: Vec<_> = store.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn add_defaults_status_and_priority() {
        let mut store = TaskStore::new();
        let task = store.add(draft("x", 1));

        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.priority.is_none());
    }

    #[test]
    fn update_replaces_mutable_fields() {
        let mut store = TaskStore::new();
        let task = store.add(draft("before", 1));

        let mut fields = TaskFields::from(task.clone());
        fields.name = "after".to_string();
        fields.category = Category::Study;
        fields.status = TaskStatus::Done;
        store.update(&task.id, fields);

        let updated = store.get(&task.id).unwrap();
        assert_eq!(updated.name, "after");
        assert_eq!(updated.category, Category::Study);
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.id, task.id);
    }

    #[test]
    fn update_unknown_id_is_silent_noop() {
        let mut store = TaskStore::new();
        let task = store.add(draft("only", 1));
        let missing = TaskId::new("other", Utc::now());

        let before = store.clone();
        store.update(&missing, TaskFields::from(task));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_deletes_and_tolerates_missing() {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1));
        let b = store.add(draft("b", 2));

        store.remove(&a.id);
        assert_eq!(store.len(), 1);
        assert!(store.get(&a.id).is_none());

        store.remove(&a.id); // already gone
        assert_eq!(store.len(), 1);
        assert!(store.get(&b.id).is_some());
    }

    #[test]
    fn set_status_is_idempotent() {
        let mut store = TaskStore::new();
        let task = store.add(draft("x", 1));

        store.set_status(&task.id, TaskStatus::Done);
        let after_first = store.clone();
        store.set_status(&task.id, TaskStatus::Done);

        assert_eq!(store, after_first);
    }

    #[test]
    fn reorder_same_status_takes_target_position() {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1));
        store.add(draft("b", 2));
        let c = store.add(draft("c", 3));

        store.reorder(&a.id, &c.id, None);

        let names: Vec<_> = store.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
        assert!(store.tasks().iter().all(|t| t.status == TaskStatus::Todo));
    }

    #[test]
    fn reorder_backward_lands_before_target() {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1));
        store.add(draft("b", 2));
        let c = store.add(draft("c", 3));

        store.reorder(&c.id, &a.id, None);

        let names: Vec<_> = store.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn reorder_with_status_change_lands_before_target() {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1));
        store.add(draft("b", 2));
        let c = store.add(draft("c", 3));
        store.set_status(&c.id, TaskStatus::Done);

        store.reorder(&a.id, &c.id, Some(TaskStatus::Done));

        let names: Vec<_> = store.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(store.get(&a.id).unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn reorder_onto_self_is_noop() {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1));
        store.add(draft("b", 2));

        let before = store.clone();
        store.reorder(&a.id, &a.id, Some(TaskStatus::Done));
        assert_eq!(store, before);
    }

    #[test]
    fn reorder_unknown_ids_is_noop() {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1));
        let missing = TaskId::new("ghost", Utc::now());

        let before = store.clone();
        store.reorder(&a.id, &missing, None);
        store.reorder(&missing, &a.id, None);
        assert_eq!(store, before);
    }

    #[test]
    fn apply_priorities_matches_by_id_and_skips_unknown() {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1));
        let b = store.add(draft("b", 2));
        let missing = TaskId::new("ghost", Utc::now());

        store.apply_priorities(&[(a.id.clone(), 2), (missing, 9), (b.id.clone(), 1)]);

        assert_eq!(store.get(&a.id).unwrap().priority, Some(2));
        assert_eq!(store.get(&b.id).unwrap().priority, Some(1));
    }

    #[test]
    fn sort_by_priority_puts_done_last() {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1));
        let b = store.add(draft("b", 2));
        let c = store.add(draft("c", 3));

        store.set_status(&a.id, TaskStatus::Done);
        store.set_priority(&a.id, Some(1));
        store.set_priority(&b.id, Some(2));
        store.apply_priorities(&[(c.id.clone(), 1)]);
        store.sort_by_priority();

        let names: Vec<_> = store.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["c", "b", "a"]);
    }
}
