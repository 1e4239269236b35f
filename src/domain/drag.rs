//! Drag-and-drop reordering engine
//!
//! A drag is a short-lived session over the task sequence: it starts on a
//! pick-up, applies hover-driven moves to a private working copy so the UI
//! can reflow live, and only touches the authoritative store on a valid
//! drop. Cancelling the drag (dropping outside any target) discards the
//! working copy, so rollback is structural rather than compensating.
//!
//! Exactly one session may exist at a time; the application treats a live
//! session as an exclusive operation and defers other writers until it
//! resolves.

use super::id::TaskId;
use super::store::TaskStore;
use super::task::{Task, TaskStatus};

/// A live drag of one task over the sequence
#[derive(Debug, Clone)]
pub struct DragSession {
    active: TaskId,
    snapshot: TaskStore,
    working: TaskStore,
}

impl DragSession {
    /// Starts a drag of the task with `active`; returns None if the id is
    /// not in the store
    pub fn begin(store: &TaskStore, active: &TaskId) -> Option<Self> {
        store.get(active)?;
        Some(Self {
            active: active.clone(),
            snapshot: store.clone(),
            working: store.clone(),
        })
    }

    /// The task being dragged
    pub fn active(&self) -> &TaskId {
        &self.active
    }

    /// The live sequence to render while the drag is in flight
    pub fn working(&self) -> &[Task] {
        self.working.tasks()
    }

    /// The dragged task in its current working state
    pub fn active_task(&self) -> Option<&Task> {
        self.working.get(&self.active)
    }

    /// Hovering over another task.
    ///
    /// Same status: the dragged task takes the hovered task's exact
    /// position (pure reorder). Different status: the dragged task adopts
    /// the hovered task's status and lands immediately before it. Hovering
    /// the dragged task itself is a no-op.
    pub fn hover_task(&mut self, over: &TaskId) {
        let Some(over_status) = self.working.get(over).map(|t| t.status) else {
            return;
        };
        self.working.reorder(&self.active, over, Some(over_status));
    }

    /// Hovering over a column container (or an empty column): the dragged
    /// task adopts the column's status; its position in the global order is
    /// left unchanged
    pub fn hover_column(&mut self, status: TaskStatus) {
        self.working.set_status(&self.active, status);
    }

    /// True if the working copy is value-identical to the pre-drag
    /// snapshot (a drop at the starting location)
    pub fn is_noop(&self) -> bool {
        self.working == self.snapshot
    }

    /// Commits the working copy to the store atomically
    pub fn commit(self, store: &mut TaskStore) {
        store.replace(self.working.into_tasks());
    }

    /// Cancels the drag. The store was never touched, so there is nothing
    /// to roll back; this consumes the session.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, TaskDraft};
    use chrono::NaiveDate;

    fn draft(name: &str, day: u32) -> TaskDraft {
        TaskDraft {
            name: name.to_string(),
            description: String::new(),
            deadline: NaiveDate::from_ymd_opt(2026, 9, day).unwrap(),
            category: Category::Work,
            estimate: None,
        }
    }

    /// a, b in todo; c in done; d in progress
    fn board() -> (TaskStore, TaskId, TaskId, TaskId, TaskId) {
        let mut store = TaskStore::new();
        let a = store.add(draft("a", 1)).id;
        let b = store.add(draft("b", 2)).id;
        let c = store.add(draft("c", 3)).id;
        let d = store.add(draft("d", 4)).id;
        store.set_status(&c, TaskStatus::Done);
        store.set_status(&d, TaskStatus::InProgress);
        (store, a, b, c, d)
    }

    fn names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn begin_rejects_unknown_id() {
        let (store, ..) = board();
        let ghost = TaskId::new("ghost", chrono::Utc::now());
        assert!(DragSession::begin(&store, &ghost).is_none());
    }

    #[test]
    fn hover_same_status_reorders_without_status_change() {
        let (mut store, a, b, ..) = board();

        let mut drag = DragSession::begin(&store, &a).unwrap();
        drag.hover_task(&b);
        drag.commit(&mut store);

        assert_eq!(names(store.tasks()), ["b", "a", "c", "d"]);
        assert_eq!(store.get(&a).unwrap().status, TaskStatus::Todo);
        assert_eq!(store.get(&b).unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn hover_cross_status_adopts_status_and_lands_before_target() {
        let (mut store, a, _b, c, _d) = board();

        let mut drag = DragSession::begin(&store, &a).unwrap();
        drag.hover_task(&c);
        drag.commit(&mut store);

        assert_eq!(store.get(&a).unwrap().status, TaskStatus::Done);
        let pos_a = store.position(&a).unwrap();
        let pos_c = store.position(&c).unwrap();
        assert_eq!(pos_a + 1, pos_c);
    }

    #[test]
    fn hover_column_changes_status_but_not_position() {
        let (mut store, a, ..) = board();
        let before: Vec<String> = store.tasks().iter().map(|t| t.name.clone()).collect();

        let mut drag = DragSession::begin(&store, &a).unwrap();
        drag.hover_column(TaskStatus::InProgress);
        drag.commit(&mut store);

        let after: Vec<String> = store.tasks().iter().map(|t| t.name.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(store.get(&a).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn hover_self_is_noop() {
        let (store, a, ..) = board();

        let mut drag = DragSession::begin(&store, &a).unwrap();
        drag.hover_task(&a);
        assert!(drag.is_noop());
    }

    #[test]
    fn cancel_leaves_store_identical() {
        let (mut store, a, _b, c, _d) = board();
        let before = store.clone();

        let mut drag = DragSession::begin(&store, &a).unwrap();
        drag.hover_task(&c);
        drag.hover_column(TaskStatus::InProgress);
        drag.cancel();

        assert_eq!(store, before);
        // And a fresh drag still works against the untouched store.
        let drag = DragSession::begin(&store, &a).unwrap();
        drag.commit(&mut store);
        assert_eq!(store, before);
    }

    #[test]
    fn live_working_copy_reflows_while_store_is_untouched() {
        let (store, a, _b, c, _d) = board();

        let mut drag = DragSession::begin(&store, &a).unwrap();
        drag.hover_task(&c);

        // The working copy shows the move, the store does not.
        assert_eq!(
            drag.working().iter().find(|t| t.id == a).unwrap().status,
            TaskStatus::Done
        );
        assert_eq!(store.get(&a).unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn drop_at_start_location_is_noop_by_value() {
        let (mut store, a, b, ..) = board();
        let before = store.clone();

        let mut drag = DragSession::begin(&store, &a).unwrap();
        drag.hover_task(&b);
        // Hovering b again swaps them back; a takes its old slot.
        drag.hover_task(&b);
        assert!(drag.is_noop());
        drag.commit(&mut store);
        assert_eq!(store, before);
    }

    #[test]
    fn successive_hovers_accumulate_on_working_copy() {
        let (mut store, a, _b, c, d) = board();

        let mut drag = DragSession::begin(&store, &a).unwrap();
        drag.hover_task(&c);
        drag.hover_task(&d);
        drag.commit(&mut store);

        assert_eq!(store.get(&a).unwrap().status, TaskStatus::InProgress);
        let pos_a = store.position(&a).unwrap();
        let pos_d = store.position(&d).unwrap();
        assert_eq!(pos_a + 1, pos_d);
    }
}
