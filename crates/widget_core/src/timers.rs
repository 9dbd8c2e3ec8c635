//! Deterministic timer queue driven by a virtual millisecond clock.

use crate::error::{Result, WidgetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Work that runs when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    CloseModal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TimerId,
    pub due_at: u64,
    order: u64,
    pub action: DeferredAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: u64,
    pub action: DeferredAction,
}

/// Tasks fire in `(due_at, insertion order)` order. The queue never runs a
/// task itself; the owner pops due tasks and executes them.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    next_order: u64,
    tasks: Vec<ScheduledTask>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, action: DeferredAction) -> TimerId {
        self.next_id += 1;
        self.next_order += 1;
        let id = TimerId(self.next_id);
        let due_at = self.now_ms.saturating_add(delay_ms);
        self.tasks.push(ScheduledTask {
            id,
            due_at,
            order: self.next_order,
            action,
        });
        tracing::debug!(timer = id.0, due_at, ?action, "scheduled timer");
        id
    }

    /// Cancels a pending timer. Returns whether it existed.
    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        before != self.tasks.len()
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut tasks: Vec<&ScheduledTask> = self.tasks.iter().collect();
        tasks.sort_by_key(|task| (task.due_at, task.order));
        tasks
            .into_iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                action: task.action,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether a task is due at or before the current clock.
    pub fn has_due(&self) -> bool {
        self.next_index(Some(self.now_ms)).is_some()
    }

    pub fn next_due_at(&self) -> Option<u64> {
        self.tasks.iter().map(|task| task.due_at).min()
    }

    /// Moves the clock forward by `delta_ms` without running anything.
    pub fn advance_clock(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }

    pub fn advance_clock_to(&mut self, target_ms: u64) -> Result<()> {
        if target_ms < self.now_ms {
            return Err(WidgetError::ClockRewind {
                target_ms,
                now_ms: self.now_ms,
            });
        }
        self.now_ms = target_ms;
        Ok(())
    }

    /// Removes the earliest task due at or before the current clock.
    pub fn pop_due(&mut self) -> Option<ScheduledTask> {
        let idx = self.next_index(Some(self.now_ms))?;
        Some(self.tasks.remove(idx))
    }

    /// Removes the earliest task regardless of due time, moving the clock to
    /// its due time when that lies in the future.
    pub fn pop_next(&mut self) -> Option<ScheduledTask> {
        let idx = self.next_index(None)?;
        let task = self.tasks.remove(idx);
        if task.due_at > self.now_ms {
            self.now_ms = task.due_at;
        }
        Some(task)
    }

    fn next_index(&self, due_limit: Option<u64>) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.map_or(true, |limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_due_only_returns_tasks_due_now() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(3000, DeferredAction::CloseModal);
        queue.advance_clock(2999);
        assert!(!queue.has_due());
        assert_eq!(queue.pop_due(), None);

        queue.advance_clock(1);
        let task = queue.pop_due().expect("due task");
        assert_eq!(task.id, first);
        assert_eq!(task.due_at, 3000);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_due_times_fire_in_insertion_order() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(100, DeferredAction::CloseModal);
        let b = queue.schedule(100, DeferredAction::CloseModal);
        let c = queue.schedule(50, DeferredAction::CloseModal);

        let order: Vec<TimerId> = queue.pending_timers().into_iter().map(|t| t.id).collect();
        assert_eq!(order, vec![c, a, b]);

        queue.advance_clock(100);
        assert_eq!(queue.pop_due().map(|t| t.id), Some(c));
        assert_eq!(queue.pop_due().map(|t| t.id), Some(a));
        assert_eq!(queue.pop_due().map(|t| t.id), Some(b));
    }

    #[test]
    fn clear_timer_cancels_pending_task() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(10, DeferredAction::CloseModal);
        assert!(queue.clear_timer(id));
        assert!(!queue.clear_timer(id));
        queue.advance_clock(10);
        assert_eq!(queue.pop_due(), None);
    }

    #[test]
    fn pop_next_jumps_clock_forward() {
        let mut queue = TimerQueue::new();
        queue.schedule(3000, DeferredAction::CloseModal);
        let task = queue.pop_next().expect("task");
        assert_eq!(task.due_at, 3000);
        assert_eq!(queue.now_ms(), 3000);
    }

    #[test]
    fn clock_cannot_move_backwards() {
        let mut queue = TimerQueue::new();
        queue.advance_clock(500);
        let err = queue.advance_clock_to(100).expect_err("rewind");
        assert!(matches!(
            err,
            WidgetError::ClockRewind {
                target_ms: 100,
                now_ms: 500
            }
        ));
        queue.advance_clock_to(500).expect("same instant is fine");
    }
}
