//! Tick scheduler
//!
//! Periodic tasks driven by elapsed time reported from the host event loop.
//! A task is identified by a [`TaskId`] handle; cancelling the handle
//! removes the task, so a superseded task can never fire again.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct TaskId;
}

/// Shortest period a task may have
const MIN_PERIOD: Duration = Duration::from_millis(1);

struct Task {
    period: Duration,
    /// Time accumulated since the last fired tick
    elapsed: Duration,
}

/// Ticks fired by one `advance`, as `(task, count)`
pub type Fired = SmallVec<[(TaskId, u32); 2]>;

/// Periodic task scheduler
pub struct TickScheduler {
    tasks: SlotMap<TaskId, Task>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
        }
    }

    /// Schedule a task firing every `period`
    pub fn schedule(&mut self, period: Duration) -> TaskId {
        self.tasks.insert(Task {
            period: period.max(MIN_PERIOD),
            elapsed: Duration::ZERO,
        })
    }

    /// Cancel a task. Returns `false` if it was already gone.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(id).is_some()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Advance time by `dt`, returning how many ticks each task owes
    pub fn advance(&mut self, dt: Duration) -> Fired {
        let mut fired = Fired::new();
        for (id, task) in self.tasks.iter_mut() {
            let elapsed = task.elapsed.saturating_add(dt).as_nanos();
            let period = task.period.as_nanos();
            // Remainder is below `period`, which fits in u64 nanoseconds
            task.elapsed = Duration::from_nanos((elapsed % period) as u64);
            let count = u32::try_from(elapsed / period).unwrap_or(u32::MAX);
            if count > 0 {
                fired.push((id, count));
            }
        }
        fired
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_fires_on_period_boundaries() {
        let mut scheduler = TickScheduler::new();
        let id = scheduler.schedule(SECOND);

        assert!(scheduler.advance(Duration::from_millis(400)).is_empty());
        assert!(scheduler.advance(Duration::from_millis(500)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(100)).as_slice(), &[(id, 1)]);
        assert_eq!(scheduler.advance(Duration::from_millis(2500)).as_slice(), &[(id, 2)]);
        assert_eq!(scheduler.advance(Duration::from_millis(500)).as_slice(), &[(id, 1)]);
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut scheduler = TickScheduler::new();
        let old = scheduler.schedule(SECOND);
        scheduler.advance(Duration::from_millis(900));

        assert!(scheduler.cancel(old));
        assert!(!scheduler.cancel(old));
        let new = scheduler.schedule(SECOND);

        let fired = scheduler.advance(Duration::from_millis(200));
        assert!(fired.is_empty());
        let fired = scheduler.advance(SECOND);
        assert_eq!(fired.as_slice(), &[(new, 1)]);
        assert!(!scheduler.is_scheduled(old));
        assert_eq!(scheduler.task_count(), 1);
    }

    #[test]
    fn test_huge_step_saturates_count() {
        let mut scheduler = TickScheduler::new();
        let id = scheduler.schedule(SECOND);
        let fired = scheduler.advance(Duration::from_secs(1 << 32));
        assert_eq!(fired.as_slice(), &[(id, u32::MAX)]);
    }

    #[test]
    fn test_max_duration_does_not_overflow() {
        let mut scheduler = TickScheduler::new();
        let id = scheduler.schedule(SECOND);
        assert!(scheduler.advance(Duration::from_millis(500)).is_empty());

        let fired = scheduler.advance(Duration::MAX);
        assert_eq!(fired.as_slice(), &[(id, u32::MAX)]);
        // Duration::MAX leaves 999_999_999ns carried over
        assert_eq!(scheduler.advance(Duration::from_millis(100)).as_slice(), &[(id, 1)]);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut scheduler = TickScheduler::new();
        let id = scheduler.schedule(Duration::ZERO);
        assert_eq!(scheduler.advance(Duration::from_millis(3)).as_slice(), &[(id, 3)]);
    }
}
