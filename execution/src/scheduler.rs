//! Virtual timers for roll animations.
//!
//! Nothing here reads a real clock: callers pass `now` (time since an
//! arbitrary epoch) into every operation. In production that comes from a
//! [MonotonicClock]; in tests from a [ManualClock] or plain [Duration]s.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Smallest period a repeating task may use.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Time elapsed since construction, backed by [Instant].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Clone, Copy, Debug)]
struct Task {
    id: TaskId,
    due: Duration,
    period: Option<Duration>,
}

/// Queue of one-shot and repeating tasks.
///
/// Tasks fire in due order; ties fire in the order they were scheduled.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task that first fires at `now + period`, then every `period`.
    pub fn schedule_repeating(&mut self, now: Duration, period: Duration) -> TaskId {
        let period = period.max(MIN_PERIOD);
        self.push(now + period, Some(period))
    }

    /// Schedule a task that fires once at `now + delay`.
    pub fn schedule_once(&mut self, now: Duration, delay: Duration) -> TaskId {
        self.push(now + delay, None)
    }

    /// Remove a task. Returns false if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// When the next task fires, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Fire the earliest task due at or before `now`.
    ///
    /// One-shot tasks are removed; repeating tasks are re-armed one period
    /// after their previous due time, so a late caller still sees every tick.
    pub fn pop_due(&mut self, now: Duration) -> Option<TaskId> {
        let (index, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= now)
            .min_by_key(|(_, task)| (task.due, task.id))?;

        let task = &mut self.tasks[index];
        let id = task.id;
        match task.period {
            Some(period) => task.due += period,
            None => {
                self.tasks.remove(index);
            }
        }
        Some(id)
    }

    fn push(&mut self, due: Duration, period: Option<Duration>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task { id, due, period });
        id
    }
}
