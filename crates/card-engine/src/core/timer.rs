// core/timer.rs
//
// Deferred, cancellable tasks measured against the session clock.
// Tasks are plain data; the owner decides what firing one means.
//
// Usage:
//   let mut timers = TimerQueue::new();
//   let id = timers.schedule(clock.now(), 0.8, Task::ShowGiftButton);
//   while let Some(task) = timers.pop_due(clock.now()) { ... }

/// Handle to a scheduled task for later cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due: f32,
    task: T,
}

/// Pending tasks ordered by due time, then by scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_id: u32,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::with_capacity(16),
            next_id: 0,
        }
    }

    /// Schedule `task` to fire `delay` seconds after `now`. Negative delays fire immediately.
    pub fn schedule(&mut self, now: f32, delay: f32, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due: now + delay.max(0.0),
            task,
        });
        id
    }

    /// Cancel a pending task. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.iter().position(|t| t.id == id) {
            Some(idx) => {
                self.timers.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove and return the earliest task due at `now`, if any.
    pub fn pop_due(&mut self, now: f32) -> Option<T> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(idx, _)| idx)?;
        Some(self.timers.remove(idx).task)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Due time of a pending task.
    pub fn due(&self, id: TimerId) -> Option<f32> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.due)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
