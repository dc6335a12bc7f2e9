use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::foundation::error::{RelicError, RelicResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Timer,
    Frame,
}

struct Task<W> {
    id: TaskId,
    kind: TaskKind,
    wake: W,
}

/// Cooperative single-threaded event loop over virtual time.
///
/// One-shot timers fire `delay` after they were armed; frame requests fire on
/// the next display refresh boundary strictly after `now`. Due tasks are
/// handed out one at a time, ordered by due time and then by arming order.
pub struct Scheduler<W> {
    now: Duration,
    frame_interval: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), Task<W>>,
    index: HashMap<TaskId, (Duration, u64)>,
}

impl<W> Scheduler<W> {
    pub fn new(refresh_hz: u32) -> RelicResult<Self> {
        if refresh_hz == 0 {
            return Err(RelicError::validation("refresh rate must be > 0"));
        }
        Ok(Self {
            now: Duration::ZERO,
            frame_interval: Duration::from_secs(1) / refresh_hz,
            next_seq: 0,
            queue: BTreeMap::new(),
            index: HashMap::new(),
        })
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn after(&mut self, delay: Duration, wake: W) -> TaskId {
        let due = self.now + delay;
        self.push(due, TaskKind::Timer, wake)
    }

    pub fn request_frame(&mut self, wake: W) -> TaskId {
        let due = self.next_frame_boundary();
        self.push(due, TaskKind::Frame, wake)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.index.remove(&id) {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.queue
            .values()
            .filter(|t| t.kind == TaskKind::Frame)
            .count()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Removes and returns the earliest task due at or before `until`, moving
    /// `now` to its due time. Returns `None` (and leaves `now` at `until`) once
    /// nothing else is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<(Duration, W)> {
        let key = match self.queue.keys().next() {
            Some(&key) if key.0 <= until => key,
            _ => {
                self.now = self.now.max(until);
                return None;
            }
        };
        let task = self.queue.remove(&key)?;
        self.index.remove(&task.id);
        self.now = self.now.max(key.0);
        Some((key.0, task.wake))
    }

    fn next_frame_boundary(&self) -> Duration {
        let interval = self.frame_interval.as_nanos().max(1);
        let k = self.now.as_nanos() / interval + 1;
        let nanos = k * interval;
        Duration::new(
            (nanos / 1_000_000_000) as u64,
            (nanos % 1_000_000_000) as u32,
        )
    }

    fn push(&mut self, due: Duration, kind: TaskKind, wake: W) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TaskId(seq);
        self.queue.insert((due, seq), Task { id, kind, wake });
        self.index.insert(id, (due, seq));
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
