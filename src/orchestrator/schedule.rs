//! Deadline queue for deferred scene transitions.
//!
//! Entries carry the generation that was current when they were queued.
//! Draining returns only entries that are both due and still current;
//! entries from an older generation are dropped without running.

use std::time::Duration;

/// One deferred task.
#[derive(Debug, Clone, PartialEq)]
struct Entry<T> {
    due: Duration,
    generation: u64,
    task: T,
}

/// Generation-tagged deadline queue keyed by an external clock.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run at `due`, tagged with `generation`.
    pub fn schedule(&mut self, due: Duration, generation: u64, task: T) {
        self.entries.push(Entry {
            due,
            generation,
            task,
        });
    }

    /// Drop every pending entry.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Number of pending entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry due at `now`, returning the tasks of the
    /// `current` generation in due order. Stale tasks are discarded.
    pub fn drain_due(&mut self, now: Duration, current: u64) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| entry.due <= now);
        self.entries = pending;
        due.sort_by_key(|entry| entry.due);

        due.into_iter()
            .filter_map(|entry| {
                if entry.generation == current {
                    Some(entry.task)
                } else {
                    log::debug!(
                        "dropping stale task from generation {} \
                         (current {current})",
                        entry.generation
                    );
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_runs_before_its_deadline() {
        let mut s = Scheduler::new();
        s.schedule(ms(1500), 1, "install");
        assert!(s.drain_due(ms(1499), 1).is_empty());
        assert_eq!(s.len(), 1);
        assert_eq!(s.drain_due(ms(1500), 1), vec!["install"]);
        assert!(s.is_empty());
    }

    #[test]
    fn stale_generations_are_dropped() {
        let mut s = Scheduler::new();
        s.schedule(ms(100), 1, "old");
        s.schedule(ms(200), 2, "new");
        assert_eq!(s.drain_due(ms(300), 2), vec!["new"]);
        assert!(s.is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(300), 4, 3);
        s.schedule(ms(100), 4, 1);
        s.schedule(ms(200), 4, 2);
        s.schedule(ms(900), 4, 9);
        assert_eq!(s.drain_due(ms(500), 4), vec![1, 2, 3]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn cancel_all_clears_queue() {
        let mut s = Scheduler::new();
        s.schedule(ms(10), 0, ());
        s.cancel_all();
        assert!(s.drain_due(ms(100), 0).is_empty());
    }
}
