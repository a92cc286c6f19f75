//! Station model.
//!
//! A station is a position along the line. It holds one worker and an
//! unordered set of tasks, stored as an arena with O(1) swap-and-pop
//! removal; the owning [`Candidate`](super::Candidate) tracks each task's
//! slot in the arena.

use super::LineInstance;

/// Loads closer to zero than this are treated as zero.
pub const LOAD_TOLERANCE: f64 = 1e-4;

/// One station of a candidate line.
#[derive(Debug, Clone)]
pub struct Station {
    index: usize,
    worker: Option<usize>,
    tasks: Vec<usize>,
    load: f64,
}

impl Station {
    /// Creates an empty, unstaffed station.
    pub fn new(index: usize, capacity: usize) -> Self {
        Self {
            index,
            worker: None,
            tasks: Vec::with_capacity(capacity),
            load: 0.0,
        }
    }

    /// Position along the line.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Assigned worker.
    #[inline]
    pub fn worker(&self) -> Option<usize> {
        self.worker
    }

    /// Assigned tasks, in arena order (not meaningful).
    #[inline]
    pub fn tasks(&self) -> &[usize] {
        &self.tasks
    }

    /// Sum of the worker's (penalized) times over the assigned tasks.
    #[inline]
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Whether no task is assigned.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Time this station's worker needs for `task`, penalty included.
    pub fn time_of(&self, task: usize, instance: &LineInstance) -> f64 {
        match self.worker {
            Some(w) => instance.penalized_time(task, w),
            None => instance.incompatibility_penalty(),
        }
    }

    pub(crate) fn set_worker(&mut self, worker: usize, instance: &LineInstance) {
        self.worker = Some(worker);
        self.recompute_load(instance);
    }

    /// Appends a task, returning its arena slot.
    pub(crate) fn push(&mut self, task: usize, time: f64) -> usize {
        self.tasks.push(task);
        self.load += time;
        self.tasks.len() - 1
    }

    /// Removes the task at `slot`. Returns the task that was moved into
    /// `slot` to fill the hole, if any.
    pub(crate) fn swap_remove(&mut self, slot: usize, time: f64) -> Option<usize> {
        self.tasks.swap_remove(slot);
        self.load -= time;
        if self.load < LOAD_TOLERANCE {
            self.load = self.load.max(0.0);
            if self.tasks.is_empty() {
                self.load = 0.0;
            }
        }
        self.tasks.get(slot).copied()
    }

    /// Replaces the task at `slot` in place.
    pub(crate) fn replace(&mut self, slot: usize, task: usize, old_time: f64, new_time: f64) {
        self.tasks[slot] = task;
        self.load = (self.load - old_time + new_time).max(0.0);
    }

    /// Recomputes the load from scratch, discarding accumulated drift.
    pub fn recompute_load(&mut self, instance: &LineInstance) {
        let load: f64 = self
            .tasks
            .iter()
            .map(|&t| self.time_of(t, instance))
            .sum();
        self.load = load.max(0.0);
    }

    /// Assigned tasks sorted by decreasing time for this station's worker.
    pub fn heaviest_tasks(&self, instance: &LineInstance) -> Vec<usize> {
        let mut tasks = self.tasks.clone();
        tasks.sort_by(|&a, &b| {
            self.time_of(b, instance)
                .total_cmp(&self.time_of(a, instance))
                .then(a.cmp(&b))
        });
        tasks
    }
}
