//! Task model.
//!
//! A task is an indivisible unit of assembly work. Its processing time
//! depends on which worker performs it, and some workers cannot perform
//! it at all.
//!
//! # Reference
//! Miralles et al. (2007), "Advantages of assembly lines in Sheltered Work
//! Centres for Disabled", Int. J. Production Economics 110, §3

use serde::{Deserialize, Serialize};

/// Sentinel processing time marking a worker that cannot perform a task.
pub const INCOMPATIBLE: u32 = u32::MAX;

/// Smallest time surrogate charged when a task lands on an incompatible
/// worker.
///
/// Instances raise it above their total work (see
/// [`LineInstance::incompatibility_penalty`](super::LineInstance::incompatibility_penalty))
/// so a penalized station always dominates the cycle time.
pub const INCOMPATIBILITY_PENALTY: f64 = 1_000_000.0;

/// A task on the assembly line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Task index (`0..N`).
    pub id: usize,
    /// Processing time per worker; [`INCOMPATIBLE`] where the worker lacks the skill.
    pub times: Vec<u32>,
    /// Immediate predecessors.
    pub predecessors: Vec<usize>,
    /// Immediate successors.
    pub successors: Vec<usize>,
}

impl Task {
    /// Creates a task with the given per-worker times and no precedence.
    pub fn new(id: usize, times: Vec<u32>) -> Self {
        Self {
            id,
            times,
            predecessors: Vec::new(),
            successors: Vec::new(),
        }
    }

    /// Adds an immediate predecessor.
    pub fn with_predecessor(mut self, task: usize) -> Self {
        self.predecessors.push(task);
        self
    }

    /// Adds an immediate successor.
    pub fn with_successor(mut self, task: usize) -> Self {
        self.successors.push(task);
        self
    }

    /// Processing time for a worker, `None` if the worker cannot perform it.
    #[inline]
    pub fn time_for(&self, worker: usize) -> Option<u32> {
        match self.times.get(worker) {
            Some(&t) if t != INCOMPATIBLE => Some(t),
            _ => None,
        }
    }

    /// Whether the worker can perform this task.
    #[inline]
    pub fn is_compatible(&self, worker: usize) -> bool {
        self.time_for(worker).is_some()
    }

    /// Processing time, or `penalty` if the worker cannot perform it.
    #[inline]
    pub fn penalized_time(&self, worker: usize, penalty: f64) -> f64 {
        self.time_for(worker).map(f64::from).unwrap_or(penalty)
    }

    /// Shortest time over compatible workers.
    pub fn min_time(&self) -> Option<u32> {
        self.times.iter().copied().filter(|&t| t != INCOMPATIBLE).min()
    }

    /// Longest time over compatible workers.
    pub fn max_time(&self) -> Option<u32> {
        self.times.iter().copied().filter(|&t| t != INCOMPATIBLE).max()
    }

    /// Mean time over compatible workers.
    pub fn mean_time(&self) -> Option<f64> {
        let (sum, count) = self
            .times
            .iter()
            .filter(|&&t| t != INCOMPATIBLE)
            .fold((0.0, 0usize), |(s, c), &t| (s + f64::from(t), c + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Workers able to perform this task.
    pub fn compatible_workers(&self) -> Vec<usize> {
        (0..self.times.len())
            .filter(|&w| self.is_compatible(w))
            .collect()
    }

    /// Whether this task has no predecessors.
    pub fn is_source(&self) -> bool {
        self.predecessors.is_empty()
    }
}
