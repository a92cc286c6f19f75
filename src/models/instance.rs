//! Problem instance and instance-derived statistics.
//!
//! A [`LineInstance`] owns the task-worker time matrix and the precedence
//! graph (both directions), plus the statistics the optimizer reads on
//! every construction step: the cycle time lower bound, an average-load
//! target, per-worker global and positional average times, and the order
//! strength of the precedence graph.
//!
//! The instance is immutable once built and is shared read-only by every
//! ant of a colony.
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", §2.2.1
//! (order strength)

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Task, Worker, INCOMPATIBILITY_PENALTY};
use crate::validation::{validate_input, ValidationError};

/// An immutable assembly line worker assignment and balancing instance.
///
/// The line has as many stations as workers (S = K).
///
/// # Example
/// ```
/// use u_linebalance::models::{LineInstance, INCOMPATIBLE};
///
/// let times = vec![
///     vec![5, 5],
///     vec![5, INCOMPATIBLE],
///     vec![5, 5],
/// ];
/// let instance = LineInstance::new(times, &[(0, 1), (1, 2)]).unwrap();
/// assert_eq!(instance.station_count(), 2);
/// assert_eq!(instance.lower_bound(), 8); // ceil(15 / 2)
/// ```
#[derive(Debug, Clone)]
pub struct LineInstance {
    tasks: Vec<Task>,
    workers: Vec<Worker>,
    lower_bound: u64,
    target_cycle_time: f64,
    incompatibility_penalty: f64,
    topological_order: Vec<usize>,
    station_blocks: Vec<Vec<usize>>,
    /// Row-major `K × S`.
    positional_average: Vec<f64>,
    order_strength: f64,
}

impl LineInstance {
    /// Builds an instance from a dense `N × K` time matrix and a list of
    /// `(predecessor, successor)` edges over task indices.
    ///
    /// Entries equal to [`INCOMPATIBLE`](super::INCOMPATIBLE) mark workers
    /// that cannot perform the task. Duplicate edges are ignored.
    pub fn new(
        times: Vec<Vec<u32>>,
        precedences: &[(usize, usize)],
    ) -> Result<Self, Vec<ValidationError>> {
        validate_input(&times, precedences)?;

        let mut tasks: Vec<Task> = times
            .into_iter()
            .enumerate()
            .map(|(id, row)| Task::new(id, row))
            .collect();
        for &(from, to) in precedences {
            if !tasks[from].successors.contains(&to) {
                tasks[from].successors.push(to);
                tasks[to].predecessors.push(from);
            }
        }

        let k = tasks[0].times.len();
        let workers: Vec<Worker> = (0..k).map(|w| Worker::from_tasks(w, &tasks)).collect();

        let min_sum: u64 = tasks
            .iter()
            .filter_map(|t| t.min_time())
            .map(u64::from)
            .sum();
        let lower_bound = min_sum.div_ceil(k as u64);

        // Strictly above any line built from compatible assignments only.
        let max_sum: u64 = tasks
            .iter()
            .filter_map(|t| t.max_time())
            .map(u64::from)
            .sum();
        let incompatibility_penalty = (max_sum as f64 + 1.0).max(INCOMPATIBILITY_PENALTY);

        let mean_sum: f64 = tasks.iter().filter_map(|t| t.mean_time()).sum();
        let target_cycle_time = mean_sum / k as f64;

        let topological_order = topological_order(&tasks);
        let station_blocks = slice_blocks(&topological_order, k);
        let positional_average = positional_averages(&tasks, &workers, &station_blocks);
        let order_strength = order_strength(&tasks, &topological_order);

        Ok(Self {
            tasks,
            workers,
            lower_bound,
            target_cycle_time,
            incompatibility_penalty,
            topological_order,
            station_blocks,
            positional_average,
            order_strength,
        })
    }

    /// Replaces the derived lower bound with an externally supplied one.
    pub fn with_lower_bound(mut self, lower_bound: u64) -> Self {
        self.lower_bound = lower_bound;
        self
    }

    /// Replaces the derived target cycle time.
    ///
    /// Non-positive or non-finite values are ignored.
    pub fn with_target_cycle_time(mut self, target: f64) -> Self {
        if target.is_finite() && target > 0.0 {
            self.target_cycle_time = target;
        }
        self
    }

    /// Number of tasks (N).
    #[inline]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of workers (K).
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Number of stations (S = K).
    #[inline]
    pub fn station_count(&self) -> usize {
        self.workers.len()
    }

    /// All tasks, indexed by id.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// A single task.
    #[inline]
    pub fn task(&self, task: usize) -> &Task {
        &self.tasks[task]
    }

    /// All workers, indexed by id.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Processing time of `task` by `worker`, `None` if incompatible.
    #[inline]
    pub fn time(&self, task: usize, worker: usize) -> Option<u32> {
        self.tasks[task].time_for(worker)
    }

    /// Processing time with the incompatibility surrogate substituted.
    #[inline]
    pub fn penalized_time(&self, task: usize, worker: usize) -> f64 {
        self.tasks[task].penalized_time(worker, self.incompatibility_penalty)
    }

    /// Time charged for a task on a worker that cannot perform it:
    /// `max(Σ max compatible time + 1, INCOMPATIBILITY_PENALTY)`.
    ///
    /// Exceeds the load of any station in a line free of skill mismatches,
    /// so a penalized line never beats a compatible one or the lower bound.
    #[inline]
    pub fn incompatibility_penalty(&self) -> f64 {
        self.incompatibility_penalty
    }

    /// `ceil(Σ min time / K)`: no assignment can beat this cycle time.
    pub fn lower_bound(&self) -> u64 {
        self.lower_bound
    }

    /// Average-load estimate used to seed the pheromone scale and the
    /// construction budget.
    pub fn target_cycle_time(&self) -> f64 {
        self.target_cycle_time
    }

    /// Deterministic topological order (lowest ready index first).
    pub fn topological_order(&self) -> &[usize] {
        &self.topological_order
    }

    /// Tasks structurally expected at `station`: the station's contiguous
    /// slice of the topological order.
    pub fn station_block(&self, station: usize) -> &[usize] {
        &self.station_blocks[station]
    }

    /// Mean time of `worker` over all tasks it can perform.
    #[inline]
    pub fn global_average(&self, worker: usize) -> f64 {
        self.workers[worker].average_time
    }

    /// Mean time of `worker` over the compatible tasks of `station`'s block.
    #[inline]
    pub fn positional_average(&self, worker: usize, station: usize) -> f64 {
        self.positional_average[worker * self.station_count() + station]
    }

    /// Fraction of task pairs ordered by the transitive closure of the
    /// precedence graph (0 = no precedence, 1 = total order).
    pub fn order_strength(&self) -> f64 {
        self.order_strength
    }

    /// Expected time of `worker` at `station`, blending the positional and
    /// global averages by order strength.
    ///
    /// Tightly ordered lines lean on the positional average, loosely
    /// ordered lines on the global one.
    pub fn blended_average(&self, worker: usize, station: usize) -> f64 {
        let os = self.order_strength;
        os * self.positional_average(worker, station) + (1.0 - os) * self.global_average(worker)
    }
}

/// Kahn's algorithm with a min-heap so the order is reproducible.
fn topological_order(tasks: &[Task]) -> Vec<usize> {
    let mut indegree: Vec<usize> = tasks.iter().map(|t| t.predecessors.len()).collect();
    let mut ready: BinaryHeap<Reverse<usize>> = indegree
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut order = Vec::with_capacity(tasks.len());
    while let Some(Reverse(task)) = ready.pop() {
        order.push(task);
        for &succ in &tasks[task].successors {
            indegree[succ] -= 1;
            if indegree[succ] == 0 {
                ready.push(Reverse(succ));
            }
        }
    }
    order
}

/// Splits `order` into `stations` contiguous blocks of `len / stations`
/// tasks, the remainder going one each to the earliest blocks.
fn slice_blocks(order: &[usize], stations: usize) -> Vec<Vec<usize>> {
    let base = order.len() / stations;
    let remainder = order.len() % stations;
    let mut blocks = Vec::with_capacity(stations);
    let mut start = 0;
    for s in 0..stations {
        let size = base + usize::from(s < remainder);
        blocks.push(order[start..start + size].to_vec());
        start += size;
    }
    blocks
}

fn positional_averages(tasks: &[Task], workers: &[Worker], blocks: &[Vec<usize>]) -> Vec<f64> {
    let stations = blocks.len();
    let mut averages = vec![0.0; workers.len() * stations];
    for worker in workers {
        for (s, block) in blocks.iter().enumerate() {
            let mut sum = 0.0;
            let mut count = 0;
            for t in block.iter().filter_map(|&task| tasks[task].time_for(worker.id)) {
                sum += f64::from(t);
                count += 1;
            }
            averages[worker.id * stations + s] = if count == 0 {
                worker.average_time
            } else {
                sum / count as f64
            };
        }
    }
    averages
}

/// Order strength via bitset transitive closure in reverse topological order.
fn order_strength(tasks: &[Task], order: &[usize]) -> f64 {
    let n = tasks.len();
    if n < 2 {
        return 0.0;
    }
    let words = n.div_ceil(64);
    let mut reach = vec![vec![0u64; words]; n];
    for &task in order.iter().rev() {
        let mut row = vec![0u64; words];
        for &succ in &tasks[task].successors {
            row[succ / 64] |= 1u64 << (succ % 64);
            for (dst, src) in row.iter_mut().zip(&reach[succ]) {
                *dst |= *src;
            }
        }
        reach[task] = row;
    }

    let related: u64 = reach
        .iter()
        .flat_map(|row| row.iter())
        .map(|w| u64::from(w.count_ones()))
        .sum();
    let pairs = (n * (n - 1) / 2) as f64;
    related as f64 / pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::INCOMPATIBLE;
    use crate::validation::ValidationErrorKind;

    fn chain_instance() -> LineInstance {
        // 0 → 1 → 2 → 3, two workers at cost 1
        LineInstance::new(vec![vec![1, 1]; 4], &[(0, 1), (1, 2), (2, 3)]).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let inst = chain_instance();
        assert_eq!(inst.task_count(), 4);
        assert_eq!(inst.worker_count(), 2);
        assert_eq!(inst.station_count(), 2);
        assert_eq!(inst.task(1).predecessors, vec![0]);
        assert_eq!(inst.task(1).successors, vec![2]);
    }

    #[test]
    fn test_lower_bound_and_target() {
        let inst = LineInstance::new(vec![vec![5, 5]; 3], &[]).unwrap();
        assert_eq!(inst.lower_bound(), 8);
        assert!((inst.target_cycle_time() - 7.5).abs() < 1e-10);
    }

    #[test]
    fn test_lower_bound_uses_min_compatible_time() {
        let times = vec![vec![2, INCOMPATIBLE], vec![9, 3], vec![4, 4]];
        let inst = LineInstance::new(times, &[]).unwrap();
        // (2 + 3 + 4) / 2 = 4.5 → 5
        assert_eq!(inst.lower_bound(), 5);
        // means: 2, 6, 4 → 12 / 2
        assert!((inst.target_cycle_time() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_lower_bound_does_not_truncate() {
        let inst = LineInstance::new(vec![vec![4_000_000_000]; 2], &[]).unwrap();
        assert_eq!(inst.lower_bound(), 8_000_000_000);
    }

    #[test]
    fn test_penalty_exceeds_total_work() {
        let small = LineInstance::new(vec![vec![5, 5]; 3], &[]).unwrap();
        assert_eq!(small.incompatibility_penalty(), INCOMPATIBILITY_PENALTY);

        let times = vec![vec![8_000_000, INCOMPATIBLE], vec![5_000_000, 5_000_000]];
        let large = LineInstance::new(times, &[]).unwrap();
        assert!((large.incompatibility_penalty() - 13_000_001.0).abs() < 1e-6);
        assert!((large.penalized_time(0, 1) - 13_000_001.0).abs() < 1e-6);
        assert!(large.incompatibility_penalty() > large.lower_bound() as f64);
    }

    #[test]
    fn test_overrides() {
        let inst = chain_instance()
            .with_lower_bound(7)
            .with_target_cycle_time(3.5)
            .with_target_cycle_time(-1.0);
        assert_eq!(inst.lower_bound(), 7);
        assert!((inst.target_cycle_time() - 3.5).abs() < 1e-10);
    }

    #[test]
    fn test_topological_order_is_deterministic() {
        let inst = LineInstance::new(vec![vec![1]; 4], &[(3, 0), (2, 1)]).unwrap();
        assert_eq!(inst.topological_order(), &[2, 1, 3, 0]);
    }

    #[test]
    fn test_station_blocks_distribute_remainder_first() {
        let inst = LineInstance::new(vec![vec![1, 1, 1]; 5], &[]).unwrap();
        assert_eq!(inst.station_block(0), &[0, 1]);
        assert_eq!(inst.station_block(1), &[2, 3]);
        assert_eq!(inst.station_block(2), &[4]);
    }

    #[test]
    fn test_order_strength() {
        assert!((chain_instance().order_strength() - 1.0).abs() < 1e-10);

        let free = LineInstance::new(vec![vec![1, 1]; 4], &[]).unwrap();
        assert!(free.order_strength().abs() < 1e-10);

        // 0 → 1, 0 → 2: 2 of 3 pairs related
        let fork = LineInstance::new(vec![vec![1]; 3], &[(0, 1), (0, 2)]).unwrap();
        assert!((fork.order_strength() - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_positional_and_blended_average() {
        let times = vec![vec![2, 10], vec![4, 10], vec![6, 20], vec![8, 20]];
        let inst = LineInstance::new(times, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert!((inst.positional_average(0, 0) - 3.0).abs() < 1e-10);
        assert!((inst.positional_average(0, 1) - 7.0).abs() < 1e-10);
        assert!((inst.global_average(1) - 15.0).abs() < 1e-10);
        // Full chain: order strength 1 → purely positional.
        assert!((inst.blended_average(1, 1) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_positional_average_falls_back_to_global() {
        let times = vec![vec![INCOMPATIBLE, 3], vec![5, 5]];
        let inst = LineInstance::new(times, &[(0, 1)]).unwrap();
        // Worker 0 can do nothing in block 0 = [0].
        assert!((inst.positional_average(0, 0) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let inst = LineInstance::new(vec![vec![1]; 2], &[(0, 1), (0, 1)]).unwrap();
        assert_eq!(inst.task(0).successors, vec![1]);
        assert_eq!(inst.task(1).predecessors, vec![0]);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let errors = LineInstance::new(vec![vec![1]; 2], &[(0, 1), (1, 0)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }
}
