//! Worker model.
//!
//! Workers are the heterogeneous resources staffing the line. Compatibility
//! is implicit in the task time matrix; a worker only carries the summary
//! statistics the construction heuristic uses as desirability signals.

use serde::{Deserialize, Serialize};

use super::Task;

/// A worker that can be placed at exactly one station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    /// Worker index (`0..K`).
    pub id: usize,
    /// Mean processing time over the tasks this worker can perform
    /// (0.0 if it can perform none).
    pub average_time: f64,
    /// Number of tasks this worker can perform.
    pub compatible_tasks: usize,
}

impl Worker {
    /// Derives worker statistics from the task list.
    pub fn from_tasks(id: usize, tasks: &[Task]) -> Self {
        let mut sum = 0.0;
        let mut count = 0;
        for t in tasks.iter().filter_map(|task| task.time_for(id)) {
            sum += f64::from(t);
            count += 1;
        }
        let average_time = if count == 0 { 0.0 } else { sum / count as f64 };
        Self {
            id,
            average_time,
            compatible_tasks: count,
        }
    }

    /// Whether this worker can perform at least one task.
    pub fn is_useful(&self) -> bool {
        self.compatible_tasks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::INCOMPATIBLE;

    #[test]
    fn test_worker_from_tasks() {
        let tasks = vec![
            Task::new(0, vec![2, INCOMPATIBLE]),
            Task::new(1, vec![4, 7]),
            Task::new(2, vec![6, INCOMPATIBLE]),
        ];

        let w0 = Worker::from_tasks(0, &tasks);
        assert!((w0.average_time - 4.0).abs() < 1e-10);
        assert_eq!(w0.compatible_tasks, 3);

        let w1 = Worker::from_tasks(1, &tasks);
        assert!((w1.average_time - 7.0).abs() < 1e-10);
        assert_eq!(w1.compatible_tasks, 1);
        assert!(w1.is_useful());
    }

    #[test]
    fn test_worker_without_skills() {
        let tasks = vec![Task::new(0, vec![3, INCOMPATIBLE])];
        let w = Worker::from_tasks(1, &tasks);
        assert_eq!(w.average_time, 0.0);
        assert!(!w.is_useful());
    }
}
