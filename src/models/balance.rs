//! Line balance (solution) model.
//!
//! A line balance is the externally visible form of a candidate: which
//! worker staffs each station, which tasks it performs, the resulting
//! loads, and any constraint violations.
//!
//! # Reference
//! Becker & Scholl (2006), "A survey on problems and methods in generalized
//! assembly line balancing", EJOR 168, §2

use serde::{Deserialize, Serialize};

/// A complete line balance (solution to an ALWABP instance).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineBalance {
    /// Station plans in line order.
    pub stations: Vec<StationPlan>,
    /// Maximum station load.
    pub cycle_time: f64,
    /// Constraint violations detected in this balance.
    pub violations: Vec<Violation>,
}

/// What one station does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationPlan {
    /// Station index along the line.
    pub station: usize,
    /// Assigned worker.
    pub worker: Option<usize>,
    /// Assigned tasks, ascending.
    pub tasks: Vec<usize>,
    /// Station load (penalized times included).
    pub load: f64,
}

/// A constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (task or station index).
    pub entity: usize,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A task is not assigned to any station.
    MissingTask,
    /// A task is assigned to more than one station.
    DuplicateTask,
    /// A task sits at a later station than one of its successors.
    PrecedenceViolation,
    /// A worker holds a task it cannot perform.
    SkillMismatch,
    /// A station has no worker.
    MissingWorker,
    /// A worker staffs more than one station.
    DuplicateWorker,
}

impl Violation {
    /// Creates a missing task violation.
    pub fn missing_task(task: usize) -> Self {
        Self {
            violation_type: ViolationType::MissingTask,
            entity: task,
            message: format!("Task {task} is not assigned"),
            severity: 100,
        }
    }

    /// Creates a duplicate task violation.
    pub fn duplicate_task(task: usize, count: usize) -> Self {
        Self {
            violation_type: ViolationType::DuplicateTask,
            entity: task,
            message: format!("Task {task} is assigned {count} times"),
            severity: 100,
        }
    }

    /// Creates a precedence violation.
    pub fn precedence_violation(task: usize, successor: usize, from: usize, to: usize) -> Self {
        Self {
            violation_type: ViolationType::PrecedenceViolation,
            entity: task,
            message: format!(
                "Task {task} at station {from} precedes task {successor} at earlier station {to}"
            ),
            severity: 95,
        }
    }

    /// Creates a skill mismatch violation.
    pub fn skill_mismatch(task: usize, worker: usize, station: usize) -> Self {
        Self {
            violation_type: ViolationType::SkillMismatch,
            entity: task,
            message: format!("Worker {worker} at station {station} cannot perform task {task}"),
            severity: 80,
        }
    }

    /// Creates a missing worker violation.
    pub fn missing_worker(station: usize) -> Self {
        Self {
            violation_type: ViolationType::MissingWorker,
            entity: station,
            message: format!("Station {station} has no worker"),
            severity: 90,
        }
    }

    /// Creates a duplicate worker violation.
    pub fn duplicate_worker(station: usize, worker: usize) -> Self {
        Self {
            violation_type: ViolationType::DuplicateWorker,
            entity: station,
            message: format!("Worker {worker} at station {station} already staffs another station"),
            severity: 90,
        }
    }
}

impl LineBalance {
    /// Whether the balance has no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Station performing `task`.
    pub fn station_of_task(&self, task: usize) -> Option<usize> {
        self.stations
            .iter()
            .find(|s| s.tasks.contains(&task))
            .map(|s| s.station)
    }

    /// Station staffed by `worker`.
    pub fn station_for_worker(&self, worker: usize) -> Option<usize> {
        self.stations
            .iter()
            .find(|s| s.worker == Some(worker))
            .map(|s| s.station)
    }

    /// Sum of all station loads.
    pub fn total_work(&self) -> f64 {
        self.stations.iter().map(|s| s.load).sum()
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }
}
