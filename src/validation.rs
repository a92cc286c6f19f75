//! Input and solution validation for line balancing problems.
//!
//! Checks structural integrity of the task-worker time matrix and the
//! precedence graph before an instance is built. Detects:
//! - Empty matrices and ragged rows
//! - Precedence edges referencing unknown tasks or looping on themselves
//! - Circular precedence dependencies (DAG validation)
//! - Tasks no worker can perform
//!
//! Candidate solutions can be checked against the same constraints the
//! optimizer is expected to honor (see [`validate_candidate`]).
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Candidate, LineInstance, Violation, INCOMPATIBLE};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The time matrix has no tasks.
    EmptyInstance,
    /// The time matrix has no worker columns.
    NoWorkers,
    /// A row of the time matrix has the wrong number of columns.
    DimensionMismatch,
    /// A precedence edge references a task outside `0..N`.
    InvalidTaskReference,
    /// A task is listed as its own predecessor.
    SelfPrecedence,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// No worker can perform a task.
    UnperformableTask,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the raw input of a line balancing instance.
///
/// Checks:
/// 1. At least one task and one worker
/// 2. Every row has one entry per worker
/// 3. Every task can be performed by at least one worker
/// 4. Every precedence edge references existing, distinct tasks
/// 5. No circular precedence dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(times: &[Vec<u32>], precedences: &[(usize, usize)]) -> ValidationResult {
    let mut errors = Vec::new();

    if times.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Time matrix has no tasks",
        ));
        return Err(errors);
    }

    let workers = times[0].len();
    if workers == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoWorkers,
            "Time matrix has no worker columns",
        ));
        return Err(errors);
    }

    for (task, row) in times.iter().enumerate() {
        if row.len() != workers {
            errors.push(ValidationError::new(
                ValidationErrorKind::DimensionMismatch,
                format!(
                    "Task {task} has {} worker times, expected {workers}",
                    row.len()
                ),
            ));
        } else if row.iter().all(|&t| t == INCOMPATIBLE) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnperformableTask,
                format!("Task {task} cannot be performed by any worker"),
            ));
        }
    }

    let n = times.len();
    let mut valid_edges = Vec::with_capacity(precedences.len());
    for &(from, to) in precedences {
        if from >= n || to >= n {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTaskReference,
                format!("Precedence {from} -> {to} references a task outside 0..{n}"),
            ));
        } else if from == to {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfPrecedence,
                format!("Task {from} precedes itself"),
            ));
        } else {
            valid_edges.push((from, to));
        }
    }

    if let Some(cycle_err) = detect_cycles(n, &valid_edges) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists.
fn detect_cycles(n: usize, edges: &[(usize, usize)]) -> Option<ValidationError> {
    let mut adj = vec![Vec::new(); n];
    for &(from, to) in edges {
        adj[from].push(to);
    }

    let mut visited = vec![false; n];
    let mut in_stack = vec![false; n];

    for node in 0..n {
        if !visited[node] && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving task {node}"),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: usize,
    adj: &[Vec<usize>],
    visited: &mut [bool],
    in_stack: &mut [bool],
) -> bool {
    visited[node] = true;
    in_stack[node] = true;

    for &next in &adj[node] {
        if in_stack[next] {
            return true; // Back edge → cycle
        }
        if !visited[next] && has_cycle_dfs(next, adj, visited, in_stack) {
            return true;
        }
    }

    in_stack[node] = false;
    false
}

/// Checks a candidate against the line balancing constraints.
///
/// Reports missing or unplaced tasks, precedence inversions, workers
/// assigned tasks they cannot perform, and stations without a distinct
/// worker. An empty list means the candidate is a valid assignment.
pub fn validate_candidate(instance: &LineInstance, candidate: &Candidate) -> Vec<Violation> {
    let mut violations = Vec::new();
    let stations = candidate.stations();

    let mut seen = vec![0usize; instance.task_count()];
    for station in stations {
        for &task in station.tasks() {
            if task < seen.len() {
                seen[task] += 1;
            }
        }
    }
    for (task, &count) in seen.iter().enumerate() {
        if count == 0 {
            violations.push(Violation::missing_task(task));
        } else if count > 1 {
            violations.push(Violation::duplicate_task(task, count));
        }
    }

    let mut worker_used = vec![false; instance.worker_count()];
    for station in stations {
        match station.worker() {
            None => violations.push(Violation::missing_worker(station.index())),
            Some(w) if w >= worker_used.len() || worker_used[w] => {
                violations.push(Violation::duplicate_worker(station.index(), w));
            }
            Some(w) => worker_used[w] = true,
        }
    }

    for task in instance.tasks() {
        let Some(from) = candidate.station_of(task.id) else {
            continue;
        };
        for &succ in &task.successors {
            if let Some(to) = candidate.station_of(succ) {
                if from > to {
                    violations.push(Violation::precedence_violation(task.id, succ, from, to));
                }
            }
        }
    }

    for station in stations {
        if let Some(w) = station.worker() {
            for &task in station.tasks() {
                if instance.time(task, w).is_none() {
                    violations.push(Violation::skill_mismatch(task, w, station.index()));
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViolationType;

    fn sample_times() -> Vec<Vec<u32>> {
        vec![vec![3, 4], vec![5, INCOMPATIBLE], vec![2, 2]]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_times(), &[(0, 1), (1, 2)]).is_ok());
    }

    #[test]
    fn test_empty_instance() {
        let errors = validate_input(&[], &[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyInstance);
    }

    #[test]
    fn test_no_workers() {
        let errors = validate_input(&[vec![], vec![]], &[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NoWorkers);
    }

    #[test]
    fn test_ragged_matrix() {
        let times = vec![vec![1, 2], vec![3]];
        let errors = validate_input(&times, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DimensionMismatch));
    }

    #[test]
    fn test_unperformable_task() {
        let times = vec![vec![1, 2], vec![INCOMPATIBLE, INCOMPATIBLE]];
        let errors = validate_input(&times, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnperformableTask && e.message.contains('1')));
    }

    #[test]
    fn test_invalid_task_reference() {
        let errors = validate_input(&sample_times(), &[(0, 7)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidTaskReference));
    }

    #[test]
    fn test_self_precedence() {
        let errors = validate_input(&sample_times(), &[(1, 1)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SelfPrecedence));
    }

    #[test]
    fn test_cyclic_dependency() {
        // 0 → 1 → 2 → 0 (cycle)
        let errors = validate_input(&sample_times(), &[(0, 1), (1, 2), (2, 0)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_multiple_errors() {
        let times = vec![vec![1, 2], vec![INCOMPATIBLE, INCOMPATIBLE]];
        let errors = validate_input(&times, &[(0, 5)]).unwrap_err();
        assert!(errors.len() >= 2);
    }

    #[test]
    fn test_validate_candidate_reports_violations() {
        let instance = LineInstance::new(sample_times(), &[(0, 1), (1, 2)]).unwrap();
        let mut candidate = Candidate::new(&instance);
        candidate.assign_worker(0, 1, &instance);
        candidate.assign_worker(1, 0, &instance);
        // Task 1 is incompatible with worker 1, and task 2 precedes its predecessor.
        candidate.assign_task(0, 2, &instance);
        candidate.assign_task(0, 1, &instance);
        candidate.assign_task(1, 0, &instance);

        let violations = validate_candidate(&instance, &candidate);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::SkillMismatch));
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::PrecedenceViolation));
    }

    #[test]
    fn test_validate_candidate_missing_pieces() {
        let instance = LineInstance::new(sample_times(), &[]).unwrap();
        let mut candidate = Candidate::new(&instance);
        candidate.assign_worker(0, 0, &instance);
        candidate.assign_task(0, 0, &instance);

        let violations = validate_candidate(&instance, &candidate);
        let missing = violations
            .iter()
            .filter(|v| v.violation_type == ViolationType::MissingTask)
            .count();
        assert_eq!(missing, 2);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::MissingWorker));
    }

    #[test]
    fn test_validate_candidate_clean() {
        let instance = LineInstance::new(sample_times(), &[(0, 1)]).unwrap();
        let mut candidate = Candidate::new(&instance);
        candidate.assign_worker(0, 0, &instance);
        candidate.assign_worker(1, 1, &instance);
        candidate.assign_task(0, 0, &instance);
        candidate.assign_task(0, 1, &instance);
        candidate.assign_task(1, 2, &instance);
        assert!(validate_candidate(&instance, &candidate).is_empty());
    }
}
