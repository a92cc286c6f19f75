//! Two-phase ant construction.
//!
//! # Algorithm
//!
//! 1. **Workers → stations.** For each station in line order, sample an
//!    unused worker with weight `τ_ws^α_w · η^β_w`, where `η` is the inverse
//!    of the worker's expected time at that station
//!    ([`LineInstance::blended_average`]).
//! 2. **Tasks → stations.** Scan stations in order. Each station gets a
//!    dynamic target `remaining budget / remaining stations`; ready tasks
//!    (all predecessors placed) that the worker can perform and that keep the
//!    load within the target are sampled with weight `τ_st^α_t · (1/t)^β_t`
//!    until none remain. An empty station accepts one ready task even if it
//!    overshoots. The last station absorbs everything left, at the
//!    incompatibility penalty where needed.
//!
//! Because tasks only become ready once all predecessors are placed at the
//! current or an earlier station, every complete candidate respects
//! precedence.
//!
//! # Reference
//! Blum (2008), "Beam-ACO for simple assembly line balancing",
//! INFORMS J. Computing 20(4)

use rand::Rng;

use super::sampling::{attractiveness, roulette_select};
use super::{AcoConfig, PheromoneTrails};
use crate::models::{Candidate, LineInstance};

/// Times below this are treated as this when inverted into a heuristic.
const MIN_HEURISTIC_TIME: f64 = 1e-3;

/// Builds one candidate from the trails and instance data.
///
/// The candidate is complete unless no task was ready before all were
/// placed, in which case it is marked infeasible.
pub fn construct<R: Rng>(
    instance: &LineInstance,
    trails: &PheromoneTrails,
    config: &AcoConfig,
    rng: &mut R,
) -> Candidate {
    let mut candidate = Candidate::new(instance);
    assign_workers(&mut candidate, instance, trails, config, rng);
    assign_tasks(&mut candidate, instance, trails, config, rng);
    candidate.recompute_cycle_time();
    candidate
}

/// Phase A: staffs every station with a distinct worker.
pub(crate) fn assign_workers<R: Rng>(
    candidate: &mut Candidate,
    instance: &LineInstance,
    trails: &PheromoneTrails,
    config: &AcoConfig,
    rng: &mut R,
) {
    let weights = config.worker_weights;
    let mut available: Vec<usize> = (0..instance.worker_count()).collect();
    let mut scores = Vec::with_capacity(available.len());

    for station in 0..instance.station_count() {
        scores.clear();
        let mut total = 0.0;
        for &w in &available {
            let heuristic = if instance.workers()[w].is_useful() {
                1.0 / instance.blended_average(w, station).max(MIN_HEURISTIC_TIME)
            } else {
                0.0
            };
            let score = attractiveness(
                trails.worker_station(w, station),
                heuristic,
                weights.alpha,
                weights.beta,
            );
            total += score;
            scores.push(score);
        }
        let pick = roulette_select(&scores, total, rng);
        let worker = available.swap_remove(pick);
        candidate.assign_worker(station, worker, instance);
    }
}

/// Phase B: places every task, station by station.
pub(crate) fn assign_tasks<R: Rng>(
    candidate: &mut Candidate,
    instance: &LineInstance,
    trails: &PheromoneTrails,
    config: &AcoConfig,
    rng: &mut R,
) {
    let weights = config.task_weights;
    let n = instance.task_count();
    let stations = instance.station_count();

    let mut waiting_on: Vec<usize> = instance
        .tasks()
        .iter()
        .map(|t| t.predecessors.len())
        .collect();
    let mut ready: Vec<usize> = (0..n).filter(|&t| waiting_on[t] == 0).collect();
    let mut eligible: Vec<usize> = Vec::with_capacity(n);
    let mut scores: Vec<f64> = Vec::with_capacity(n);
    let mut placed = 0;
    let mut budget = instance.target_cycle_time() * stations as f64;

    for station in 0..stations {
        let last = station + 1 == stations;
        let Some(worker) = candidate.worker_at(station) else {
            continue;
        };
        let target = budget / (stations - station) as f64;

        loop {
            eligible.clear();
            scores.clear();
            let load = candidate.station(station).load();
            let empty = candidate.station(station).is_empty();
            let mut total = 0.0;

            for (i, &task) in ready.iter().enumerate() {
                let time = if last {
                    instance.penalized_time(task, worker)
                } else {
                    match instance.time(task, worker) {
                        Some(t) if empty || load + f64::from(t) <= target => f64::from(t),
                        _ => continue,
                    }
                };
                let score = attractiveness(
                    trails.station_task(station, task),
                    1.0 / time.max(MIN_HEURISTIC_TIME),
                    weights.alpha,
                    weights.beta,
                );
                eligible.push(i);
                scores.push(score);
                total += score;
            }

            if eligible.is_empty() {
                break;
            }

            let pick = roulette_select(&scores, total, rng);
            let task = ready.swap_remove(eligible[pick]);
            candidate.assign_task(station, task, instance);
            placed += 1;

            for &succ in &instance.task(task).successors {
                waiting_on[succ] -= 1;
                if waiting_on[succ] == 0 {
                    ready.push(succ);
                }
            }
        }

        budget -= candidate.station(station).load();
    }

    if placed < n {
        log::trace!("construction stalled with {placed}/{n} tasks placed");
        candidate.mark_infeasible();
    }
}
