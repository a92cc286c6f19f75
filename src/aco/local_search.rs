//! Bottleneck-directed local search.
//!
//! Two moves, both aimed at the station with the largest load:
//!
//! - **Shift** relocates one bottleneck task to another station when the
//!   destination stays strictly below the bottleneck's load.
//! - **Swap** exchanges one of the bottleneck's heaviest tasks with one of
//!   another station's heaviest tasks when both resulting loads drop below
//!   the bottleneck's load.
//!
//! Every accepted move keeps precedence and worker compatibility intact
//! and lowers the sorted load vector lexicographically, so both loops
//! terminate.

use rand::Rng;

use super::AcoConfig;
use crate::models::{Candidate, LineInstance, LOAD_TOLERANCE};

/// Runs shift then swap on a complete candidate and refreshes its cycle
/// time. Infeasible candidates are left untouched.
///
/// Returns the number of moves applied.
pub fn improve<R: Rng>(
    candidate: &mut Candidate,
    instance: &LineInstance,
    config: &AcoConfig,
    rng: &mut R,
) -> usize {
    if !candidate.is_feasible() || !candidate.is_complete() {
        return 0;
    }
    let moves = shift(candidate, instance) + swap(candidate, instance, config, rng);
    candidate.recompute_cycle_time();
    moves
}

/// Repeatedly moves a task off the bottleneck until no single move helps.
///
/// Tasks are tried heaviest first; the first valid destination wins.
pub fn shift(candidate: &mut Candidate, instance: &LineInstance) -> usize {
    let mut moves = 0;
    while let Some(bottleneck) = candidate.bottleneck() {
        let Some((task, dest)) = find_shift(candidate, instance, bottleneck) else {
            break;
        };
        log::trace!("shift: task {task} from station {bottleneck} to {dest}");
        candidate.move_task(task, dest, instance);
        moves += 1;
    }
    candidate.recompute_cycle_time();
    moves
}

/// Randomized pairwise exchange between the bottleneck and other stations.
///
/// Stops after `max_swap_failures` consecutive passes without an accepted
/// swap. The top-N lists are rebuilt after every accepted swap.
pub fn swap<R: Rng>(
    candidate: &mut Candidate,
    instance: &LineInstance,
    config: &AcoConfig,
    rng: &mut R,
) -> usize {
    let mut swaps = 0;
    let mut failures = 0;
    while failures < config.max_swap_failures {
        let Some(bottleneck) = candidate.bottleneck() else {
            break;
        };
        if try_swap(candidate, instance, config, rng, bottleneck) {
            swaps += 1;
            failures = 0;
        } else {
            failures += 1;
        }
    }
    candidate.recompute_cycle_time();
    swaps
}

fn find_shift(
    candidate: &Candidate,
    instance: &LineInstance,
    bottleneck: usize,
) -> Option<(usize, usize)> {
    let station = candidate.station(bottleneck);
    let peak = station.load();

    for task in station.heaviest_tasks(instance) {
        // Zero-time tasks cannot relieve the bottleneck.
        if station.time_of(task, instance) <= 0.0 {
            continue;
        }
        let (lo, hi) = station_window(candidate, instance, task);
        for dest in lo..=hi {
            if dest == bottleneck {
                continue;
            }
            let Some(worker) = candidate.worker_at(dest) else {
                continue;
            };
            let Some(time) = instance.time(task, worker) else {
                continue;
            };
            if candidate.station(dest).load() + f64::from(time) + LOAD_TOLERANCE < peak {
                return Some((task, dest));
            }
        }
    }
    None
}

fn try_swap<R: Rng>(
    candidate: &mut Candidate,
    instance: &LineInstance,
    config: &AcoConfig,
    rng: &mut R,
    bottleneck: usize,
) -> bool {
    let mut top_b = candidate.station(bottleneck).heaviest_tasks(instance);
    top_b.truncate(config.swap_top_n);
    if top_b.is_empty() {
        return false;
    }

    for other in 0..instance.station_count() {
        if other == bottleneck {
            continue;
        }
        let mut top_o = candidate.station(other).heaviest_tasks(instance);
        top_o.truncate(config.swap_top_n);
        if top_o.is_empty() {
            continue;
        }
        for _ in 0..config.swap_attempts {
            let a = top_b[rng.random_range(0..top_b.len())];
            let b = top_o[rng.random_range(0..top_o.len())];
            if swap_is_improving(candidate, instance, a, b, bottleneck, other) {
                log::trace!("swap: task {a} (station {bottleneck}) with task {b} (station {other})");
                candidate.swap_tasks(a, b, instance);
                return true;
            }
        }
    }
    false
}

/// Whether exchanging `a` (at `sa`, the bottleneck) and `b` (at `sb`) is
/// legal and lowers both loads below the bottleneck's current load.
fn swap_is_improving(
    candidate: &Candidate,
    instance: &LineInstance,
    a: usize,
    b: usize,
    sa: usize,
    sb: usize,
) -> bool {
    let task_a = instance.task(a);
    if task_a.predecessors.contains(&b) || task_a.successors.contains(&b) {
        return false;
    }

    let (lo_a, hi_a) = station_window(candidate, instance, a);
    let (lo_b, hi_b) = station_window(candidate, instance, b);
    if !(lo_a..=hi_a).contains(&sb) || !(lo_b..=hi_b).contains(&sa) {
        return false;
    }

    let (Some(wa), Some(wb)) = (candidate.worker_at(sa), candidate.worker_at(sb)) else {
        return false;
    };
    let (Some(b_at_a), Some(a_at_b)) = (instance.time(b, wa), instance.time(a, wb)) else {
        return false;
    };

    let station_a = candidate.station(sa);
    let station_b = candidate.station(sb);
    let peak = station_a.load();
    let new_a = station_a.load() - station_a.time_of(a, instance) + f64::from(b_at_a);
    let new_b = station_b.load() - station_b.time_of(b, instance) + f64::from(a_at_b);

    new_a + LOAD_TOLERANCE < peak && new_b + LOAD_TOLERANCE < peak
}

/// Range of stations `task` may occupy given where its direct
/// predecessors and successors currently sit.
fn station_window(candidate: &Candidate, instance: &LineInstance, task: usize) -> (usize, usize) {
    let t = instance.task(task);
    let lo = t
        .predecessors
        .iter()
        .filter_map(|&p| candidate.station_of(p))
        .max()
        .unwrap_or(0);
    let hi = t
        .successors
        .iter()
        .filter_map(|&s| candidate.station_of(s))
        .min()
        .unwrap_or(instance.station_count() - 1);
    (lo, hi)
}
