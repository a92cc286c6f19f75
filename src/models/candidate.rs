//! Candidate solution ("ant").
//!
//! A candidate is one complete trial assignment: a worker per station and
//! a station per task. It is a plain value; `clone()` is the deep snapshot
//! used to carry the global best across generations.

use super::{LineBalance, LineInstance, Station, StationPlan};
use crate::validation::validate_candidate;

/// A full worker → station and task → station assignment.
///
/// Lower cycle time = better (minimization convention).
#[derive(Debug, Clone)]
pub struct Candidate {
    stations: Vec<Station>,
    task_station: Vec<Option<usize>>,
    task_slot: Vec<usize>,
    cycle_time: f64,
    infeasible: bool,
}

impl Candidate {
    /// Creates an empty candidate with one unstaffed station per worker.
    pub fn new(instance: &LineInstance) -> Self {
        let n = instance.task_count();
        Self {
            stations: (0..instance.station_count())
                .map(|s| Station::new(s, n))
                .collect(),
            task_station: vec![None; n],
            task_slot: vec![0; n],
            cycle_time: f64::INFINITY,
            infeasible: false,
        }
    }

    /// All stations in line order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// A single station.
    #[inline]
    pub fn station(&self, station: usize) -> &Station {
        &self.stations[station]
    }

    /// Station holding `task`, if assigned.
    #[inline]
    pub fn station_of(&self, task: usize) -> Option<usize> {
        self.task_station.get(task).copied().flatten()
    }

    /// Worker staffing `station`, if assigned.
    #[inline]
    pub fn worker_at(&self, station: usize) -> Option<usize> {
        self.stations[station].worker()
    }

    /// Maximum station load, or `f64::INFINITY` when infeasible.
    ///
    /// Only as fresh as the last [`recompute_cycle_time`](Self::recompute_cycle_time).
    #[inline]
    pub fn cycle_time(&self) -> f64 {
        self.cycle_time
    }

    /// Staffs `station` with `worker`, recomputing the station load.
    pub fn assign_worker(&mut self, station: usize, worker: usize, instance: &LineInstance) {
        self.stations[station].set_worker(worker, instance);
    }

    /// Places an unassigned task at `station`.
    pub fn assign_task(&mut self, station: usize, task: usize, instance: &LineInstance) {
        debug_assert!(self.task_station[task].is_none(), "task {task} already placed");
        let time = self.stations[station].time_of(task, instance);
        let slot = self.stations[station].push(task, time);
        self.task_station[task] = Some(station);
        self.task_slot[task] = slot;
    }

    /// Removes a task from its station. Returns the station it left.
    pub fn remove_task(&mut self, task: usize, instance: &LineInstance) -> Option<usize> {
        let station = self.task_station[task]?;
        let time = self.stations[station].time_of(task, instance);
        let slot = self.task_slot[task];
        if let Some(moved) = self.stations[station].swap_remove(slot, time) {
            self.task_slot[moved] = slot;
        }
        self.task_station[task] = None;
        Some(station)
    }

    /// Moves an assigned task to another station.
    pub fn move_task(&mut self, task: usize, to: usize, instance: &LineInstance) {
        if self.remove_task(task, instance).is_some() {
            self.assign_task(to, task, instance);
        }
    }

    /// Exchanges the stations of two assigned tasks in place.
    pub fn swap_tasks(&mut self, a: usize, b: usize, instance: &LineInstance) {
        let (Some(sa), Some(sb)) = (self.task_station[a], self.task_station[b]) else {
            return;
        };
        if sa == sb {
            return;
        }
        let (slot_a, slot_b) = (self.task_slot[a], self.task_slot[b]);

        let out_a = self.stations[sa].time_of(a, instance);
        let in_b = self.stations[sa].time_of(b, instance);
        self.stations[sa].replace(slot_a, b, out_a, in_b);

        let out_b = self.stations[sb].time_of(b, instance);
        let in_a = self.stations[sb].time_of(a, instance);
        self.stations[sb].replace(slot_b, a, out_b, in_a);

        self.task_station[a] = Some(sb);
        self.task_station[b] = Some(sa);
        self.task_slot[a] = slot_b;
        self.task_slot[b] = slot_a;
    }

    /// Station with the largest load (lowest index on ties).
    pub fn bottleneck(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for station in &self.stations {
            match best {
                Some((_, load)) if station.load() <= load => {}
                _ => best = Some((station.index(), station.load())),
            }
        }
        best.map(|(s, _)| s)
    }

    /// Recomputes the cycle time from the station loads.
    pub fn recompute_cycle_time(&mut self) -> f64 {
        self.cycle_time = if self.infeasible {
            f64::INFINITY
        } else {
            self.stations
                .iter()
                .map(Station::load)
                .fold(0.0, f64::max)
        };
        self.cycle_time
    }

    /// Recomputes every station load from scratch, then the cycle time.
    pub fn refresh(&mut self, instance: &LineInstance) -> f64 {
        for station in &mut self.stations {
            station.recompute_load(instance);
        }
        self.recompute_cycle_time()
    }

    /// Flags the candidate as infeasible (cycle time = +∞).
    pub fn mark_infeasible(&mut self) {
        self.infeasible = true;
        self.cycle_time = f64::INFINITY;
    }

    /// Whether the candidate is complete and has a finite cycle time.
    pub fn is_feasible(&self) -> bool {
        !self.infeasible && self.cycle_time.is_finite()
    }

    /// Whether every task has a station.
    pub fn is_complete(&self) -> bool {
        self.task_station.iter().all(Option::is_some)
    }

    /// Number of placed tasks.
    pub fn assigned_count(&self) -> usize {
        self.task_station.iter().filter(|s| s.is_some()).count()
    }

    /// Whether any station holds a task its worker cannot perform.
    pub fn has_incompatibility(&self, instance: &LineInstance) -> bool {
        self.stations.iter().any(|station| match station.worker() {
            Some(w) => station
                .tasks()
                .iter()
                .any(|&t| instance.time(t, w).is_none()),
            None => !station.is_empty(),
        })
    }

    /// Builds the serializable description of this candidate.
    pub fn to_balance(&self, instance: &LineInstance) -> LineBalance {
        let stations = self
            .stations
            .iter()
            .map(|s| {
                let mut tasks = s.tasks().to_vec();
                tasks.sort_unstable();
                StationPlan {
                    station: s.index(),
                    worker: s.worker(),
                    tasks,
                    load: s.load(),
                }
            })
            .collect();
        LineBalance {
            stations,
            cycle_time: self.cycle_time,
            violations: validate_candidate(instance, self),
        }
    }
}
