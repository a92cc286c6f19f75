//! Pheromone trails.
//!
//! Two dense matrices encode the colony's learned preferences:
//! worker ↔ station (`K × S`) and station ↔ task (`S × N`). Both are read
//! concurrently by the ants of a generation and mutated only at the
//! generation barrier.
//!
//! # Reference
//! Stützle & Hoos (2000), "MAX–MIN Ant System", FGCS 16(8) (trail floor)

use crate::models::Candidate;

/// Persistent trail matrices, floored above zero.
#[derive(Debug, Clone)]
pub struct PheromoneTrails {
    workers: usize,
    stations: usize,
    tasks: usize,
    /// Row-major `K × S`.
    worker_station: Vec<f64>,
    /// Row-major `S × N`.
    station_task: Vec<f64>,
    floor: f64,
}

impl PheromoneTrails {
    /// Creates trails with every entry set to `initial` (never below `floor`).
    ///
    /// A non-positive `floor` is raised to the smallest positive `f64`.
    pub fn new(workers: usize, stations: usize, tasks: usize, initial: f64, floor: f64) -> Self {
        let floor = floor.max(f64::MIN_POSITIVE);
        let value = initial.max(floor);
        Self {
            workers,
            stations,
            tasks,
            worker_station: vec![value; workers * stations],
            station_task: vec![value; stations * tasks],
            floor,
        }
    }

    /// Trails seeded at `1 / target_cycle_time`.
    pub fn for_target(
        workers: usize,
        stations: usize,
        tasks: usize,
        target_cycle_time: f64,
        floor: f64,
    ) -> Self {
        let initial = if target_cycle_time > 0.0 {
            1.0 / target_cycle_time
        } else {
            1.0
        };
        Self::new(workers, stations, tasks, initial, floor)
    }

    /// Worker ↔ station trail.
    #[inline]
    pub fn worker_station(&self, worker: usize, station: usize) -> f64 {
        self.worker_station[worker * self.stations + station]
    }

    /// Station ↔ task trail.
    #[inline]
    pub fn station_task(&self, station: usize, task: usize) -> f64 {
        self.station_task[station * self.tasks + task]
    }

    /// Trail floor ε.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Multiplies every entry by `1 - rho`, clamping up to the floor.
    pub fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        let floor = self.floor;
        for v in self
            .worker_station
            .iter_mut()
            .chain(self.station_task.iter_mut())
        {
            *v = (*v * keep).max(floor);
        }
    }

    /// Adds `reward` to every worker-station and station-task pair the
    /// candidate uses.
    pub fn reinforce(&mut self, candidate: &Candidate, reward: f64) {
        for station in candidate.stations() {
            let s = station.index();
            if let Some(w) = station.worker() {
                if w < self.workers {
                    self.worker_station[w * self.stations + s] += reward;
                }
            }
            for &t in station.tasks() {
                self.station_task[s * self.tasks + t] += reward;
            }
        }
    }

    /// Elitist deposit: the best `elite` feasible candidates each add
    /// `deposit_scale / cycle_time`. Infeasible candidates never deposit.
    ///
    /// Returns how many candidates deposited.
    pub fn deposit_elite(&mut self, candidates: &[Candidate], elite: usize, deposit_scale: f64) -> usize {
        let mut ranked: Vec<&Candidate> = candidates.iter().filter(|c| c.is_feasible()).collect();
        ranked.sort_by(|a, b| a.cycle_time().total_cmp(&b.cycle_time()));
        ranked.truncate(elite);
        for candidate in &ranked {
            // Integer task times: a zero cycle time only happens on all-zero lines.
            let reward = deposit_scale / candidate.cycle_time().max(1.0);
            self.reinforce(candidate, reward);
        }
        ranked.len()
    }

    /// Smallest entry across both matrices.
    pub fn min_value(&self) -> f64 {
        self.worker_station
            .iter()
            .chain(&self.station_task)
            .copied()
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineInstance;

    fn instance() -> LineInstance {
        LineInstance::new(vec![vec![2, 3], vec![4, 1], vec![1, 1]], &[(0, 1)]).unwrap()
    }

    fn candidate(inst: &LineInstance) -> Candidate {
        let mut c = Candidate::new(inst);
        c.assign_worker(0, 1, inst);
        c.assign_worker(1, 0, inst);
        c.assign_task(0, 0, inst);
        c.assign_task(1, 1, inst);
        c.assign_task(1, 2, inst);
        c.recompute_cycle_time();
        c
    }

    #[test]
    fn test_initialization() {
        let t = PheromoneTrails::for_target(2, 2, 3, 4.0, 1e-4);
        assert!((t.worker_station(1, 0) - 0.25).abs() < 1e-12);
        assert!((t.station_task(1, 2) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_evaporation_decreases_then_floors() {
        let mut t = PheromoneTrails::new(2, 2, 3, 1.0, 1e-4);
        t.evaporate(0.1);
        assert!((t.worker_station(0, 0) - 0.9).abs() < 1e-12);
        for _ in 0..500 {
            let before = t.min_value();
            t.evaporate(0.1);
            let after = t.min_value();
            assert!(after < before || (after - 1e-4).abs() < 1e-15);
            assert!(after >= 1e-4);
        }
        assert!((t.min_value() - 1e-4).abs() < 1e-15);
    }

    #[test]
    fn test_full_evaporation_stays_positive() {
        let mut t = PheromoneTrails::new(2, 2, 3, 1.0, 0.0);
        t.evaporate(1.0);
        assert!(t.min_value() > 0.0);
        assert!(t.floor() > 0.0);
    }

    #[test]
    fn test_zero_rho_is_noop() {
        let inst = instance();
        let mut t = PheromoneTrails::new(2, 2, 3, 0.5, 1e-4);
        t.reinforce(&candidate(&inst), 0.3);
        let snapshot = t.clone();
        t.evaporate(0.0);
        assert_eq!(t.worker_station, snapshot.worker_station);
        assert_eq!(t.station_task, snapshot.station_task);
    }

    #[test]
    fn test_reinforce_touches_used_pairs_only() {
        let inst = instance();
        let mut t = PheromoneTrails::new(2, 2, 3, 0.5, 1e-4);
        t.reinforce(&candidate(&inst), 0.25);
        assert!((t.worker_station(1, 0) - 0.75).abs() < 1e-12);
        assert!((t.worker_station(0, 1) - 0.75).abs() < 1e-12);
        assert!((t.worker_station(0, 0) - 0.5).abs() < 1e-12);
        assert!((t.station_task(0, 0) - 0.75).abs() < 1e-12);
        assert!((t.station_task(1, 0) - 0.5).abs() < 1e-12);
        assert!((t.station_task(1, 2) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_deposit_elite_skips_infeasible() {
        let inst = instance();
        let good = candidate(&inst);
        let mut bad = candidate(&inst);
        bad.mark_infeasible();

        let mut t = PheromoneTrails::new(2, 2, 3, 0.5, 1e-4);
        let deposited = t.deposit_elite(&[bad.clone(), bad], 1, 1.0);
        assert_eq!(deposited, 0);
        assert_eq!(t.min_value(), 0.5);

        let deposited = t.deposit_elite(&[good.clone()], 3, 4.0);
        assert_eq!(deposited, 1);
        // cycle time 5 (station 1: 4 + 1) → reward 4 / 5
        assert!((good.cycle_time() - 5.0).abs() < 1e-12);
        assert!((t.station_task(1, 1) - 1.3).abs() < 1e-12);
    }
}
