//! Generation loop of the ant colony.
//!
//! Each generation builds a fresh population from the current trails,
//! improves every ant with local search, keeps the global best, then
//! evaporates and reinforces the trails before checking the stop rules.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{construct, improve, AcoConfig, PheromoneTrails};
use crate::models::{Candidate, LineBalance, LineInstance};

/// Cycle time reported when no feasible candidate was ever built.
///
/// With one station per worker the last station absorbs every remaining
/// task, so construction on a validated instance always completes and a
/// colony run reports this only if every ant was marked infeasible.
pub const NO_SOLUTION: f64 = f64::INFINITY;

/// Why the colony stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The best cycle time reached the lower bound.
    Converged,
    /// No improvement for `stagnation_limit` consecutive generations.
    Stagnated,
    /// The wall-clock budget ran out.
    TimedOut,
    /// The cancellation flag was raised.
    Cancelled,
    /// `max_generations` generations were run.
    GenerationLimit,
}

/// Summary of one generation's population.
///
/// Cycle-time figures cover feasible ants only and are `+∞` when none was
/// feasible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Best cycle time in this generation.
    pub best: f64,
    /// Mean cycle time.
    pub mean: f64,
    /// Worst cycle time.
    pub worst: f64,
    /// Number of feasible ants.
    pub feasible: usize,
}

impl GenerationStats {
    fn from_ants(generation: usize, ants: &[Candidate]) -> Self {
        let times: Vec<f64> = ants
            .iter()
            .filter(|a| a.is_feasible())
            .map(Candidate::cycle_time)
            .collect();
        if times.is_empty() {
            return Self {
                generation,
                best: NO_SOLUTION,
                mean: NO_SOLUTION,
                worst: NO_SOLUTION,
                feasible: 0,
            };
        }
        Self {
            generation,
            best: times.iter().copied().fold(f64::INFINITY, f64::min),
            mean: times.iter().sum::<f64>() / times.len() as f64,
            worst: times.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            feasible: times.len(),
        }
    }
}

/// Outcome of a colony run.
#[derive(Debug, Clone)]
pub struct ColonyResult {
    /// Best feasible candidate found, if any.
    pub best: Option<Candidate>,
    /// Its cycle time, or [`NO_SOLUTION`].
    pub best_cycle_time: f64,
    /// Generations completed.
    pub generations: usize,
    /// Terminal state.
    pub stop_reason: StopReason,
    /// One entry per completed generation.
    pub history: Vec<GenerationStats>,
}

impl ColonyResult {
    /// Whether a feasible candidate was found.
    pub fn is_solved(&self) -> bool {
        self.best.is_some()
    }

    /// Serializable view of the best candidate.
    pub fn best_balance(&self, instance: &LineInstance) -> Option<LineBalance> {
        self.best.as_ref().map(|c| c.to_balance(instance))
    }
}

/// Ant colony solver bound to one instance.
///
/// # Example
/// ```
/// use u_linebalance::aco::{AcoConfig, AntColony, StopReason};
/// use u_linebalance::models::LineInstance;
///
/// // 4-task chain, 2 interchangeable workers.
/// let instance = LineInstance::new(vec![vec![1, 1]; 4], &[(0, 1), (1, 2), (2, 3)]).unwrap();
/// let config = AcoConfig::default().with_seed(42).with_parallel(false);
///
/// let result = AntColony::new(&instance, config).run();
/// assert_eq!(result.best_cycle_time, 2.0);
/// assert_eq!(result.stop_reason, StopReason::Converged);
/// ```
pub struct AntColony<'a> {
    instance: &'a LineInstance,
    config: AcoConfig,
}

impl<'a> AntColony<'a> {
    /// Creates a colony for `instance`.
    pub fn new(instance: &'a LineInstance, config: AcoConfig) -> Self {
        Self { instance, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs until a stop rule fires.
    pub fn run(&self) -> ColonyResult {
        self.run_with_cancel(&AtomicBool::new(false))
    }

    /// Runs until a stop rule fires or `cancel` is raised.
    ///
    /// The flag is polled once per generation, after the trail update.
    pub fn run_with_cancel(&self, cancel: &AtomicBool) -> ColonyResult {
        let instance = self.instance;
        let config = &self.config;
        let start = Instant::now();
        let lower_bound = instance.lower_bound() as f64;

        let mut master = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let mut trails = PheromoneTrails::for_target(
            instance.worker_count(),
            instance.station_count(),
            instance.task_count(),
            instance.target_cycle_time(),
            config.pheromone_floor,
        );

        let mut best: Option<Candidate> = None;
        let mut best_cycle_time = NO_SOLUTION;
        let mut stagnation = 0;
        let mut generation = 0;
        let mut history = Vec::new();

        let stop_reason = loop {
            let seeds: Vec<u64> = (0..config.population_size)
                .map(|_| master.random())
                .collect();
            let ants = self.build_generation(&trails, &seeds);
            generation += 1;

            let stats = GenerationStats::from_ants(generation, &ants);
            match champion(&ants) {
                Some(ant) if ant.cycle_time() < best_cycle_time => {
                    best_cycle_time = ant.cycle_time();
                    best = Some(ant.clone());
                    stagnation = 0;
                }
                _ => stagnation += 1,
            }

            trails.evaporate(config.evaporation);
            trails.deposit_elite(&ants, config.elite_count(stats.feasible), config.deposit_scale);

            log::debug!(
                "generation {generation}: best {best_cycle_time}, generation best {}, feasible {}/{}, stagnation {stagnation}",
                stats.best,
                stats.feasible,
                ants.len()
            );
            history.push(stats);

            if best_cycle_time <= lower_bound + 1e-9 {
                break StopReason::Converged;
            }
            if stagnation >= config.stagnation_limit {
                break StopReason::Stagnated;
            }
            if config.time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                break StopReason::TimedOut;
            }
            if config.max_generations.is_some_and(|max| generation >= max) {
                break StopReason::GenerationLimit;
            }
            if cancel.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
        };

        log::info!(
            "colony stopped ({stop_reason:?}) after {generation} generations: cycle time {best_cycle_time}, lower bound {lower_bound}"
        );

        ColonyResult {
            best,
            best_cycle_time,
            generations: generation,
            stop_reason,
            history,
        }
    }

    fn build_generation(&self, trails: &PheromoneTrails, seeds: &[u64]) -> Vec<Candidate> {
        if self.config.parallel {
            seeds
                .par_iter()
                .map(|&seed| self.build_ant(trails, seed))
                .collect()
        } else {
            seeds
                .iter()
                .map(|&seed| self.build_ant(trails, seed))
                .collect()
        }
    }

    fn build_ant(&self, trails: &PheromoneTrails, seed: u64) -> Candidate {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ant = construct(self.instance, trails, &self.config, &mut rng);
        if self.config.local_search {
            improve(&mut ant, self.instance, &self.config, &mut rng);
        }
        ant
    }
}

/// Lowest-cycle-time feasible ant of a generation.
fn champion(ants: &[Candidate]) -> Option<&Candidate> {
    ants.iter()
        .filter(|a| a.is_feasible())
        .min_by(|a, b| a.cycle_time().total_cmp(&b.cycle_time()))
}

/// Runs a colony and returns the best cycle time, or [`NO_SOLUTION`].
pub fn solve(instance: &LineInstance, config: &AcoConfig) -> f64 {
    AntColony::new(instance, config.clone()).run().best_cycle_time
}
