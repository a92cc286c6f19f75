//! Ant colony configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Trail (α) and heuristic (β) exponents for one construction phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    /// Pheromone exponent.
    pub alpha: f64,
    /// Heuristic desirability exponent.
    pub beta: f64,
}

impl PhaseWeights {
    /// Creates phase weights.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

/// Benchmark instance families of the ALWABP literature.
///
/// Each family has exponents tuned by hill-climbing on its instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceFamily {
    /// Heskiaoff (28 tasks).
    Heskiaoff,
    /// Roszieg (25 tasks).
    Roszieg,
    /// Tonge (70 tasks).
    Tonge,
    /// Wee-Mag (75 tasks).
    WeeMag,
}

/// Ant colony parameters.
///
/// # Example
/// ```
/// use u_linebalance::aco::{AcoConfig, PhaseWeights};
///
/// let config = AcoConfig::default()
///     .with_population_size(50)
///     .with_task_weights(PhaseWeights::new(1.0, 2.0))
///     .with_stagnation_limit(200)
///     .with_seed(7);
/// assert_eq!(config.population_size, 50);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcoConfig {
    /// Ants built per generation.
    pub population_size: usize,
    /// Exponents for the worker → station phase.
    pub worker_weights: PhaseWeights,
    /// Exponents for the task → station phase.
    pub task_weights: PhaseWeights,
    /// Consecutive generations without improvement before stopping.
    pub stagnation_limit: usize,
    /// Hard cap on generations.
    pub max_generations: Option<usize>,
    /// Wall-clock budget, checked at generation boundaries.
    pub time_limit: Option<Duration>,
    /// Evaporation rate ρ in `[0, 1]`.
    pub evaporation: f64,
    /// Minimum trail value ε.
    pub pheromone_floor: f64,
    /// Fraction of each generation's feasible ants that deposit pheromone.
    pub elite_fraction: f64,
    /// Deposit scale κ: each elite ant adds `κ / cycle_time`.
    pub deposit_scale: f64,
    /// Apply shift and swap local search to every ant.
    pub local_search: bool,
    /// How many of a station's heaviest tasks the swap move samples from.
    pub swap_top_n: usize,
    /// Swap pairs tried per station pair and pass.
    pub swap_attempts: usize,
    /// Consecutive non-improving swap passes before the swap move gives up.
    pub max_swap_failures: usize,
    /// Build ants on the rayon thread pool.
    pub parallel: bool,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            worker_weights: PhaseWeights::new(1.0, 3.0),
            task_weights: PhaseWeights::new(1.0, 2.0),
            stagnation_limit: 100,
            max_generations: None,
            time_limit: None,
            evaporation: 0.1,
            pheromone_floor: 1e-4,
            elite_fraction: 0.1,
            deposit_scale: 1.0,
            local_search: true,
            swap_top_n: 3,
            swap_attempts: 4,
            max_swap_failures: 8,
            parallel: true,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Default configuration with the exponents tuned for `family`.
    pub fn for_family(family: InstanceFamily) -> Self {
        let (worker, task) = match family {
            InstanceFamily::Heskiaoff => (PhaseWeights::new(0.0, 2.5), PhaseWeights::new(2.0, 1.0)),
            InstanceFamily::Roszieg => (PhaseWeights::new(0.5, 3.0), PhaseWeights::new(1.0, 2.0)),
            InstanceFamily::Tonge => (PhaseWeights::new(0.0, 2.0), PhaseWeights::new(0.0, 1.5)),
            InstanceFamily::WeeMag => (PhaseWeights::new(1.0, 3.0), PhaseWeights::new(1.0, 2.0)),
        };
        Self {
            worker_weights: worker,
            task_weights: task,
            ..Self::default()
        }
    }

    /// Sets the number of ants per generation (at least 1).
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(1);
        self
    }

    /// Sets the worker-phase exponents.
    pub fn with_worker_weights(mut self, weights: PhaseWeights) -> Self {
        self.worker_weights = weights;
        self
    }

    /// Sets the task-phase exponents.
    pub fn with_task_weights(mut self, weights: PhaseWeights) -> Self {
        self.task_weights = weights;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, generations: usize) -> Self {
        self.stagnation_limit = generations;
        self
    }

    /// Caps the number of generations.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = Some(generations);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the evaporation rate (clamped to `[0, 1]`).
    pub fn with_evaporation(mut self, rho: f64) -> Self {
        self.evaporation = rho.clamp(0.0, 1.0);
        self
    }

    /// Sets the trail floor (kept strictly positive).
    pub fn with_pheromone_floor(mut self, floor: f64) -> Self {
        self.pheromone_floor = floor.max(f64::MIN_POSITIVE);
        self
    }

    /// Sets the elite fraction (clamped to `[0, 1]`).
    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the deposit scale κ.
    pub fn with_deposit_scale(mut self, kappa: f64) -> Self {
        self.deposit_scale = kappa;
        self
    }

    /// Enables or disables local search.
    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    /// Sets the swap move parameters.
    pub fn with_swap(mut self, top_n: usize, attempts: usize, max_failures: usize) -> Self {
        self.swap_top_n = top_n.max(1);
        self.swap_attempts = attempts;
        self.max_swap_failures = max_failures;
        self
    }

    /// Enables or disables parallel ant construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elite ants for a generation with `feasible` feasible ants.
    pub fn elite_count(&self, feasible: usize) -> usize {
        if feasible == 0 {
            return 0;
        }
        ((feasible as f64 * self.elite_fraction - 1e-9).ceil() as usize).clamp(1, feasible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AcoConfig::default();
        assert_eq!(c.population_size, 30);
        assert!((c.evaporation - 0.1).abs() < 1e-10);
        assert!((c.pheromone_floor - 1e-4).abs() < 1e-12);
        assert!(c.local_search);
        assert!(c.max_generations.is_none());
    }

    #[test]
    fn test_builder_clamps() {
        let c = AcoConfig::default()
            .with_population_size(0)
            .with_evaporation(1.5)
            .with_elite_fraction(-0.2)
            .with_swap(0, 2, 3);
        assert_eq!(c.population_size, 1);
        assert!((c.evaporation - 1.0).abs() < 1e-10);
        assert_eq!(c.elite_fraction, 0.0);
        assert_eq!(c.swap_top_n, 1);

        let c = AcoConfig::default().with_pheromone_floor(0.0);
        assert!(c.pheromone_floor > 0.0);
        let c = AcoConfig::default().with_pheromone_floor(-3.0);
        assert!(c.pheromone_floor > 0.0);
    }

    #[test]
    fn test_family_presets() {
        let hes = AcoConfig::for_family(InstanceFamily::Heskiaoff);
        assert_eq!(hes.worker_weights, PhaseWeights::new(0.0, 2.5));
        assert_eq!(hes.task_weights, PhaseWeights::new(2.0, 1.0));

        let ton = AcoConfig::for_family(InstanceFamily::Tonge);
        assert_eq!(ton.task_weights, PhaseWeights::new(0.0, 1.5));
        assert_eq!(ton.population_size, AcoConfig::default().population_size);
    }

    #[test]
    fn test_elite_count() {
        let c = AcoConfig::default();
        assert_eq!(c.elite_count(0), 0);
        assert_eq!(c.elite_count(1), 1);
        assert_eq!(c.elite_count(30), 3);
        assert_eq!(c.elite_count(31), 4);
        assert_eq!(c.with_elite_fraction(0.0).elite_count(10), 1);
    }

    #[test]
    fn test_serde() {
        let c = AcoConfig::default()
            .with_seed(3)
            .with_time_limit(Duration::from_millis(250));
        let json = serde_json::to_string(&c).unwrap();
        let back: AcoConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(3));
        assert_eq!(back.time_limit, Some(Duration::from_millis(250)));
    }
}
