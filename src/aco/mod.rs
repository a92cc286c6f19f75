//! Ant colony optimization for worker assignment and line balancing.
//!
//! Each ant builds a full line in two phases (workers to stations, then
//! tasks to stations) by roulette sampling over pheromone trails and
//! inverse-time heuristics, then repairs its bottleneck with shift and swap
//! moves. Elite ants reinforce the trails between generations.
//!
//! # Submodules
//!
//! - [`construction`]: Two-phase ant construction
//! - [`local_search`]: Bottleneck shift and swap moves
//!
//! # Reference
//! - Dorigo & Stützle (2004), "Ant Colony Optimization"
//! - Miralles et al. (2008), "Branch and bound procedures for solving the
//!   Assembly Line Worker Assignment and Balancing Problem", C&OR 35(7)

mod colony;
mod config;
pub mod construction;
pub mod local_search;
mod pheromone;
mod sampling;

pub use colony::{solve, AntColony, ColonyResult, GenerationStats, StopReason, NO_SOLUTION};
pub use config::{AcoConfig, InstanceFamily, PhaseWeights};
pub use construction::construct;
pub use local_search::{improve, shift, swap};
pub use pheromone::PheromoneTrails;
pub use sampling::roulette_select;
