//! Assembly line worker assignment and balancing for the U-Engine ecosystem.
//!
//! Solves the ALWABP-2 problem: given tasks with worker-dependent times
//! (some pairs incompatible), a precedence graph and as many workers as
//! stations, staff every station and place every task so that the cycle
//! time (largest station load) is minimal.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Worker`, `LineInstance`, `Station`,
//!   `Candidate`, `LineBalance`, `Violation`
//! - **`validation`**: Input integrity checks (dimensions, DAG cycles,
//!   unperformable tasks) and solution checks
//! - **`aco`**: Ant colony search: construction, local search, pheromone
//!   trails, generation loop
//! - **`kpi`**: Line balance quality metrics
//!
//! # Example
//! ```
//! use u_linebalance::aco::{solve, AcoConfig};
//! use u_linebalance::models::{LineInstance, INCOMPATIBLE};
//!
//! let times = vec![
//!     vec![4, 6],
//!     vec![3, INCOMPATIBLE],
//!     vec![5, 2],
//! ];
//! let instance = LineInstance::new(times, &[(0, 2)]).unwrap();
//! let cycle = solve(&instance, &AcoConfig::default().with_seed(1));
//! assert!(cycle >= instance.lower_bound() as f64);
//! ```
//!
//! # References
//!
//! - Miralles et al. (2007), "Assembly line balancing in sheltered work
//!   centres", IJPR 45(7)
//! - Becker & Scholl (2006), "A survey on problems and methods in
//!   generalized assembly line balancing", EJOR 168

pub mod aco;
pub mod kpi;
pub mod models;
pub mod validation;
