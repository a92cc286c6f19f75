//! Line balancing domain models.
//!
//! Provides the data types for representing assembly line worker assignment
//! and balancing problems and their solutions.
//!
//! # Domain Mappings
//!
//! | u-linebalance | Manufacturing | Sheltered work centre |
//! |---------------|---------------|-----------------------|
//! | Task | Operation | Assembly step |
//! | Worker | Operator | Worker with disability profile |
//! | Station | Workstation | Work position |
//! | Candidate / LineBalance | Line layout | Daily assignment |
//!
//! Incompatible task-worker pairs carry the [`INCOMPATIBLE`] sentinel in the
//! time matrix and cost [`LineInstance::incompatibility_penalty`] (never less
//! than [`INCOMPATIBILITY_PENALTY`]) when forced.

mod balance;
mod candidate;
mod instance;
mod station;
mod task;
mod worker;

pub use balance::{LineBalance, StationPlan, Violation, ViolationType};
pub use candidate::Candidate;
pub use instance::LineInstance;
pub use station::{Station, LOAD_TOLERANCE};
pub use task::{Task, INCOMPATIBILITY_PENALTY, INCOMPATIBLE};
pub use worker::Worker;
