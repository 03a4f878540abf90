//! Simulated annealing over point-charge configurations.
//!
//! Each round makes a fixed number of proposals at one temperature: a
//! random node is displaced inside the sphere, the candidate energy is
//! computed, and a gated Metropolis rule decides whether to keep it. The
//! temperature then drops linearly. A run ends when the energy trace
//! plateaus for several consecutive rounds or the temperature reaches its
//! floor.
//!
//! # References
//!
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod acceptance;
mod config;
mod proposer;
mod runner;
mod trace;

pub use acceptance::{acceptance_probability, Decision, MetropolisCriterion};
pub use config::{AnnealConfig, EnergyMode};
pub use proposer::SphereProposer;
pub use runner::{AnnealResult, AnnealRunner, AnnealState, Termination};
pub use trace::{Snapshot, Trace};
