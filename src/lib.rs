//! Low-energy point-charge configurations by simulated annealing.
//!
//! A fixed set of point charges is confined to a sphere centered at the
//! origin. Starting from a random placement, the search repeatedly moves
//! one charge, evaluates the Coulomb energy of the whole system, and keeps
//! or discards the move by a temperature-controlled Metropolis rule.
//!
//! - [`system`]: nodes, configurations, the energy model and the random
//!   initial generator.
//! - [`anneal`]: move proposals, the acceptance rule, and the control loop
//!   that produces an energy trace and a position trace.
//! - [`geometry`]: distance and containment helpers over `glam::DVec3`.
//!
//! The crate has no I/O. Traces are returned to the caller for plotting
//! or animation; enable the `serde` feature to serialize them.
//!
//! # Example
//!
//! ```
//! use charge_anneal::anneal::{AnnealConfig, AnnealRunner};
//!
//! let config = AnnealConfig::default()
//!     .with_node_count(8)
//!     .with_initial_temperature(20.0)
//!     .with_drop_rate(1.0)
//!     .with_iterations_per_temperature(25)
//!     .with_seed(7);
//! let result = AnnealRunner::run(&config).unwrap();
//! assert!(result.best_energy <= result.initial_energy);
//! ```

pub mod anneal;
pub mod error;
pub mod geometry;
pub mod random;
pub mod system;

pub use error::AnnealError;
