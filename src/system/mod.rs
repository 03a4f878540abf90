//! Point-charge system: nodes, configurations, energy and generation.
//!
//! The energy model is Coulomb's law summed over distinct pairs. It has no
//! randomness and never mutates its input.

pub mod energy;
mod generator;
mod types;

pub use energy::{
    energy_delta, energy_excluding, node_energy_at, pair_energy, system_energy, COULOMB_K,
};
pub use generator::{ChargeRange, ChargeSign, NodeGenerator};
pub use types::{Configuration, Node};
