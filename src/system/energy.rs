//! Electrostatic energy model.
//!
//! Energies are plain Coulomb sums over distinct pairs. Coincident charges
//! contribute zero instead of an infinite term, which keeps the search
//! stable when two nodes happen to land on the same point.

use super::types::{Configuration, Node};
use crate::geometry::distance;
use glam::DVec3;

/// Electrostatic constant `k` in N·m²/C².
pub const COULOMB_K: f64 = 8.99e9;

/// Energy between two point charges: `k * qa * qb / d`.
///
/// Returns `0.0` when the positions coincide.
#[inline]
pub fn pair_energy(a_pos: DVec3, a_charge: f64, b_pos: DVec3, b_charge: f64) -> f64 {
    let d = distance(a_pos, b_pos);
    if d == 0.0 {
        return 0.0;
    }
    COULOMB_K * (a_charge * b_charge) / d
}

#[inline]
fn node_pair_energy(a: &Node, b: &Node) -> f64 {
    pair_energy(a.position(), a.charge(), b.position(), b.charge())
}

/// Sum of node `i` against every node after it.
fn row_energy(nodes: &[Node], i: usize) -> f64 {
    let a = &nodes[i];
    nodes[i + 1..].iter().map(|b| node_pair_energy(a, b)).sum()
}

/// Total energy over all unordered pairs. O(n²).
pub fn system_energy(configuration: &Configuration) -> f64 {
    let nodes = configuration.nodes();
    (0..nodes.len()).map(|i| row_energy(nodes, i)).sum()
}

/// Row-parallel [`system_energy`].
///
/// Row sums are collected in order and added sequentially, so the result is
/// bit-identical to the sequential version regardless of thread scheduling.
#[cfg(feature = "parallel")]
pub fn system_energy_parallel(configuration: &Configuration) -> f64 {
    use rayon::prelude::*;

    let nodes = configuration.nodes();
    let rows: Vec<f64> = (0..nodes.len())
        .into_par_iter()
        .map(|i| row_energy(nodes, i))
        .collect();
    rows.into_iter().sum()
}

/// Total energy, using the parallel path when requested and compiled in.
pub fn evaluate(configuration: &Configuration, parallel: bool) -> f64 {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return system_energy_parallel(configuration);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    system_energy(configuration)
}

/// Energy of node `index` placed at `position`, against all other nodes.
pub fn node_energy_at(configuration: &Configuration, index: usize, position: DVec3) -> f64 {
    let charge = configuration.node(index).charge();
    configuration
        .nodes()
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .map(|(_, other)| pair_energy(position, charge, other.position(), other.charge()))
        .sum()
}

/// Energy between node `index` and every other node, skipping the self-pair.
pub fn energy_excluding(configuration: &Configuration, index: usize) -> f64 {
    node_energy_at(configuration, index, configuration.node(index).position())
}

/// Change in total energy if node `index` moves to `new_position`.
///
/// Equivalent to `system_energy(moved) - system_energy(current)` up to
/// rounding, at O(n) instead of O(n²).
pub fn energy_delta(configuration: &Configuration, index: usize, new_position: DVec3) -> f64 {
    node_energy_at(configuration, index, new_position) - energy_excluding(configuration, index)
}
