//! Energy and position history of a run.

use crate::system::Configuration;
use glam::DVec3;

/// State captured after one accept/reject decision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Temperature at capture time.
    pub temperature: f64,
    /// Total energy of the live configuration.
    pub energy: f64,
    /// Positions of all nodes, in node order.
    pub positions: Vec<DVec3>,
}

/// Append-only record of a run.
///
/// Holds one entry for the initial state plus one per proposal attempt,
/// whether or not the attempt was accepted. `energies()[i]` and
/// `snapshots()[i]` describe the same moment.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    energies: Vec<f64>,
    snapshots: Vec<Snapshot>,
}

impl Trace {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            energies: Vec::with_capacity(capacity),
            snapshots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn record(&mut self, temperature: f64, energy: f64, configuration: &Configuration) {
        self.energies.push(energy);
        self.snapshots.push(Snapshot {
            temperature,
            energy,
            positions: configuration.positions(),
        });
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.energies.capacity().max(self.snapshots.capacity())
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn last_energy(&self) -> Option<f64> {
        self.energies.last().copied()
    }

    /// Mean of the most recent `window` energies (fewer if the trace is shorter).
    pub fn trailing_mean(&self, window: usize) -> Option<f64> {
        if self.energies.is_empty() || window == 0 {
            return None;
        }
        let start = self.energies.len().saturating_sub(window);
        let tail = &self.energies[start..];
        Some(tail.iter().sum::<f64>() / tail.len() as f64)
    }

    /// `|trailing_mean(window) - last_energy()|`, the plateau indicator.
    pub fn convergence_delta(&self, window: usize) -> Option<f64> {
        let mean = self.trailing_mean(window)?;
        let last = self.last_energy()?;
        Some((mean - last).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::Node;

    fn trace_of(energies: &[f64]) -> Trace {
        let config = Configuration::new(vec![Node::new(DVec3::ZERO, 1e-9)]);
        let mut trace = Trace::default();
        for &e in energies {
            trace.record(1.0, e, &config);
        }
        trace
    }

    #[test]
    fn test_empty_trace() {
        let trace = Trace::default();
        assert!(trace.is_empty());
        assert_eq!(trace.trailing_mean(4), None);
        assert_eq!(trace.convergence_delta(4), None);
    }

    #[test]
    fn test_trailing_mean_window() {
        let trace = trace_of(&[100.0, 1.0, 2.0, 3.0]);
        assert!((trace.trailing_mean(3).unwrap() - 2.0).abs() < 1e-12);
        assert!((trace.trailing_mean(10).unwrap() - 26.5).abs() < 1e-12);
    }

    #[test]
    fn test_convergence_delta() {
        let trace = trace_of(&[4.0, 4.0, 4.0, 1.0]);
        assert!((trace.convergence_delta(4).unwrap() - 2.25).abs() < 1e-12);
        let flat = trace_of(&[7.0; 5]);
        assert_eq!(flat.convergence_delta(3), Some(0.0));
    }

    #[test]
    fn test_snapshots_parallel_to_energies() {
        let trace = trace_of(&[1.0, 2.0]);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.snapshots().len(), 2);
        assert_eq!(trace.snapshots()[1].energy, trace.energies()[1]);
        assert_eq!(trace.snapshots()[0].positions, vec![DVec3::ZERO]);
    }
}
