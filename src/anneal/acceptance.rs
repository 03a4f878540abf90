//! Metropolis acceptance with a cooling-gated activation threshold.
//!
//! A candidate is "improving" when its energy magnitude is strictly smaller
//! than the current one. Improving moves are always taken. Other moves are
//! rejected outright while the system is still hot (temperature at or above
//! `activation_ratio * initial_temperature`), and afterwards accepted with
//! probability `exp((current - candidate) / T)`.
//!
//! Comparing magnitudes rather than signed energies matters once charges of
//! both signs are present: a more strongly bound (more negative) state has a
//! larger magnitude and counts as worsening here.

use rand::Rng;

/// Outcome of evaluating one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// Strictly smaller energy magnitude; accepted unconditionally.
    Improved,
    /// Not improving, accepted by the Metropolis draw.
    Accepted,
    /// Not improving and the schedule has not cooled past activation.
    Gated,
    /// Not improving, rejected by the Metropolis draw.
    Rejected,
}

impl Decision {
    /// Whether the candidate should be committed.
    pub fn is_accepted(self) -> bool {
        matches!(self, Decision::Improved | Decision::Accepted)
    }
}

/// Metropolis probability `exp((current - candidate) / temperature)`.
///
/// May exceed 1 when the candidate is lower in signed energy.
/// `temperature` must be positive.
#[inline]
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    ((current - candidate) / temperature).exp()
}

/// Gated Metropolis criterion.
#[derive(Debug, Clone, Copy)]
pub struct MetropolisCriterion {
    activation_ratio: f64,
}

impl Default for MetropolisCriterion {
    fn default() -> Self {
        Self::new(0.95)
    }
}

impl MetropolisCriterion {
    pub fn new(activation_ratio: f64) -> Self {
        Self { activation_ratio }
    }

    /// Whether the schedule has cooled enough to consider worsening moves.
    pub fn is_active(&self, temperature: f64, initial_temperature: f64) -> bool {
        temperature < self.activation_ratio * initial_temperature
    }

    /// Decides with an explicit uniform draw in `[0, 1)`.
    pub fn decide(
        &self,
        current: f64,
        candidate: f64,
        temperature: f64,
        initial_temperature: f64,
        draw: f64,
    ) -> Decision {
        if candidate.abs() < current.abs() {
            return Decision::Improved;
        }
        if !self.is_active(temperature, initial_temperature) {
            return Decision::Gated;
        }
        if draw < acceptance_probability(current, candidate, temperature) {
            Decision::Accepted
        } else {
            Decision::Rejected
        }
    }

    /// Decides, drawing from `rng` only when the Metropolis test is reached.
    pub fn evaluate<R: Rng>(
        &self,
        current: f64,
        candidate: f64,
        temperature: f64,
        initial_temperature: f64,
        rng: &mut R,
    ) -> Decision {
        if candidate.abs() < current.abs() {
            return Decision::Improved;
        }
        if !self.is_active(temperature, initial_temperature) {
            return Decision::Gated;
        }
        let draw = rng.random_range(0.0..1.0);
        self.decide(current, candidate, temperature, initial_temperature, draw)
    }

    /// Boolean form of [`evaluate`](Self::evaluate).
    pub fn accept<R: Rng>(
        &self,
        current: f64,
        candidate: f64,
        temperature: f64,
        initial_temperature: f64,
        rng: &mut R,
    ) -> bool {
        self.evaluate(current, candidate, temperature, initial_temperature, rng)
            .is_accepted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_improving_always_accepted() {
        let c = MetropolisCriterion::default();
        // hot, and with the worst possible draw
        assert_eq!(c.decide(5.0, 4.0, 100.0, 100.0, 0.999), Decision::Improved);
        assert_eq!(c.decide(-5.0, 4.0, 1.0, 100.0, 0.999), Decision::Improved);
    }

    #[test]
    fn test_gated_while_hot() {
        let c = MetropolisCriterion::default();
        assert_eq!(c.decide(4.0, 5.0, 100.0, 100.0, 0.0), Decision::Gated);
        assert_eq!(c.decide(4.0, 5.0, 95.0, 100.0, 0.0), Decision::Gated);
        // equal energy is not improving
        assert_eq!(c.decide(4.0, 4.0, 96.0, 100.0, 0.0), Decision::Gated);
    }

    #[test]
    fn test_metropolis_past_activation() {
        let c = MetropolisCriterion::default();
        let p = acceptance_probability(4.0, 5.0, 10.0);
        assert!((p - (-0.1_f64).exp()).abs() < 1e-12);
        assert_eq!(c.decide(4.0, 5.0, 10.0, 100.0, p - 1e-6), Decision::Accepted);
        assert_eq!(c.decide(4.0, 5.0, 10.0, 100.0, p + 1e-6), Decision::Rejected);
    }

    #[test]
    fn test_magnitude_comparison_with_negative_energy() {
        let c = MetropolisCriterion::default();
        // -6 is lower in signed energy but larger in magnitude than -5;
        // exp((-5 - -6) / T) > 1, so once active any draw accepts it.
        assert_eq!(c.decide(-5.0, -6.0, 99.0, 100.0, 0.0), Decision::Gated);
        assert_eq!(c.decide(-5.0, -6.0, 50.0, 100.0, 0.999), Decision::Accepted);
    }

    #[test]
    fn test_equal_energy_accepted_once_active() {
        let c = MetropolisCriterion::default();
        let mut rng = create_rng(42);
        for _ in 0..100 {
            assert!(c.accept(0.0, 0.0, 10.0, 100.0, &mut rng));
        }
    }

    #[test]
    fn test_evaluate_skips_draw_when_not_needed() {
        let c = MetropolisCriterion::default();
        let mut a = create_rng(5);
        let mut b = create_rng(5);
        assert_eq!(c.evaluate(5.0, 1.0, 10.0, 100.0, &mut a), Decision::Improved);
        assert_eq!(c.evaluate(1.0, 5.0, 100.0, 100.0, &mut a), Decision::Gated);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn test_decision_is_accepted() {
        assert!(Decision::Improved.is_accepted());
        assert!(Decision::Accepted.is_accepted());
        assert!(!Decision::Gated.is_accepted());
        assert!(!Decision::Rejected.is_accepted());
    }
}
