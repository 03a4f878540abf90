//! Initial configuration generation.

use super::types::{Configuration, Node};
use crate::error::AnnealError;
use crate::geometry::random_point_in_sphere;
use rand::Rng;

/// Range of charge magnitudes, in coulombs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ChargeRange {
    /// 1 nC to 100 nC.
    fn default() -> Self {
        Self {
            min: 1e-9,
            max: 1e-7,
        }
    }
}

impl ChargeRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draws a magnitude uniformly from `[min, max]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.min..=self.max)
    }

    pub fn validate(&self) -> Result<(), AnnealError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(AnnealError::invalid("charges", "bounds must be finite"));
        }
        if self.min <= 0.0 {
            return Err(AnnealError::invalid(
                "charges",
                format!("minimum magnitude must be positive, got {}", self.min),
            ));
        }
        if self.min > self.max {
            return Err(AnnealError::invalid(
                "charges",
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Sign policy for generated charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargeSign {
    /// All charges positive (purely repulsive system).
    #[default]
    Positive,
    /// Each charge independently positive or negative with equal odds.
    Mixed,
}

/// Builds random starting configurations.
///
/// Positions are uniform inside the sphere; charges are drawn from
/// [`ChargeRange`] and signed per [`ChargeSign`].
#[derive(Debug, Clone)]
pub struct NodeGenerator {
    radius: f64,
    charges: ChargeRange,
    sign: ChargeSign,
}

impl NodeGenerator {
    pub fn new(radius: f64, charges: ChargeRange, sign: ChargeSign) -> Self {
        Self {
            radius,
            charges,
            sign,
        }
    }

    /// Generates `count` nodes.
    pub fn generate<R: Rng>(&self, count: usize, rng: &mut R) -> Configuration {
        let nodes = (0..count)
            .map(|_| {
                let position = random_point_in_sphere(self.radius, rng);
                let magnitude = self.charges.sample(rng);
                let charge = match self.sign {
                    ChargeSign::Positive => magnitude,
                    ChargeSign::Mixed if rng.random_bool(0.5) => -magnitude,
                    ChargeSign::Mixed => magnitude,
                };
                Node::new(position, charge)
            })
            .collect();
        Configuration::new(nodes)
    }
}
