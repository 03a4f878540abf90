//! Annealing configuration.

use crate::error::AnnealError;
use crate::system::{ChargeRange, ChargeSign};

/// How candidate energies are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnergyMode {
    /// Recompute the full O(n²) pair sum for every candidate.
    #[default]
    Full,

    /// Decide on the moved node's O(n) energy delta.
    ///
    /// The full total is recomputed only when a move is committed, so
    /// rejected proposals stay O(n).
    Incremental,
}

/// Configuration for an annealing run.
///
/// Temperature decays linearly: after every `iterations_per_temperature`
/// attempts, `drop_rate` is subtracted. The run stops when the temperature
/// reaches `min_temperature` or the energy plateaus.
///
/// # Examples
///
/// ```
/// use charge_anneal::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_node_count(12)
///     .with_radius(50.0)
///     .with_initial_temperature(60.0)
///     .with_drop_rate(0.1)
///     .with_iterations_per_temperature(40)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Number of point charges.
    pub node_count: usize,

    /// Radius of the containing sphere, centered at the origin.
    pub radius: f64,

    /// Starting temperature.
    pub initial_temperature: f64,

    /// Temperature floor. No proposals are made at or below it.
    pub min_temperature: f64,

    /// Amount subtracted from the temperature after each round.
    pub drop_rate: f64,

    /// Proposal attempts per temperature level (`I_MAX`).
    ///
    /// Also the width of the trailing window used for convergence.
    pub iterations_per_temperature: usize,

    /// Worsening moves are only considered once the temperature falls
    /// below `activation_ratio * initial_temperature`.
    pub activation_ratio: f64,

    /// A round counts toward convergence when the trailing-window mean of
    /// the energy trace differs from its latest value by less than this.
    pub convergence_threshold: f64,

    /// Consecutive converging rounds needed to stop early.
    pub convergence_streak: usize,

    /// Lower bound of a proposal step length.
    pub min_step: f64,

    /// Upper bound of a proposal step length, as a fraction of `radius`.
    pub max_step_fraction: f64,

    /// Charge magnitudes for generated nodes.
    pub charges: ChargeRange,

    /// Sign policy for generated nodes.
    pub charge_sign: ChargeSign,

    /// Candidate energy evaluation strategy.
    pub energy_mode: EnergyMode,

    /// Evaluate full system energy with rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            node_count: 20,
            radius: 100.0,
            initial_temperature: 100.0,
            min_temperature: 1.0,
            drop_rate: 0.5,
            iterations_per_temperature: 100,
            activation_ratio: 0.95,
            convergence_threshold: 1e-10,
            convergence_streak: 2,
            min_step: 0.1,
            max_step_fraction: 0.1,
            charges: ChargeRange::default(),
            charge_sign: ChargeSign::default(),
            energy_mode: EnergyMode::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_node_count(mut self, n: usize) -> Self {
        self.node_count = n;
        self
    }

    pub fn with_radius(mut self, r: f64) -> Self {
        self.radius = r;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_drop_rate(mut self, rate: f64) -> Self {
        self.drop_rate = rate;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_activation_ratio(mut self, ratio: f64) -> Self {
        self.activation_ratio = ratio;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_convergence_streak(mut self, n: usize) -> Self {
        self.convergence_streak = n;
        self
    }

    /// Sets the step length range to `[min_step, max_step_fraction * radius)`.
    pub fn with_step(mut self, min_step: f64, max_step_fraction: f64) -> Self {
        self.min_step = min_step;
        self.max_step_fraction = max_step_fraction;
        self
    }

    pub fn with_charges(mut self, charges: ChargeRange) -> Self {
        self.charges = charges;
        self
    }

    pub fn with_charge_sign(mut self, sign: ChargeSign) -> Self {
        self.charge_sign = sign;
        self
    }

    pub fn with_energy_mode(mut self, mode: EnergyMode) -> Self {
        self.energy_mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Largest proposal step length.
    pub fn max_step(&self) -> f64 {
        self.max_step_fraction * self.radius
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AnnealError> {
        if self.node_count == 0 {
            return Err(AnnealError::invalid("node_count", "must be at least 1"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(AnnealError::invalid(
                "radius",
                format!("must be positive and finite, got {}", self.radius),
            ));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(AnnealError::invalid(
                "initial_temperature",
                format!("must be positive and finite, got {}", self.initial_temperature),
            ));
        }
        if self.min_temperature.is_nan() || self.min_temperature < 0.0 {
            return Err(AnnealError::invalid(
                "min_temperature",
                format!("must be non-negative, got {}", self.min_temperature),
            ));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(AnnealError::invalid(
                "min_temperature",
                "must be less than initial_temperature",
            ));
        }
        if !self.drop_rate.is_finite() || self.drop_rate <= 0.0 {
            return Err(AnnealError::invalid(
                "drop_rate",
                format!("must be positive and finite, got {}", self.drop_rate),
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err(AnnealError::invalid(
                "iterations_per_temperature",
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.activation_ratio) || self.activation_ratio == 0.0 {
            return Err(AnnealError::invalid(
                "activation_ratio",
                format!("must be in (0, 1], got {}", self.activation_ratio),
            ));
        }
        if self.convergence_threshold.is_nan() || self.convergence_threshold < 0.0 {
            return Err(AnnealError::invalid(
                "convergence_threshold",
                format!("must be non-negative, got {}", self.convergence_threshold),
            ));
        }
        if self.convergence_streak == 0 {
            return Err(AnnealError::invalid("convergence_streak", "must be at least 1"));
        }
        if self.min_step.is_nan() || self.min_step <= 0.0 || self.min_step >= self.max_step() {
            return Err(AnnealError::invalid(
                "min_step",
                format!(
                    "must satisfy 0 < min_step < max_step, got {} and {}",
                    self.min_step,
                    self.max_step()
                ),
            ));
        }
        if !self.max_step_fraction.is_finite() || self.max_step() > self.radius {
            return Err(AnnealError::invalid(
                "max_step_fraction",
                format!("must be finite and at most 1, got {}", self.max_step_fraction),
            ));
        }
        self.charges.validate()
    }
}
