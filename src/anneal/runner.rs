//! Annealing control loop.

use super::acceptance::{Decision, MetropolisCriterion};
use super::config::{AnnealConfig, EnergyMode};
use super::proposer::SphereProposer;
use super::trace::Trace;
use crate::error::AnnealError;
use crate::geometry::is_inside_sphere;
use crate::random::{create_entropy_rng, create_rng};
use crate::system::energy::{energy_delta, evaluate};
use crate::system::{Configuration, NodeGenerator};
use rand::Rng;
use tracing::{debug, info, instrument};

/// Controller state.
///
/// `Initializing -> Cooling(T) -> ... -> Converged | Exhausted`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnealState {
    /// Initial energy not yet computed.
    Initializing,
    /// Running rounds of proposals at `temperature`.
    Cooling { temperature: f64 },
    /// Energy plateaued for the required number of rounds.
    Converged,
    /// Temperature reached the floor first.
    Exhausted,
}

/// Why a run stopped. Both outcomes return a complete result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    Converged,
    Exhausted,
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// Live configuration when the run stopped.
    pub configuration: Configuration,

    /// Energy of the starting configuration.
    pub initial_energy: f64,

    /// Energy of `configuration`.
    pub final_energy: f64,

    /// Configuration with the smallest energy magnitude seen.
    pub best_configuration: Configuration,

    /// Energy of `best_configuration`.
    pub best_energy: f64,

    /// Completed cooling rounds.
    pub rounds: usize,

    /// Total proposal attempts (`rounds * iterations_per_temperature`).
    pub iterations: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    pub termination: Termination,

    /// Moves that strictly reduced the energy magnitude.
    pub improving_moves: usize,

    /// All committed moves, improving ones included.
    pub accepted_moves: usize,

    /// Worsening moves rejected before the activation threshold.
    pub gated_rejections: usize,

    /// Worsening moves rejected by the Metropolis draw.
    pub metropolis_rejections: usize,

    /// Energy and position history.
    pub trace: Trace,
}

impl AnnealResult {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Executes simulated annealing over a point-charge system.
///
/// # Usage
///
/// ```
/// use charge_anneal::anneal::{AnnealConfig, AnnealRunner};
///
/// let config = AnnealConfig::default()
///     .with_node_count(5)
///     .with_initial_temperature(10.0)
///     .with_drop_rate(1.0)
///     .with_iterations_per_temperature(20)
///     .with_seed(42);
/// let result = AnnealRunner::run(&config).unwrap();
/// assert_eq!(result.trace.len(), 1 + result.rounds * 20);
/// ```
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs with a generator seeded from `config.seed`, or from entropy.
    pub fn run(config: &AnnealConfig) -> Result<AnnealResult, AnnealError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_entropy_rng(),
        };
        Self::run_with_rng(config, &mut rng)
    }

    /// Runs with an injected random source. `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        config: &AnnealConfig,
        rng: &mut R,
    ) -> Result<AnnealResult, AnnealError> {
        config.validate()?;

        let generator = NodeGenerator::new(config.radius, config.charges, config.charge_sign);
        let initial = generator.generate(config.node_count, rng);
        Ok(anneal(config, initial, rng))
    }

    /// Runs from a caller-supplied starting configuration.
    ///
    /// `config.node_count` and the charge settings are ignored; every node
    /// of `initial` must lie inside the sphere of `config.radius`.
    pub fn run_from<R: Rng>(
        config: &AnnealConfig,
        initial: Configuration,
        rng: &mut R,
    ) -> Result<AnnealResult, AnnealError> {
        config.validate()?;

        if initial.is_empty() {
            return Err(AnnealError::invalid("initial", "must contain at least one node"));
        }
        if let Some((i, node)) = initial
            .nodes()
            .iter()
            .enumerate()
            .find(|(_, n)| !is_inside_sphere(n.position(), config.radius))
        {
            return Err(AnnealError::invalid(
                "initial",
                format!(
                    "node {i} at {} lies outside radius {}",
                    node.position(),
                    config.radius
                ),
            ));
        }
        Ok(anneal(config, initial, rng))
    }
}

#[instrument(skip_all, name = "anneal", fields(nodes = initial.len()))]
fn anneal<R: Rng>(config: &AnnealConfig, initial: Configuration, rng: &mut R) -> AnnealResult {
    let mut controller = Controller::new(config, initial, rng);
    let termination = controller.run();
    controller.finish(termination)
}

#[derive(Debug, Default)]
struct DecisionCounts {
    improving: usize,
    accepted: usize,
    gated: usize,
    rejected: usize,
}

impl DecisionCounts {
    fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Improved => {
                self.improving += 1;
                self.accepted += 1;
            }
            Decision::Accepted => self.accepted += 1,
            Decision::Gated => self.gated += 1,
            Decision::Rejected => self.rejected += 1,
        }
    }
}

/// Per-run state. Owns the live configuration; nothing else mutates it.
struct Controller<'a, R: Rng> {
    config: &'a AnnealConfig,
    rng: &'a mut R,
    proposer: SphereProposer,
    criterion: MetropolisCriterion,
    state: AnnealState,
    live: Configuration,
    energy: f64,
    initial_energy: f64,
    best: Configuration,
    best_energy: f64,
    temperature: f64,
    trace: Trace,
    rounds: usize,
    iterations: usize,
    streak: usize,
    counts: DecisionCounts,
}

impl<'a, R: Rng> Controller<'a, R> {
    fn new(config: &'a AnnealConfig, initial: Configuration, rng: &'a mut R) -> Self {
        Self {
            config,
            rng,
            proposer: SphereProposer::from_config(config),
            criterion: MetropolisCriterion::new(config.activation_ratio),
            state: AnnealState::Initializing,
            best: initial.clone(),
            live: initial,
            energy: 0.0,
            initial_energy: 0.0,
            best_energy: 0.0,
            temperature: config.initial_temperature,
            trace: Trace::with_capacity(config.iterations_per_temperature + 1),
            rounds: 0,
            iterations: 0,
            streak: 0,
            counts: DecisionCounts::default(),
        }
    }

    fn run(&mut self) -> Termination {
        loop {
            self.state = match self.state {
                AnnealState::Initializing => self.initialize(),
                AnnealState::Cooling { temperature } => self.cooling_round(temperature),
                AnnealState::Converged => return Termination::Converged,
                AnnealState::Exhausted => return Termination::Exhausted,
            };
        }
    }

    fn initialize(&mut self) -> AnnealState {
        self.energy = evaluate(&self.live, self.config.parallel);
        self.initial_energy = self.energy;
        self.best_energy = self.energy;
        self.trace
            .record(self.config.initial_temperature, self.energy, &self.live);

        info!(
            initial_energy = self.energy,
            temperature = self.config.initial_temperature,
            "starting annealing"
        );
        AnnealState::Cooling {
            temperature: self.config.initial_temperature,
        }
    }

    fn cooling_round(&mut self, temperature: f64) -> AnnealState {
        if temperature <= self.config.min_temperature {
            return AnnealState::Exhausted;
        }

        let window = self.config.iterations_per_temperature;
        for _ in 0..window {
            self.attempt(temperature);
        }
        self.rounds += 1;
        self.temperature = temperature - self.config.drop_rate;

        let delta = self
            .trace
            .convergence_delta(window)
            .unwrap_or(f64::INFINITY);
        if delta < self.config.convergence_threshold {
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        debug!(
            round = self.rounds,
            temperature,
            energy = self.energy,
            delta,
            streak = self.streak,
            "cooling round complete"
        );

        if self.streak >= self.config.convergence_streak {
            AnnealState::Converged
        } else {
            AnnealState::Cooling {
                temperature: self.temperature,
            }
        }
    }

    /// One proposal: pick a node, move it, decide, record.
    fn attempt(&mut self, temperature: f64) {
        let index = self.rng.random_range(0..self.live.len());
        let proposed = self
            .proposer
            .propose(self.live.node(index).position(), &mut *self.rng);

        let (candidate, candidate_energy) = match self.config.energy_mode {
            EnergyMode::Full => {
                let candidate = self.live.with_position(index, proposed);
                let energy = evaluate(&candidate, self.config.parallel);
                (Some(candidate), energy)
            }
            EnergyMode::Incremental => (
                None,
                self.energy + energy_delta(&self.live, index, proposed),
            ),
        };

        let decision = self.criterion.evaluate(
            self.energy,
            candidate_energy,
            temperature,
            self.config.initial_temperature,
            &mut *self.rng,
        );
        self.counts.record(decision);

        if decision.is_accepted() {
            match candidate {
                Some(candidate) => self.live = candidate,
                None => self.live.set_position(index, proposed),
            }
            // The delta only drives the decision; committed states carry the
            // exact total so every trace entry matches its snapshot.
            self.energy = match self.config.energy_mode {
                EnergyMode::Full => candidate_energy,
                EnergyMode::Incremental => evaluate(&self.live, self.config.parallel),
            };

            if self.energy.abs() < self.best_energy.abs() {
                self.best_energy = self.energy;
                self.best = self.live.clone();
            }
        }

        self.iterations += 1;
        self.trace.record(temperature, self.energy, &self.live);
    }

    fn finish(self, termination: Termination) -> AnnealResult {
        info!(
            ?termination,
            rounds = self.rounds,
            final_energy = self.energy,
            best_energy = self.best_energy,
            final_temperature = self.temperature,
            "annealing finished"
        );

        AnnealResult {
            configuration: self.live,
            initial_energy: self.initial_energy,
            final_energy: self.energy,
            best_configuration: self.best,
            best_energy: self.best_energy,
            rounds: self.rounds,
            iterations: self.iterations,
            final_temperature: self.temperature,
            termination,
            improving_moves: self.counts.improving,
            accepted_moves: self.counts.accepted,
            gated_rejections: self.counts.gated,
            metropolis_rejections: self.counts.rejected,
            trace: self.trace,
        }
    }
}
