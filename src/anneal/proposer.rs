//! Sphere-constrained move proposals.

use super::config::AnnealConfig;
use crate::error::AnnealError;
use crate::geometry::{direction_from_angles, is_inside_sphere};
use glam::DVec3;
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// Proposes random displacements that stay inside the sphere.
///
/// A move picks a direction from spherical angles (polar in `[0, pi]`,
/// azimuth in `[0, 2pi)`) and a length in `[min_step, max_step)`. Candidates
/// that leave the sphere are redrawn, so every returned point satisfies
/// `|p| <= radius`.
#[derive(Debug, Clone)]
pub struct SphereProposer {
    radius: f64,
    min_step: f64,
    max_step: f64,
}

impl SphereProposer {
    /// Creates a proposer with steps in `[min_step, max_step_fraction * radius)`.
    ///
    /// Fails unless `radius` is positive and the step range is non-empty
    /// and no longer than the radius.
    pub fn new(radius: f64, min_step: f64, max_step_fraction: f64) -> Result<Self, AnnealError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(AnnealError::invalid(
                "radius",
                format!("must be positive and finite, got {radius}"),
            ));
        }
        if !max_step_fraction.is_finite() || max_step_fraction > 1.0 {
            return Err(AnnealError::invalid(
                "max_step_fraction",
                format!("must be finite and at most 1, got {max_step_fraction}"),
            ));
        }
        let max_step = max_step_fraction * radius;
        if min_step.is_nan() || min_step <= 0.0 || min_step >= max_step {
            return Err(AnnealError::invalid(
                "min_step",
                format!("must satisfy 0 < min_step < max_step, got {min_step} and {max_step}"),
            ));
        }
        Ok(Self {
            radius,
            min_step,
            max_step,
        })
    }

    /// Builds from a configuration that has already passed
    /// [`AnnealConfig::validate`].
    pub(crate) fn from_config(config: &AnnealConfig) -> Self {
        Self {
            radius: config.radius,
            min_step: config.min_step,
            max_step: config.max_step(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns a new position near `position`, inside the sphere.
    ///
    /// `position` must itself be inside the sphere; from an interior point
    /// some inward direction always succeeds, so the redraw loop terminates.
    pub fn propose<R: Rng>(&self, position: DVec3, rng: &mut R) -> DVec3 {
        loop {
            let polar = rng.random_range(0.0..=PI);
            let azimuth = rng.random_range(0.0..TAU);
            let step = rng.random_range(self.min_step..self.max_step);
            let candidate = position + direction_from_angles(polar, azimuth) * step;
            if is_inside_sphere(candidate, self.radius) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance;
    use crate::random::create_rng;

    #[test]
    fn test_propose_stays_inside() {
        let proposer = SphereProposer::new(100.0, 0.1, 0.1).unwrap();
        let mut rng = create_rng(42);
        let mut p = DVec3::new(60.0, -40.0, 30.0);
        for _ in 0..5000 {
            p = proposer.propose(p, &mut rng);
            assert!(p.length() <= 100.0, "{p} escaped");
        }
    }

    #[test]
    fn test_propose_from_boundary() {
        let proposer = SphereProposer::new(100.0, 0.1, 0.1).unwrap();
        let mut rng = create_rng(7);
        let on_surface = DVec3::new(0.0, 0.0, 100.0);
        for _ in 0..500 {
            let p = proposer.propose(on_surface, &mut rng);
            assert!(p.length() <= 100.0);
        }
    }

    #[test]
    fn test_step_length_in_range() {
        let proposer = SphereProposer::new(100.0, 0.1, 0.1).unwrap();
        let mut rng = create_rng(3);
        for _ in 0..1000 {
            let p = proposer.propose(DVec3::ZERO, &mut rng);
            let step = distance(p, DVec3::ZERO);
            assert!(step >= 0.1 - 1e-12 && step < 10.0 + 1e-12, "step {step}");
        }
    }

    #[test]
    fn test_new_rejects_empty_step_range() {
        // max_step = 0.1 * 1.0 equals min_step
        let err = SphereProposer::new(1.0, 0.1, 0.1).unwrap_err();
        assert!(matches!(err, AnnealError::InvalidConfig { field: "min_step", .. }));
        assert!(SphereProposer::new(100.0, 5.0, 0.01).is_err());
        assert!(SphereProposer::new(100.0, 0.0, 0.1).is_err());
    }

    #[test]
    fn test_new_rejects_bad_radius_and_fraction() {
        assert!(SphereProposer::new(0.0, 0.1, 0.1).is_err());
        assert!(SphereProposer::new(f64::NAN, 0.1, 0.1).is_err());
        assert!(SphereProposer::new(100.0, 0.1, 1.5).is_err());
    }

    #[test]
    fn test_from_config_matches_new() {
        let config = AnnealConfig::default();
        let built = SphereProposer::from_config(&config);
        let direct = SphereProposer::new(100.0, 0.1, 0.1).unwrap();
        let a = built.propose(DVec3::ZERO, &mut create_rng(4));
        let b = direct.propose(DVec3::ZERO, &mut create_rng(4));
        assert_eq!(a, b);
    }

    #[test]
    fn test_propose_deterministic() {
        let proposer = SphereProposer::new(50.0, 0.1, 0.1).unwrap();
        let a = proposer.propose(DVec3::X, &mut create_rng(11));
        let b = proposer.propose(DVec3::X, &mut create_rng(11));
        assert_eq!(a, b);
    }
}
