//! Vector and distance utilities.
//!
//! Positions are `glam::DVec3`; everything here is a thin, explicitly named
//! wrapper so the energy model and the proposer agree on one definition of
//! distance and containment.

use glam::DVec3;
use rand::Rng;

/// Euclidean distance between two positions.
#[inline]
pub fn distance(a: DVec3, b: DVec3) -> f64 {
    (a - b).length()
}

/// Whether `p` lies inside (or on) the sphere of `radius` centered at the origin.
#[inline]
pub fn is_inside_sphere(p: DVec3, radius: f64) -> bool {
    p.length() <= radius
}

/// Unit direction from spherical angles.
///
/// `polar` is measured from the +z axis, `azimuth` in the xy-plane from +x.
#[inline]
pub fn direction_from_angles(polar: f64, azimuth: f64) -> DVec3 {
    let (sin_p, cos_p) = polar.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    DVec3::new(sin_p * cos_a, sin_p * sin_a, cos_p)
}

/// Samples a point uniformly distributed inside the sphere of `radius`.
///
/// Rejection sampling from the bounding cube; the acceptance rate is
/// `pi / 6`, so the expected number of draws is below two.
pub fn random_point_in_sphere<R: Rng>(radius: f64, rng: &mut R) -> DVec3 {
    loop {
        let p = DVec3::new(
            rng.random_range(-radius..=radius),
            rng.random_range(-radius..=radius),
            rng.random_range(-radius..=radius),
        );
        if is_inside_sphere(p, radius) {
            return p;
        }
    }
}
