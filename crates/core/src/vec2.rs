//! Vector helpers on top of [`glam::DVec2`].
//!
//! `DVec2` already covers the arithmetic the simulation needs (add, scale,
//! component-wise divide, `length`, `length_squared`, unclamped `lerp`,
//! `min_element`, `element_sum`). This module adds the three operations it
//! lacks, with the angle conventions the rest of the system relies on.

use glam::DVec2;

/// Returns the angle of `v` in radians, range (−π, π].
///
/// The zero vector has no defined direction; this returns exactly `0.0` for
/// it (the `atan2(0, 0) = 0` convention), so angle-derived code stays total
/// for freshly spawned particles with zero velocity.
pub fn angle_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Rotates `v` onto `angle`, preserving its magnitude.
///
/// Result is `|v| * (cos angle, sin angle)`. A zero-magnitude input yields
/// the zero vector regardless of `angle`.
pub fn with_angle(v: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle) * v.length()
}

/// Applies `f` to each component of `v`.
pub fn map(v: DVec2, f: impl Fn(f64) -> f64) -> DVec2 {
    DVec2::new(f(v.x), f(v.y))
}
