//! Small vector helpers shared by physics and steering
//!
//! Ground-plane vectors are `DVec2` with `x` = world X and `y` = world Z.

use glam::{DVec2, DVec3};
use rand::Rng;
use std::f64::consts::TAU;

/// Normalize `v` only when its length exceeds `min_len`; otherwise return it unchanged.
#[inline]
pub fn normalize_above(v: DVec2, min_len: f64) -> DVec2 {
    let len = v.length();
    if len > min_len {
        v / len
    } else {
        v
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Uniformly random unit vector on the ground plane
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    let angle = rng.gen::<f64>() * TAU;
    DVec2::new(angle.cos(), angle.sin())
}

/// Left-hand perpendicular: (x, z) -> (-z, x)
#[inline]
pub fn perpendicular(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

/// Lift a ground-plane vector into world space at height `y`
#[inline]
pub fn to_world(v: DVec2, y: f64) -> DVec3 {
    DVec3::new(v.x, y, v.y)
}
