//! Circle overlap on top of `glam::Vec2`
//!
//! glam already covers the vector math the game needs (`normalize_or_zero`,
//! `clamp_length_max`, `to_angle`, `from_angle`, `lerp`); only the hit test
//! lives here.

use glam::Vec2;

/// Circle overlap using squared distance (touching counts as a hit)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let rr = ra + rb;
    a.distance_squared(b) <= rr * rr
}
