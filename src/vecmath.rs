/*
 * Vector Math Module
 *
 * Helpers on top of nannou's Vec2 for the steering code. Every operation
 * here has a defined result for degenerate input: a zero-length vector
 * normalizes to zero and division by a zero distance yields zero, so no
 * NaN ever reaches a boid's state.
 */

use nannou::prelude::*;

// Lengths below this are treated as zero
pub const EPSILON: f32 = 1.0e-12;

// Unit vector in the direction of `v`, or the zero vector
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len_sq = v.length_squared();
    if len_sq > EPSILON && len_sq.is_finite() {
        v / len_sq.sqrt()
    } else {
        Vec2::ZERO
    }
}

// Clamp the magnitude of `v` to `max`, keeping its direction
#[inline]
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    if max <= 0.0 {
        return Vec2::ZERO;
    }
    let len_sq = v.length_squared();
    if len_sq > max * max {
        v / len_sq.sqrt() * max
    } else {
        v
    }
}

// Divide by a scalar, yielding zero instead of infinity
#[inline]
pub fn safe_div(v: Vec2, d: f32) -> Vec2 {
    if d.abs() > EPSILON && d.is_finite() {
        v / d
    } else {
        Vec2::ZERO
    }
}

// Angle of the vector in radians, measured from +x
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

// Unit vector pointing along `angle`
#[inline]
pub fn from_angle(angle: f32) -> Vec2 {
    vec2(angle.cos(), angle.sin())
}
