/*
 * Bounds Module
 *
 * The viewport the boids live in and the soft boundary force that keeps
 * them on screen. The simulation works in viewport coordinates with the
 * origin at the top-left corner and y growing downward; nannou draws with
 * the origin at the window center and y growing upward, so the conversion
 * helpers live here too.
 */

use nannou::prelude::*;
use serde::Deserialize;

use crate::vecmath::limit;

// Largest magnitude the proportional policy may produce
pub const MAX_PROPORTIONAL_PUSH: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    // Unit push per edge that is within range
    Flat,
    // Push scaled by how deep into the margin the boid is
    Proportional,
}

impl BoundsPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            BoundsPolicy::Flat => "Flat",
            BoundsPolicy::Proportional => "Proportional",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width / 2.0, self.height / 2.0)
    }

    // Steering push away from whichever edges are closer than `range`
    pub fn force(&self, position: Vec2, range: f32, policy: BoundsPolicy) -> Vec2 {
        match policy {
            BoundsPolicy::Flat => self.flat_force(position, range),
            BoundsPolicy::Proportional => self.proportional_force(position, range),
        }
    }

    fn flat_force(&self, position: Vec2, range: f32) -> Vec2 {
        let mut push = Vec2::ZERO;

        if position.x < range {
            push += vec2(1.0, 0.0);
        }
        if position.y < range {
            push += vec2(0.0, 1.0);
        }
        if position.x > self.width - range {
            push += vec2(-1.0, 0.0);
        }
        if position.y > self.height - range {
            push += vec2(0.0, -1.0);
        }

        push
    }

    fn proportional_force(&self, position: Vec2, range: f32) -> Vec2 {
        if range <= 0.0 {
            return Vec2::ZERO;
        }

        let mut push = Vec2::ZERO;

        if position.x < range {
            push.x += (range - position.x) / range;
        }
        if position.y < range {
            push.y += (range - position.y) / range;
        }
        if position.x > self.width - range {
            push.x -= (position.x - (self.width - range)) / range;
        }
        if position.y > self.height - range {
            push.y -= (position.y - (self.height - range)) / range;
        }

        limit(push, MAX_PROPORTIONAL_PUSH)
    }

    // Simulation coordinates -> nannou window coordinates
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        vec2(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }

    // nannou window coordinates -> simulation coordinates
    pub fn from_screen(&self, point: Vec2) -> Vec2 {
        vec2(point.x + self.width / 2.0, self.height / 2.0 - point.y)
    }
}
