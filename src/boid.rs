/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 * and on top of those avoids the viewport edges and any obstacles.
 *
 * The heading is not a unit vector: steering forces accumulate into it and
 * it doubles as the boid's velocity once multiplied by its speed.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::bounds::Bounds;
use crate::obstacle::{aggregate_repulsion, Obstacle};
use crate::params::{SeparationMode, SimulationParams, Weights};
use crate::vecmath::{from_angle, heading, limit, normalize_or_zero, safe_div};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boid {
    pub position: Vec2,
    pub heading: Vec2,
    pub speed: f32,
}

// Every steering contribution for one boid, unweighted
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Forces {
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub separation: Vec2,
    pub bounds: Vec2,
    pub obstacles: Vec2,
}

// Result of applying the forces to a heading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    // Heading after the flocking rules and the speed cap
    pub flocking: Vec2,
    // Final heading once bounds and obstacle avoidance are added on top
    pub heading: Vec2,
}

impl Boid {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            position: vec2(x, y),
            heading: from_angle(angle),
            speed: 0.1,
        }
    }

    // Uniformly random position inside the viewport and random angle
    pub fn random<R: Rng + ?Sized>(bounds: &Bounds, speed: f32, rng: &mut R) -> Self {
        let x = rng.gen_range(0.0..bounds.width.max(f32::EPSILON));
        let y = rng.gen_range(0.0..bounds.height.max(f32::EPSILON));
        let angle = rng.gen_range(0.0..TAU);

        Self {
            speed,
            ..Self::new(x, y, angle)
        }
    }

    // Angle of the heading, used to orient the boid when drawing
    pub fn angle(&self) -> f32 {
        heading(self.heading)
    }

    // Indices of the other boids strictly closer than `range`
    pub fn neighbors(&self, index: usize, boids: &[Boid], range: f32) -> Vec<usize> {
        boids
            .iter()
            .enumerate()
            .filter(|&(i, other)| i != index && other.position.distance(self.position) < range)
            .map(|(i, _)| i)
            .collect()
    }

    // Steer towards the combined heading of the neighbors
    pub fn alignment(&self, boids: &[Boid], neighbors: &[usize]) -> Vec2 {
        let sum = neighbors
            .iter()
            .fold(Vec2::ZERO, |acc, &i| acc + boids[i].heading);

        normalize_or_zero(sum)
    }

    // Steer towards the mean position of the neighbors
    pub fn cohesion(&self, boids: &[Boid], neighbors: &[usize]) -> Vec2 {
        if neighbors.is_empty() {
            return Vec2::ZERO;
        }

        let sum = neighbors
            .iter()
            .fold(Vec2::ZERO, |acc, &i| acc + boids[i].position);
        let center = sum / neighbors.len() as f32;

        normalize_or_zero(center - self.position)
    }

    // Steer away from every neighbor inside `spacing`, closer ones weighing more
    pub fn separation(&self, boids: &[Boid], neighbors: &[usize], spacing: f32) -> Vec2 {
        let mut steering = Vec2::ZERO;

        for &i in neighbors {
            let other = &boids[i];
            let d = self.position.distance(other.position);

            if d < spacing {
                let away = normalize_or_zero(self.position - other.position);
                steering += safe_div(away, d);
            }
        }

        normalize_or_zero(steering)
    }

    // Steer away from the single nearest neighbor inside `spacing`
    pub fn nearest_separation(&self, boids: &[Boid], neighbors: &[usize], spacing: f32) -> Vec2 {
        let nearest = neighbors
            .iter()
            .map(|&i| (i, self.position.distance(boids[i].position)))
            .filter(|&(_, d)| d < spacing)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match nearest {
            Some((i, _)) => normalize_or_zero(self.position - boids[i].position),
            None => Vec2::ZERO,
        }
    }

    // Compute every steering force against the given roster state
    pub fn forces(
        &self,
        boids: &[Boid],
        neighbors: &[usize],
        params: &SimulationParams,
        bounds: &Bounds,
        obstacles: &[Obstacle],
    ) -> Forces {
        let separation = match params.separation_mode {
            SeparationMode::Full => self.separation(boids, neighbors, params.separation_spacing),
            SeparationMode::Nearest => {
                self.nearest_separation(boids, neighbors, params.separation_spacing)
            }
        };

        Forces {
            alignment: self.alignment(boids, neighbors),
            cohesion: self.cohesion(boids, neighbors),
            separation,
            bounds: bounds.force(self.position, params.perception_radius, params.bounds_policy),
            obstacles: aggregate_repulsion(obstacles, self.position, params.obstacle_margin),
        }
    }

    // Apply weighted forces to the heading in two phases. The flocking rules
    // are capped at `max_heading`; avoidance is added after the cap so that
    // it can always win against the flock.
    pub fn steer(&self, forces: &Forces, weights: &Weights, max_heading: f32) -> Steering {
        let flocking = limit(
            self.heading
                + forces.alignment * weights.alignment
                + forces.cohesion * weights.cohesion
                + forces.separation * weights.separation,
            max_heading,
        );

        let heading = flocking + forces.bounds * weights.bounds + forces.obstacles * weights.obstacle;

        Steering { flocking, heading }
    }

    // Take the new heading and move along it for `delta_ms` milliseconds
    pub fn integrate(&mut self, heading: Vec2, delta_ms: f32) {
        self.heading = heading;
        self.position += self.heading * self.speed * delta_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn boid_at(x: f32, y: f32, dx: f32, dy: f32) -> Boid {
        Boid {
            position: vec2(x, y),
            heading: vec2(dx, dy),
            speed: 0.1,
        }
    }

    #[test]
    fn test_new_boid_heading_is_unit() {
        let boid = Boid::new(10.0, 20.0, PI / 2.0);
        assert!((boid.heading.length() - 1.0).abs() < 1e-6);
        assert!((boid.angle() - PI / 2.0).abs() < 1e-6);
        assert_eq!(boid.speed, 0.1);
    }

    #[test]
    fn test_neighbors_exclude_self_and_far_boids() {
        let boids = vec![
            boid_at(0.0, 0.0, 1.0, 0.0),
            boid_at(100.0, 0.0, 1.0, 0.0),
            boid_at(200.0, 0.0, 1.0, 0.0),
            boid_at(0.0, 0.0, 0.0, 1.0),
        ];

        // Exactly at the range is not a neighbor
        let neighbors = boids[0].neighbors(0, &boids, 200.0);
        assert_eq!(neighbors, vec![1, 3]);
    }

    #[test]
    fn test_no_neighbors_means_no_flocking_forces() {
        let boids = vec![boid_at(0.0, 0.0, 1.0, 0.0)];
        let boid = &boids[0];

        assert_eq!(boid.alignment(&boids, &[]), Vec2::ZERO);
        assert_eq!(boid.cohesion(&boids, &[]), Vec2::ZERO);
        assert_eq!(boid.separation(&boids, &[], 25.0), Vec2::ZERO);
        assert_eq!(boid.nearest_separation(&boids, &[], 25.0), Vec2::ZERO);
    }

    #[test]
    fn test_alignment_is_normalized_sum() {
        let boids = vec![
            boid_at(0.0, 0.0, 1.0, 0.0),
            boid_at(10.0, 0.0, 2.0, 0.0),
            boid_at(0.0, 10.0, 0.0, 2.0),
        ];
        let force = boids[0].alignment(&boids, &[1, 2]);
        let expected = vec2(1.0, 1.0).normalize();
        assert!((force - expected).length() < 1e-6);
    }

    #[test]
    fn test_alignment_of_opposing_headings_is_zero() {
        let boids = vec![
            boid_at(0.0, 0.0, 1.0, 0.0),
            boid_at(10.0, 0.0, 1.0, 0.0),
            boid_at(0.0, 10.0, -1.0, 0.0),
        ];
        assert_eq!(boids[0].alignment(&boids, &[1, 2]), Vec2::ZERO);
    }

    #[test]
    fn test_cohesion_points_to_center() {
        let boids = vec![
            boid_at(0.0, 0.0, 1.0, 0.0),
            boid_at(10.0, 10.0, 1.0, 0.0),
            boid_at(10.0, -10.0, 1.0, 0.0),
        ];
        let force = boids[0].cohesion(&boids, &[1, 2]);
        assert!((force - vec2(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_separation_ignores_boids_outside_spacing() {
        let boids = vec![
            boid_at(0.0, 0.0, 1.0, 0.0),
            boid_at(30.0, 0.0, 1.0, 0.0),
        ];
        assert_eq!(boids[0].separation(&boids, &[1], 25.0), Vec2::ZERO);
    }

    #[test]
    fn test_separation_weights_closer_neighbors() {
        let boids = vec![
            boid_at(0.0, 0.0, 1.0, 0.0),
            boid_at(5.0, 0.0, 1.0, 0.0),
            boid_at(0.0, 20.0, 1.0, 0.0),
        ];
        let force = boids[0].separation(&boids, &[1, 2], 25.0);

        // 1/5 away in -x, 1/20 away in -y, then normalized
        let expected = vec2(-0.2, -0.05).normalize();
        assert!((force - expected).length() < 1e-6);
    }

    #[test]
    fn test_separation_coincident_boids_is_zero() {
        let boids = vec![
            boid_at(5.0, 5.0, 1.0, 0.0),
            boid_at(5.0, 5.0, 0.0, 1.0),
        ];
        let force = boids[0].separation(&boids, &[1], 25.0);
        assert_eq!(force, Vec2::ZERO);
        assert_eq!(boids[0].nearest_separation(&boids, &[1], 25.0), Vec2::ZERO);
    }

    #[test]
    fn test_nearest_separation_picks_closest() {
        let boids = vec![
            boid_at(0.0, 0.0, 1.0, 0.0),
            boid_at(0.0, 20.0, 1.0, 0.0),
            boid_at(-4.0, 0.0, 1.0, 0.0),
        ];
        let force = boids[0].nearest_separation(&boids, &[1, 2], 25.0);
        assert!((force - vec2(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_steer_caps_flocking_before_avoidance() {
        let boid = boid_at(0.0, 0.0, 3.0, 0.0);
        let forces = Forces {
            bounds: vec2(1.0, 0.0),
            obstacles: vec2(1.0, 0.0),
            ..Forces::default()
        };
        let steering = boid.steer(&forces, &Weights::default(), 2.0);

        assert!((steering.flocking.length() - 2.0).abs() < 1e-6);
        // Avoidance is allowed to push past the cap
        assert!((steering.heading.x - 2.1).abs() < 1e-6);
        assert!(steering.heading.length() > 2.0);
    }

    #[test]
    fn test_integrate_uses_speed_and_delta() {
        let mut boid = boid_at(0.0, 0.0, 1.0, 0.0);
        boid.integrate(vec2(1.0, 2.0), 10.0);
        assert!((boid.position - vec2(1.0, 2.0)).length() < 1e-6);
        assert_eq!(boid.heading, vec2(1.0, 2.0));
    }
}
