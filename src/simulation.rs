/*
 * Simulation Module
 *
 * The Simulation owns the whole flock: the boids, the obstacles, the
 * viewport bounds and the parameters. One call to `step` advances every
 * boid by one frame:
 * 1. Gather neighbors inside the perception radius
 * 2. Compute the flocking, boundary and obstacle forces
 * 3. Apply them in two phases (flocking capped, avoidance on top)
 * 4. Integrate the position with the frame's elapsed time
 *
 * The host decides when to call it; `frame` wraps `step` with the pause
 * and focus rules.
 */

use log::{debug, info, trace};
use nannou::prelude::*;
use rand::Rng;

use crate::boid::{Boid, Forces, Steering};
use crate::bounds::Bounds;
use crate::obstacle::Obstacle;
use crate::params::{SimulationParams, UpdateOrder, Variant};

pub struct Simulation {
    pub boids: Vec<Boid>,
    pub obstacles: Vec<Obstacle>,
    pub bounds: Bounds,
    pub params: SimulationParams,
    // Obstacle moved by the pointer, if the variant has one
    tracking_obstacle: Option<usize>,
    // Box obstacle that spans the viewport, resized with it
    viewport_box: Option<usize>,
    steps: u64,
}

impl Simulation {
    // Empty simulation: no boids, no obstacles
    pub fn new(params: SimulationParams, bounds: Bounds) -> Self {
        Self {
            boids: Vec::with_capacity(params.num_boids),
            obstacles: Vec::new(),
            bounds,
            params,
            tracking_obstacle: None,
            viewport_box: None,
            steps: 0,
        }
    }

    // Simulation set up the way its variant describes, with a spawned flock
    pub fn with_variant<R: Rng + ?Sized>(params: SimulationParams, bounds: Bounds, rng: &mut R) -> Self {
        let mut simulation = Self::new(params, bounds);
        simulation.layout_obstacles();
        simulation.spawn(rng);

        info!(
            "Created {} simulation: {} boids, {} obstacles, viewport {:.0}x{:.0}",
            simulation.params.variant.label(),
            simulation.boids.len(),
            simulation.obstacles.len(),
            bounds.width,
            bounds.height
        );

        simulation
    }

    // Replace the obstacles with the fixed layout of the current variant
    pub fn layout_obstacles(&mut self) {
        self.obstacles.clear();
        self.tracking_obstacle = None;
        self.viewport_box = None;

        let center = self.bounds.center();
        let radius = self.params.obstacle_radius;

        match self.params.variant {
            Variant::Basic | Variant::Flock => {}
            Variant::Obstacle => {
                self.add_obstacle(Obstacle::circle(center.x, center.y, radius));
            }
            Variant::Interactive => {
                let circle = self.add_obstacle(Obstacle::circle(center.x, center.y, radius));
                self.tracking_obstacle = Some(circle);

                let rect = self.add_obstacle(Obstacle::rect(
                    Vec2::ZERO,
                    vec2(self.bounds.width, self.bounds.height),
                ));
                self.viewport_box = Some(rect);
            }
        }

        debug!("Laid out {} obstacles", self.obstacles.len());
    }

    // Add an obstacle and return its index
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> usize {
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    // Replace the flock with `num_boids` boids spread over the viewport
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let speed = self.params.speed;
        let bounds = self.bounds;

        self.boids.clear();
        self.boids
            .extend((0..self.params.num_boids).map(|_| Boid::random(&bounds, speed, &mut *rng)));
        self.steps = 0;

        debug!("Spawned {} boids", self.boids.len());
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    // Indices of the boids that boid `index` can see
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        self.boids[index].neighbors(index, &self.boids, self.params.perception_radius)
    }

    // Force breakdown for one boid against the current state
    pub fn forces(&self, index: usize) -> Forces {
        let neighbors = self.neighbors(index);
        self.boids[index].forces(
            &self.boids,
            &neighbors,
            &self.params,
            &self.bounds,
            &self.obstacles,
        )
    }

    // Steering for one boid against the current state
    pub fn steering(&self, index: usize) -> Steering {
        let forces = self.forces(index);
        self.boids[index].steer(&forces, &self.params.weights, self.params.max_heading)
    }

    // Advance every boid by one frame of `delta_ms` milliseconds
    pub fn step(&mut self, delta_ms: f32) {
        let dt = self.params.clamp_delta(delta_ms);
        if dt != delta_ms {
            debug!("Clamped frame time {:.2} ms to {:.2} ms", delta_ms, dt);
        }

        match self.params.update_order {
            UpdateOrder::Simultaneous => {
                let headings: Vec<Vec2> = (0..self.boids.len())
                    .map(|i| self.steering(i).heading)
                    .collect();

                for (boid, heading) in self.boids.iter_mut().zip(headings) {
                    boid.integrate(heading, dt);
                }
            }
            UpdateOrder::Sequential => {
                for i in 0..self.boids.len() {
                    let heading = self.steering(i).heading;
                    self.boids[i].integrate(heading, dt);
                }
            }
        }

        self.steps += 1;
        trace!("Step {} advanced {} boids by {:.2} ms", self.steps, self.boids.len(), dt);
    }

    // Run one host frame. The update is skipped while paused or while the
    // host window is unfocused (when the variant asks for it).
    // Returns whether the flock moved.
    pub fn frame(&mut self, delta_ms: f32, focused: bool) -> bool {
        if self.params.pause_simulation {
            return false;
        }
        if self.params.pause_when_unfocused && !focused {
            return false;
        }

        self.step(delta_ms);
        true
    }

    // Move the pointer-tracking obstacle, if there is one
    pub fn follow_pointer(&mut self, point: Vec2) {
        if let Some(obstacle) = self.tracking_obstacle.and_then(|i| self.obstacles.get_mut(i)) {
            obstacle.follow(point);
        }
    }

    pub fn tracking_obstacle(&self) -> Option<&Obstacle> {
        self.tracking_obstacle.and_then(|i| self.obstacles.get(i))
    }

    // Host viewport changed size
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;

        if let Some(rect) = self.viewport_box.and_then(|i| self.obstacles.get_mut(i)) {
            *rect = Obstacle::rect(Vec2::ZERO, vec2(bounds.width, bounds.height));
        }

        info!("Viewport resized to {:.0}x{:.0}", bounds.width, bounds.height);
    }

    // Average number of neighbors per boid, for the debug overlay
    pub fn mean_neighbor_count(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }

        let total: usize = (0..self.boids.len()).map(|i| self.neighbors(i).len()).sum();
        total as f32 / self.boids.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> Bounds {
        Bounds::new(1600.0, 1200.0)
    }

    #[test]
    fn test_variant_obstacle_layout() {
        let mut rng = StdRng::seed_from_u64(1);

        let flock = Simulation::with_variant(Variant::Flock.params(), bounds(), &mut rng);
        assert!(flock.obstacles.is_empty());

        let obstacle = Simulation::with_variant(Variant::Obstacle.params(), bounds(), &mut rng);
        assert_eq!(obstacle.obstacles, vec![Obstacle::circle(800.0, 600.0, 200.0)]);
        assert!(obstacle.tracking_obstacle().is_none());

        let interactive = Simulation::with_variant(Variant::Interactive.params(), bounds(), &mut rng);
        assert_eq!(interactive.obstacles.len(), 2);
        assert!(interactive.tracking_obstacle().is_some());
    }

    #[test]
    fn test_spawn_inside_viewport() {
        let mut rng = StdRng::seed_from_u64(7);
        let simulation = Simulation::with_variant(Variant::Flock.params(), bounds(), &mut rng);

        assert_eq!(simulation.boids.len(), 100);
        for boid in &simulation.boids {
            assert!(boid.position.x >= 0.0 && boid.position.x < 1600.0);
            assert!(boid.position.y >= 0.0 && boid.position.y < 1200.0);
            assert!((boid.heading.length() - 1.0).abs() < 1e-5);
            assert_eq!(boid.speed, 0.1);
        }
    }

    #[test]
    fn test_follow_pointer_moves_tracking_obstacle() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut simulation =
            Simulation::with_variant(Variant::Interactive.params(), bounds(), &mut rng);

        simulation.follow_pointer(vec2(10.0, 20.0));
        assert_eq!(
            simulation.tracking_obstacle(),
            Some(&Obstacle::circle(10.0, 20.0, 200.0))
        );
    }

    #[test]
    fn test_follow_pointer_without_tracking_obstacle() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut simulation =
            Simulation::with_variant(Variant::Obstacle.params(), bounds(), &mut rng);

        simulation.follow_pointer(vec2(10.0, 20.0));
        assert_eq!(simulation.obstacles, vec![Obstacle::circle(800.0, 600.0, 200.0)]);
    }

    #[test]
    fn test_set_bounds_resizes_viewport_box() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut simulation =
            Simulation::with_variant(Variant::Interactive.params(), bounds(), &mut rng);

        simulation.set_bounds(Bounds::new(400.0, 300.0));
        assert!(simulation
            .obstacles
            .contains(&Obstacle::rect(Vec2::ZERO, vec2(400.0, 300.0))));
    }

    #[test]
    fn test_frame_skips_when_paused_or_unfocused() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut simulation =
            Simulation::with_variant(Variant::Interactive.params(), bounds(), &mut rng);
        let before = simulation.boids.clone();

        assert!(!simulation.frame(16.0, false));
        assert_eq!(simulation.boids, before);
        assert_eq!(simulation.steps(), 0);

        simulation.params.pause_simulation = true;
        assert!(!simulation.frame(16.0, true));
        assert_eq!(simulation.boids, before);

        simulation.params.pause_simulation = false;
        assert!(simulation.frame(16.0, true));
        assert_eq!(simulation.steps(), 1);
        assert_ne!(simulation.boids, before);
    }

    #[test]
    fn test_unfocused_frame_runs_without_focus_gating() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut simulation = Simulation::with_variant(Variant::Flock.params(), bounds(), &mut rng);
        assert!(simulation.frame(16.0, false));
    }

    #[test]
    fn test_zero_delta_does_not_move() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut simulation = Simulation::with_variant(Variant::Flock.params(), bounds(), &mut rng);
        let before: Vec<Vec2> = simulation.boids.iter().map(|b| b.position).collect();

        simulation.step(0.0);
        let after: Vec<Vec2> = simulation.boids.iter().map(|b| b.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_neighbor_query_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(9);
        let simulation = Simulation::with_variant(Variant::Flock.params(), bounds(), &mut rng);

        for i in 0..simulation.boids.len() {
            assert_eq!(simulation.neighbors(i), simulation.neighbors(i));
            assert!(!simulation.neighbors(i).contains(&i));
        }
    }
}
