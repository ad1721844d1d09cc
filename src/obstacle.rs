/*
 * Obstacle Module
 *
 * Stationary (or pointer-tracking) obstacles the boids steer around.
 * Two shapes are supported:
 * 1. Circle: repels boids that come within radius + margin of its center
 * 2. Box: keeps boids inside by pushing inward near each of its edges
 *
 * All coordinates are simulation coordinates (origin top-left, y down).
 */

use nannou::prelude::*;

use crate::vecmath::normalize_or_zero;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleObstacle {
    pub center: Vec2,
    pub radius: f32,
}

impl CircleObstacle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: vec2(x, y),
            radius,
        }
    }

    // Unit push directed away from the center
    pub fn repulsion(&self, probe: Vec2, margin: f32) -> Vec2 {
        let offset = probe - self.center;

        if offset.length() < self.radius + margin {
            normalize_or_zero(offset)
        } else {
            Vec2::ZERO
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxObstacle {
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl BoxObstacle {
    pub fn new(top_left: Vec2, bottom_right: Vec2) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn center(&self) -> Vec2 {
        (self.top_left + self.bottom_right) * 0.5
    }

    // Unit push inward from every edge closer than `margin`, normalized
    pub fn repulsion(&self, probe: Vec2, margin: f32) -> Vec2 {
        let mut push = Vec2::ZERO;

        if probe.x - self.top_left.x < margin {
            push += vec2(1.0, 0.0);
        }
        if probe.y - self.top_left.y < margin {
            push += vec2(0.0, 1.0);
        }
        if self.bottom_right.x - probe.x < margin {
            push += vec2(-1.0, 0.0);
        }
        if self.bottom_right.y - probe.y < margin {
            push += vec2(0.0, -1.0);
        }

        normalize_or_zero(push)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Obstacle {
    Circle(CircleObstacle),
    Box(BoxObstacle),
}

impl Obstacle {
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Obstacle::Circle(CircleObstacle::new(x, y, radius))
    }

    pub fn rect(top_left: Vec2, bottom_right: Vec2) -> Self {
        Obstacle::Box(BoxObstacle::new(top_left, bottom_right))
    }

    pub fn repulsion(&self, probe: Vec2, margin: f32) -> Vec2 {
        match self {
            Obstacle::Circle(circle) => circle.repulsion(probe, margin),
            Obstacle::Box(rect) => rect.repulsion(probe, margin),
        }
    }

    // Move the obstacle so that its center sits on `point`
    pub fn follow(&mut self, point: Vec2) {
        match self {
            Obstacle::Circle(circle) => circle.center = point,
            Obstacle::Box(rect) => {
                let offset = point - rect.center();
                rect.top_left += offset;
                rect.bottom_right += offset;
            }
        }
    }
}

// Sum of every obstacle's push, renormalized only when something pushed
pub fn aggregate_repulsion(obstacles: &[Obstacle], probe: Vec2, margin: f32) -> Vec2 {
    let total = obstacles
        .iter()
        .fold(Vec2::ZERO, |acc, obstacle| acc + obstacle.repulsion(probe, margin));

    normalize_or_zero(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_pushes_away_from_center() {
        let circle = CircleObstacle::new(100.0, 100.0, 50.0);
        let force = circle.repulsion(vec2(100.0, 140.0), 50.0);

        assert!(force.x.abs() < 1e-6);
        assert!(force.y > 0.0);
        // Same scale as a box edge push
        assert!((force.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_circle_out_of_range() {
        let circle = CircleObstacle::new(0.0, 0.0, 50.0);
        assert_eq!(circle.repulsion(vec2(100.0, 0.0), 50.0), Vec2::ZERO);
        assert_eq!(circle.repulsion(vec2(0.0, 150.0), 50.0), Vec2::ZERO);
    }

    #[test]
    fn test_circle_coincident_probe() {
        let circle = CircleObstacle::new(10.0, 10.0, 5.0);
        assert_eq!(circle.repulsion(vec2(10.0, 10.0), 50.0), Vec2::ZERO);
    }

    #[test]
    fn test_box_pushes_inward_near_edges() {
        let rect = BoxObstacle::new(vec2(0.0, 0.0), vec2(800.0, 600.0));

        let left = rect.repulsion(vec2(10.0, 300.0), 50.0);
        assert!((left - vec2(1.0, 0.0)).length() < 1e-6);

        let bottom = rect.repulsion(vec2(400.0, 590.0), 50.0);
        assert!((bottom - vec2(0.0, -1.0)).length() < 1e-6);

        // Corner contributions are summed then normalized
        let corner = rect.repulsion(vec2(10.0, 10.0), 50.0);
        assert!((corner.length() - 1.0).abs() < 1e-6);
        assert!(corner.x > 0.0 && corner.y > 0.0);
    }

    #[test]
    fn test_box_interior_is_quiet() {
        let rect = BoxObstacle::new(vec2(0.0, 0.0), vec2(800.0, 600.0));
        assert_eq!(rect.repulsion(vec2(400.0, 300.0), 50.0), Vec2::ZERO);
    }

    #[test]
    fn test_follow_moves_center() {
        let mut circle = Obstacle::circle(0.0, 0.0, 20.0);
        circle.follow(vec2(30.0, 40.0));
        assert_eq!(circle, Obstacle::circle(30.0, 40.0, 20.0));

        let mut rect = Obstacle::rect(vec2(0.0, 0.0), vec2(10.0, 20.0));
        rect.follow(vec2(100.0, 100.0));
        assert_eq!(rect, Obstacle::rect(vec2(95.0, 90.0), vec2(105.0, 110.0)));
    }

    #[test]
    fn test_aggregate_is_unit_or_zero() {
        let obstacles = [
            Obstacle::circle(0.0, 0.0, 50.0),
            Obstacle::circle(1000.0, 1000.0, 50.0),
        ];

        let near = aggregate_repulsion(&obstacles, vec2(30.0, 0.0), 50.0);
        assert!((near - vec2(1.0, 0.0)).length() < 1e-6);

        let far = aggregate_repulsion(&obstacles, vec2(500.0, 500.0), 50.0);
        assert_eq!(far, Vec2::ZERO);

        assert_eq!(aggregate_repulsion(&[], vec2(0.0, 0.0), 50.0), Vec2::ZERO);
    }

    #[test]
    fn test_aggregate_circle_and_box_on_equal_footing() {
        let obstacles = [
            Obstacle::circle(150.0, 400.0, 200.0),
            Obstacle::rect(vec2(0.0, 0.0), vec2(1280.0, 800.0)),
        ];

        // Deep inside the circle near the left edge: pushes cancel out
        let opposed = aggregate_repulsion(&obstacles, vec2(30.0, 400.0), 50.0);
        assert!(opposed.length() < 1e-6);

        // Circle pushes up, left edge pushes right: both count equally
        let crossed = aggregate_repulsion(&obstacles, vec2(30.0, 300.0), 50.0);
        let circle_push = (vec2(30.0, 300.0) - vec2(150.0, 400.0)).normalize();
        let expected = (circle_push + vec2(1.0, 0.0)).normalize();
        assert!((crossed - expected).length() < 1e-5);
    }
}
