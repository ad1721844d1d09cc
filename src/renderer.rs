/*
 * Renderer Module
 *
 * This module handles the rendering of the boid simulation.
 * It draws the boids, the obstacles, the start-up banner and the
 * debug overlay. The simulation is never touched here.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::boid::Boid;
use crate::bounds::Bounds;
use crate::obstacle::Obstacle;
use crate::ui;

// How long the variant banner stays on screen, in seconds
pub const BANNER_SECONDS: f32 = 3.0;

// Boid triangle: tip on the position, base trailing behind
const BOID_LENGTH: f32 = 15.0;
const BOID_HALF_WIDTH: f32 = 5.0;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let simulation = &model.simulation;

    draw.background().color(rgb(42u8, 42u8, 42u8));

    for obstacle in &simulation.obstacles {
        draw_obstacle(&draw, obstacle, &simulation.bounds);
    }

    for boid in &simulation.boids {
        draw_boid(&draw, boid, &simulation.bounds);
    }

    // Banner for the first few seconds of a variant
    if let Some(text) = simulation.params.variant.banner() {
        if app.time - model.variant_started < BANNER_SECONDS {
            draw.text(text)
                .x_y(0.0, window_rect.top() - 60.0)
                .w(window_rect.w())
                .color(WHITE)
                .font_size(24);
        }
    }

    if simulation.params.show_debug {
        draw_perception(&draw, model);

        let lines = model
            .debug_info
            .lines(simulation.boids.len(), simulation.obstacles.len());
        ui::draw_debug_info(&draw, &lines, window_rect);
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}

// Draw a boid as a triangle pointing along its heading
pub fn draw_boid(draw: &Draw, boid: &Boid, bounds: &Bounds) {
    let screen_pos = bounds.to_screen(boid.position);
    // The y axis flips between simulation and screen space
    let angle = -boid.angle();

    let points = [
        pt2(0.0, 0.0),
        pt2(-BOID_LENGTH, BOID_HALF_WIDTH),
        pt2(-BOID_LENGTH, -BOID_HALF_WIDTH),
    ];

    draw.polygon()
        .color(rgb(80u8, 80u8, 255u8))
        .points(points)
        .xy(screen_pos)
        .rotate(angle);
}

// Draw an obstacle outline
pub fn draw_obstacle(draw: &Draw, obstacle: &Obstacle, bounds: &Bounds) {
    match obstacle {
        Obstacle::Circle(circle) => {
            draw.ellipse()
                .xy(bounds.to_screen(circle.center))
                .radius(circle.radius)
                .no_fill()
                .stroke(WHITE)
                .stroke_weight(1.0);
        }
        Obstacle::Box(rect) => {
            draw.rect()
                .xy(bounds.to_screen(rect.center()))
                .w_h(rect.width(), rect.height())
                .no_fill()
                .stroke(WHITE)
                .stroke_weight(1.0);
        }
    }
}

// Perception and spacing radii plus heading of the first boid
fn draw_perception(draw: &Draw, model: &Model) {
    let simulation = &model.simulation;
    let Some(first_boid) = simulation.boids.first() else {
        return;
    };

    let screen_pos = simulation.bounds.to_screen(first_boid.position);

    draw.ellipse()
        .xy(screen_pos)
        .radius(simulation.params.perception_radius)
        .no_fill()
        .stroke(GREEN)
        .stroke_weight(1.0);

    draw.ellipse()
        .xy(screen_pos)
        .radius(simulation.params.separation_spacing)
        .no_fill()
        .stroke(RED)
        .stroke_weight(1.0);

    let tip = simulation
        .bounds
        .to_screen(first_boid.position + first_boid.heading * 20.0);
    draw.arrow()
        .start(screen_pos)
        .end(tip)
        .color(YELLOW)
        .stroke_weight(2.0);
}
