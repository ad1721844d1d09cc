/*
 * Input Module
 *
 * This module handles window events for the boid simulation:
 * - Pointer movement drives the tracking obstacle
 * - Focus changes gate the simulation update
 * - Resizes replace the simulation bounds
 * - Raw events are forwarded to egui
 */

use log::debug;
use nannou::prelude::*;

use crate::app::Model;
use crate::bounds::Bounds;
use crate::simulation::Simulation;

// Move the tracking obstacle under the pointer (window coordinates).
// The obstacle stays put while the pointer is over the control panel.
pub fn track_pointer(simulation: &mut Simulation, pointer: Vec2, over_ui: bool) {
    if over_ui {
        return;
    }

    let target = simulation.bounds.from_screen(pointer);
    simulation.follow_pointer(target);
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;

    let over_ui = model.egui.ctx().is_pointer_over_area();
    track_pointer(&mut model.simulation, pos, over_ui);
}

// Window gained focus
pub fn focused(_app: &App, model: &mut Model) {
    debug!("Window focused");
    model.focused = true;
}

// Window lost focus
pub fn unfocused(_app: &App, model: &mut Model) {
    debug!("Window unfocused");
    model.focused = false;
}

// Window resized
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.simulation.set_bounds(Bounds::new(size.x, size.y));
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
