/*
 * Application Module
 *
 * This module defines the main application model and logic for the boid simulation.
 * It handles the initialization and per-frame update; drawing lives in the
 * renderer module and event handlers in the input module.
 *
 * The nannou model function cannot take arguments, so the launch settings
 * resolved in main are handed over through LAUNCH_SETTINGS.
 */

use log::{debug, info, warn};
use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::OnceLock;

use crate::bounds::Bounds;
use crate::config::LaunchSettings;
use crate::debug::DebugInfo;
use crate::input::{focused, mouse_moved, raw_window_event, resized, track_pointer, unfocused};
use crate::params::Variant;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui;

pub static LAUNCH_SETTINGS: OnceLock<LaunchSettings> = OnceLock::new();

// Used when the primary monitor cannot be queried
const FALLBACK_WINDOW_SIZE: (u32, u32) = (1280, 800);

// Window size: 80% of the monitor, or the fallback size
pub fn window_size(monitor: Option<(u32, u32)>) -> (u32, u32) {
    match monitor {
        Some((width, height)) if width > 0 && height > 0 => {
            ((width as f32 * 0.8) as u32, (height as f32 * 0.8) as u32)
        }
        _ => FALLBACK_WINDOW_SIZE,
    }
}

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub focused: bool,
    pub mouse_position: Vec2,
    pub rng: StdRng,
    // App time (seconds) at which the current variant started
    pub variant_started: f32,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let settings = match LAUNCH_SETTINGS.get() {
        Some(settings) => settings.clone(),
        None => {
            warn!("No launch settings provided, using defaults");
            LaunchSettings::default()
        }
    };

    // Size the window from the primary monitor's dimensions
    let monitor = app.primary_monitor().map(|monitor| {
        let size = monitor.size();
        (size.width, size.height)
    });
    let (window_width, window_height) = window_size(monitor);

    // Create the main window
    let window_id = app
        .new_window()
        .title("Boid Flocking Simulation")
        .size(window_width, window_height)
        .view(view)
        .mouse_moved(mouse_moved)
        .focused(focused)
        .unfocused(unfocused)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to build window");

    // Get the window
    let window = app.window(window_id).expect("Window closed during setup");
    let rect = window.rect();
    let bounds = Bounds::new(rect.w(), rect.h());

    // Create the UI
    let egui = Egui::from_window(&window);

    let mut rng = match settings.seed {
        Some(seed) => {
            info!("Seeding placement with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let simulation = Simulation::with_variant(settings.params, bounds, &mut rng);

    Model {
        simulation,
        egui,
        debug_info: DebugInfo {
            focused: true,
            ..DebugInfo::default()
        },
        focused: true,
        mouse_position: Vec2::ZERO,
        rng,
        variant_started: app.time,
    }
}

// Rebuild the simulation for another variant, keeping the viewport
pub fn switch_variant(model: &mut Model, variant: Variant, now: f32) {
    info!("Switching to {} variant", variant.label());

    let mut params = variant.params();
    params.show_debug = model.simulation.params.show_debug;
    params.pause_simulation = model.simulation.params.pause_simulation;

    let bounds = model.simulation.bounds;
    model.simulation = Simulation::with_variant(params, bounds, &mut model.rng);
    model.variant_started = now;
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.debug_info.focused = model.focused;

    // Update UI and apply what it changed
    let actions = ui::update_ui(&mut model.egui, &mut model.simulation.params, &model.debug_info);

    if let Some(variant) = actions.switch_variant {
        switch_variant(model, variant, app.time);
    } else if actions.reset_boids || actions.num_boids_changed {
        info!("Respawning {} boids", model.simulation.params.num_boids);
        model.simulation.spawn(&mut model.rng);
    } else if actions.any_changed {
        debug!("Parameters changed: {:?}", model.simulation.params.weights);
    }

    // Follow the pointer every frame, not just when it moves
    let over_ui = model.egui.ctx().is_pointer_over_area();
    track_pointer(&mut model.simulation, model.mouse_position, over_ui);

    let delta_ms = update.since_last.as_secs_f32() * 1000.0;
    let stepped = model.simulation.frame(delta_ms, model.focused);

    model.debug_info.stepped_last_frame = stepped;
    model.debug_info.total_steps = model.simulation.steps();
    if model.simulation.params.show_debug {
        model.debug_info.mean_neighbors = model.simulation.mean_neighbor_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_size_from_monitor() {
        assert_eq!(window_size(Some((2560, 1440))), (2048, 1152));
    }

    #[test]
    fn test_window_size_fallback() {
        assert_eq!(window_size(None), FALLBACK_WINDOW_SIZE);
        assert_eq!(window_size(Some((0, 0))), FALLBACK_WINDOW_SIZE);
    }
}
