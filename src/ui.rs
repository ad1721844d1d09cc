/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters
 * and switching between the simulation variants.
 */

use nannou_egui::{egui, Egui};

use crate::bounds::BoundsPolicy;
use crate::debug::DebugInfo;
use crate::params::{SeparationMode, SimulationParams, UpdateOrder, Variant};

// What the panel asked the application to do this frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UiActions {
    pub reset_boids: bool,
    pub num_boids_changed: bool,
    pub switch_variant: Option<Variant>,
    pub any_changed: bool,
}

// Update the UI and report what the user changed
pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> UiActions {
    let mut actions = UiActions::default();
    let mut variant = params.variant;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            egui::ComboBox::from_label("Variant")
                .selected_text(variant.label())
                .show_ui(ui, |ui| {
                    for option in Variant::ALL {
                        ui.selectable_value(&mut variant, option, option.label());
                    }
                });

            ui.collapsing("Boid Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, SimulationParams::get_num_boids_range()).text("Number of Boids"));

                if ui.button("Reset Boids").clicked() {
                    actions.reset_boids = true;
                }

                ui.add(egui::Slider::new(&mut params.speed, SimulationParams::get_speed_range()).text("Speed"));
                ui.add(egui::Slider::new(&mut params.max_heading, SimulationParams::get_max_heading_range()).text("Max Heading"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.weights.alignment, SimulationParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.weights.cohesion, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.weights.separation, SimulationParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.perception_radius, SimulationParams::get_radius_range()).text("Perception Radius"));
                ui.add(egui::Slider::new(&mut params.separation_spacing, SimulationParams::get_radius_range()).text("Separation Spacing"));

                ui.horizontal(|ui| {
                    ui.radio_value(&mut params.separation_mode, SeparationMode::Full, "All neighbors");
                    ui.radio_value(&mut params.separation_mode, SeparationMode::Nearest, "Nearest only");
                });
            });

            ui.collapsing("Avoidance", |ui| {
                ui.add(egui::Slider::new(&mut params.weights.bounds, SimulationParams::get_weight_range()).text("Bounds Weight"));
                ui.add(egui::Slider::new(&mut params.weights.obstacle, SimulationParams::get_weight_range()).text("Obstacle Weight"));

                ui.horizontal(|ui| {
                    ui.radio_value(&mut params.bounds_policy, BoundsPolicy::Flat, BoundsPolicy::Flat.label());
                    ui.radio_value(&mut params.bounds_policy, BoundsPolicy::Proportional, BoundsPolicy::Proportional.label());
                });
            });

            ui.collapsing("Update Order", |ui| {
                ui.radio_value(&mut params.update_order, UpdateOrder::Simultaneous, "Simultaneous");
                ui.radio_value(&mut params.update_order, UpdateOrder::Sequential, "Sequential");
                ui.checkbox(&mut params.pause_when_unfocused, "Pause when unfocused");
            });

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Steps: {}", debug_info.total_steps));

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    let (num_boids_changed, any_changed) = params.detect_changes();
    actions.num_boids_changed = num_boids_changed;
    actions.any_changed = any_changed;

    if variant != params.variant {
        actions.switch_variant = Some(variant);
    }

    actions
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, lines: &[String], window_rect: nannou::geom::Rect) {
    // Create a background panel in the top-right corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge of the panel
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
