/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable constants of the flocking simulation, and the Variant presets
 * that reproduce each flavour of the simulation (plain flock, nearest-only
 * separation, static obstacle, interactive obstacle). Parameters can be
 * modified through the UI; the snapshot helpers detect those changes.
 */

use serde::Deserialize;

use crate::bounds::BoundsPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparationMode {
    // Steer away from every neighbor inside the spacing
    Full,
    // Steer away from the single nearest neighbor inside the spacing
    Nearest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOrder {
    // Every boid reads the roster as it was at the start of the step
    Simultaneous,
    // Boids are moved one after another; later boids see earlier moves
    Sequential,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Basic,
    Flock,
    Obstacle,
    Interactive,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Basic,
        Variant::Flock,
        Variant::Obstacle,
        Variant::Interactive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Basic => "Basic",
            Variant::Flock => "Flock",
            Variant::Obstacle => "Obstacle",
            Variant::Interactive => "Interactive",
        }
    }

    // Text shown briefly when the variant starts
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            Variant::Interactive => Some("Move the mouse to push the flock around"),
            _ => None,
        }
    }

    // Preset parameters for this variant
    pub fn params(&self) -> SimulationParams {
        let mut params = SimulationParams {
            variant: *self,
            ..SimulationParams::base()
        };

        match self {
            Variant::Basic => {
                params.separation_mode = SeparationMode::Nearest;
                params.weights.cohesion = 0.000002;
                params.weights.separation = 0.05;
            }
            Variant::Flock | Variant::Obstacle => {}
            Variant::Interactive => {
                params.bounds_policy = BoundsPolicy::Proportional;
                params.weights.bounds = 0.03;
                params.pause_when_unfocused = true;
            }
        }

        params
    }
}

// Weights applied to each steering force before it is added to the heading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub alignment: f32,
    pub cohesion: f32,
    pub separation: f32,
    pub bounds: f32,
    pub obstacle: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            alignment: 0.02,
            cohesion: 0.02,
            separation: 0.1,
            bounds: 0.05,
            obstacle: 0.05,
        }
    }
}

// Parameters for the simulation that can be adjusted via UI
#[derive(Clone, Debug)]
pub struct SimulationParams {
    pub variant: Variant,
    pub num_boids: usize,
    pub perception_radius: f32,
    pub separation_spacing: f32,
    pub obstacle_margin: f32,
    pub obstacle_radius: f32,
    pub max_heading: f32,
    pub speed: f32,
    pub weights: Weights,
    pub separation_mode: SeparationMode,
    pub bounds_policy: BoundsPolicy,
    pub update_order: UpdateOrder,
    pub pause_when_unfocused: bool,
    // Host frame times are clamped into this window (milliseconds)
    pub min_delta_ms: f32,
    pub max_delta_ms: f32,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Clone, Debug, PartialEq)]
struct ParamSnapshot {
    num_boids: usize,
    perception_radius: f32,
    separation_spacing: f32,
    obstacle_margin: f32,
    obstacle_radius: f32,
    max_heading: f32,
    speed: f32,
    weights: Weights,
    separation_mode: SeparationMode,
    bounds_policy: BoundsPolicy,
    update_order: UpdateOrder,
    pause_when_unfocused: bool,
    show_debug: bool,
    pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Variant::Obstacle.params()
    }
}

impl SimulationParams {
    fn base() -> Self {
        Self {
            variant: Variant::Obstacle,
            num_boids: 100,
            perception_radius: 200.0,
            separation_spacing: 25.0,
            obstacle_margin: 50.0,
            obstacle_radius: 200.0,
            max_heading: 2.0,
            speed: 0.1,
            weights: Weights::default(),
            separation_mode: SeparationMode::Full,
            bounds_policy: BoundsPolicy::Flat,
            update_order: UpdateOrder::Simultaneous,
            pause_when_unfocused: false,
            min_delta_ms: 0.0,
            max_delta_ms: 100.0,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }

    // Clamp a host-reported frame time into the configured window
    pub fn clamp_delta(&self, delta_ms: f32) -> f32 {
        if !delta_ms.is_finite() {
            return self.min_delta_ms;
        }
        delta_ms.clamp(self.min_delta_ms, self.max_delta_ms)
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            num_boids: self.num_boids,
            perception_radius: self.perception_radius,
            separation_spacing: self.separation_spacing,
            obstacle_margin: self.obstacle_margin,
            obstacle_radius: self.obstacle_radius,
            max_heading: self.max_heading,
            speed: self.speed,
            weights: self.weights,
            separation_mode: self.separation_mode,
            bounds_policy: self.bounds_policy,
            update_order: self.update_order,
            pause_when_unfocused: self.pause_when_unfocused,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Check if any parameters have changed since the last snapshot
    // Returns a tuple of (num_boids_changed, any_changed)
    pub fn detect_changes(&self) -> (bool, bool) {
        match &self.previous_values {
            Some(prev) => {
                let current = self.snapshot();
                (current.num_boids != prev.num_boids, current != *prev)
            }
            None => (false, false),
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=1000
    }

    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        10.0..=400.0
    }

    pub fn get_max_heading_range() -> std::ops::RangeInclusive<f32> {
        0.5..=10.0
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f32> {
        0.01..=1.0
    }
}
