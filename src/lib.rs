/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the boid simulation application.
 * The simulation core (vecmath, obstacle, bounds, boid, params, simulation)
 * does not depend on a window; app, input, renderer and ui wrap it in nannou.
 */

// Re-export key components for easier access
pub use app::Model;
pub use boid::{Boid, Forces, Steering};
pub use bounds::{Bounds, BoundsPolicy};
pub use config::LaunchSettings;
pub use debug::DebugInfo;
pub use obstacle::{BoxObstacle, CircleObstacle, Obstacle};
pub use params::{SeparationMode, SimulationParams, UpdateOrder, Variant, Weights};
pub use simulation::Simulation;

// Define modules
pub mod app;
pub mod boid;
pub mod bounds;
pub mod config;
pub mod debug;
pub mod input;
pub mod obstacle;
pub mod params;
pub mod renderer;
pub mod simulation;
pub mod ui;
pub mod vecmath;
