/*
 * Boid Flocking Simulation
 *
 * This application simulates the flocking behavior of birds (boids) based on three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 * while steering clear of the window edges and obstacles.
 *
 * Run with RUST_LOG=debug for more detail.
 */

use anyhow::Result;
use clap::Parser;
use log::info;

use flocking::app::{model, update, LAUNCH_SETTINGS};
use flocking::config::{Cli, LaunchSettings};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = LaunchSettings::resolve(&cli)?;

    info!(
        "Starting {} variant with {} boids",
        settings.params.variant.label(),
        settings.params.num_boids
    );

    // Only main sets it, so this cannot already be filled
    let _ = LAUNCH_SETTINGS.set(settings);

    nannou::app(model).update(update).run();

    Ok(())
}
