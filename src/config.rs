/*
 * Configuration Module
 *
 * Launch settings come from three layers, later ones winning:
 * 1. The preset of the chosen variant
 * 2. An optional TOML parameter file (every key optional)
 * 3. Command line flags
 */

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bounds::BoundsPolicy;
use crate::params::{SeparationMode, SimulationParams, UpdateOrder, Variant};

#[derive(Parser, Debug, Default)]
#[command(name = "flocking", about = "Boid flocking simulation with obstacle avoidance")]
pub struct Cli {
    /// Simulation preset to start with
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Number of boids to spawn
    #[arg(long)]
    pub boids: Option<usize>,

    /// Seed for the initial placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML file overriding simulation parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Move boids one after another instead of simultaneously
    #[arg(long)]
    pub sequential: bool,
}

// Partial weight overrides from the parameter file
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WeightsFile {
    pub alignment: Option<f32>,
    pub cohesion: Option<f32>,
    pub separation: Option<f32>,
    pub bounds: Option<f32>,
    pub obstacle: Option<f32>,
}

// Parameter file contents, every key optional
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParamsFile {
    pub variant: Option<Variant>,
    pub num_boids: Option<usize>,
    pub perception_radius: Option<f32>,
    pub separation_spacing: Option<f32>,
    pub obstacle_margin: Option<f32>,
    pub obstacle_radius: Option<f32>,
    pub max_heading: Option<f32>,
    pub speed: Option<f32>,
    pub separation_mode: Option<SeparationMode>,
    pub bounds_policy: Option<BoundsPolicy>,
    pub update_order: Option<UpdateOrder>,
    pub pause_when_unfocused: Option<bool>,
    pub min_delta_ms: Option<f32>,
    pub max_delta_ms: Option<f32>,
    pub weights: WeightsFile,
}

impl ParamsFile {
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse parameter file")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameter file '{}'", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid parameter file '{}'", path.display()))
    }

    // Overwrite every parameter the file sets
    pub fn apply(&self, params: &mut SimulationParams) {
        fn set<T: Copy>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut params.num_boids, self.num_boids);
        set(&mut params.perception_radius, self.perception_radius);
        set(&mut params.separation_spacing, self.separation_spacing);
        set(&mut params.obstacle_margin, self.obstacle_margin);
        set(&mut params.obstacle_radius, self.obstacle_radius);
        set(&mut params.max_heading, self.max_heading);
        set(&mut params.speed, self.speed);
        set(&mut params.separation_mode, self.separation_mode);
        set(&mut params.bounds_policy, self.bounds_policy);
        set(&mut params.update_order, self.update_order);
        set(&mut params.pause_when_unfocused, self.pause_when_unfocused);
        set(&mut params.min_delta_ms, self.min_delta_ms);
        set(&mut params.max_delta_ms, self.max_delta_ms);

        set(&mut params.weights.alignment, self.weights.alignment);
        set(&mut params.weights.cohesion, self.weights.cohesion);
        set(&mut params.weights.separation, self.weights.separation);
        set(&mut params.weights.bounds, self.weights.bounds);
        set(&mut params.weights.obstacle, self.weights.obstacle);
    }
}

// Reject parameter combinations the simulation cannot run with
pub fn validate(params: &SimulationParams) -> Result<()> {
    let positive = [
        ("perception_radius", params.perception_radius),
        ("separation_spacing", params.separation_spacing),
        ("max_heading", params.max_heading),
        ("speed", params.speed),
    ];
    for (name, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            bail!("{} must be a positive number, got {}", name, value);
        }
    }

    let non_negative = [
        ("obstacle_margin", params.obstacle_margin),
        ("obstacle_radius", params.obstacle_radius),
        ("weights.alignment", params.weights.alignment),
        ("weights.cohesion", params.weights.cohesion),
        ("weights.separation", params.weights.separation),
        ("weights.bounds", params.weights.bounds),
        ("weights.obstacle", params.weights.obstacle),
        ("min_delta_ms", params.min_delta_ms),
    ];
    for (name, value) in non_negative {
        if !(value.is_finite() && value >= 0.0) {
            bail!("{} must be zero or positive, got {}", name, value);
        }
    }

    if !(params.max_delta_ms.is_finite() && params.max_delta_ms >= params.min_delta_ms) {
        bail!(
            "max_delta_ms ({}) must not be below min_delta_ms ({})",
            params.max_delta_ms,
            params.min_delta_ms
        );
    }

    Ok(())
}

// Everything the application needs to start
#[derive(Clone, Debug)]
pub struct LaunchSettings {
    pub params: SimulationParams,
    pub seed: Option<u64>,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            params: SimulationParams::default(),
            seed: None,
        }
    }
}

impl LaunchSettings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                info!("Loading parameters from {}", path.display());
                ParamsFile::load(path)?
            }
            None => ParamsFile::default(),
        };

        let settings = Self::from_layers(cli, &file)?;
        debug!("Launch parameters: {:#?}", settings.params);
        Ok(settings)
    }

    // Combine preset, file and flags
    pub fn from_layers(cli: &Cli, file: &ParamsFile) -> Result<Self> {
        let variant = cli.variant.or(file.variant).unwrap_or(Variant::Obstacle);
        let mut params = variant.params();
        file.apply(&mut params);

        if let Some(boids) = cli.boids {
            params.num_boids = boids;
        }
        if cli.sequential {
            params.update_order = UpdateOrder::Sequential;
        }

        validate(&params)?;

        Ok(Self {
            params,
            seed: cli.seed,
        })
    }
}
