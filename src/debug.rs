/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation statistics to be displayed in the UI and the overlay.
 */

use std::time::Duration;

// Debug information to display
#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    // Whether the last frame advanced the flock
    pub stepped_last_frame: bool,
    pub total_steps: u64,
    pub mean_neighbors: f32,
    pub focused: bool,
}

impl DebugInfo {
    // Lines shown in the on-screen overlay
    pub fn lines(&self, boids_len: usize, obstacles_len: usize) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Boids: {}", boids_len),
            format!("Obstacles: {}", obstacles_len),
            format!("Steps: {}", self.total_steps),
            format!("Mean neighbors: {:.1}", self.mean_neighbors),
            format!("Updating: {}", if self.stepped_last_frame { "yes" } else { "no" }),
            format!("Focused: {}", if self.focused { "yes" } else { "no" }),
        ]
    }
}
