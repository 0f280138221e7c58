use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the game and its hosting screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub grid_size: usize,
    /// Points awarded per food consumed
    pub points_per_food: u32,
    /// Wall-clock interval between simulation ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Minimum dominant-axis displacement for a drag to count as a swipe
    pub min_swipe_distance: i32,
    /// Interval between system-settings polls, in seconds
    pub settings_poll_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 15,
            points_per_food: 10,
            tick_interval_ms: 150,
            min_swipe_distance: 30,
            settings_poll_secs: 15,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Small grid for tests
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn settings_poll_interval(&self) -> Duration {
        Duration::from_secs(self.settings_poll_secs)
    }
}
