use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::GridSize;

/// Base score awarded for a prize before difficulty scaling.
pub const PRIZE_VALUE: u32 = 10;

pub const MIN_GRID_DIMENSION: usize = 2;
pub const MAX_GRID_DIMENSION: usize = 100;

/// Difficulty selects the tick interval; faster games pay more per prize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn tick_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(1000),
            Difficulty::Medium => Duration::from_millis(750),
            Difficulty::Hard => Duration::from_millis(500),
        }
    }

    pub fn from_tick_interval_ms(interval_ms: u64) -> Option<Difficulty> {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .find(|difficulty| difficulty.tick_interval().as_millis() as u64 == interval_ms)
    }

    /// Points for one prize, inversely proportional to the tick interval.
    pub fn prize_points(&self) -> u32 {
        let interval_ms = self.tick_interval().as_millis() as f64;
        (PRIZE_VALUE as f64 * (1000.0 / interval_ms)).round() as u32
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    pub difficulty: Difficulty,
}

impl GameSettings {
    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < MIN_GRID_DIMENSION || self.grid_height < MIN_GRID_DIMENSION {
            return Err(format!(
                "Grid dimensions must be at least {MIN_GRID_DIMENSION}x{MIN_GRID_DIMENSION}"
            ));
        }
        if self.grid_width > MAX_GRID_DIMENSION || self.grid_height > MAX_GRID_DIMENSION {
            return Err(format!(
                "Grid dimensions must not exceed {MAX_GRID_DIMENSION}x{MAX_GRID_DIMENSION}"
            ));
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_width: 5,
            grid_height: 5,
            difficulty: Difficulty::Easy,
        }
    }
}
