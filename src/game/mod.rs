mod game_state;
mod grid;
mod session_rng;
mod settings;
mod snake;
mod types;

pub use game_state::GameState;
pub use grid::CellGrid;
pub use session_rng::SessionRng;
pub use settings::{Difficulty, GameSettings, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION, PRIZE_VALUE};
pub use snake::Snake;
pub use types::{CellContent, Direction, EndReason, GameStatus, GridSize, Point};
