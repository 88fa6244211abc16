pub mod config;
pub mod game;
pub mod logger;
pub mod session;

pub use game::{
    CellContent, CellGrid, Difficulty, Direction, EndReason, GameSettings, GameState, GameStatus,
    GridSize, Point, SessionRng, Snake, PRIZE_VALUE,
};
pub use session::{
    run_game_loop, GameBroadcaster, GameOverSummary, SnakeSessionState, TickSnapshot,
};
