pub mod snake_session;

use std::future::Future;

use crate::game::{
    CellGrid, Direction, EndReason, GameState, GameStatus, GridSize, Point,
};

pub use snake_session::{run_game_loop, SnakeSessionState};

/// Owned copy of the engine state after one applied timestep. Consumers may
/// keep it as long as they like; it never aliases the engine's buffers.
#[derive(Clone, Debug)]
pub struct TickSnapshot {
    pub tick: u64,
    pub grid: GridSize,
    /// Occupied cells, head first.
    pub occupied_cells: Vec<Point>,
    pub prize: Option<Point>,
    pub direction: Direction,
    pub status: GameStatus,
    pub score: u32,
}

impl TickSnapshot {
    pub fn capture(state: &GameState, tick: u64) -> Self {
        Self {
            tick,
            grid: state.grid.clone(),
            occupied_cells: state.occupied_cells(),
            prize: state.prize(),
            direction: state.direction(),
            status: state.status(),
            score: state.score(),
        }
    }

    pub fn cell_grid(&self) -> CellGrid {
        CellGrid::project(self.grid.clone(), &self.occupied_cells, self.prize)
    }
}

/// How a finished session ended. `end_reason` is `None` when the loop was
/// cancelled while still playing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    pub snake_length: usize,
    pub ticks: u64,
    pub end_reason: Option<EndReason>,
}

/// Consumer side of the tick loop: a rendering or scoring collaborator that
/// receives state copies after every applied timestep.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: TickSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;
}
