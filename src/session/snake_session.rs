use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio::time::interval;

use crate::game::{Direction, GameSettings, GameState, GameStatus, SessionRng};
use crate::log;

use super::{GameBroadcaster, GameOverSummary, TickSnapshot};

/// Handle to one game session. Clones share the same state: an input
/// collaborator keeps a clone for `set_direction` while the tick loop owns
/// the timing. All mutation goes through one mutex, so direction and prize
/// updates are never observed half-applied by an in-flight timestep.
#[derive(Clone)]
pub struct SnakeSessionState {
    pub game_state: Arc<Mutex<GameState>>,
    pub tick: Arc<Mutex<u64>>,
    pub tick_interval: Duration,
    rng: Arc<Mutex<SessionRng>>,
    stop: Arc<Notify>,
}

impl SnakeSessionState {
    pub fn create(settings: &GameSettings, rng: SessionRng) -> Result<Self, String> {
        settings.validate()?;

        Ok(Self {
            game_state: Arc::new(Mutex::new(GameState::new(settings))),
            tick: Arc::new(Mutex::new(0u64)),
            tick_interval: settings.difficulty.tick_interval(),
            rng: Arc::new(Mutex::new(rng)),
            stop: Arc::new(Notify::new()),
        })
    }

    /// Stages a direction change. Requests landing before a tick's update
    /// affect that tick; requests landing during or after affect the next.
    /// Returns the direction actually in effect, so callers can tell
    /// whether the request was dropped as a reversal.
    pub async fn set_direction(&self, requested: Direction) -> Direction {
        self.game_state.lock().await.set_direction(requested)
    }

    /// Stops the tick loop before its next tick. Already-applied timesteps
    /// stay visible and the engine state is left consistent.
    pub fn stop(&self) {
        self.stop.notify_one();
    }

    /// Starts a fresh game on the same session after game over (or at any
    /// point the driving application wants a restart).
    pub async fn restart(&self) {
        let mut game_state = self.game_state.lock().await;
        game_state.reset();
        *self.tick.lock().await = 0;
        log!("Session restarted");
    }

    pub async fn snapshot(&self) -> TickSnapshot {
        let game_state = self.game_state.lock().await;
        let tick = *self.tick.lock().await;
        TickSnapshot::capture(&game_state, tick)
    }
}

/// Drives the session at its difficulty's tick interval until the game ends
/// or `stop` is called. The terminal tick is broadcast like any other;
/// `broadcast_game_over` follows only when the game actually ended.
pub async fn run_game_loop<B: GameBroadcaster>(
    session: SnakeSessionState,
    broadcaster: B,
) -> GameOverSummary {
    {
        let game_state = session.game_state.lock().await;
        log!(
            "Session started: {}x{} grid, tick interval {}ms",
            game_state.grid.width,
            game_state.grid.height,
            session.tick_interval.as_millis()
        );
    }

    let mut ticker = interval(session.tick_interval);

    loop {
        tokio::select! {
            _ = session.stop.notified() => break,
            _ = ticker.tick() => {}
        }

        let mut game_state = session.game_state.lock().await;
        let status = game_state.update();

        // Respawn a consumed prize; on the first tick this places the
        // initial one. A full board ends the game here.
        if status == GameStatus::Playing && game_state.prize().is_none() {
            let mut rng = session.rng.lock().await;
            game_state.spawn_prize(&mut rng);
        }

        let mut tick = session.tick.lock().await;
        *tick += 1;
        let snapshot = TickSnapshot::capture(&game_state, *tick);
        drop(tick);
        drop(game_state);

        let game_over = snapshot.status == GameStatus::GameOver;
        broadcaster.broadcast_state(snapshot).await;

        if game_over {
            break;
        }
    }

    let summary = build_game_over_summary(&session).await;
    if summary.end_reason.is_some() {
        broadcaster.broadcast_game_over(summary.clone()).await;
    }
    summary
}

async fn build_game_over_summary(session: &SnakeSessionState) -> GameOverSummary {
    let game_state = session.game_state.lock().await;
    let ticks = *session.tick.lock().await;

    GameOverSummary {
        score: game_state.score(),
        snake_length: game_state.snake().len(),
        ticks,
        end_reason: game_state.end_reason(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CellContent, Difficulty, EndReason, Point};
    use std::sync::Mutex as StdMutex;

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        snapshots: Arc<StdMutex<Vec<TickSnapshot>>>,
        summaries: Arc<StdMutex<Vec<GameOverSummary>>>,
    }

    impl RecordingBroadcaster {
        fn snapshots(&self) -> Vec<TickSnapshot> {
            self.snapshots.lock().unwrap().clone()
        }

        fn summaries(&self) -> Vec<GameOverSummary> {
            self.summaries.lock().unwrap().clone()
        }
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: TickSnapshot) {
            self.snapshots.lock().unwrap().push(snapshot);
        }

        async fn broadcast_game_over(&self, summary: GameOverSummary) {
            self.summaries.lock().unwrap().push(summary);
        }
    }

    fn easy_5x5_session() -> SnakeSessionState {
        SnakeSessionState::create(&GameSettings::default(), SessionRng::new(42))
            .expect("default settings should validate")
    }

    #[test]
    fn test_create_rejects_invalid_settings() {
        let settings = GameSettings {
            grid_width: 1,
            grid_height: 5,
            difficulty: Difficulty::Easy,
        };
        assert!(SnakeSessionState::create(&settings, SessionRng::new(42)).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_runs_until_wall_collision() {
        let session = easy_5x5_session();
        let broadcaster = RecordingBroadcaster::default();

        let summary = run_game_loop(session, broadcaster.clone()).await;

        // Head starts at x=1 and runs right: three playing ticks, then the
        // terminal one.
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.end_reason, Some(EndReason::WallCollision));

        let snapshots = broadcaster.snapshots();
        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[0].occupied_cells[0], Point::new(2, 0));
        assert!(snapshots[0].prize.is_some());
        assert_eq!(snapshots[2].status, GameStatus::Playing);
        // The terminal tick is reported too.
        assert_eq!(snapshots[3].status, GameStatus::GameOver);

        assert_eq!(broadcaster.summaries(), vec![summary]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_before_the_next_tick() {
        let session = easy_5x5_session();
        let broadcaster = RecordingBroadcaster::default();

        let handle = tokio::spawn(run_game_loop(session.clone(), broadcaster.clone()));
        // Ticks land at 0ms, 1000ms and 2000ms; stop between the third and
        // the fourth.
        tokio::time::sleep(Duration::from_millis(2500)).await;
        session.stop();
        let summary = handle.await.expect("loop task should not panic");

        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.end_reason, None);
        assert_eq!(broadcaster.snapshots().len(), 3);
        // No game over is announced for a cancelled session.
        assert!(broadcaster.summaries().is_empty());

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.occupied_cells[0], Point::new(4, 0));
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.cell_grid().at(4, 0), CellContent::Head);
    }

    #[tokio::test(start_paused = true)]
    async fn test_direction_change_applies_to_the_next_tick() {
        let session = easy_5x5_session();
        let broadcaster = RecordingBroadcaster::default();

        let handle = tokio::spawn(run_game_loop(session.clone(), broadcaster.clone()));
        // Between the ticks at 1000ms and 2000ms.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(session.set_direction(Direction::Down).await, Direction::Down);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        session.stop();
        handle.await.expect("loop task should not panic");

        let snapshots = broadcaster.snapshots();
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[1].occupied_cells[0], Point::new(3, 0));
        assert_eq!(snapshots[2].occupied_cells[0], Point::new(3, 1));
        assert_eq!(snapshots[2].direction, Direction::Down);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reversal_is_dropped_by_the_session() {
        let session = easy_5x5_session();
        assert_eq!(
            session.set_direction(Direction::Left).await,
            Direction::Right
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_game_over() {
        let session = easy_5x5_session();
        let broadcaster = RecordingBroadcaster::default();

        let summary = run_game_loop(session.clone(), broadcaster.clone()).await;
        assert_eq!(summary.end_reason, Some(EndReason::WallCollision));

        session.restart().await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(
            snapshot.occupied_cells,
            vec![Point::new(1, 0), Point::new(0, 0)]
        );
        assert_eq!(snapshot.prize, None);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.direction, Direction::Right);
    }
}
