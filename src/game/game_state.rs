use crate::log;

use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::Snake;
use super::types::{Direction, EndReason, GameStatus, GridSize, Point};

/// One game of snake on a fixed grid. The engine owns the body, prize, score
/// and terminal state exclusively; consumers read copies, never live buffers.
#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: GridSize,
    snake: Snake,
    prize: Option<Point>,
    score: u32,
    prize_points: u32,
    end_reason: Option<EndReason>,
}

impl GameState {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            grid: settings.grid_size(),
            snake: Snake::starting(),
            prize: None,
            score: 0,
            prize_points: settings.difficulty.prize_points(),
            end_reason: None,
        }
    }

    /// Advances the simulation by one timestep. Once the game is over this
    /// is a no-op that keeps returning `GameOver`; callers are expected to
    /// check the status and stop driving the loop.
    pub fn update(&mut self) -> GameStatus {
        if self.end_reason.is_some() {
            return GameStatus::GameOver;
        }

        if let Some(direction) = self.snake.pending_direction.take() {
            self.snake.direction = direction;
        }

        let next_head = match self.next_head_position() {
            Ok(point) => point,
            Err(reason) => return self.finish(reason),
        };

        let grow = self.prize == Some(next_head);
        self.snake.advance(next_head, grow);

        if grow {
            self.prize = None;
            self.score += self.prize_points;
            log!(
                "Prize eaten at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
        }

        GameStatus::Playing
    }

    fn next_head_position(&self) -> Result<Point, EndReason> {
        let head = self.snake.head();

        let next_head = match self.snake.direction {
            Direction::Up => {
                if head.y == 0 {
                    return Err(EndReason::WallCollision);
                }
                Point::new(head.x, head.y - 1)
            }
            Direction::Down => {
                if head.y >= self.grid.height - 1 {
                    return Err(EndReason::WallCollision);
                }
                Point::new(head.x, head.y + 1)
            }
            Direction::Left => {
                if head.x == 0 {
                    return Err(EndReason::WallCollision);
                }
                Point::new(head.x - 1, head.y)
            }
            Direction::Right => {
                if head.x >= self.grid.width - 1 {
                    return Err(EndReason::WallCollision);
                }
                Point::new(head.x + 1, head.y)
            }
        };

        // The tail cell is vacated on this same step, so the head may enter
        // it. A prize never sits on the body, so a move onto the tail cell
        // is never a growth step.
        if self.snake.occupies(&next_head) && next_head != self.snake.tail() {
            return Err(EndReason::SelfCollision);
        }

        Ok(next_head)
    }

    /// Stages a direction change for the next timestep. Exact reversals are
    /// dropped. Returns the direction that will be in effect, so callers can
    /// tell whether the request took.
    pub fn set_direction(&mut self, requested: Direction) -> Direction {
        if self.end_reason.is_none() && !requested.is_opposite(&self.snake.direction) {
            self.snake.pending_direction = Some(requested);
        }
        self.snake.pending_direction.unwrap_or(self.snake.direction)
    }

    /// Puts the prize on the given cell. The caller is responsible for
    /// picking a cell the snake does not occupy; `spawn_prize` is the
    /// checked way to get one.
    pub fn place_prize(&mut self, position: Point) {
        self.prize = Some(position);
    }

    /// Places the prize uniformly at random on a free cell. When no free
    /// cell is left the board is full and the game ends.
    pub fn spawn_prize(&mut self, rng: &mut SessionRng) -> Option<Point> {
        if self.end_reason.is_some() {
            return None;
        }

        let free_cells = self.free_cells();
        let Some(position) = rng.pick(&free_cells).copied() else {
            self.finish(EndReason::BoardFull);
            return None;
        };

        self.prize = Some(position);
        log!("Prize spawned at ({}, {})", position.x, position.y);
        Some(position)
    }

    fn free_cells(&self) -> Vec<Point> {
        let mut free = Vec::new();
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let point = Point::new(x, y);
                if !self.snake.occupies(&point) && self.prize != Some(point) {
                    free.push(point);
                }
            }
        }
        free
    }

    /// Restores the canonical starting state. Callable at any time.
    pub fn reset(&mut self) {
        self.snake = Snake::starting();
        self.prize = None;
        self.score = 0;
        self.end_reason = None;
    }

    fn finish(&mut self, reason: EndReason) -> GameStatus {
        log!("Game over: {:?}", reason);
        self.end_reason = Some(reason);
        GameStatus::GameOver
    }

    pub fn status(&self) -> GameStatus {
        if self.end_reason.is_some() {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn prize(&self) -> Option<Point> {
        self.prize
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// The occupied cells as an owned copy, head first.
    pub fn occupied_cells(&self) -> Vec<Point> {
        self.snake.body.iter().copied().collect()
    }
}
