use super::game_state::GameState;
use super::types::{CellContent, GridSize, Point};

/// Row-major projection of the engine state into per-cell content tags, for
/// consumers that redraw the whole board each tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    size: GridSize,
    cells: Vec<CellContent>,
}

impl CellGrid {
    pub fn from_state(state: &GameState) -> Self {
        Self::project(state.grid.clone(), &state.snake().body, state.prize())
    }

    /// Builds the projection from body cells (head first) and the prize.
    pub fn project<'a, I>(size: GridSize, body: I, prize: Option<Point>) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut cells = vec![CellContent::Empty; size.cell_count()];

        if let Some(position) = prize {
            cells[index_of(&size, position)] = CellContent::Prize;
        }
        for (i, position) in body.into_iter().enumerate() {
            let content = if i == 0 {
                CellContent::Head
            } else {
                CellContent::Body
            };
            cells[index_of(&size, *position)] = content;
        }

        Self { size, cells }
    }

    pub fn size(&self) -> &GridSize {
        &self.size
    }

    pub fn at(&self, x: usize, y: usize) -> CellContent {
        self.cells[index_of(&self.size, Point::new(x, y))]
    }

    pub fn cells(&self) -> &[CellContent] {
        &self.cells
    }
}

fn index_of(size: &GridSize, point: Point) -> usize {
    point.y * size.width + point.x
}
