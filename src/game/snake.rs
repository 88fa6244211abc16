use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// The snake body. `body` is ordered head first, tail last; `body_set` is an
/// occupancy index over the same cells and must always mirror `body`.
#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
}

impl Snake {
    /// The canonical two-segment starting snake: tail at (0,0), head at
    /// (1,0), travelling right.
    pub fn starting() -> Self {
        let head = Point::new(1, 0);
        let tail = Point::new(0, 0);

        let mut body = VecDeque::new();
        body.push_back(head);
        body.push_back(tail);

        Self {
            body,
            body_set: HashSet::from([head, tail]),
            direction: Direction::Right,
            pending_direction: None,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    /// Moves the head onto `next_head`. Without growth the tail cell is
    /// vacated on the same step; the occupancy index keeps the cell when the
    /// new head just entered it.
    pub fn advance(&mut self, next_head: Point, grow: bool) {
        self.body.push_front(next_head);
        self.body_set.insert(next_head);

        if !grow {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            if tail != next_head {
                self.body_set.remove(&tail);
            }
        }
    }
}
