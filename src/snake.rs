use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Cells may lie outside the grid; the engine treats that as a wall hit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body and heading. The front of `body` is the head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Creates a snake with no segments, heading down.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            body: VecDeque::new(),
            direction: Direction::Down,
        }
    }

    /// Creates a snake of `count` segments all stacked on `start`.
    #[must_use]
    pub fn stacked(start: Cell, count: usize, direction: Direction) -> Self {
        Self {
            body: std::iter::repeat_n(start, count).collect(),
            direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Returns the head, or `None` before the game is initialised.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    #[must_use]
    pub fn tail(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Appends one segment behind the tail, stepping against the heading.
    ///
    /// The new segment is derived from the head's direction rather than
    /// from the last two segments, so it can land off the body's line after
    /// a turn. Returns false when there is no tail to extend.
    pub fn grow_tail(&mut self) -> bool {
        let Some(tail) = self.tail() else {
            return false;
        };

        self.body.push_back(tail.step(self.direction.opposite()));
        true
    }

    /// Moves the snake one cell along its heading, keeping its length.
    pub fn slither(&mut self) {
        let Some(head) = self.head() else {
            return;
        };

        self.body.push_front(head.step(self.direction));
        let _ = self.body.pop_back();
    }

    /// Returns true if the head shares coordinates with any other segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let Some(head) = self.head() else {
            return false;
        };
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
