use super::direction::Direction;
use ratatui::layout::{Position, Rect};
use std::collections::VecDeque;

/// Positions are absolute screen coordinates.  The head is the first cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The cells the snake occupies, head first.  Never empty.
    pub(super) cells: VecDeque<Position>,

    /// The direction in which the snake is currently moving
    pub(super) direction: Direction,
}

/// What happened when the snake tried to move
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Step {
    Moved,
    /// The head would have entered the given cell, which is off the field or
    /// part of the snake
    Crashed(Position),
}

impl Snake {
    /// Create a snake of `len` cells with its head at `head`, facing
    /// `direction`, with the rest of its body trailing straight behind it
    pub(super) fn new(head: Position, direction: Direction, len: usize) -> Snake {
        let behind = direction.reverse();
        let cells = std::iter::successors(Some(head), |&p| behind.advance(p))
            .take(len.max(1))
            .collect();
        Snake { cells, direction }
    }

    pub(super) fn head(&self) -> Position {
        self.cells.front().copied().unwrap_or_default()
    }

    pub(super) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(super) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    /// Change the snake's direction to `direction` unless the two lie on the
    /// same axis.  Returns whether the turn was accepted.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction.axis() == self.direction.axis() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    /// Move the snake forwards one cell within `field`.  Every cell takes the
    /// place of the one in front of it, so the old tail cell is vacated and
    /// may be entered by the head.  On a crash, the snake is left unchanged.
    pub(super) fn step(&mut self, field: Rect) -> Step {
        let head = self.head();
        let Some(next) = self.direction.advance(head) else {
            return Step::Crashed(head);
        };
        if !field.contains(next) {
            return Step::Crashed(next);
        }
        let keep = self.cells.len() - 1;
        if self.cells.iter().take(keep).any(|&p| p == next) {
            return Step::Crashed(next);
        }
        let _ = self.cells.pop_back();
        self.cells.push_front(next);
        Step::Moved
    }

    /// Lengthen the snake by one cell by adding a new head one step ahead of
    /// the current one
    pub(super) fn grow(&mut self) {
        if let Some(next) = self.direction.advance(self.head()) {
            self.cells.push_front(next);
        }
    }
}
