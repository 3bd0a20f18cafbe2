use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::Cell;

/// One body segment of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub cell: Cell,
    pub is_head: bool,
}

/// The snake: segments oldest-first, with the head last.
///
/// Growth is deferred: `grow` only raises the target length, and the next
/// `advance` skips trimming the tail, so the snake gets one cell longer on
/// the tick after it eats.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: VecDeque<Segment>,
    target_len: usize,
}

impl Snake {
    /// Create a snake of `length` cells with its head at `head`, the body
    /// laid out behind it against `direction`
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let (dx, dy) = direction.opposite().delta();

        let segments = (0..length)
            .rev()
            .map(|i| {
                let i = i as i32;
                Segment {
                    cell: head.moved_by(dx * i, dy * i),
                    is_head: i == 0,
                }
            })
            .collect();

        Self {
            segments,
            target_len: length,
        }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.segments
            .back()
            .map(|segment| segment.cell)
            .unwrap_or(Cell::new(0, 0))
    }

    /// Get the tail cell (oldest segment)
    pub fn tail(&self) -> Cell {
        self.segments
            .front()
            .map(|segment| segment.cell)
            .unwrap_or(Cell::new(0, 0))
    }

    /// Segments oldest-first; the last one is the head
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter()
    }

    /// Check if a cell is covered by any segment other than the head
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.segments
            .iter()
            .rev()
            .skip(1)
            .any(|segment| segment.cell == cell)
    }

    /// Check if a cell is covered by any segment, head included
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.iter().any(|segment| segment.cell == cell)
    }

    /// Step one cell in `direction`, returning the new head cell.
    ///
    /// The tail is trimmed only while the snake is longer than its target.
    pub fn advance(&mut self, direction: Direction) -> Cell {
        let new_head = self.head().moved_in_direction(direction);

        if let Some(old_head) = self.segments.back_mut() {
            old_head.is_head = false;
        }
        self.segments.push_back(Segment {
            cell: new_head,
            is_head: true,
        });

        while self.segments.len() > self.target_len {
            self.segments.pop_front();
        }

        new_head
    }

    /// Raise the target length by one; the extra cell appears on the next advance
    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
