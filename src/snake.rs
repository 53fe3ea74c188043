use std::collections::VecDeque;

use crate::config::GridSize;

/// Grid position in terminal cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position moved by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when the position lies inside the bounds minus their
    /// 1-cell border.
    #[must_use]
    pub fn is_within_interior(self, bounds: GridSize) -> bool {
        self.x >= 1
            && self.y >= 1
            && self.x < i32::from(bounds.width) - 1
            && self.y < i32::from(bounds.height) - 1
    }
}

/// The snake's body, head first.
///
/// The head is stored apart from the rest of the body so a snake can never be
/// empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    /// Segments after the head, nearest first.
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a snake of `length` segments with its head at `head` and the
    /// rest trailing off to the left.
    ///
    /// A `length` of zero is treated as one.
    #[must_use]
    pub fn new(head: Position, length: usize) -> Self {
        let body = (1..length)
            .map(|offset| {
                let offset = i32::try_from(offset).unwrap_or(i32::MAX);
                Position::new(head.x.saturating_sub(offset), head.y)
            })
            .collect();

        Self { head, body }
    }

    /// Creates a snake from explicit segments (first is the head). Returns
    /// `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        let mut body = VecDeque::from(segments);
        let head = body.pop_front()?;
        Some(Self { head, body })
    }

    /// Moves the head by `delta` and every other segment onto the cell its
    /// predecessor held.
    ///
    /// Returns `(vacated_tail, new_head)`. The vacated tail is the position
    /// the last segment held before the move; the caller must hand it to
    /// either [`Snake::grow`] or an erase, exactly once.
    pub fn advance_head(&mut self, delta: (i32, i32)) -> (Position, Position) {
        let new_head = self.head.offset(delta);
        let previous_head = std::mem::replace(&mut self.head, new_head);

        self.body.push_front(previous_head);
        let vacated = self.body.pop_back().unwrap_or(previous_head);

        (vacated, new_head)
    }

    /// Appends a tail segment at `position`.
    pub fn grow(&mut self, position: Position) {
        self.body.push_back(position);
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.body.contains(&position)
    }

    /// Returns true if the head shares a cell with any other segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        self.body.contains(&self.head)
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Segments after the head, nearest first.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    /// Iterates over all segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        std::iter::once(&self.head).chain(self.body.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// A snake always has a head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;

    use super::{Position, Snake};

    fn positions(snake: &Snake) -> Vec<Position> {
        snake.segments().copied().collect()
    }

    #[test]
    fn new_snake_trails_to_the_left() {
        let snake = Snake::new(Position::new(10, 4), 3);

        assert_eq!(
            positions(&snake),
            vec![
                Position::new(10, 4),
                Position::new(9, 4),
                Position::new(8, 4)
            ]
        );
    }

    #[test]
    fn zero_length_snake_still_has_a_head() {
        let snake = Snake::new(Position::new(2, 2), 0);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.segments().last(), Some(&Position::new(2, 2)));
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert!(Snake::from_segments(Vec::new()).is_none());
    }

    #[test]
    fn advance_shifts_segments_and_returns_vacated_tail() {
        let mut snake = Snake::new(Position::new(5, 5), 3);

        let (vacated, head) = snake.advance_head((1, 0));

        assert_eq!(vacated, Position::new(3, 5));
        assert_eq!(head, Position::new(6, 5));
        assert_eq!(
            positions(&snake),
            vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(4, 5)
            ]
        );
    }

    #[test]
    fn single_segment_vacates_its_own_cell() {
        let mut snake = Snake::new(Position::new(5, 5), 1);

        let (vacated, head) = snake.advance_head((0, -1));

        assert_eq!(vacated, Position::new(5, 5));
        assert_eq!(head, Position::new(5, 4));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growing_from_vacated_tail_keeps_body_contiguous() {
        let mut snake = Snake::new(Position::new(5, 5), 2);

        let (vacated, _) = snake.advance_head((0, 1));
        snake.grow(vacated);

        assert_eq!(
            positions(&snake),
            vec![
                Position::new(5, 6),
                Position::new(5, 5),
                Position::new(4, 5)
            ]
        );
        assert_eq!(snake.segments().last(), Some(&vacated));
    }

    #[test]
    fn occupies_checks_head_and_body() {
        let snake = Snake::new(Position::new(5, 5), 3);

        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(2, 5)));
        assert!(!snake.head_overlaps_body());
    }

    #[test]
    fn interior_excludes_the_border() {
        let bounds = GridSize {
            width: 10,
            height: 6,
        };

        assert!(Position::new(1, 1).is_within_interior(bounds));
        assert!(Position::new(8, 4).is_within_interior(bounds));
        assert!(!Position::new(0, 3).is_within_interior(bounds));
        assert!(!Position::new(9, 3).is_within_interior(bounds));
        assert!(!Position::new(3, 5).is_within_interior(bounds));
        assert!(!Position::new(3, 0).is_within_interior(bounds));
    }
}
