use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Picks a random interior cell that the snake does not occupy.
///
/// x and y are drawn independently and uniformly from the interior, and the
/// draw is repeated while the snake covers the candidate. At least one free
/// interior cell must exist or this never returns.
#[must_use]
pub fn place_fruit<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, bounds: GridSize) -> Position {
    let max_x = (i32::from(bounds.width) - 2).max(1);
    let max_y = (i32::from(bounds.height) - 2).max(1);

    loop {
        let candidate = Position::new(rng.gen_range(1..=max_x), rng.gen_range(1..=max_y));
        if !snake.occupies(candidate) {
            return candidate;
        }
    }
}
