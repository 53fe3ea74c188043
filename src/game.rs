use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GridSize;
use crate::fruit::place_fruit;
use crate::input::{Direction, DirectionFilter};
use crate::snake::{Position, Snake};
use crate::surface::Surface;

/// Result of one move.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Fine,
    Eaten,
    Died,
}

/// Why a move killed the snake. Only logged; callers see [`Outcome::Died`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Collision {
    Boundary,
    SelfCollision,
}

/// Moves `snake` one cell in `direction` and classifies the result.
///
/// A move that would leave the interior dies before the body is touched. A
/// move that lands on any other segment dies after the shift, so entering
/// the cell the tail is leaving this tick is allowed. On [`Outcome::Eaten`]
/// the snake grows into the vacated tail cell and the fruit cell is erased;
/// on [`Outcome::Fine`] the vacated tail cell is erased. The fruit itself is
/// left for the caller to replace.
pub fn resolve_move<S: Surface + ?Sized>(
    snake: &mut Snake,
    fruit: Position,
    direction: Direction,
    surface: &mut S,
) -> Outcome {
    let bounds = surface.bounds();
    let candidate = snake.head().offset(direction.delta());
    if !candidate.is_within_interior(bounds) {
        return died(Collision::Boundary, candidate);
    }

    let (vacated, head) = snake.advance_head(direction.delta());
    if snake.head_overlaps_body() {
        return died(Collision::SelfCollision, head);
    }

    if head == fruit {
        snake.grow(vacated);
        surface.erase_cell(fruit);
        return Outcome::Eaten;
    }

    surface.erase_cell(vacated);
    Outcome::Fine
}

fn died(cause: Collision, at: Position) -> Outcome {
    debug!("snake died: {cause:?} at ({}, {})", at.x, at.y);
    Outcome::Died
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub fruit: Position,
    pub score: u32,
    pub tick_count: u64,
    filter: DirectionFilter,
    rng: StdRng,
}

impl GameState {
    /// Creates a session with a centered snake of `initial_length` on a
    /// surface of size `bounds`.
    #[must_use]
    pub fn new(bounds: GridSize, initial_length: usize) -> Self {
        Self::with_rng(bounds, initial_length, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, initial_length: usize, seed: u64) -> Self {
        Self::with_rng(bounds, initial_length, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, initial_length: usize, mut rng: StdRng) -> Self {
        let (x, y) = bounds.center();
        // The tail trails left of center and must stay off the border column.
        let max_length = usize::try_from(x).unwrap_or(0).max(1);
        let length = if initial_length > max_length {
            warn!("initial length {initial_length} does not fit, starting at {max_length}");
            max_length
        } else {
            initial_length
        };
        let snake = Snake::new(Position::new(x, y), length);
        let fruit = place_fruit(&mut rng, &snake, bounds);

        Self {
            snake,
            fruit,
            score: 0,
            tick_count: 0,
            filter: DirectionFilter::default(),
            rng,
        }
    }

    /// Returns the direction of the last move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.filter.last()
    }

    /// Runs one tick: resolves `input` against the last direction, moves the
    /// snake, and on a meal bumps the score and places a new fruit.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        input: Option<Direction>,
        surface: &mut S,
    ) -> Outcome {
        self.tick_count += 1;

        let direction = self.filter.resolve(input);
        let outcome = resolve_move(&mut self.snake, self.fruit, direction, surface);

        match outcome {
            Outcome::Died => return outcome,
            Outcome::Eaten => {
                self.score += 1;
                debug!("fruit eaten, score {} length {}", self.score, self.snake.len());

                let bounds = surface.bounds();
                if self.snake.len() >= bounds.interior_cells() {
                    warn!("no free cell left for the next fruit");
                }
                self.fruit = place_fruit(&mut self.rng, &self.snake, bounds);

                surface.draw_score(self.score);
                surface.draw_fruit(self.fruit);
            }
            Outcome::Fine => {}
        }

        self.draw_snake(surface);
        outcome
    }

    /// Moves the fruit back inside `bounds` after the surface shrank.
    pub fn fit_to(&mut self, bounds: GridSize) {
        if !self.fruit.is_within_interior(bounds) {
            self.fruit = place_fruit(&mut self.rng, &self.snake, bounds);
            debug!("fruit moved to ({}, {}) after resize", self.fruit.x, self.fruit.y);
        }
    }

    /// Draws score, fruit and snake from scratch.
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.draw_score(self.score);
        surface.draw_fruit(self.fruit);
        self.draw_snake(surface);
    }

    fn draw_snake<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.draw_head(self.snake.head());
        for segment in self.snake.body() {
            surface.draw_body(*segment);
        }
    }
}
