use crate::config::GridSize;
use crate::snake::Position;

/// Drawing surface the game core paints into.
///
/// Every call is idempotent and the core never reads cells back, so an
/// implementation is free to buffer until the next flush.
pub trait Surface {
    /// Current size of the surface, border included.
    fn bounds(&self) -> GridSize;

    fn draw_head(&mut self, position: Position);

    fn draw_body(&mut self, position: Position);

    fn draw_fruit(&mut self, position: Position);

    /// Clears whatever was drawn at `position`.
    fn erase_cell(&mut self, position: Position);

    fn draw_score(&mut self, score: u32);
}
