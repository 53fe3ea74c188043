use std::fmt;

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget};
use unicode_width::UnicodeWidthStr;

use crate::config::{
    DEATH_MESSAGE, GLYPH_FRUIT, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GridSize, RenderMode,
    SCORE_LABEL, SCORE_LABEL_X, SCORE_X, TITLE, TITLE_X,
};
use crate::platform::Platform;
use crate::snake::Position;
use crate::surface::Surface;

/// How snake cells look in one render mode.
pub trait Painter: fmt::Debug {
    fn paint_head(&self, cell: &mut Cell);

    fn paint_body(&self, cell: &mut Cell);

    fn erase(&self, cell: &mut Cell);
}

/// Plain characters for terminals without color support.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiPainter;

impl Painter for AsciiPainter {
    fn paint_head(&self, cell: &mut Cell) {
        cell.set_symbol(GLYPH_SNAKE_HEAD);
    }

    fn paint_body(&self, cell: &mut Cell) {
        cell.set_symbol(GLYPH_SNAKE_BODY);
    }

    fn erase(&self, cell: &mut Cell) {
        cell.set_symbol(" ");
    }
}

/// Solid colored blocks: a red head on a green body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorPainter;

impl ColorPainter {
    fn block(color: Color) -> Style {
        Style::new()
            .fg(color)
            .bg(Color::White)
            .add_modifier(Modifier::REVERSED)
    }
}

impl Painter for ColorPainter {
    fn paint_head(&self, cell: &mut Cell) {
        cell.set_symbol(" ").set_style(Self::block(Color::Red));
    }

    fn paint_body(&self, cell: &mut Cell) {
        cell.set_symbol(" ").set_style(Self::block(Color::Green));
    }

    fn erase(&self, cell: &mut Cell) {
        cell.reset();
    }
}

/// Chooses the painter once at startup.
#[must_use]
pub fn select_painter(mode: RenderMode, platform: Platform) -> Box<dyn Painter> {
    match mode {
        RenderMode::Ascii => Box::new(AsciiPainter),
        RenderMode::Color => Box::new(ColorPainter),
        RenderMode::Auto if platform.has_colors() => Box::new(ColorPainter),
        RenderMode::Auto => Box::new(AsciiPainter),
    }
}

/// Persistent screen contents the game draws into between flushes.
///
/// Unlike a ratatui frame, cells keep their contents across ticks, so the
/// game only touches what changed.
#[derive(Debug)]
pub struct Canvas {
    buffer: Buffer,
    painter: Box<dyn Painter>,
}

impl Canvas {
    /// Creates a canvas of `size` with the border, title and score label
    /// already drawn.
    #[must_use]
    pub fn new(size: GridSize, painter: Box<dyn Painter>) -> Self {
        let mut canvas = Self {
            buffer: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
            painter,
        };
        canvas.draw_frame();
        canvas
    }

    /// Discards all contents and redraws the frame at the new size.
    pub fn resize(&mut self, size: GridSize) {
        self.buffer = Buffer::empty(Rect::new(0, 0, size.width, size.height));
        self.draw_frame();
    }

    /// Returns the current contents.
    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Writes the end-of-game message in the middle of the canvas.
    pub fn show_death_message(&mut self) {
        let area = self.buffer.area;
        let half_width = u16::try_from(DEATH_MESSAGE.width() / 2).unwrap_or(u16::MAX);
        let x = (area.width / 2).saturating_sub(half_width);
        let y = area.height / 2;

        self.put_text(
            x,
            y,
            DEATH_MESSAGE,
            Style::new().add_modifier(Modifier::REVERSED | Modifier::UNDERLINED),
        );
    }

    fn draw_frame(&mut self) {
        let area = self.buffer.area;
        if area.width < 2 || area.height < 2 {
            return;
        }

        Block::bordered().render(area, &mut self.buffer);
        self.put_text(TITLE_X, 0, TITLE, Style::new());
        self.put_text(SCORE_LABEL_X, 0, SCORE_LABEL, Style::new());
    }

    /// Writes `text` at `(x, y)`, clipped to the canvas.
    fn put_text(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let area = self.buffer.area;
        if x < area.right() && y < area.bottom() {
            self.buffer.set_string(x, y, text, style);
        }
    }

    fn with_cell(&mut self, position: Position, paint: fn(&dyn Painter, &mut Cell)) {
        let Self { buffer, painter } = self;
        if let Some(cell) = cell_at(buffer, position) {
            paint(painter.as_ref(), cell);
        }
    }
}

fn cell_at(buffer: &mut Buffer, position: Position) -> Option<&mut Cell> {
    let x = u16::try_from(position.x).ok()?;
    let y = u16::try_from(position.y).ok()?;
    buffer.cell_mut((x, y))
}

impl Surface for Canvas {
    fn bounds(&self) -> GridSize {
        GridSize {
            width: self.buffer.area.width,
            height: self.buffer.area.height,
        }
    }

    fn draw_head(&mut self, position: Position) {
        self.with_cell(position, |painter, cell| painter.paint_head(cell));
    }

    fn draw_body(&mut self, position: Position) {
        self.with_cell(position, |painter, cell| painter.paint_body(cell));
    }

    fn draw_fruit(&mut self, position: Position) {
        if let Some(cell) = cell_at(&mut self.buffer, position) {
            cell.reset();
            cell.set_symbol(GLYPH_FRUIT);
        }
    }

    fn erase_cell(&mut self, position: Position) {
        self.with_cell(position, |painter, cell| painter.erase(cell));
    }

    fn draw_score(&mut self, score: u32) {
        self.put_text(SCORE_X, 0, &score.to_string(), Style::new());
    }
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = area.intersection(self.buffer.area);
        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                if let (Some(source), Some(target)) =
                    (self.buffer.cell((x, y)), buf.cell_mut((x, y)))
                {
                    target.clone_from(source);
                }
            }
        }
    }
}
