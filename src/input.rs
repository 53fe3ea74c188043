use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` step for one move; y grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// One event read from the terminal during a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyInput {
    Direction(Direction),
    Quit,
    /// The surface changed size; carries the new `(width, height)`.
    Resize(u16, u16),
    /// Any key with no meaning to the game.
    Other,
}

/// Maps a crossterm key event to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> KeyInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyInput::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => KeyInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => KeyInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => KeyInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => KeyInput::Direction(Direction::Right),
        KeyCode::Char('q') => KeyInput::Quit,
        _ => KeyInput::Other,
    }
}

/// Waits up to `timeout` for a key press or a resize.
///
/// Returns `Ok(None)` when nothing arrived in time. Key releases and repeats,
/// mouse, focus and paste events are skipped without ending the wait.
pub fn read_input(timeout: Duration) -> io::Result<Option<KeyInput>> {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(None);
        }
        if let Some(input) = classify_event(event::read()?) {
            return Ok(Some(input));
        }
    }
}

/// Returns the game input for `event`, or `None` if it should not wake the
/// tick loop.
#[must_use]
pub fn classify_event(event: Event) -> Option<KeyInput> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(map_key(key)),
        Event::Resize(width, height) => Some(KeyInput::Resize(width, height)),
        _ => None,
    }
}

/// Blocks until any key is pressed.
pub fn wait_for_key() -> io::Result<()> {
    loop {
        if let Some(KeyInput::Direction(_) | KeyInput::Quit | KeyInput::Other) =
            classify_event(event::read()?)
        {
            return Ok(());
        }
    }
}

/// Resolves raw input into the direction of the next move.
///
/// Keeps the last accepted direction; a missing or unrecognized input, or a
/// direct reversal, repeats it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionFilter {
    last: Direction,
}

impl Default for DirectionFilter {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}

impl DirectionFilter {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self { last: initial }
    }

    /// Returns the direction to move in this tick and remembers it.
    pub fn resolve(&mut self, candidate: Option<Direction>) -> Direction {
        if let Some(direction) = candidate {
            if direction_change_is_valid(self.last, direction) {
                self.last = direction;
            }
        }
        self.last
    }

    /// Returns the last accepted direction.
    #[must_use]
    pub fn last(&self) -> Direction {
        self.last
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}
