use std::env;

use crossterm::style::available_color_count;

/// Runtime terminal capabilities relevant to this game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Platform {
    has_colors: bool,
}

impl Platform {
    /// Detects terminal details from the current runtime environment.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            has_colors: detect_colors(env::var_os("NO_COLOR").is_some(), available_color_count()),
        }
    }

    /// Returns true when the terminal can show colored cells.
    #[must_use]
    pub fn has_colors(self) -> bool {
        self.has_colors
    }
}

fn detect_colors(no_color: bool, color_count: u16) -> bool {
    !no_color && color_count >= 8
}
